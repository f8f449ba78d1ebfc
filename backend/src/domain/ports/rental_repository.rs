//! Port abstraction for rental persistence adapters and their errors.
use async_trait::async_trait;
use pagination::{PageRequest, PaginatedResult};
use uuid::Uuid;

use crate::domain::{Rental, RentalListOptions};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by rental repository adapters.
    pub enum RentalRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "rental repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "rental repository query failed: {message}",
        /// A database constraint rejected the write.
        Constraint { constraint: String, message: String } =>
            "rental repository constraint {constraint} violated: {message}",
    }
}

/// Persistence port for rental aggregates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RentalRepository: Send + Sync {
    /// Insert a new rental record.
    async fn create(&self, rental: &Rental) -> Result<(), RentalRepositoryError>;

    /// Fetch a rental by identifier.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Rental>, RentalRepositoryError>;

    /// List rentals matching the given filters, sorted and paginated.
    async fn list(
        &self,
        options: &RentalListOptions,
    ) -> Result<PaginatedResult<Rental>, RentalRepositoryError>;

    /// List the rentals owned by one user, paginated.
    async fn list_for_owner(
        &self,
        owner_id: &Uuid,
        page: &PageRequest,
    ) -> Result<PaginatedResult<Rental>, RentalRepositoryError>;

    /// Overwrite the stored record for an existing rental.
    async fn update(&self, rental: &Rental) -> Result<(), RentalRepositoryError>;

    /// Delete a rental, reporting whether a record was removed.
    async fn delete(&self, id: &Uuid) -> Result<bool, RentalRepositoryError>;
}

//! Port abstraction for booking persistence adapters and their errors.
use async_trait::async_trait;
use pagination::{PageRequest, PaginatedResult};
use uuid::Uuid;

use crate::domain::{Booking, BookingListOptions};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by booking repository adapters.
    pub enum BookingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "booking repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "booking repository query failed: {message}",
        /// A database constraint rejected the write.
        Constraint { constraint: String, message: String } =>
            "booking repository constraint {constraint} violated: {message}",
    }
}

/// Persistence port for booking aggregates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new booking record.
    async fn create(&self, booking: &Booking) -> Result<(), BookingRepositoryError>;

    /// Fetch a booking by identifier.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Booking>, BookingRepositoryError>;

    /// List bookings matching the given filters, sorted and paginated.
    async fn list(
        &self,
        options: &BookingListOptions,
    ) -> Result<PaginatedResult<Booking>, BookingRepositoryError>;

    /// List the bookings made by one user, paginated.
    async fn list_for_user(
        &self,
        user_id: &Uuid,
        page: &PageRequest,
    ) -> Result<PaginatedResult<Booking>, BookingRepositoryError>;

    /// Overwrite the stored record for an existing booking.
    async fn update(&self, booking: &Booking) -> Result<(), BookingRepositoryError>;

    /// Delete a booking, reporting whether a record was removed.
    async fn delete(&self, id: &Uuid) -> Result<bool, BookingRepositoryError>;
}

//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;
use pagination::PaginatedResult;
use uuid::Uuid;

use crate::domain::{User, UserListOptions};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A database constraint rejected the write.
        Constraint { constraint: String, message: String } =>
            "user repository constraint {constraint} violated: {message}",
    }
}

/// Persistence port for user aggregates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user record.
    async fn create(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by exact username.
    async fn find_by_username(&self, username: &str)
    -> Result<Option<User>, UserRepositoryError>;

    /// List users matching the given filters, sorted and paginated.
    async fn list(
        &self,
        options: &UserListOptions,
    ) -> Result<PaginatedResult<User>, UserRepositoryError>;

    /// Overwrite the stored record for an existing user.
    async fn update(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Delete a user, reporting whether a record was removed.
    async fn delete(&self, id: &Uuid) -> Result<bool, UserRepositoryError>;
}

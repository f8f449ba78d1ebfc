//! Driving port for user operations.
//!
//! Inbound adapters (HTTP handlers) use this port without importing outbound
//! persistence concerns. Absent ids surface as [`Error::NotFound`]; rule
//! violations as [`Error::Validation`] carrying every failure.

use async_trait::async_trait;
use pagination::PaginatedResult;
use uuid::Uuid;

use crate::domain::ports::ImageUpload;
use crate::domain::{Error, User, UserDraft, UserListOptions};

/// Domain use-case port for managing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserManagement: Send + Sync {
    /// Validate and persist a new user.
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error>;

    /// Fetch a user by id.
    async fn get_user(&self, id: &Uuid) -> Result<User, Error>;

    /// List users matching the supplied options.
    async fn list_users(&self, options: UserListOptions) -> Result<PaginatedResult<User>, Error>;

    /// Replace every client-writable field of an existing user.
    async fn update_user(&self, id: &Uuid, draft: UserDraft) -> Result<User, Error>;

    /// Delete a user.
    async fn delete_user(&self, id: &Uuid) -> Result<(), Error>;

    /// Store a new profile image, or reset to the default when no file is
    /// supplied.
    async fn update_profile_image(
        &self,
        id: &Uuid,
        upload: Option<ImageUpload>,
    ) -> Result<(), Error>;
}

//! User domain service.
//!
//! Implements the user driving port: validate-then-persist orchestration over
//! the user repository plus profile image management over the image store.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::PaginatedResult;
use uuid::Uuid;

use crate::domain::ports::{
    ImageStore, ImageStoreError, ImageUpload, UserManagement, UserRepository, UserRepositoryError,
};
use crate::domain::validation::{ImagePolicy, validate_image, validate_user};
use crate::domain::{Error, User, UserDraft, UserListOptions};

/// Name of the unique constraint guarding usernames.
///
/// The pre-check in [`validate_user`] gives the friendly error in the common
/// case; concurrent creates can still race past it, and the database rejects
/// the loser with this constraint.
const USERNAME_UNIQUE_CONSTRAINT: &str = "users_username_key";

fn map_storage_error(error: UserRepositoryError) -> Error {
    Error::internal(error.to_string())
}

fn map_write_error(error: UserRepositoryError, username: &str) -> Error {
    match error {
        UserRepositoryError::Constraint { ref constraint, .. }
            if constraint == USERNAME_UNIQUE_CONSTRAINT =>
        {
            Error::single("Username", format!("'{username}' is already taken"))
        }
        other => map_storage_error(other),
    }
}

fn map_image_error(error: ImageStoreError) -> Error {
    Error::internal(error.to_string())
}

/// User service implementing the [`UserManagement`] driving port.
#[derive(Clone)]
pub struct UserService<R, S> {
    users: Arc<R>,
    images: Arc<S>,
    image_policy: ImagePolicy,
    default_image: String,
}

impl<R, S> UserService<R, S> {
    /// Create a new service over the user repository and image store.
    pub fn new(
        users: Arc<R>,
        images: Arc<S>,
        image_policy: ImagePolicy,
        default_image: impl Into<String>,
    ) -> Self {
        Self {
            users,
            images,
            image_policy,
            default_image: default_image.into(),
        }
    }
}

impl<R, S> UserService<R, S>
where
    R: UserRepository,
{
    /// Check whether the drafted username is held by a user other than
    /// `own_id`.
    async fn username_taken(&self, username: &str, own_id: Option<&Uuid>) -> Result<bool, Error> {
        let existing = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_storage_error)?;

        Ok(existing.is_some_and(|user| own_id != Some(&user.id)))
    }

    async fn require_user(&self, id: &Uuid) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(Error::not_found)
    }
}

#[async_trait]
impl<R, S> UserManagement for UserService<R, S>
where
    R: UserRepository,
    S: ImageStore,
{
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error> {
        let username_taken = self.username_taken(&draft.username, None).await?;
        let failures = validate_user(&draft, username_taken);
        if !failures.is_empty() {
            return Err(Error::validation(failures));
        }

        let user = User::create(draft, self.default_image.clone());
        self.users
            .create(&user)
            .await
            .map_err(|err| map_write_error(err, &user.username))?;

        Ok(user)
    }

    async fn get_user(&self, id: &Uuid) -> Result<User, Error> {
        self.require_user(id).await
    }

    async fn list_users(&self, options: UserListOptions) -> Result<PaginatedResult<User>, Error> {
        self.users.list(&options).await.map_err(map_storage_error)
    }

    async fn update_user(&self, id: &Uuid, draft: UserDraft) -> Result<User, Error> {
        let mut user = self.require_user(id).await?;

        let username_taken = self.username_taken(&draft.username, Some(id)).await?;
        let failures = validate_user(&draft, username_taken);
        if !failures.is_empty() {
            return Err(Error::validation(failures));
        }

        user.apply(draft);
        self.users
            .update(&user)
            .await
            .map_err(|err| map_write_error(err, &user.username))?;

        Ok(user)
    }

    async fn delete_user(&self, id: &Uuid) -> Result<(), Error> {
        let deleted = self.users.delete(id).await.map_err(map_storage_error)?;
        if deleted { Ok(()) } else { Err(Error::not_found()) }
    }

    async fn update_profile_image(
        &self,
        id: &Uuid,
        upload: Option<ImageUpload>,
    ) -> Result<(), Error> {
        let mut user = self.require_user(id).await?;

        match upload {
            None => {
                if user.profile_image != self.default_image {
                    self.images
                        .remove(&user.profile_image)
                        .await
                        .map_err(map_image_error)?;
                }
                user.profile_image = self.default_image.clone();
            }
            Some(upload) => {
                let failures = validate_image(Some(&upload), &self.image_policy);
                if !failures.is_empty() {
                    return Err(Error::validation(failures));
                }
                user.profile_image = self
                    .images
                    .store_user_image(&user.id, &upload)
                    .await
                    .map_err(map_image_error)?;
            }
        }

        self.users.update(&user).await.map_err(map_storage_error)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;

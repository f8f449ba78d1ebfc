//! Rental domain service.
//!
//! Implements the rental driving port: validate-then-persist orchestration
//! plus cover and gallery image management over the image store.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, PaginatedResult};
use uuid::Uuid;

use crate::domain::ports::{
    ImageStore, ImageStoreError, ImageUpload, RentalManagement, RentalRepository,
    RentalRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::validation::{ImagePolicy, validate_image, validate_rental};
use crate::domain::{Error, Rental, RentalDraft, RentalListOptions};

/// Name of the foreign key tying rentals to their owner.
///
/// Concurrent owner deletion can race past the pre-check; the database
/// rejects the orphaned write with this constraint.
const OWNER_FK_CONSTRAINT: &str = "rentals_owner_id_fkey";

fn map_storage_error(error: RentalRepositoryError) -> Error {
    Error::internal(error.to_string())
}

fn map_user_storage_error(error: UserRepositoryError) -> Error {
    Error::internal(error.to_string())
}

fn map_write_error(error: RentalRepositoryError, owner_id: &Uuid) -> Error {
    match error {
        RentalRepositoryError::Constraint { ref constraint, .. }
            if constraint == OWNER_FK_CONSTRAINT =>
        {
            Error::single(
                "OwnerId",
                format!("User with specified Id '{owner_id}' does not exist."),
            )
        }
        other => map_storage_error(other),
    }
}

fn map_image_error(error: ImageStoreError) -> Error {
    Error::internal(error.to_string())
}

/// Relative path recorded for a gallery image, matching the layout the image
/// store writes.
fn gallery_image_path(image_id: &str) -> String {
    format!("rental-images/{image_id}.png")
}

/// Rental service implementing the [`RentalManagement`] driving port.
#[derive(Clone)]
pub struct RentalService<R, U, S> {
    rentals: Arc<R>,
    users: Arc<U>,
    images: Arc<S>,
    image_policy: ImagePolicy,
    default_cover: String,
}

impl<R, U, S> RentalService<R, U, S> {
    /// Create a new service over the rental and user repositories and the
    /// image store.
    pub fn new(
        rentals: Arc<R>,
        users: Arc<U>,
        images: Arc<S>,
        image_policy: ImagePolicy,
        default_cover: impl Into<String>,
    ) -> Self {
        Self {
            rentals,
            users,
            images,
            image_policy,
            default_cover: default_cover.into(),
        }
    }
}

impl<R, U, S> RentalService<R, U, S>
where
    R: RentalRepository,
    U: UserRepository,
{
    async fn owner_exists(&self, owner_id: &Uuid) -> Result<bool, Error> {
        Ok(self
            .users
            .find_by_id(owner_id)
            .await
            .map_err(map_user_storage_error)?
            .is_some())
    }

    async fn require_rental(&self, id: &Uuid) -> Result<Rental, Error> {
        self.rentals
            .find_by_id(id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(Error::not_found)
    }
}

#[async_trait]
impl<R, U, S> RentalManagement for RentalService<R, U, S>
where
    R: RentalRepository,
    U: UserRepository,
    S: ImageStore,
{
    async fn create_rental(&self, draft: RentalDraft) -> Result<Rental, Error> {
        let owner_exists = self.owner_exists(&draft.owner_id).await?;
        let failures = validate_rental(&draft, owner_exists);
        if !failures.is_empty() {
            return Err(Error::validation(failures));
        }

        let rental = Rental::create(draft, self.default_cover.clone());
        self.rentals
            .create(&rental)
            .await
            .map_err(|err| map_write_error(err, &rental.owner_id))?;

        Ok(rental)
    }

    async fn get_rental(&self, id: &Uuid) -> Result<Rental, Error> {
        self.require_rental(id).await
    }

    async fn list_rentals(
        &self,
        options: RentalListOptions,
    ) -> Result<PaginatedResult<Rental>, Error> {
        self.rentals
            .list(&options)
            .await
            .map_err(map_storage_error)
    }

    async fn list_rentals_for_owner(
        &self,
        owner_id: &Uuid,
        page: PageRequest,
    ) -> Result<PaginatedResult<Rental>, Error> {
        if !self.owner_exists(owner_id).await? {
            return Err(Error::not_found());
        }
        self.rentals
            .list_for_owner(owner_id, &page)
            .await
            .map_err(map_storage_error)
    }

    async fn update_rental(&self, id: &Uuid, draft: RentalDraft) -> Result<Rental, Error> {
        let mut rental = self.require_rental(id).await?;

        let owner_exists = self.owner_exists(&draft.owner_id).await?;
        let failures = validate_rental(&draft, owner_exists);
        if !failures.is_empty() {
            return Err(Error::validation(failures));
        }

        rental.apply(draft);
        self.rentals
            .update(&rental)
            .await
            .map_err(|err| map_write_error(err, &rental.owner_id))?;

        Ok(rental)
    }

    async fn delete_rental(&self, id: &Uuid) -> Result<(), Error> {
        let deleted = self.rentals.delete(id).await.map_err(map_storage_error)?;
        if deleted { Ok(()) } else { Err(Error::not_found()) }
    }

    async fn update_cover_image(
        &self,
        id: &Uuid,
        upload: Option<ImageUpload>,
    ) -> Result<(), Error> {
        let mut rental = self.require_rental(id).await?;

        match upload {
            None => {
                if rental.cover_image != self.default_cover {
                    self.images
                        .remove(&rental.cover_image)
                        .await
                        .map_err(map_image_error)?;
                }
                rental.cover_image = self.default_cover.clone();
            }
            Some(upload) => {
                let failures = validate_image(Some(&upload), &self.image_policy);
                if !failures.is_empty() {
                    return Err(Error::validation(failures));
                }
                rental.cover_image = self
                    .images
                    .store_cover_image(&rental.id, &upload)
                    .await
                    .map_err(map_image_error)?;
            }
        }

        self.rentals
            .update(&rental)
            .await
            .map_err(map_storage_error)?;
        Ok(())
    }

    async fn add_gallery_image(
        &self,
        id: &Uuid,
        upload: Option<ImageUpload>,
    ) -> Result<(), Error> {
        let mut rental = self.require_rental(id).await?;

        let Some(upload) = upload else {
            return Err(Error::validation(validate_image(None, &self.image_policy)));
        };
        let failures = validate_image(Some(&upload), &self.image_policy);
        if !failures.is_empty() {
            return Err(Error::validation(failures));
        }

        let image_id = Uuid::new_v4();
        let path = self
            .images
            .store_gallery_image(&image_id, &upload)
            .await
            .map_err(map_image_error)?;

        rental.images.push(path);
        self.rentals
            .update(&rental)
            .await
            .map_err(map_storage_error)?;
        Ok(())
    }

    async fn remove_gallery_image(&self, id: &Uuid, image_id: &str) -> Result<(), Error> {
        let mut rental = self.require_rental(id).await?;

        let path = gallery_image_path(image_id);
        if !rental.images.contains(&path) {
            return Err(Error::not_found());
        }

        self.images.remove(&path).await.map_err(map_image_error)?;

        rental.images.retain(|image| image != &path);
        self.rentals
            .update(&rental)
            .await
            .map_err(map_storage_error)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "rental_service_tests.rs"]
mod tests;

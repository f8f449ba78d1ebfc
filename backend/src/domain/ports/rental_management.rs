//! Driving port for rental operations.

use async_trait::async_trait;
use pagination::{PageRequest, PaginatedResult};
use uuid::Uuid;

use crate::domain::ports::ImageUpload;
use crate::domain::{Error, Rental, RentalDraft, RentalListOptions};

/// Domain use-case port for managing rentals and their images.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RentalManagement: Send + Sync {
    /// Validate and persist a new rental.
    async fn create_rental(&self, draft: RentalDraft) -> Result<Rental, Error>;

    /// Fetch a rental by id.
    async fn get_rental(&self, id: &Uuid) -> Result<Rental, Error>;

    /// List rentals matching the supplied options.
    async fn list_rentals(
        &self,
        options: RentalListOptions,
    ) -> Result<PaginatedResult<Rental>, Error>;

    /// List the rentals owned by one user.
    async fn list_rentals_for_owner(
        &self,
        owner_id: &Uuid,
        page: PageRequest,
    ) -> Result<PaginatedResult<Rental>, Error>;

    /// Replace every client-writable field of an existing rental.
    async fn update_rental(&self, id: &Uuid, draft: RentalDraft) -> Result<Rental, Error>;

    /// Delete a rental.
    async fn delete_rental(&self, id: &Uuid) -> Result<(), Error>;

    /// Store a new cover image, or reset to the default when no file is
    /// supplied.
    async fn update_cover_image(
        &self,
        id: &Uuid,
        upload: Option<ImageUpload>,
    ) -> Result<(), Error>;

    /// Validate and append an image to the rental's gallery.
    async fn add_gallery_image(
        &self,
        id: &Uuid,
        upload: Option<ImageUpload>,
    ) -> Result<(), Error>;

    /// Remove a gallery image by its image id.
    async fn remove_gallery_image(&self, id: &Uuid, image_id: &str) -> Result<(), Error>;
}

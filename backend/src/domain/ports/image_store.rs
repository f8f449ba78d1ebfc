//! Port for storing uploaded images outside the database.
//!
//! Adapters persist the raw bytes and hand back the relative path that gets
//! recorded on the owning entity. Stored names are chosen by the adapter from
//! the supplied identifier; the uploaded file name only participates in
//! validation.
use async_trait::async_trait;
use uuid::Uuid;

use super::define_port_error;

/// An image received from a multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// File name as supplied by the client, used for extension checks.
    pub file_name: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

define_port_error! {
    /// Errors raised by image store adapters.
    pub enum ImageStoreError {
        /// Filesystem read or write failed.
        Io { message: String } => "image store failed: {message}",
    }
}

/// Port for writing and removing stored images.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store a user profile image, returning the recorded relative path.
    async fn store_user_image(
        &self,
        user_id: &Uuid,
        upload: &ImageUpload,
    ) -> Result<String, ImageStoreError>;

    /// Store a rental cover image, returning the recorded relative path.
    async fn store_cover_image(
        &self,
        rental_id: &Uuid,
        upload: &ImageUpload,
    ) -> Result<String, ImageStoreError>;

    /// Store a rental gallery image under a fresh image id.
    async fn store_gallery_image(
        &self,
        image_id: &Uuid,
        upload: &ImageUpload,
    ) -> Result<String, ImageStoreError>;

    /// Remove a stored image; a path that no longer exists is not an error.
    async fn remove(&self, path: &str) -> Result<(), ImageStoreError>;
}

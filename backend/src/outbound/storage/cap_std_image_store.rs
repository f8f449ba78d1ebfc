//! Filesystem image store rooted in a capability-scoped directory.
//!
//! All paths handed to the domain are relative to the storage root, so the
//! same strings work as URLs under a static file route and as removal keys
//! here. Stored files are always named `{id}.png`; the uploaded file name
//! only matters during validation.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use uuid::Uuid;

use crate::domain::ports::{ImageStore, ImageStoreError, ImageUpload};

/// Directory for user profile images, relative to the storage root.
const USER_IMAGE_DIR: &str = "user-images";
/// Directory for rental cover and gallery images, relative to the storage root.
const RENTAL_IMAGE_DIR: &str = "rental-images";

/// Image store writing through a `cap_std::fs::Dir` opened once at startup.
///
/// The capability handle confines every read and write to the storage root;
/// path traversal in a stored path cannot escape it.
#[derive(Clone)]
pub struct CapStdImageStore {
    root: Arc<Dir>,
}

impl CapStdImageStore {
    /// Open the store rooted at `path`, creating the directory layout if it
    /// does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`ImageStoreError::Io`] when the root or one of the image
    /// directories cannot be created or opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ImageStoreError> {
        let path = path.as_ref();
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(map_io_error)?;
        let root = Dir::open_ambient_dir(path, ambient_authority()).map_err(map_io_error)?;

        for directory in [USER_IMAGE_DIR, RENTAL_IMAGE_DIR] {
            match root.create_dir(directory) {
                Ok(()) => {}
                Err(error) if error.kind() == ErrorKind::AlreadyExists => {}
                Err(error) => return Err(map_io_error(error)),
            }
        }

        Ok(Self {
            root: Arc::new(root),
        })
    }

    fn write(&self, path: &str, bytes: &[u8]) -> Result<(), ImageStoreError> {
        self.root.write(path, bytes).map_err(map_io_error)
    }
}

fn map_io_error(error: std::io::Error) -> ImageStoreError {
    ImageStoreError::io(error.to_string())
}

#[async_trait]
impl ImageStore for CapStdImageStore {
    async fn store_user_image(
        &self,
        user_id: &Uuid,
        upload: &ImageUpload,
    ) -> Result<String, ImageStoreError> {
        let path = format!("{USER_IMAGE_DIR}/{user_id}.png");
        self.write(&path, &upload.bytes)?;
        Ok(path)
    }

    async fn store_cover_image(
        &self,
        rental_id: &Uuid,
        upload: &ImageUpload,
    ) -> Result<String, ImageStoreError> {
        let path = format!("{RENTAL_IMAGE_DIR}/{rental_id}.png");
        self.write(&path, &upload.bytes)?;
        Ok(path)
    }

    async fn store_gallery_image(
        &self,
        image_id: &Uuid,
        upload: &ImageUpload,
    ) -> Result<String, ImageStoreError> {
        let path = format!("{RENTAL_IMAGE_DIR}/{image_id}.png");
        self.write(&path, &upload.bytes)?;
        Ok(path)
    }

    async fn remove(&self, path: &str) -> Result<(), ImageStoreError> {
        match self.root.remove_file(path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(map_io_error(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    fn open_store() -> (TempDir, CapStdImageStore) {
        let dir = TempDir::new().expect("create temp dir");
        let store = CapStdImageStore::open(dir.path()).expect("open store");
        (dir, store)
    }

    fn upload(bytes: &[u8]) -> ImageUpload {
        ImageUpload {
            file_name: "photo.jpg".to_owned(),
            bytes: bytes.to_vec(),
        }
    }

    #[rstest]
    fn open_creates_the_layout_and_is_idempotent() {
        let dir = TempDir::new().expect("create temp dir");

        CapStdImageStore::open(dir.path()).expect("first open");
        CapStdImageStore::open(dir.path()).expect("second open");

        assert!(dir.path().join("user-images").is_dir());
        assert!(dir.path().join("rental-images").is_dir());
    }

    #[tokio::test]
    async fn user_images_are_stored_as_png_under_the_user_directory() {
        let (dir, store) = open_store();
        let user_id = Uuid::new_v4();

        let path = store
            .store_user_image(&user_id, &upload(&[1, 2, 3]))
            .await
            .expect("store image");

        assert_eq!(path, format!("user-images/{user_id}.png"));
        let stored = std::fs::read(dir.path().join(&path)).expect("read back");
        assert_eq!(stored, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn storing_again_overwrites_the_previous_bytes() {
        let (dir, store) = open_store();
        let rental_id = Uuid::new_v4();

        store
            .store_cover_image(&rental_id, &upload(&[1]))
            .await
            .expect("first write");
        let path = store
            .store_cover_image(&rental_id, &upload(&[9, 9]))
            .await
            .expect("second write");

        let stored = std::fs::read(dir.path().join(&path)).expect("read back");
        assert_eq!(stored, vec![9, 9]);
    }

    #[tokio::test]
    async fn gallery_images_are_keyed_by_the_image_id() {
        let (_dir, store) = open_store();
        let image_id = Uuid::new_v4();

        let path = store
            .store_gallery_image(&image_id, &upload(&[5]))
            .await
            .expect("store image");

        assert_eq!(path, format!("rental-images/{image_id}.png"));
    }

    #[tokio::test]
    async fn remove_deletes_the_stored_file() {
        let (dir, store) = open_store();
        let user_id = Uuid::new_v4();
        let path = store
            .store_user_image(&user_id, &upload(&[1]))
            .await
            .expect("store image");

        store.remove(&path).await.expect("remove stored file");

        assert!(!dir.path().join(&path).exists());
    }

    #[tokio::test]
    async fn remove_tolerates_paths_that_no_longer_exist() {
        let (_dir, store) = open_store();

        store
            .remove("user-images/absent.png")
            .await
            .expect("removing nothing succeeds");
    }
}

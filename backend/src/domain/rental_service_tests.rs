//! Tests for the rental service.

use chrono::Utc;

use super::*;
use crate::domain::ports::{MockImageStore, MockRentalRepository, MockUserRepository};
use crate::domain::{User, UserDraft};

const DEFAULT_COVER: &str = "rental-images/default.png";

fn sample_draft(owner_id: Uuid) -> RentalDraft {
    RentalDraft {
        name: "Loft".into(),
        description: "Sunny loft".into(),
        price: 120,
        owner_id,
    }
}

fn stored_owner(id: Uuid) -> User {
    let mut owner = User::create(
        UserDraft {
            username: "owner".into(),
            nickname: "owner".into(),
            email: "owner@example.com".into(),
            age: 30,
        },
        "user-images/default.png",
    );
    owner.id = id;
    owner
}

fn stored_rental(owner_id: Uuid) -> Rental {
    Rental {
        id: Uuid::new_v4(),
        name: "Loft".into(),
        description: "Sunny loft".into(),
        price: 120,
        owner_id,
        cover_image: DEFAULT_COVER.into(),
        images: Vec::new(),
        created_at: Utc::now(),
    }
}

fn service(
    rentals: MockRentalRepository,
    users: MockUserRepository,
    images: MockImageStore,
) -> RentalService<MockRentalRepository, MockUserRepository, MockImageStore> {
    RentalService::new(
        Arc::new(rentals),
        Arc::new(users),
        Arc::new(images),
        ImagePolicy::default(),
        DEFAULT_COVER,
    )
}

#[tokio::test]
async fn create_rental_assigns_default_cover_and_empty_gallery() {
    let owner_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(stored_owner(owner_id))));
    let mut rentals = MockRentalRepository::new();
    rentals.expect_create().times(1).return_once(|_| Ok(()));

    let rental = service(rentals, users, MockImageStore::new())
        .create_rental(sample_draft(owner_id))
        .await
        .expect("create succeeds");

    assert_eq!(rental.cover_image, DEFAULT_COVER);
    assert!(rental.images.is_empty());
}

#[tokio::test]
async fn create_rental_rejects_unknown_owner() {
    let owner_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(1).return_once(|_| Ok(None));
    let mut rentals = MockRentalRepository::new();
    rentals.expect_create().times(0);

    let error = service(rentals, users, MockImageStore::new())
        .create_rental(sample_draft(owner_id))
        .await
        .expect_err("unknown owner rejected");

    let failures = error.failures().expect("validation failures");
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].property_name, "OwnerId");
    assert_eq!(
        failures[0].message,
        format!("User with specified Id '{owner_id}' does not exist.")
    );
}

#[tokio::test]
async fn create_rental_translates_raced_owner_violation() {
    let owner_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(stored_owner(owner_id))));
    let mut rentals = MockRentalRepository::new();
    rentals.expect_create().times(1).return_once(|_| {
        Err(RentalRepositoryError::constraint(
            OWNER_FK_CONSTRAINT,
            "insert or update violates foreign key constraint",
        ))
    });

    let error = service(rentals, users, MockImageStore::new())
        .create_rental(sample_draft(owner_id))
        .await
        .expect_err("raced owner delete rejected");

    let failures = error.failures().expect("validation failures");
    assert_eq!(failures[0].property_name, "OwnerId");
}

#[tokio::test]
async fn update_rental_replaces_every_drafted_field() {
    let owner_id = Uuid::new_v4();
    let rental = stored_rental(owner_id);
    let id = rental.id;

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(stored_owner(owner_id))));
    let mut rentals = MockRentalRepository::new();
    rentals
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(rental)));
    rentals.expect_update().times(1).return_once(|_| Ok(()));

    let draft = RentalDraft {
        description: String::new(),
        ..sample_draft(owner_id)
    };
    let updated = service(rentals, users, MockImageStore::new())
        .update_rental(&id, draft)
        .await
        .expect("update succeeds");

    assert_eq!(updated.description, "");
    assert_eq!(updated.cover_image, DEFAULT_COVER);
}

#[tokio::test]
async fn add_gallery_image_requires_a_file() {
    let mut rentals = MockRentalRepository::new();
    rentals
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_rental(Uuid::new_v4()))));
    rentals.expect_update().times(0);

    let error = service(rentals, MockUserRepository::new(), MockImageStore::new())
        .add_gallery_image(&Uuid::new_v4(), None)
        .await
        .expect_err("missing file rejected");

    let failures = error.failures().expect("validation failures");
    assert_eq!(failures[0].message, "File is required.");
}

#[tokio::test]
async fn add_gallery_image_appends_the_stored_path() {
    let mut rentals = MockRentalRepository::new();
    rentals
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_rental(Uuid::new_v4()))));
    rentals
        .expect_update()
        .times(1)
        .withf(|rental| {
            rental.images.len() == 1 && rental.images[0].starts_with("rental-images/")
        })
        .return_once(|_| Ok(()));

    let mut images = MockImageStore::new();
    images
        .expect_store_gallery_image()
        .times(1)
        .return_once(|image_id, _| Ok(gallery_image_path(&image_id.to_string())));

    let upload = ImageUpload {
        file_name: "garden.jpeg".into(),
        bytes: vec![1, 2, 3],
    };
    service(rentals, MockUserRepository::new(), images)
        .add_gallery_image(&Uuid::new_v4(), Some(upload))
        .await
        .expect("upload succeeds");
}

#[tokio::test]
async fn remove_gallery_image_of_unlisted_id_is_not_found() {
    let mut rental = stored_rental(Uuid::new_v4());
    rental.images = vec![gallery_image_path(&Uuid::new_v4().to_string())];

    let mut rentals = MockRentalRepository::new();
    rentals
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(rental)));
    rentals.expect_update().times(0);

    let error = service(rentals, MockUserRepository::new(), MockImageStore::new())
        .remove_gallery_image(&Uuid::new_v4(), &Uuid::new_v4().to_string())
        .await
        .expect_err("unlisted image");

    assert!(matches!(error, Error::NotFound));
}

#[tokio::test]
async fn remove_gallery_image_deletes_the_file_and_the_entry() {
    let image_id = Uuid::new_v4().to_string();
    let path = gallery_image_path(&image_id);
    let removed = path.clone();

    let mut rental = stored_rental(Uuid::new_v4());
    rental.images = vec![path];

    let mut rentals = MockRentalRepository::new();
    rentals
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(rental)));
    rentals
        .expect_update()
        .times(1)
        .withf(|rental| rental.images.is_empty())
        .return_once(|_| Ok(()));

    let mut images = MockImageStore::new();
    images
        .expect_remove()
        .times(1)
        .withf(move |path| path == removed)
        .return_once(|_| Ok(()));

    service(rentals, MockUserRepository::new(), images)
        .remove_gallery_image(&Uuid::new_v4(), &image_id)
        .await
        .expect("remove succeeds");
}

#[tokio::test]
async fn reset_cover_image_restores_the_default() {
    let mut rental = stored_rental(Uuid::new_v4());
    rental.cover_image = format!("rental-images/{}.png", rental.id);
    let old_path = rental.cover_image.clone();

    let mut rentals = MockRentalRepository::new();
    rentals
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(rental)));
    rentals
        .expect_update()
        .times(1)
        .withf(|rental| rental.cover_image == DEFAULT_COVER)
        .return_once(|_| Ok(()));

    let mut images = MockImageStore::new();
    images
        .expect_remove()
        .times(1)
        .withf(move |path| path == old_path)
        .return_once(|_| Ok(()));

    service(rentals, MockUserRepository::new(), images)
        .update_cover_image(&Uuid::new_v4(), None)
        .await
        .expect("reset succeeds");
}

#[tokio::test]
async fn list_for_owner_of_missing_user_is_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(1).return_once(|_| Ok(None));
    let mut rentals = MockRentalRepository::new();
    rentals.expect_list_for_owner().times(0);

    let error = service(rentals, users, MockImageStore::new())
        .list_rentals_for_owner(&Uuid::new_v4(), PageRequest::default())
        .await
        .expect_err("missing owner");

    assert!(matches!(error, Error::NotFound));
}

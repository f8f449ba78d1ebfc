//! Tests for the user service.

use chrono::Utc;

use super::*;
use crate::domain::ports::{MockImageStore, MockUserRepository};

const DEFAULT_IMAGE: &str = "user-images/default.png";

fn sample_draft() -> UserDraft {
    UserDraft {
        username: "usr4".into(),
        nickname: "nick4".into(),
        email: "user4@gmail.com".into(),
        age: 25,
    }
}

fn stored_user() -> User {
    User {
        id: Uuid::new_v4(),
        username: "usr4".into(),
        nickname: "nick4".into(),
        email: "user4@gmail.com".into(),
        age: 25,
        profile_image: DEFAULT_IMAGE.into(),
        created_at: Utc::now(),
    }
}

fn service(
    users: MockUserRepository,
    images: MockImageStore,
) -> UserService<MockUserRepository, MockImageStore> {
    UserService::new(
        Arc::new(users),
        Arc::new(images),
        ImagePolicy::default(),
        DEFAULT_IMAGE,
    )
}

#[tokio::test]
async fn create_user_assigns_the_default_image() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .times(1)
        .return_once(|_| Ok(None));
    users.expect_create().times(1).return_once(|_| Ok(()));

    let user = service(users, MockImageStore::new())
        .create_user(sample_draft())
        .await
        .expect("create succeeds");

    assert_eq!(user.username, "usr4");
    assert_eq!(user.profile_image, DEFAULT_IMAGE);
}

#[tokio::test]
async fn create_user_rejects_taken_username() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .times(1)
        .return_once(|_| Ok(Some(stored_user())));
    users.expect_create().times(0);

    let error = service(users, MockImageStore::new())
        .create_user(sample_draft())
        .await
        .expect_err("duplicate username rejected");

    let failures = error.failures().expect("validation failures");
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].property_name, "Username");
    assert_eq!(failures[0].message, "'usr4' is already taken");
}

#[tokio::test]
async fn create_user_collects_every_failure() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .times(1)
        .return_once(|_| Ok(None));
    users.expect_create().times(0);

    let draft = UserDraft {
        username: String::new(),
        nickname: String::new(),
        email: String::new(),
        age: 12,
    };
    let error = service(users, MockImageStore::new())
        .create_user(draft)
        .await
        .expect_err("invalid draft rejected");

    assert_eq!(error.failures().map(<[_]>::len), Some(4));
}

#[tokio::test]
async fn create_user_translates_raced_unique_violation() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .times(1)
        .return_once(|_| Ok(None));
    users.expect_create().times(1).return_once(|_| {
        Err(UserRepositoryError::constraint(
            USERNAME_UNIQUE_CONSTRAINT,
            "duplicate key value violates unique constraint",
        ))
    });

    let error = service(users, MockImageStore::new())
        .create_user(sample_draft())
        .await
        .expect_err("raced duplicate rejected");

    let failures = error.failures().expect("validation failures");
    assert_eq!(failures[0].message, "'usr4' is already taken");
}

#[tokio::test]
async fn update_user_keeps_its_own_username() {
    let existing = stored_user();
    let id = existing.id;
    let lookup = existing.clone();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    users
        .expect_find_by_username()
        .times(1)
        .return_once(move |_| Ok(Some(lookup)));
    users.expect_update().times(1).return_once(|_| Ok(()));

    let draft = UserDraft {
        nickname: "renamed".into(),
        ..sample_draft()
    };
    let updated = service(users, MockImageStore::new())
        .update_user(&id, draft)
        .await
        .expect("same username accepted");

    assert_eq!(updated.id, id);
    assert_eq!(updated.nickname, "renamed");
}

#[tokio::test]
async fn update_user_of_missing_id_is_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(1).return_once(|_| Ok(None));
    users.expect_update().times(0);

    let error = service(users, MockImageStore::new())
        .update_user(&Uuid::new_v4(), sample_draft())
        .await
        .expect_err("missing user");

    assert!(matches!(error, Error::NotFound));
}

#[tokio::test]
async fn delete_user_reports_not_found_when_nothing_was_removed() {
    let mut users = MockUserRepository::new();
    users.expect_delete().times(1).return_once(|_| Ok(false));

    let error = service(users, MockImageStore::new())
        .delete_user(&Uuid::new_v4())
        .await
        .expect_err("nothing deleted");

    assert!(matches!(error, Error::NotFound));
}

#[tokio::test]
async fn list_users_maps_storage_failures_to_internal() {
    let mut users = MockUserRepository::new();
    users
        .expect_list()
        .times(1)
        .return_once(|_| Err(UserRepositoryError::connection("pool unavailable")));

    let error = service(users, MockImageStore::new())
        .list_users(UserListOptions::default())
        .await
        .expect_err("storage failure surfaces");

    assert!(matches!(error, Error::Internal { .. }));
}

#[tokio::test]
async fn reset_profile_image_removes_the_old_file() {
    let mut user = stored_user();
    user.profile_image = format!("user-images/{}.png", user.id);
    let old_path = user.profile_image.clone();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(user)));
    users
        .expect_update()
        .times(1)
        .withf(|user| user.profile_image == DEFAULT_IMAGE)
        .return_once(|_| Ok(()));

    let mut images = MockImageStore::new();
    images
        .expect_remove()
        .times(1)
        .withf(move |path| path == old_path)
        .return_once(|_| Ok(()));

    service(users, images)
        .update_profile_image(&Uuid::new_v4(), None)
        .await
        .expect("reset succeeds");
}

#[tokio::test]
async fn reset_profile_image_leaves_the_default_file_alone() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_user())));
    users.expect_update().times(1).return_once(|_| Ok(()));

    let mut images = MockImageStore::new();
    images.expect_remove().times(0);

    service(users, images)
        .update_profile_image(&Uuid::new_v4(), None)
        .await
        .expect("reset succeeds");
}

#[tokio::test]
async fn upload_profile_image_records_the_stored_path() {
    let user = stored_user();
    let stored = format!("user-images/{}.png", user.id);
    let expected = stored.clone();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(user)));
    users
        .expect_update()
        .times(1)
        .withf(move |user| user.profile_image == expected)
        .return_once(|_| Ok(()));

    let mut images = MockImageStore::new();
    images
        .expect_store_user_image()
        .times(1)
        .return_once(move |_, _| Ok(stored));

    let upload = ImageUpload {
        file_name: "avatar.png".into(),
        bytes: vec![1, 2, 3],
    };
    service(users, images)
        .update_profile_image(&Uuid::new_v4(), Some(upload))
        .await
        .expect("upload succeeds");
}

#[tokio::test]
async fn upload_profile_image_rejects_other_file_types() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_user())));
    users.expect_update().times(0);

    let mut images = MockImageStore::new();
    images.expect_store_user_image().times(0);

    let upload = ImageUpload {
        file_name: "avatar.gif".into(),
        bytes: vec![1, 2, 3],
    };
    let error = service(users, images)
        .update_profile_image(&Uuid::new_v4(), Some(upload))
        .await
        .expect_err("gif rejected");

    let failures = error.failures().expect("validation failures");
    assert_eq!(
        failures[0].message,
        "Invalid file type. Only jpg, jpeg, and png are allowed."
    );
}

//! User aggregate.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered platform user.
///
/// ## Invariants
/// - `id` and `created_at` are assigned at construction and never change.
/// - `profile_image` is managed only by the image endpoints; scalar updates
///   leave it untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub nickname: String,
    pub email: String,
    pub age: i32,
    pub profile_image: String,
    pub created_at: DateTime<Utc>,
}

/// Client-suppliable user fields, validated before they reach a [`User`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub username: String,
    pub nickname: String,
    pub email: String,
    pub age: i32,
}

impl User {
    /// Construct a new user with a generated id and creation timestamp.
    pub fn create(draft: UserDraft, profile_image: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: draft.username,
            nickname: draft.nickname,
            email: draft.email,
            age: draft.age,
            profile_image: profile_image.into(),
            created_at: Utc::now(),
        }
    }

    /// Replace every client-suppliable scalar field with the draft's values.
    ///
    /// This is a full replace, not a merge: fields the client omitted arrive
    /// here as their serde defaults and clobber the stored values.
    pub fn apply(&mut self, draft: UserDraft) {
        self.username = draft.username;
        self.nickname = draft.nickname;
        self.email = draft.email;
        self.age = draft.age;
    }
}

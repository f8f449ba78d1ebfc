//! Rental aggregate: a bookable property listing owned by a user.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A property listing.
///
/// ## Invariants
/// - `id` and `created_at` are assigned at construction and never change.
/// - `cover_image` and `images` are managed only by the image endpoints;
///   scalar updates leave them untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rental {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: i32,
    pub owner_id: Uuid,
    pub cover_image: String,
    /// Gallery image paths, in upload order.
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Client-suppliable rental fields, validated before they reach a [`Rental`].
///
/// A missing `ownerId` in the request deserialises to the nil UUID, which the
/// owner-existence rule then rejects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RentalDraft {
    pub name: String,
    pub description: String,
    pub price: i32,
    pub owner_id: Uuid,
}

impl Rental {
    /// Construct a new rental with a generated id, an empty gallery, and the
    /// configured default cover image.
    pub fn create(draft: RentalDraft, cover_image: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            owner_id: draft.owner_id,
            cover_image: cover_image.into(),
            images: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Replace every client-suppliable scalar field with the draft's values.
    pub fn apply(&mut self, draft: RentalDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.price = draft.price;
        self.owner_id = draft.owner_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn create_starts_with_empty_gallery() {
        let rental = Rental::create(
            RentalDraft {
                name: "Seaside flat".into(),
                description: "Two rooms".into(),
                price: 120,
                owner_id: Uuid::new_v4(),
            },
            "rental-images/default.png",
        );

        assert!(rental.images.is_empty());
        assert_eq!(rental.cover_image, "rental-images/default.png");
    }

    #[rstest]
    fn apply_clobbers_omitted_fields_but_not_images() {
        let mut rental = Rental::create(
            RentalDraft {
                name: "Seaside flat".into(),
                description: "Two rooms".into(),
                price: 120,
                owner_id: Uuid::new_v4(),
            },
            "rental-images/default.png",
        );
        rental.images.push("rental-images/one.png".into());
        let owner = Uuid::new_v4();

        rental.apply(RentalDraft {
            name: "Seaside flat".into(),
            description: String::new(),
            price: 90,
            owner_id: owner,
        });

        assert_eq!(rental.description, "");
        assert_eq!(rental.price, 90);
        assert_eq!(rental.owner_id, owner);
        assert_eq!(rental.images, vec!["rental-images/one.png".to_owned()]);
    }
}

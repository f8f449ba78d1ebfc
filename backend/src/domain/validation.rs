//! Entity validation rules.
//!
//! Every rule for an entity is evaluated and all failures are collected, so a
//! single response can report every violation at once. The lookups the rules
//! depend on (username taken, referenced ids present) are performed by the
//! services and passed in as facts, keeping these functions pure.

use rust_decimal::Decimal;

use crate::domain::ports::ImageUpload;
use crate::domain::{BookingDraft, RentalDraft, UserDraft, ValidationFailure};

/// Maximum length accepted for username and nickname.
const MAX_NAME_LENGTH: usize = 255;

/// Minimum accepted age.
const MIN_AGE: i32 = 18;

const ALLOWED_IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Upload size policy for image endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePolicy {
    /// Largest accepted upload in bytes.
    pub max_bytes: usize,
}

impl ImagePolicy {
    /// Policy with an explicit byte limit.
    #[must_use]
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    /// The limit expressed in whole mebibytes, as quoted in failure messages.
    #[must_use]
    pub fn limit_in_mebibytes(&self) -> usize {
        self.max_bytes / 1024 / 1024
    }
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self::new(5 * 1024 * 1024)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn exceeds_max_length(value: &str) -> bool {
    value.chars().count() > MAX_NAME_LENGTH
}

/// Validate a user draft. `username_taken` reports whether another user
/// already holds the drafted username; the caller excludes the candidate's
/// own id when updating so a user can keep their current name.
pub fn validate_user(draft: &UserDraft, username_taken: bool) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();

    if is_blank(&draft.username) {
        failures.push(ValidationFailure::new(
            "Username",
            format!(
                "'{}' is not a valid username. Username must not be empty",
                draft.username
            ),
        ));
    }
    if exceeds_max_length(&draft.username) {
        failures.push(ValidationFailure::new(
            "Username",
            format!(
                "'{}' exceeds the maximum length of {MAX_NAME_LENGTH} characters",
                draft.username
            ),
        ));
    }
    if username_taken {
        failures.push(ValidationFailure::new(
            "Username",
            format!("'{}' is already taken", draft.username),
        ));
    }

    if is_blank(&draft.nickname) {
        failures.push(ValidationFailure::new(
            "Nickname",
            format!(
                "'{}' is not a valid nickname. Nickname must not be empty",
                draft.nickname
            ),
        ));
    }
    if exceeds_max_length(&draft.nickname) {
        failures.push(ValidationFailure::new(
            "Nickname",
            format!(
                "'{}' exceeds the maximum length of {MAX_NAME_LENGTH} characters",
                draft.nickname
            ),
        ));
    }

    if draft.age < MIN_AGE {
        failures.push(ValidationFailure::new(
            "Age",
            format!(
                "'{}' is not valid. Age must be greater than or equal to {MIN_AGE}",
                draft.age
            ),
        ));
    }

    if is_blank(&draft.email) {
        failures.push(ValidationFailure::new(
            "Email",
            format!(
                "'{}' is not a valid email. Email must not be empty",
                draft.email
            ),
        ));
    }

    failures
}

/// Validate a rental draft. `owner_exists` reports whether the drafted owner
/// id resolved to a stored user.
pub fn validate_rental(draft: &RentalDraft, owner_exists: bool) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();

    if is_blank(&draft.name) {
        failures.push(ValidationFailure::new("Name", "'Name' must not be empty."));
    }

    if draft.price < 0 {
        failures.push(ValidationFailure::new(
            "Price",
            "Price must be greater than or equal to 0.",
        ));
    }

    if !owner_exists {
        failures.push(ValidationFailure::new(
            "OwnerId",
            format!(
                "User with specified Id '{}' does not exist.",
                draft.owner_id
            ),
        ));
    }

    failures
}

/// Validate a booking draft against the presence of its referenced entities.
pub fn validate_booking(
    draft: &BookingDraft,
    user_exists: bool,
    rental_exists: bool,
) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();

    if !user_exists {
        failures.push(ValidationFailure::new(
            "UserId",
            format!("User with specified Id '{}' does not exist.", draft.user_id),
        ));
    }

    if !rental_exists {
        failures.push(ValidationFailure::new(
            "RentalId",
            format!(
                "Rental with specified Id '{}' does not exist.",
                draft.rental_id
            ),
        ));
    }

    if draft.amount_paid < Decimal::ZERO {
        failures.push(ValidationFailure::new(
            "AmountPaid",
            "Amount paid must be greater than or equal to 0.",
        ));
    }

    failures
}

/// Validate an image upload where a file is mandatory.
///
/// The extension check reads the uploaded file name; the stored name is
/// chosen by the image store and is not derived from it.
pub fn validate_image(upload: Option<&ImageUpload>, policy: &ImagePolicy) -> Vec<ValidationFailure> {
    let Some(upload) = upload else {
        return vec![ValidationFailure::new("File", "File is required.")];
    };

    let mut failures = Vec::new();

    let extension = upload
        .file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    let allowed = extension
        .as_deref()
        .is_some_and(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext));
    if !allowed {
        failures.push(ValidationFailure::new(
            "File",
            "Invalid file type. Only jpg, jpeg, and png are allowed.",
        ));
    }

    if upload.bytes.len() > policy.max_bytes {
        failures.push(ValidationFailure::new(
            "File",
            format!(
                "File size must be less than {} MB.",
                policy.limit_in_mebibytes()
            ),
        ));
    }

    failures
}

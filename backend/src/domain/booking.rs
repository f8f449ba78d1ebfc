//! Booking aggregate and its status enum.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle state of a booking.
///
/// Wire and storage representation is the PascalCase variant name. The list
/// filter additionally accepts the sentinel `All`, which is never a persisted
/// state and therefore not a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum BookingStatus {
    #[default]
    Pending,
    AwaitingPayment,
    Confirmed,
    Cancelled,
    Refunded,
}

/// Error for status strings outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{raw}' is not a valid booking status")]
pub struct BookingStatusParseError {
    pub raw: String,
}

impl BookingStatus {
    /// Wire and storage name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::AwaitingPayment => "AwaitingPayment",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
            Self::Refunded => "Refunded",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = BookingStatusParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "Pending" => Ok(Self::Pending),
            "AwaitingPayment" => Ok(Self::AwaitingPayment),
            "Confirmed" => Ok(Self::Confirmed),
            "Cancelled" => Ok(Self::Cancelled),
            "Refunded" => Ok(Self::Refunded),
            _ => Err(BookingStatusParseError { raw: raw.into() }),
        }
    }
}

/// A reservation of a rental by a user for a date range.
///
/// ## Invariants
/// - `id` and `created_at` are assigned at construction and never change.
/// - A newly created booking is always `Pending` regardless of client input.
/// - Date bounds are stored as supplied; overlapping bookings are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: Uuid,
    pub rental_id: Uuid,
    pub user_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub amount_paid: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// Client-suppliable booking fields, validated before they reach a
/// [`Booking`]. The `status` field only matters on update; create ignores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub rental_id: Uuid,
    pub user_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub amount_paid: Decimal,
    pub status: BookingStatus,
}

impl Booking {
    /// Construct a new booking with a generated id, forcing status `Pending`.
    pub fn create(draft: BookingDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            rental_id: draft.rental_id,
            user_id: draft.user_id,
            check_in: draft.check_in,
            check_out: draft.check_out,
            amount_paid: draft.amount_paid,
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Replace every client-suppliable field with the draft's values.
    ///
    /// Status transitions are unrestricted: any stored status may be replaced
    /// by any other.
    pub fn apply(&mut self, draft: BookingDraft) {
        self.rental_id = draft.rental_id;
        self.user_id = draft.user_id;
        self.check_in = draft.check_in;
        self.check_out = draft.check_out;
        self.amount_paid = draft.amount_paid;
        self.status = draft.status;
    }
}

//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::schema::{bookings, rentals, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub nickname: String,
    pub email: String,
    pub age: i32,
    pub profile_image: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
///
/// `created_at` is written explicitly so the stored value matches the one the
/// entity already carries and returns to the client.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub nickname: &'a str,
    pub email: &'a str,
    pub age: i32,
    pub profile_image: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Changeset struct for updating existing user records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub username: &'a str,
    pub nickname: &'a str,
    pub email: &'a str,
    pub age: i32,
    pub profile_image: &'a str,
}

// ---------------------------------------------------------------------------
// Rental models
// ---------------------------------------------------------------------------

/// Row struct for reading from the rentals table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rentals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RentalRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: i32,
    pub owner_id: Uuid,
    pub cover_image: String,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new rental records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rentals)]
pub(crate) struct NewRentalRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
    pub price: i32,
    pub owner_id: Uuid,
    pub cover_image: &'a str,
    pub images: &'a [String],
    pub created_at: DateTime<Utc>,
}

/// Changeset struct for updating existing rental records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = rentals)]
pub(crate) struct RentalChangeset<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub price: i32,
    pub owner_id: Uuid,
    pub cover_image: &'a str,
    pub images: &'a [String],
}

// ---------------------------------------------------------------------------
// Booking models
// ---------------------------------------------------------------------------

/// Row struct for reading from the bookings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookingRow {
    pub id: Uuid,
    pub rental_id: Uuid,
    pub user_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub amount_paid: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new booking records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub(crate) struct NewBookingRow<'a> {
    pub id: Uuid,
    pub rental_id: Uuid,
    pub user_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub amount_paid: Decimal,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Changeset struct for updating existing booking records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = bookings)]
pub(crate) struct BookingChangeset<'a> {
    pub rental_id: Uuid,
    pub user_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub amount_paid: Decimal,
    pub status: &'a str,
}

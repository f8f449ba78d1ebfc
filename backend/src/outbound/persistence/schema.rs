//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Registered users.
    ///
    /// The `id` column is the primary key (UUID v4). Usernames are unique
    /// via the `users_username_key` constraint.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name (max 255 characters).
        username -> Varchar,
        /// Display name (max 255 characters).
        nickname -> Varchar,
        /// Contact address; stored as supplied, no format constraint.
        email -> Varchar,
        /// Age in years.
        age -> Int4,
        /// Relative path of the stored profile image.
        profile_image -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Bookable property listings.
    ///
    /// Each rental is owned by one user; deleting the owner cascades here.
    rentals (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Listing title.
        name -> Varchar,
        /// Free-form listing description.
        description -> Varchar,
        /// Nightly price in whole currency units.
        price -> Int4,
        /// Owning user id (`rentals_owner_id_fkey`).
        owner_id -> Uuid,
        /// Relative path of the stored cover image.
        cover_image -> Varchar,
        /// Relative paths of the gallery images.
        images -> Array<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Reservations of rentals by users.
    ///
    /// Deleting the referenced user or rental cascades here.
    bookings (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Booked rental id (`bookings_rental_id_fkey`).
        rental_id -> Uuid,
        /// Booking user id (`bookings_user_id_fkey`).
        user_id -> Uuid,
        /// Stay start.
        check_in -> Timestamptz,
        /// Stay end.
        check_out -> Timestamptz,
        /// Exact payment amount.
        amount_paid -> Numeric,
        /// Booking status stored by name.
        status -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(rentals -> users (owner_id));
diesel::joinable!(bookings -> rentals (rental_id));
diesel::joinable!(bookings -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, rentals, bookings);

//! Domain entities, validation rules and services.
//!
//! Purpose: Define the strongly typed core of the booking platform. Entities
//! are plain data with documented invariants; validation collects every rule
//! failure; services orchestrate validate-then-persist over the ports in
//! [`ports`].
//!
//! Public surface:
//! - Entities: [`User`], [`Rental`], [`Booking`] with their `*Draft` inputs.
//! - [`Error`] / [`ValidationFailure`] — transport-agnostic failure shapes.
//! - Listing options and sort allow-lists in [`query`].
//! - Services: [`UserService`], [`RentalService`], [`BookingService`].

pub mod booking;
mod booking_service;
pub mod error;
pub mod ports;
pub mod query;
pub mod rental;
mod rental_service;
pub mod user;
mod user_service;
pub mod validation;

pub use self::booking::{Booking, BookingDraft, BookingStatus, BookingStatusParseError};
pub use self::booking_service::BookingService;
pub use self::error::{Error, ValidationFailure};
pub use self::query::{
    BookingListOptions, BookingSortField, RentalListOptions, RentalSortField, SortKey, SortOrder,
    SortParseError, SortSpec, UserListOptions, UserSortField, parse_sort_by,
};
pub use self::rental::{Rental, RentalDraft};
pub use self::rental_service::RentalService;
pub use self::user::{User, UserDraft};
pub use self::user_service::UserService;
pub use self::validation::ImagePolicy;

//! HTTP inbound adapter exposing REST endpoints.

pub mod bookings;
pub mod error;
pub mod health;
pub mod params;
pub mod rentals;
pub mod state;
pub mod uploads;
pub mod users;

pub use error::ApiResult;

//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{BookingManagement, RentalManagement, UserManagement};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserManagement>,
    pub rentals: Arc<dyn RentalManagement>,
    pub bookings: Arc<dyn BookingManagement>,
}

impl HttpState {
    /// Construct state from the three use-case ports.
    pub fn new(
        users: Arc<dyn UserManagement>,
        rentals: Arc<dyn RentalManagement>,
        bookings: Arc<dyn BookingManagement>,
    ) -> Self {
        Self {
            users,
            rentals,
            bookings,
        }
    }
}

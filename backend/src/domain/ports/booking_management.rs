//! Driving port for booking operations.

use async_trait::async_trait;
use pagination::{PageRequest, PaginatedResult};
use uuid::Uuid;

use crate::domain::{Booking, BookingDraft, BookingListOptions, Error};

/// Domain use-case port for managing bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingManagement: Send + Sync {
    /// Validate and persist a new booking. The stored booking always starts
    /// out pending, whatever status the draft carries.
    async fn create_booking(&self, draft: BookingDraft) -> Result<Booking, Error>;

    /// Fetch a booking by id.
    async fn get_booking(&self, id: &Uuid) -> Result<Booking, Error>;

    /// List bookings matching the supplied options.
    async fn list_bookings(
        &self,
        options: BookingListOptions,
    ) -> Result<PaginatedResult<Booking>, Error>;

    /// List the bookings made by one user.
    async fn list_bookings_for_user(
        &self,
        user_id: &Uuid,
        page: PageRequest,
    ) -> Result<PaginatedResult<Booking>, Error>;

    /// Replace every client-writable field of an existing booking, status
    /// included.
    async fn update_booking(&self, id: &Uuid, draft: BookingDraft) -> Result<Booking, Error>;

    /// Delete a booking.
    async fn delete_booking(&self, id: &Uuid) -> Result<(), Error>;
}

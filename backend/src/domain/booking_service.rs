//! Booking domain service.
//!
//! Implements the booking driving port. Referential rules need both the user
//! and rental repositories; the booking repository does the persisting.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, PaginatedResult};
use uuid::Uuid;

use crate::domain::ports::{
    BookingManagement, BookingRepository, BookingRepositoryError, RentalRepository,
    RentalRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::validation::validate_booking;
use crate::domain::{Booking, BookingDraft, BookingListOptions, Error};

/// Foreign keys backing the referential pre-checks. Concurrent deletes can
/// race past those checks; the database rejects the loser with one of these.
const USER_FK_CONSTRAINT: &str = "bookings_user_id_fkey";
const RENTAL_FK_CONSTRAINT: &str = "bookings_rental_id_fkey";

fn map_storage_error(error: BookingRepositoryError) -> Error {
    Error::internal(error.to_string())
}

fn map_write_error(error: BookingRepositoryError, booking: &Booking) -> Error {
    match error {
        BookingRepositoryError::Constraint { ref constraint, .. }
            if constraint == USER_FK_CONSTRAINT =>
        {
            Error::single(
                "UserId",
                format!(
                    "User with specified Id '{}' does not exist.",
                    booking.user_id
                ),
            )
        }
        BookingRepositoryError::Constraint { ref constraint, .. }
            if constraint == RENTAL_FK_CONSTRAINT =>
        {
            Error::single(
                "RentalId",
                format!(
                    "Rental with specified Id '{}' does not exist.",
                    booking.rental_id
                ),
            )
        }
        other => map_storage_error(other),
    }
}

/// Booking service implementing the [`BookingManagement`] driving port.
#[derive(Clone)]
pub struct BookingService<B, U, R> {
    bookings: Arc<B>,
    users: Arc<U>,
    rentals: Arc<R>,
}

impl<B, U, R> BookingService<B, U, R> {
    /// Create a new service over the booking, user and rental repositories.
    pub fn new(bookings: Arc<B>, users: Arc<U>, rentals: Arc<R>) -> Self {
        Self {
            bookings,
            users,
            rentals,
        }
    }
}

impl<B, U, R> BookingService<B, U, R>
where
    B: BookingRepository,
    U: UserRepository,
    R: RentalRepository,
{
    async fn user_exists(&self, user_id: &Uuid) -> Result<bool, Error> {
        Ok(self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|err: UserRepositoryError| Error::internal(err.to_string()))?
            .is_some())
    }

    async fn rental_exists(&self, rental_id: &Uuid) -> Result<bool, Error> {
        Ok(self
            .rentals
            .find_by_id(rental_id)
            .await
            .map_err(|err: RentalRepositoryError| Error::internal(err.to_string()))?
            .is_some())
    }

    async fn check_references(&self, draft: &BookingDraft) -> Result<(), Error> {
        let user_exists = self.user_exists(&draft.user_id).await?;
        let rental_exists = self.rental_exists(&draft.rental_id).await?;

        let failures = validate_booking(draft, user_exists, rental_exists);
        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(failures))
        }
    }

    async fn require_booking(&self, id: &Uuid) -> Result<Booking, Error> {
        self.bookings
            .find_by_id(id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(Error::not_found)
    }
}

#[async_trait]
impl<B, U, R> BookingManagement for BookingService<B, U, R>
where
    B: BookingRepository,
    U: UserRepository,
    R: RentalRepository,
{
    async fn create_booking(&self, draft: BookingDraft) -> Result<Booking, Error> {
        self.check_references(&draft).await?;

        let booking = Booking::create(draft);
        self.bookings
            .create(&booking)
            .await
            .map_err(|err| map_write_error(err, &booking))?;

        Ok(booking)
    }

    async fn get_booking(&self, id: &Uuid) -> Result<Booking, Error> {
        self.require_booking(id).await
    }

    async fn list_bookings(
        &self,
        options: BookingListOptions,
    ) -> Result<PaginatedResult<Booking>, Error> {
        self.bookings
            .list(&options)
            .await
            .map_err(map_storage_error)
    }

    async fn list_bookings_for_user(
        &self,
        user_id: &Uuid,
        page: PageRequest,
    ) -> Result<PaginatedResult<Booking>, Error> {
        if !self.user_exists(user_id).await? {
            return Err(Error::not_found());
        }
        self.bookings
            .list_for_user(user_id, &page)
            .await
            .map_err(map_storage_error)
    }

    async fn update_booking(&self, id: &Uuid, draft: BookingDraft) -> Result<Booking, Error> {
        let mut booking = self.require_booking(id).await?;

        self.check_references(&draft).await?;

        booking.apply(draft);
        self.bookings
            .update(&booking)
            .await
            .map_err(|err| map_write_error(err, &booking))?;

        Ok(booking)
    }

    async fn delete_booking(&self, id: &Uuid) -> Result<(), Error> {
        let deleted = self.bookings.delete(id).await.map_err(map_storage_error)?;
        if deleted { Ok(()) } else { Err(Error::not_found()) }
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;

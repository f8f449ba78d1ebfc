//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod booking_management;
mod booking_repository;
mod image_store;
mod rental_management;
mod rental_repository;
mod user_management;
mod user_repository;

#[cfg(test)]
pub use booking_management::MockBookingManagement;
pub use booking_management::BookingManagement;
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{BookingRepository, BookingRepositoryError};
#[cfg(test)]
pub use image_store::MockImageStore;
pub use image_store::{ImageStore, ImageStoreError, ImageUpload};
#[cfg(test)]
pub use rental_management::MockRentalManagement;
pub use rental_management::RentalManagement;
#[cfg(test)]
pub use rental_repository::MockRentalRepository;
pub use rental_repository::{RentalRepository, RentalRepositoryError};
#[cfg(test)]
pub use user_management::MockUserManagement;
pub use user_management::UserManagement;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};

//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (users, rentals,
//!   bookings, health)
//! - **Schemas**: The request and response bodies, the validation error
//!   shape, and the paginated envelopes the list endpoints return
//!
//! The generated specification is served by Swagger UI when docs are enabled
//! and exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::{BookingStatus, ValidationFailure};
use crate::inbound::http::bookings::{BookingRequestBody, BookingResponseBody};
use crate::inbound::http::error::ValidationErrorBody;
use crate::inbound::http::rentals::{RentalRequestBody, RentalResponseBody};
use crate::inbound::http::uploads::ImageUploadForm;
use crate::inbound::http::users::{UserRequestBody, UserResponseBody};
use pagination::PaginatedResult;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roost API",
        description = "HTTP interface for managing users, property rentals, and bookings."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::update_profile_image,
        crate::inbound::http::users::list_user_rentals,
        crate::inbound::http::users::list_user_bookings,
        crate::inbound::http::rentals::create_rental,
        crate::inbound::http::rentals::list_rentals,
        crate::inbound::http::rentals::get_rental,
        crate::inbound::http::rentals::update_rental,
        crate::inbound::http::rentals::delete_rental,
        crate::inbound::http::rentals::update_cover_image,
        crate::inbound::http::rentals::add_gallery_image,
        crate::inbound::http::rentals::remove_gallery_image,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::list_bookings,
        crate::inbound::http::bookings::get_booking,
        crate::inbound::http::bookings::update_booking,
        crate::inbound::http::bookings::delete_booking,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserRequestBody,
        UserResponseBody,
        RentalRequestBody,
        RentalResponseBody,
        BookingRequestBody,
        BookingResponseBody,
        BookingStatus,
        ValidationErrorBody,
        ValidationFailure,
        ImageUploadForm,
        PaginatedResult<UserResponseBody>,
        PaginatedResult<RentalResponseBody>,
        PaginatedResult<BookingResponseBody>,
    )),
    tags(
        (name = "users", description = "Operations related to users"),
        (name = "rentals", description = "Operations related to property rentals"),
        (name = "bookings", description = "Operations related to bookings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI path and schema registration.

    use super::*;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn every_resource_path_is_registered() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for expected in [
            "/api/users",
            "/api/users/{userId}",
            "/api/users/{userId}/images",
            "/api/users/{userId}/rentals",
            "/api/users/{userId}/bookings",
            "/api/rentals",
            "/api/rentals/{rentalId}",
            "/api/rentals/{rentalId}/cover-image",
            "/api/rentals/{rentalId}/images",
            "/api/rentals/{rentalId}/images/{imageId}",
            "/api/bookings",
            "/api/bookings/{bookingId}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains_key(expected), "missing path '{expected}'");
        }
        assert_eq!(paths.len(), 14);
    }

    #[test]
    fn validation_failure_schema_uses_camel_case_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let failure = schemas.get("ValidationFailure").expect("failure schema");

        assert_object_schema_has_field(failure, "propertyName");
        assert_object_schema_has_field(failure, "message");
    }

    #[test]
    fn paginated_envelopes_are_registered_per_item_type() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;

        for expected in [
            "PaginatedResult_UserResponseBody",
            "PaginatedResult_RentalResponseBody",
            "PaginatedResult_BookingResponseBody",
        ] {
            assert!(
                schemas.contains_key(expected),
                "missing schema '{expected}'"
            );
        }
    }

    #[test]
    fn booking_response_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let booking = schemas.get("BookingResponseBody").expect("booking schema");

        assert_object_schema_has_field(booking, "id");
        assert_object_schema_has_field(booking, "rentalId");
        assert_object_schema_has_field(booking, "amountPaid");
        assert_object_schema_has_field(booking, "status");
    }
}

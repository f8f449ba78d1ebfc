//! Booking HTTP handlers.
//!
//! ```text
//! POST   /api/bookings
//! GET    /api/bookings
//! GET    /api/bookings/{bookingId}
//! PUT    /api/bookings/{bookingId}
//! DELETE /api/bookings/{bookingId}
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use pagination::PaginatedResult;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{Booking, BookingDraft, BookingListOptions, BookingStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ValidationErrorBody;
use crate::inbound::http::params;
use crate::inbound::http::state::HttpState;

/// Request payload for creating or replacing a booking.
///
/// The date bounds are required; the remaining fields deserialise to their
/// defaults when omitted. `status` is ignored on create, where the stored
/// booking always starts out `Pending`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequestBody {
    #[serde(default)]
    pub rental_id: Uuid,
    #[serde(default)]
    pub user_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    #[serde(default)]
    pub amount_paid: Decimal,
    #[serde(default)]
    pub status: BookingStatus,
}

impl From<BookingRequestBody> for BookingDraft {
    fn from(body: BookingRequestBody) -> Self {
        Self {
            rental_id: body.rental_id,
            user_id: body.user_id,
            check_in: body.check_in,
            check_out: body.check_out,
            amount_paid: body.amount_paid,
            status: body.status,
        }
    }
}

/// Response payload describing a booking.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponseBody {
    pub id: Uuid,
    pub rental_id: Uuid,
    pub user_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub amount_paid: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponseBody {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            rental_id: booking.rental_id,
            user_id: booking.user_id,
            check_in: booking.check_in,
            check_out: booking.check_out,
            amount_paid: booking.amount_paid,
            status: booking.status,
            created_at: booking.created_at,
        }
    }
}

/// Query parameters for the bookings listing.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListBookingsParams {
    /// Exact rental filter.
    pub rental_id: Option<Uuid>,
    /// Exact user filter.
    pub user_id: Option<Uuid>,
    /// Inclusive lower bound on check-in.
    pub check_in: Option<DateTime<Utc>>,
    /// Inclusive upper bound on check-out.
    pub check_out: Option<DateTime<Utc>>,
    /// Status filter; `All` or absent matches every state.
    pub status: Option<String>,
    /// Sort field, optionally prefixed with `-` for descending.
    pub sort_by: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Create a booking.
#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = BookingRequestBody,
    responses(
        (
            status = 201,
            description = "Booking created",
            body = BookingResponseBody,
            headers(("Location" = String, description = "URL of the created booking"))
        ),
        (status = 400, description = "Validation failure", body = ValidationErrorBody)
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    payload: web::Json<BookingRequestBody>,
) -> ApiResult<HttpResponse> {
    let booking = state
        .bookings
        .create_booking(payload.into_inner().into())
        .await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/bookings/{}", booking.id)))
        .json(BookingResponseBody::from(booking)))
}

/// Fetch a booking by id.
#[utoipa::path(
    get,
    path = "/api/bookings/{bookingId}",
    params(("bookingId" = Uuid, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking found", body = BookingResponseBody),
        (status = 404, description = "Booking not found")
    ),
    tags = ["bookings"],
    operation_id = "getBooking"
)]
#[get("/bookings/{bookingId}")]
pub async fn get_booking(
    state: web::Data<HttpState>,
    booking_id: web::Path<Uuid>,
) -> ApiResult<web::Json<BookingResponseBody>> {
    let booking = state.bookings.get_booking(&booking_id).await?;
    Ok(web::Json(BookingResponseBody::from(booking)))
}

/// List bookings with optional filters, sorting, and paging.
#[utoipa::path(
    get,
    path = "/api/bookings",
    params(ListBookingsParams),
    responses(
        (
            status = 200,
            description = "One page of bookings",
            body = PaginatedResult<BookingResponseBody>
        ),
        (status = 400, description = "Validation failure", body = ValidationErrorBody)
    ),
    tags = ["bookings"],
    operation_id = "listBookings"
)]
#[get("/bookings")]
pub async fn list_bookings(
    state: web::Data<HttpState>,
    query: web::Query<ListBookingsParams>,
) -> ApiResult<web::Json<PaginatedResult<BookingResponseBody>>> {
    let query = query.into_inner();
    let options = BookingListOptions {
        rental_id: query.rental_id,
        user_id: query.user_id,
        status: params::status_filter(query.status.as_deref())?,
        check_in_from: query.check_in,
        check_out_until: query.check_out,
        sort: params::sort_spec(query.sort_by.as_deref())?,
        page: params::page_request(query.page, query.page_size)?,
    };

    let page = state.bookings.list_bookings(options).await?;
    Ok(web::Json(page.map(BookingResponseBody::from)))
}

/// Replace every client-writable field of a booking, status included.
#[utoipa::path(
    put,
    path = "/api/bookings/{bookingId}",
    params(("bookingId" = Uuid, Path, description = "Booking id")),
    request_body = BookingRequestBody,
    responses(
        (status = 200, description = "Booking updated", body = BookingResponseBody),
        (status = 400, description = "Validation failure", body = ValidationErrorBody),
        (status = 404, description = "Booking not found")
    ),
    tags = ["bookings"],
    operation_id = "updateBooking"
)]
#[put("/bookings/{bookingId}")]
pub async fn update_booking(
    state: web::Data<HttpState>,
    booking_id: web::Path<Uuid>,
    payload: web::Json<BookingRequestBody>,
) -> ApiResult<web::Json<BookingResponseBody>> {
    let booking = state
        .bookings
        .update_booking(&booking_id, payload.into_inner().into())
        .await?;
    Ok(web::Json(BookingResponseBody::from(booking)))
}

/// Delete a booking.
#[utoipa::path(
    delete,
    path = "/api/bookings/{bookingId}",
    params(("bookingId" = Uuid, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking deleted"),
        (status = 404, description = "Booking not found")
    ),
    tags = ["bookings"],
    operation_id = "deleteBooking"
)]
#[delete("/bookings/{bookingId}")]
pub async fn delete_booking(
    state: web::Data<HttpState>,
    booking_id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.bookings.delete_booking(&booking_id).await?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
#[path = "bookings_tests.rs"]
mod tests;

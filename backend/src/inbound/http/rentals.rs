//! Rental HTTP handlers.
//!
//! ```text
//! POST   /api/rentals
//! GET    /api/rentals
//! GET    /api/rentals/{rentalId}
//! PUT    /api/rentals/{rentalId}
//! DELETE /api/rentals/{rentalId}
//! POST   /api/rentals/{rentalId}/cover-image
//! POST   /api/rentals/{rentalId}/images
//! DELETE /api/rentals/{rentalId}/images/{imageId}
//! ```

use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use pagination::PaginatedResult;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{Rental, RentalDraft, RentalListOptions};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ValidationErrorBody;
use crate::inbound::http::params;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::uploads::{ImageUploadForm, read_image_upload};

/// Request payload for creating or replacing a rental.
///
/// Fields the client omits deserialise to their defaults; an omitted
/// `ownerId` becomes the nil UUID, which the owner-existence rule rejects.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RentalRequestBody {
    pub name: String,
    pub description: String,
    pub price: i32,
    pub owner_id: Uuid,
}

impl From<RentalRequestBody> for RentalDraft {
    fn from(body: RentalRequestBody) -> Self {
        Self {
            name: body.name,
            description: body.description,
            price: body.price,
            owner_id: body.owner_id,
        }
    }
}

/// Response payload describing a rental.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalResponseBody {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: i32,
    pub owner_id: Uuid,
    /// Relative path of the stored cover image.
    pub cover_image: String,
    /// Relative paths of the gallery images, in upload order.
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Rental> for RentalResponseBody {
    fn from(rental: Rental) -> Self {
        Self {
            id: rental.id,
            name: rental.name,
            description: rental.description,
            price: rental.price,
            owner_id: rental.owner_id,
            cover_image: rental.cover_image,
            images: rental.images,
            created_at: rental.created_at,
        }
    }
}

/// Query parameters for the rentals listing.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListRentalsParams {
    /// Substring filter on name.
    pub name: Option<String>,
    /// Substring filter on description.
    pub description: Option<String>,
    /// Inclusive lower price bound.
    pub price_lower_limit: Option<i32>,
    /// Inclusive upper price bound.
    pub price_upper_limit: Option<i32>,
    /// Substring filter on the owner's username.
    pub owner_username: Option<String>,
    /// Sort field, optionally prefixed with `-` for descending.
    pub sort_by: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Create a rental.
#[utoipa::path(
    post,
    path = "/api/rentals",
    request_body = RentalRequestBody,
    responses(
        (
            status = 201,
            description = "Rental created",
            body = RentalResponseBody,
            headers(("Location" = String, description = "URL of the created rental"))
        ),
        (status = 400, description = "Validation failure", body = ValidationErrorBody)
    ),
    tags = ["rentals"],
    operation_id = "createRental"
)]
#[post("/rentals")]
pub async fn create_rental(
    state: web::Data<HttpState>,
    payload: web::Json<RentalRequestBody>,
) -> ApiResult<HttpResponse> {
    let rental = state
        .rentals
        .create_rental(payload.into_inner().into())
        .await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/rentals/{}", rental.id)))
        .json(RentalResponseBody::from(rental)))
}

/// Fetch a rental by id.
#[utoipa::path(
    get,
    path = "/api/rentals/{rentalId}",
    params(("rentalId" = Uuid, Path, description = "Rental id")),
    responses(
        (status = 200, description = "Rental found", body = RentalResponseBody),
        (status = 404, description = "Rental not found")
    ),
    tags = ["rentals"],
    operation_id = "getRental"
)]
#[get("/rentals/{rentalId}")]
pub async fn get_rental(
    state: web::Data<HttpState>,
    rental_id: web::Path<Uuid>,
) -> ApiResult<web::Json<RentalResponseBody>> {
    let rental = state.rentals.get_rental(&rental_id).await?;
    Ok(web::Json(RentalResponseBody::from(rental)))
}

/// List rentals with optional filters, sorting, and paging.
#[utoipa::path(
    get,
    path = "/api/rentals",
    params(ListRentalsParams),
    responses(
        (
            status = 200,
            description = "One page of rentals",
            body = PaginatedResult<RentalResponseBody>
        ),
        (status = 400, description = "Validation failure", body = ValidationErrorBody)
    ),
    tags = ["rentals"],
    operation_id = "listRentals"
)]
#[get("/rentals")]
pub async fn list_rentals(
    state: web::Data<HttpState>,
    query: web::Query<ListRentalsParams>,
) -> ApiResult<web::Json<PaginatedResult<RentalResponseBody>>> {
    let query = query.into_inner();
    let options = RentalListOptions {
        name: query.name,
        description: query.description,
        price_lower_limit: query.price_lower_limit,
        price_upper_limit: query.price_upper_limit,
        owner_username: query.owner_username,
        sort: params::sort_spec(query.sort_by.as_deref())?,
        page: params::page_request(query.page, query.page_size)?,
    };

    let page = state.rentals.list_rentals(options).await?;
    Ok(web::Json(page.map(RentalResponseBody::from)))
}

/// Replace every client-writable field of a rental.
#[utoipa::path(
    put,
    path = "/api/rentals/{rentalId}",
    params(("rentalId" = Uuid, Path, description = "Rental id")),
    request_body = RentalRequestBody,
    responses(
        (status = 200, description = "Rental updated", body = RentalResponseBody),
        (status = 400, description = "Validation failure", body = ValidationErrorBody),
        (status = 404, description = "Rental not found")
    ),
    tags = ["rentals"],
    operation_id = "updateRental"
)]
#[put("/rentals/{rentalId}")]
pub async fn update_rental(
    state: web::Data<HttpState>,
    rental_id: web::Path<Uuid>,
    payload: web::Json<RentalRequestBody>,
) -> ApiResult<web::Json<RentalResponseBody>> {
    let rental = state
        .rentals
        .update_rental(&rental_id, payload.into_inner().into())
        .await?;
    Ok(web::Json(RentalResponseBody::from(rental)))
}

/// Delete a rental.
#[utoipa::path(
    delete,
    path = "/api/rentals/{rentalId}",
    params(("rentalId" = Uuid, Path, description = "Rental id")),
    responses(
        (status = 200, description = "Rental deleted"),
        (status = 404, description = "Rental not found")
    ),
    tags = ["rentals"],
    operation_id = "deleteRental"
)]
#[delete("/rentals/{rentalId}")]
pub async fn delete_rental(
    state: web::Data<HttpState>,
    rental_id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.rentals.delete_rental(&rental_id).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Store a new cover image, or reset to the default when no file is sent.
#[utoipa::path(
    post,
    path = "/api/rentals/{rentalId}/cover-image",
    params(("rentalId" = Uuid, Path, description = "Rental id")),
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Cover image updated"),
        (status = 400, description = "Validation failure", body = ValidationErrorBody),
        (status = 404, description = "Rental not found")
    ),
    tags = ["rentals"],
    operation_id = "updateCoverImage"
)]
#[post("/rentals/{rentalId}/cover-image")]
pub async fn update_cover_image(
    state: web::Data<HttpState>,
    rental_id: web::Path<Uuid>,
    mut payload: Multipart,
) -> ApiResult<HttpResponse> {
    let upload = read_image_upload(&mut payload).await?;
    state.rentals.update_cover_image(&rental_id, upload).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Append an image to the rental's gallery.
#[utoipa::path(
    post,
    path = "/api/rentals/{rentalId}/images",
    params(("rentalId" = Uuid, Path, description = "Rental id")),
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Gallery image added"),
        (status = 400, description = "Validation failure", body = ValidationErrorBody),
        (status = 404, description = "Rental not found")
    ),
    tags = ["rentals"],
    operation_id = "addGalleryImage"
)]
#[post("/rentals/{rentalId}/images")]
pub async fn add_gallery_image(
    state: web::Data<HttpState>,
    rental_id: web::Path<Uuid>,
    mut payload: Multipart,
) -> ApiResult<HttpResponse> {
    let upload = read_image_upload(&mut payload).await?;
    state.rentals.add_gallery_image(&rental_id, upload).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Remove an image from the rental's gallery.
#[utoipa::path(
    delete,
    path = "/api/rentals/{rentalId}/images/{imageId}",
    params(
        ("rentalId" = Uuid, Path, description = "Rental id"),
        ("imageId" = String, Path, description = "Gallery image id")
    ),
    responses(
        (status = 200, description = "Gallery image removed"),
        (status = 404, description = "Rental or image not found")
    ),
    tags = ["rentals"],
    operation_id = "removeGalleryImage"
)]
#[delete("/rentals/{rentalId}/images/{imageId}")]
pub async fn remove_gallery_image(
    state: web::Data<HttpState>,
    path: web::Path<(Uuid, String)>,
) -> ApiResult<HttpResponse> {
    let (rental_id, image_id) = path.into_inner();
    state
        .rentals
        .remove_gallery_image(&rental_id, &image_id)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
#[path = "rentals_tests.rs"]
mod tests;

//! User HTTP handlers.
//!
//! ```text
//! POST   /api/users
//! GET    /api/users
//! GET    /api/users/{userId}
//! PUT    /api/users/{userId}
//! DELETE /api/users/{userId}
//! POST   /api/users/{userId}/images
//! GET    /api/users/{userId}/rentals
//! GET    /api/users/{userId}/bookings
//! ```

use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use pagination::PaginatedResult;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{User, UserDraft, UserListOptions};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bookings::BookingResponseBody;
use crate::inbound::http::error::ValidationErrorBody;
use crate::inbound::http::params::{self, PageParams};
use crate::inbound::http::rentals::RentalResponseBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::uploads::{ImageUploadForm, read_image_upload};

/// Request payload for creating or replacing a user.
///
/// Fields the client omits deserialise to their defaults and, on update,
/// clobber the stored values.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRequestBody {
    pub username: String,
    pub nickname: String,
    pub email: String,
    pub age: i32,
}

impl From<UserRequestBody> for UserDraft {
    fn from(body: UserRequestBody) -> Self {
        Self {
            username: body.username,
            nickname: body.nickname,
            email: body.email,
            age: body.age,
        }
    }
}

/// Response payload describing a user.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseBody {
    pub id: Uuid,
    pub username: String,
    pub nickname: String,
    pub email: String,
    pub age: i32,
    /// Relative path of the stored profile image.
    pub profile_image: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponseBody {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            nickname: user.nickname,
            email: user.email,
            age: user.age,
            profile_image: user.profile_image,
            created_at: user.created_at,
        }
    }
}

/// Query parameters for the users listing.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersParams {
    /// Substring filter on username.
    pub username: Option<String>,
    /// Substring filter on nickname.
    pub nickname: Option<String>,
    /// Substring filter on email.
    pub email: Option<String>,
    /// Sort field, optionally prefixed with `-` for descending.
    pub sort_by: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserRequestBody,
    responses(
        (
            status = 201,
            description = "User created",
            body = UserResponseBody,
            headers(("Location" = String, description = "URL of the created user"))
        ),
        (status = 400, description = "Validation failure", body = ValidationErrorBody)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequestBody>,
) -> ApiResult<HttpResponse> {
    let user = state.users.create_user(payload.into_inner().into()).await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/users/{}", user.id)))
        .json(UserResponseBody::from(user)))
}

/// Fetch a user by id.
#[utoipa::path(
    get,
    path = "/api/users/{userId}",
    params(("userId" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponseBody),
        (status = 404, description = "User not found")
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{userId}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    user_id: web::Path<Uuid>,
) -> ApiResult<web::Json<UserResponseBody>> {
    let user = state.users.get_user(&user_id).await?;
    Ok(web::Json(UserResponseBody::from(user)))
}

/// List users with optional filters, sorting, and paging.
#[utoipa::path(
    get,
    path = "/api/users",
    params(ListUsersParams),
    responses(
        (status = 200, description = "One page of users", body = PaginatedResult<UserResponseBody>),
        (status = 400, description = "Validation failure", body = ValidationErrorBody)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<ListUsersParams>,
) -> ApiResult<web::Json<PaginatedResult<UserResponseBody>>> {
    let query = query.into_inner();
    let options = UserListOptions {
        username: query.username,
        nickname: query.nickname,
        email: query.email,
        sort: params::sort_spec(query.sort_by.as_deref())?,
        page: params::page_request(query.page, query.page_size)?,
    };

    let page = state.users.list_users(options).await?;
    Ok(web::Json(page.map(UserResponseBody::from)))
}

/// Replace every client-writable field of a user.
#[utoipa::path(
    put,
    path = "/api/users/{userId}",
    params(("userId" = Uuid, Path, description = "User id")),
    request_body = UserRequestBody,
    responses(
        (status = 200, description = "User updated", body = UserResponseBody),
        (status = 400, description = "Validation failure", body = ValidationErrorBody),
        (status = 404, description = "User not found")
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{userId}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    user_id: web::Path<Uuid>,
    payload: web::Json<UserRequestBody>,
) -> ApiResult<web::Json<UserResponseBody>> {
    let user = state
        .users
        .update_user(&user_id, payload.into_inner().into())
        .await?;
    Ok(web::Json(UserResponseBody::from(user)))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/users/{userId}",
    params(("userId" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found")
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{userId}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    user_id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.users.delete_user(&user_id).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Store a new profile image, or reset to the default when no file is sent.
#[utoipa::path(
    post,
    path = "/api/users/{userId}/images",
    params(("userId" = Uuid, Path, description = "User id")),
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Profile image updated"),
        (status = 400, description = "Validation failure", body = ValidationErrorBody),
        (status = 404, description = "User not found")
    ),
    tags = ["users"],
    operation_id = "updateProfileImage"
)]
#[post("/users/{userId}/images")]
pub async fn update_profile_image(
    state: web::Data<HttpState>,
    user_id: web::Path<Uuid>,
    mut payload: Multipart,
) -> ApiResult<HttpResponse> {
    let upload = read_image_upload(&mut payload).await?;
    state.users.update_profile_image(&user_id, upload).await?;
    Ok(HttpResponse::Ok().finish())
}

/// List the rentals owned by a user.
#[utoipa::path(
    get,
    path = "/api/users/{userId}/rentals",
    params(("userId" = Uuid, Path, description = "User id"), PageParams),
    responses(
        (
            status = 200,
            description = "One page of the user's rentals",
            body = PaginatedResult<RentalResponseBody>
        ),
        (status = 400, description = "Validation failure", body = ValidationErrorBody),
        (status = 404, description = "User not found")
    ),
    tags = ["users"],
    operation_id = "listUserRentals"
)]
#[get("/users/{userId}/rentals")]
pub async fn list_user_rentals(
    state: web::Data<HttpState>,
    user_id: web::Path<Uuid>,
    query: web::Query<PageParams>,
) -> ApiResult<web::Json<PaginatedResult<RentalResponseBody>>> {
    let page = query.request()?;
    let rentals = state.rentals.list_rentals_for_owner(&user_id, page).await?;
    Ok(web::Json(rentals.map(RentalResponseBody::from)))
}

/// List the bookings made by a user.
#[utoipa::path(
    get,
    path = "/api/users/{userId}/bookings",
    params(("userId" = Uuid, Path, description = "User id"), PageParams),
    responses(
        (
            status = 200,
            description = "One page of the user's bookings",
            body = PaginatedResult<BookingResponseBody>
        ),
        (status = 400, description = "Validation failure", body = ValidationErrorBody),
        (status = 404, description = "User not found")
    ),
    tags = ["users"],
    operation_id = "listUserBookings"
)]
#[get("/users/{userId}/bookings")]
pub async fn list_user_bookings(
    state: web::Data<HttpState>,
    user_id: web::Path<Uuid>,
    query: web::Query<PageParams>,
) -> ApiResult<web::Json<PaginatedResult<BookingResponseBody>>> {
    let page = query.request()?;
    let bookings = state.bookings.list_bookings_for_user(&user_id, page).await?;
    Ok(web::Json(bookings.map(BookingResponseBody::from)))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;

//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into the wire contract: broken validation
//! rules as a 400 carrying an `errors` array, missing records as an empty
//! 404, and everything else as an empty 500 with the detail kept in the logs.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, ValidationFailure};
use crate::middleware::trace::TraceId;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Body of a 400 response listing every rule the request broke.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorBody {
    pub errors: Vec<ValidationFailure>,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Error::Validation { failures } => {
                HttpResponse::BadRequest().json(ValidationErrorBody {
                    errors: failures.clone(),
                })
            }
            Error::NotFound => HttpResponse::NotFound().finish(),
            Error::Internal { message } => {
                error!(%message, trace_id = ?TraceId::current(), "request failed");
                HttpResponse::InternalServerError().finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use actix_web::body::to_bytes;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn statuses_follow_the_error_variant() {
        assert_eq!(
            Error::single("Username", "taken").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(Error::not_found().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            Error::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn validation_failures_serialise_as_the_errors_array() {
        let error = Error::single("Username", "'usr4' is already taken");

        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body()).await.expect("read body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body["errors"][0]["propertyName"], "Username");
        assert_eq!(body["errors"][0]["message"], "'usr4' is already taken");
    }

    #[tokio::test]
    async fn missing_records_produce_an_empty_404() {
        let response = Error::not_found().error_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(response.into_body()).await.expect("read body");
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn internal_errors_never_leak_the_message() {
        let response = Error::internal("pool exhausted").error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(response.into_body()).await.expect("read body");
        assert!(bytes.is_empty());
    }
}

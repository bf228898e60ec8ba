//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use carrental_domain::error::CarRentalError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

/// Maps [`CarRentalError`] and request-body rejections to an HTTP response
/// with appropriate status code.
#[derive(Debug)]
pub enum ApiError {
    /// Error raised by a service.
    Domain(CarRentalError),
    /// Body that could not be read or deserialized into the request type.
    Body(JsonRejection),
}

impl From<CarRentalError> for ApiError {
    fn from(err: CarRentalError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            Self::Domain(CarRentalError::Validation(err)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            Self::Domain(CarRentalError::NotFound(err)) => (StatusCode::NOT_FOUND, err.to_string()),
            Self::Domain(CarRentalError::BadRequest(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Domain(CarRentalError::Storage(err)) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            // Malformed JSON, missing fields and unparseable dates are all
            // input-shape errors.
            Self::Body(rejection) => (StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text()),
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

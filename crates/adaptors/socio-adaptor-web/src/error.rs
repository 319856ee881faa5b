//! HTTP error responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use socio_core::{SocioError, GENERIC_FAILURE_MESSAGE};
use tracing::error;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or empty request
    BadRequest(String),
    /// Well-formed request with nothing to act on
    Unprocessable(String),
    /// Failure while serving the request
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "success": false,
            "error": message,
            "code": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

/// Details stay in the log, the caller only sees the generic message
impl From<SocioError> for ApiError {
    fn from(err: SocioError) -> Self {
        error!("Chat turn failed: {}", err);
        ApiError::Internal(GENERIC_FAILURE_MESSAGE.to_string())
    }
}

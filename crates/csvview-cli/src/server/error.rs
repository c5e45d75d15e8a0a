//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use csvview::CsvViewError;
use serde::Serialize;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from client.
    BadRequest(String),
    /// Internal server error.
    Internal(String),
    /// A file could not be loaded or exported.
    Load(CsvViewError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
            ApiError::Load(e) => {
                let (status, kind) = match e {
                    CsvViewError::Busy => (StatusCode::CONFLICT, "busy"),
                    CsvViewError::UnsupportedFile(_) => (StatusCode::BAD_REQUEST, "unsupported_file"),
                    CsvViewError::EmptySource(_) => (StatusCode::BAD_REQUEST, "empty_source"),
                    CsvViewError::MalformedCsv { .. } => (StatusCode::BAD_REQUEST, "malformed_csv"),
                    _ => (StatusCode::BAD_REQUEST, "load_error"),
                };
                (status, kind, e.user_message())
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<CsvViewError> for ApiError {
    fn from(err: CsvViewError) -> Self {
        ApiError::Load(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Load(e) => write!(f, "Load error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Load(CsvViewError::Busy).into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Load(CsvViewError::EmptySource("x".into()))
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("join".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

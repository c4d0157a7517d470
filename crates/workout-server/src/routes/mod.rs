pub mod categorias;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use workout_core::fault::StructuredError;

/// Shared error type for route handlers, emits the structured error body
/// `{"status": <int>, "message": <string>}`.
pub struct ApiError(StructuredError);

impl From<StructuredError> for ApiError {
    fn from(err: StructuredError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.0)).into_response()
    }
}

/// Convenience type alias for route handler results.
pub type ApiResult<T> = Result<T, ApiError>;

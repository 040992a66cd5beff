use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::response::ApiResponse;

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found() -> Response {
    ApiResponse::error(
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
    .into_response()
}

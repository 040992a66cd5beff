pub mod handlers;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use validator::ValidationErrors;

use crate::response::ApiResponse;

/// Application error type that converts into enveloped HTTP responses.
///
/// Domain error enums convert into this at the handler boundary; this is the
/// single place where errors become response status codes.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!("JSON extraction error: {:?}", e);
                (e.status(), e.body_text())
            }
            AppError::ValidationError(e) => {
                tracing::info!("Validation error: {:?}", e);
                (StatusCode::BAD_REQUEST, validation_message(&e))
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::NotFound(msg) => {
                tracing::info!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, msg)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, msg)
            }
        };

        ApiResponse::error(status, message).into_response()
    }
}

/// Flatten validator field errors into a single deterministic message
fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let reasons = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}: {}", field, reasons)
        })
        .collect();
    fields.sort();
    format!("Validation failed: {}", fields.join("; "))
}

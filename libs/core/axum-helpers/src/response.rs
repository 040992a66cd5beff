//! Uniform response envelope.
//!
//! Every API response carries the same wrapper: an HTTP status mirror, either
//! `data` or `error` (never both), and pagination `meta` on list responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pagination::Meta;
use serde::Serialize;
use utoipa::ToSchema;

/// Response envelope returned by all API endpoints.
///
/// # JSON Examples
///
/// ```json
/// { "status": 200, "data": { "id": "..." } }
/// ```
///
/// ```json
/// { "status": 404, "error": "user with id ... not found" }
/// ```
///
/// ```json
/// { "status": 200, "data": [], "meta": { "limit": 10, "offset": 0, "page": 1, "total_pages": 0, "total_count": 0 } }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// HTTP status code, mirrored into the body
    pub status: u16,
    /// Payload, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message, present on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Pagination metadata, present on list responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl<T> ApiResponse<T> {
    /// 200 response with a payload
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            data: Some(data),
            error: None,
            meta: None,
        }
    }

    /// 201 response with a payload
    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED.as_u16(),
            data: Some(data),
            error: None,
            meta: None,
        }
    }

    /// 200 list response with a payload and pagination metadata
    pub fn ok_with_meta(data: T, meta: Meta) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            data: Some(data),
            error: None,
            meta: Some(meta),
        }
    }
}

impl ApiResponse<()> {
    /// Error response with the given status and message
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            data: None,
            error: Some(message.into()),
            meta: None,
        }
    }
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_serializes_data_only() {
        let response = ApiResponse::ok(json!({"id": 1}));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"status": 200, "data": {"id": 1}}));
    }

    #[test]
    fn test_created_status() {
        let response = ApiResponse::created("payload");
        assert_eq!(response.status, 201);
        assert_eq!(response.data, Some("payload"));
        assert!(response.error.is_none());
    }

    #[test]
    fn test_error_serializes_error_only() {
        let response = ApiResponse::error(StatusCode::NOT_FOUND, "missing");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"status": 404, "error": "missing"}));
    }

    #[test]
    fn test_ok_with_meta_includes_meta() {
        let meta = pagination::Meta::new(1, 10, 23, "10").unwrap();
        let response = ApiResponse::ok_with_meta(vec![1, 2, 3], meta);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], 200);
        assert_eq!(value["data"], json!([1, 2, 3]));
        assert_eq!(value["meta"]["total_pages"], 3);
    }

    #[test]
    fn test_into_response_uses_envelope_status() {
        let response = ApiResponse::error(StatusCode::SERVICE_UNAVAILABLE, "down").into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}

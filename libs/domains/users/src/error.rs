use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use pagination::PaginationError;
use thiserror::Error;
use uuid::Uuid;

/// Closed error set for the users domain.
///
/// Repository implementations map storage failures to `Internal` with an
/// opaque operation-specific reason; raw database errors stay in the logs.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("user with ID {0} not found")]
    NotFound(Uuid),

    #[error("{0}")]
    Internal(String),

    #[error(transparent)]
    Pagination(#[from] PaginationError),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::NotFound(id) => {
                AppError::NotFound(format!("user with ID {} not found", id))
            }
            UserError::Internal(msg) => AppError::InternalServerError(msg),
            UserError::Pagination(e) => AppError::InternalServerError(e.to_string()),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

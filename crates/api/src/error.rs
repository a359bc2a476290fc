use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use escrutinio_core::error::CoreError;
use escrutinio_core::storage::StorageError;
use serde::Serialize;

/// Error returned by every handler.
///
/// Domain failures arrive as [`CoreError`]; database and blob store errors
/// are classified here. The response body is always `{ "error", "code" }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(errors.to_string()))
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl ErrorBody {
    fn new(code: &'static str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }

    /// Log the detail, answer with a generic message.
    fn internal(detail: &dyn std::fmt::Display) -> (StatusCode, Self) {
        tracing::error!(error = %detail, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Self::new("INTERNAL_ERROR", "An internal error occurred"),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Core(err) => core_error(err),
            AppError::Database(err) => database_error(err),
            AppError::Storage(err) => storage_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new("BAD_REQUEST", msg)),
            AppError::InternalError(msg) => ErrorBody::internal(msg),
        };
        (status, Json(body)).into_response()
    }
}

fn core_error(err: &CoreError) -> (StatusCode, ErrorBody) {
    let (status, code) = match err {
        CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        CoreError::Validation(_) | CoreError::ExceedsEligible { .. } => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        }
        CoreError::Conflict(_) | CoreError::AlreadyRegistered { .. } => {
            (StatusCode::CONFLICT, "CONFLICT")
        }
        CoreError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        CoreError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        CoreError::Internal(_) => return ErrorBody::internal(err),
    };
    (status, ErrorBody::new(code, err.to_string()))
}

/// Unique violations on `uq_*` constraints are conflicts; a missing row is
/// a 404. Anything else is internal.
fn database_error(err: &sqlx::Error) -> (StatusCode, ErrorBody) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            ErrorBody::new("NOT_FOUND", "Resource not found"),
        ),
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            match db.constraint().filter(|c| c.starts_with("uq_")) {
                Some(constraint) => (
                    StatusCode::CONFLICT,
                    ErrorBody::new(
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    ),
                ),
                None => ErrorBody::internal(db),
            }
        }
        other => ErrorBody::internal(other),
    }
}

fn storage_error(err: &StorageError) -> (StatusCode, ErrorBody) {
    match err {
        StorageError::InvalidPath(_) => (
            StatusCode::BAD_REQUEST,
            ErrorBody::new("BAD_REQUEST", err.to_string()),
        ),
        StorageError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            ErrorBody::new("NOT_FOUND", "Object not found"),
        ),
        other => ErrorBody::internal(other),
    }
}

//! Application error type shared by repositories and HTTP handlers.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use sea_orm::SqlErr;

use crate::ui;

/// Common error types for request handling.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The row is still referenced and cannot be deleted.
    #[error("Protected: {0}")]
    Protected(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn not_found(what: &str, id: i32) -> Self {
        AppError::NotFound(format!("{} {}", what, id))
    }

    /// A write rejected by a unique index.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            AppError::Database(err) => matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))),
            _ => false,
        }
    }
}

/// `Ok(None)` when the write hit a unique index, so the caller can report
/// the duplicate on the form instead of failing the request.
pub fn catch_unique_violation<T>(result: AppResult<T>) -> AppResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_unique_violation() => {
            log::warn!("Unique constraint rejected a write: {}", err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(what) => {
                log::debug!("Not found: {}", what);
                (StatusCode::NOT_FOUND, Html(ui::layout::error_page(StatusCode::NOT_FOUND))).into_response()
            }
            other => {
                log::error!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(ui::layout::error_page(StatusCode::INTERNAL_SERVER_ERROR)),
                )
                    .into_response()
            }
        }
    }
}

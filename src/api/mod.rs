//! REST API module.
//!
//! Contains the circuit routes and the helpers that give each route its
//! failure status.

mod circuits;

pub use circuits::*;

use axum::{extract::rejection::JsonRejection, http::StatusCode};

use crate::errors::{ApiError, AppError};

/// Response type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Wrap an error with the status a route answers every failure with.
pub fn fail(error: AppError, status: StatusCode) -> ApiError {
    ApiError::new(error, status)
}

/// Turn a JSON extractor rejection into a bad request error.
pub fn bad_body(rejection: JsonRejection) -> AppError {
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    AppError::BadRequest(rejection.body_text())
}

//! API error taxonomy and its mapping onto HTTP responses.
//!
//! Every failure a handler can produce is a variant of [`ApiError`], a tagged
//! enum rather than string matching on downstream error text. Each variant
//! maps to exactly one status code and envelope shape.

use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use bookshelf_core::error::StoreError;

use crate::response::Envelope;

static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(false);

/// Controls whether 500 responses include the raw error text.
///
/// Set once at startup from the configured environment; development mode
/// exposes details, production keeps them in the logs.
pub fn expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::Relaxed);
}

fn internal_errors_exposed() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::Relaxed)
}

/// All errors an API operation can surface.
#[derive(Debug, Error)]
pub enum ApiError {
    /// One or more field constraints were violated; carries every violation.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
    /// A book with the submitted ISBN already exists.
    #[error("a book with this ISBN already exists")]
    DuplicateIsbn,
    /// The identifier did not resolve to a record of the named resource.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// The identifier is not a well-formed UUID.
    #[error("invalid identifier")]
    InvalidId,
    /// Anything else, e.g. storage connectivity loss.
    #[error("{0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            // The only unique index in the system is the one on isbn
            StoreError::UniqueViolation { .. } => ApiError::DuplicateIsbn,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(Envelope::validation(errors))).into_response()
            }
            ApiError::DuplicateIsbn => (
                StatusCode::BAD_REQUEST,
                Json(Envelope::failure("A book with this ISBN already exists")),
            )
                .into_response(),
            ApiError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                Json(Envelope::failure(format!("{resource} not found"))),
            )
                .into_response(),
            ApiError::InvalidId => (
                StatusCode::BAD_REQUEST,
                Json(Envelope::failure("Invalid ID format")),
            )
                .into_response(),
            ApiError::Internal(detail) => {
                error!("request failed: {detail}");

                let detail = internal_errors_exposed().then_some(detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(Envelope::server_error(detail)),
                )
                    .into_response()
            }
        }
    }
}

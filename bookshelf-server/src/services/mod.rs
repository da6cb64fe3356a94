//! Query services: the application logic between the HTTP surface and the store.

pub mod books;
pub mod reviews;

pub use books::BookService;
pub use reviews::ReviewService;

use bson::Uuid;

use crate::error::ApiError;

/// Parses a path or query identifier into a document UUID.
///
/// A malformed identifier is its own error kind, distinct from a well-formed
/// identifier that resolves to nothing.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidId)
}

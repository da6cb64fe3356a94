//! Domain records and their validating input payloads.

pub mod book;
pub mod review;

pub use book::{Book, BookFilter, BookInput, BookStats, Genre};
pub use review::{RatingSummary, Review, ReviewFilter, ReviewInput};

/// Fixed-width RFC 3339 timestamp serialization (millisecond precision, UTC).
///
/// One representation serves both the API and the store: JSON responses carry
/// ISO timestamps, and because the width is fixed the stored strings sort
/// lexicographically in chronological order on every backend.
pub(crate) mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;

        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}

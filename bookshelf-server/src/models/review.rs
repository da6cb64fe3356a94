//! The review record and its input payload.

use bson::Uuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bookshelf_core::document::Document;

use super::timestamp;

/// A reader review of a book.
///
/// `book_id` references a book by identifier only; existence is not enforced,
/// so deleting a book leaves its reviews dangling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub book_id: Uuid,
    pub reviewer_name: String,
    pub rating: f64,
    pub comment: String,
    pub verified: bool,
    pub helpful: i64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Document for Review {
    fn id(&self) -> &Uuid {
        &self.id
    }

    fn collection_name() -> &'static str {
        "reviews"
    }
}

/// The payload accepted by create and update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    #[serde(default)]
    pub book_id: String,
    #[serde(default)]
    pub reviewer_name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub helpful: i64,
}

impl ReviewInput {
    /// Validates every field constraint and on success builds the record.
    ///
    /// Violations are collected rather than short-circuited, mirroring the
    /// book payload.
    pub fn build(
        self,
        id: Uuid,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Review, Vec<String>> {
        let mut violations = Vec::new();

        let book_id = if self.book_id.trim().is_empty() {
            violations.push("Book ID is required".to_string());
            None
        } else {
            match Uuid::parse_str(self.book_id.trim()) {
                Ok(book_id) => Some(book_id),
                Err(_) => {
                    violations.push("Book ID must be a valid identifier".to_string());
                    None
                }
            }
        };

        let reviewer_name = self.reviewer_name.trim();
        if reviewer_name.is_empty() {
            violations.push("Reviewer name is required".to_string());
        } else if reviewer_name.chars().count() < 2 {
            violations.push("Reviewer name must be at least 2 characters long".to_string());
        }

        let rating = match self.rating {
            Some(rating) => {
                if !(1.0..=5.0).contains(&rating) {
                    violations.push("Rating must be between 1 and 5".to_string());
                }
                rating
            }
            None => {
                violations.push("Rating is required".to_string());
                0.0
            }
        };

        let comment = self.comment.trim();
        if comment.is_empty() {
            violations.push("Review comment is required".to_string());
        } else if comment.chars().count() < 10 {
            violations.push("Comment must be at least 10 characters long".to_string());
        } else if comment.chars().count() > 500 {
            violations.push("Comment cannot exceed 500 characters".to_string());
        }

        if self.helpful < 0 {
            violations.push("Helpful count cannot be negative".to_string());
        }

        let Some(book_id) = book_id else {
            return Err(violations);
        };
        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(Review {
            id,
            book_id,
            reviewer_name: reviewer_name.to_string(),
            rating,
            comment: comment.to_string(),
            verified: self.verified,
            helpful: self.helpful,
            created_at,
            updated_at,
        })
    }
}

/// Query-string filters for listing reviews.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewFilter {
    /// Restrict to reviews of a single book.
    pub book_id: Option<String>,
}

/// Aggregate rating over a single book's reviews.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub avg_rating: f64,
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> ReviewInput {
        ReviewInput {
            book_id: Uuid::new().to_string(),
            reviewer_name: "Alice".to_string(),
            rating: Some(4.0),
            comment: "A sweeping, meticulous space opera.".to_string(),
            ..ReviewInput::default()
        }
    }

    fn now() -> DateTime<Utc> {
        "2024-06-01T00:00:00Z".parse().unwrap()
    }

    fn build(input: ReviewInput) -> Result<Review, Vec<String>> {
        input.build(Uuid::new(), now(), now())
    }

    #[test]
    fn valid_input_builds_with_defaults() {
        let review = build(valid_input()).unwrap();
        assert!(!review.verified);
        assert_eq!(review.helpful, 0);
        assert_eq!(review.rating, 4.0);
    }

    #[test]
    fn malformed_book_id_is_a_violation() {
        let mut input = valid_input();
        input.book_id = "not-a-uuid".to_string();
        let violations = build(input).unwrap_err();
        assert!(violations.contains(&"Book ID must be a valid identifier".to_string()));
    }

    #[test]
    fn missing_book_id_is_a_violation() {
        let mut input = valid_input();
        input.book_id = String::new();
        let violations = build(input).unwrap_err();
        assert!(violations.contains(&"Book ID is required".to_string()));
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        for rating in [1.0, 5.0] {
            let mut input = valid_input();
            input.rating = Some(rating);
            assert!(build(input).is_ok());
        }

        for rating in [0.0, 5.5] {
            let mut input = valid_input();
            input.rating = Some(rating);
            let violations = build(input).unwrap_err();
            assert!(violations.contains(&"Rating must be between 1 and 5".to_string()));
        }
    }

    #[test]
    fn comment_length_is_bounded() {
        let mut input = valid_input();
        input.comment = "too short".to_string();
        assert!(
            build(input)
                .unwrap_err()
                .contains(&"Comment must be at least 10 characters long".to_string())
        );

        let mut input = valid_input();
        input.comment = "x".repeat(501);
        assert!(
            build(input)
                .unwrap_err()
                .contains(&"Comment cannot exceed 500 characters".to_string())
        );
    }

    #[test]
    fn single_character_reviewer_name_is_rejected() {
        let mut input = valid_input();
        input.reviewer_name = "A".to_string();
        let violations = build(input).unwrap_err();
        assert!(violations.contains(&"Reviewer name must be at least 2 characters long".to_string()));
    }

    #[test]
    fn every_violation_is_reported_at_once() {
        let input = ReviewInput {
            book_id: "nope".to_string(),
            reviewer_name: String::new(),
            rating: Some(9.0),
            comment: "meh".to_string(),
            helpful: -1,
            ..ReviewInput::default()
        };

        let violations = build(input).unwrap_err();
        assert_eq!(violations.len(), 5);
    }
}

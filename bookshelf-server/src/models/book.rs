//! The book record, its input payload, and the aggregate shapes derived from it.

use bson::Uuid;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use bookshelf_core::document::Document;

use super::timestamp;

/// The fixed set of shelving genres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
    Mystery,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Fantasy,
    Biography,
    History,
    #[serde(rename = "Self-Help")]
    SelfHelp,
    Romance,
    Thriller,
    #[default]
    Other,
}

impl Genre {
    pub const ALL: [Genre; 11] = [
        Genre::Fiction,
        Genre::NonFiction,
        Genre::Mystery,
        Genre::ScienceFiction,
        Genre::Fantasy,
        Genre::Biography,
        Genre::History,
        Genre::SelfHelp,
        Genre::Romance,
        Genre::Thriller,
        Genre::Other,
    ];

    /// The label used in JSON, storage, and filter values.
    pub fn as_str(self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::NonFiction => "Non-Fiction",
            Genre::Mystery => "Mystery",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Fantasy => "Fantasy",
            Genre::Biography => "Biography",
            Genre::History => "History",
            Genre::SelfHelp => "Self-Help",
            Genre::Romance => "Romance",
            Genre::Thriller => "Thriller",
            Genre::Other => "Other",
        }
    }

    /// Looks a genre up by its label.
    pub fn parse(value: &str) -> Option<Genre> {
        Genre::ALL
            .iter()
            .find(|genre| genre.as_str() == value)
            .copied()
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalogued book.
///
/// The isbn is stored in normalized form (hyphens stripped) and is globally
/// unique through a unique index on the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
    pub genre: Genre,
    pub price: f64,
    pub available_copies: i64,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Whether at least one copy is in stock.
    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }
}

impl Document for Book {
    fn id(&self) -> &Uuid {
        &self.id
    }

    fn collection_name() -> &'static str {
        "books"
    }
}

/// The payload accepted by create and update.
///
/// Omitted fields take their documented defaults, which is what gives update
/// its full-replacement semantics: anything not present in the payload reverts
/// rather than carrying over.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub published_year: Option<i32>,
    #[serde(default = "default_genre")]
    pub genre: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_available_copies")]
    pub available_copies: i64,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub publisher: Option<String>,
}

impl Default for BookInput {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            isbn: String::new(),
            description: None,
            published_year: None,
            genre: default_genre(),
            price: 0.0,
            available_copies: default_available_copies(),
            language: default_language(),
            publisher: None,
        }
    }
}

fn default_genre() -> String {
    Genre::Other.as_str().to_string()
}

fn default_available_copies() -> i64 {
    1
}

fn default_language() -> String {
    "English".to_string()
}

impl BookInput {
    /// Validates every field constraint and on success builds the record.
    ///
    /// All violations are collected so the response can list every failed
    /// constraint at once, not just the first.
    pub fn build(
        self,
        id: Uuid,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Book, Vec<String>> {
        let mut violations = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            violations.push("Book title is required".to_string());
        } else if title.chars().count() > 200 {
            violations.push("Title cannot exceed 200 characters".to_string());
        }

        let author = self.author.trim();
        if author.is_empty() {
            violations.push("Author name is required".to_string());
        }

        let isbn = normalize_isbn(&self.isbn);
        if self.isbn.trim().is_empty() {
            violations.push("ISBN is required".to_string());
        } else if !is_valid_isbn(&isbn) {
            violations.push("Please provide a valid ISBN (10 or 13 digits)".to_string());
        }

        let description = self.description.map(|d| d.trim().to_string());
        if let Some(description) = &description {
            if description.chars().count() > 1000 {
                violations.push("Description cannot exceed 1000 characters".to_string());
            }
        }

        if let Some(year) = self.published_year {
            if year < 1000 {
                violations.push("Published year must be after 1000".to_string());
            } else if year > updated_at.year() {
                violations.push("Published year cannot be in the future".to_string());
            }
        }

        let genre = Genre::parse(self.genre.trim()).unwrap_or_else(|| {
            violations.push(format!(
                "Genre must be one of: {}",
                Genre::ALL.map(Genre::as_str).join(", ")
            ));
            Genre::Other
        });

        if self.price < 0.0 {
            violations.push("Price cannot be negative".to_string());
        }

        if self.available_copies < 0 {
            violations.push("Available copies cannot be negative".to_string());
        }

        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            isbn,
            description,
            published_year: self.published_year,
            genre,
            price: self.price,
            available_copies: self.available_copies,
            language: self.language.trim().to_string(),
            publisher: self.publisher.map(|p| p.trim().to_string()),
            created_at,
            updated_at,
        })
    }
}

/// Strips hyphens; the normalized form is what gets validated and stored.
fn normalize_isbn(raw: &str) -> String {
    raw.trim().chars().filter(|c| *c != '-').collect()
}

fn is_valid_isbn(digits: &str) -> bool {
    (digits.len() == 10 || digits.len() == 13) && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Query-string filters for listing books.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookFilter {
    /// Exact genre label match.
    pub genre: Option<String>,
    /// Case-insensitive substring match on the author name.
    pub author: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
    /// Only the literal "true" restricts to in-stock books.
    pub available: Option<String>,
}

/// Aggregate summary over the whole books collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookStats {
    pub total_books: u64,
    pub total_copies: i64,
    pub avg_price: f64,
    /// Distinct genre labels present, sorted for stable output.
    pub genres: Vec<String>,
}

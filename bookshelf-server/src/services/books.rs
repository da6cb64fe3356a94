//! Book query service: CRUD plus the catalog-wide statistics aggregate.

use std::{collections::BTreeSet, sync::Arc};

use bson::Uuid;
use chrono::Utc;

use bookshelf_core::{
    backend::StoreBackend,
    collection::TypedCollection,
    error::StoreError,
    query::{Filter, Query, SortDirection},
    store::DocumentStore,
};

use crate::{
    error::ApiError,
    models::{Book, BookFilter, BookInput, BookStats},
    services::parse_id,
};

const RESOURCE: &str = "Book";

/// Application service for the books collection.
///
/// Holds the shared store handle injected at construction; every operation is
/// one round trip against the storage layer.
pub struct BookService<B: StoreBackend> {
    store: Arc<DocumentStore<B>>,
}

impl<B: StoreBackend> Clone for BookService<B> {
    fn clone(&self) -> Self {
        Self { store: self.store.clone() }
    }
}

impl<B: StoreBackend> BookService<B> {
    pub fn new(store: Arc<DocumentStore<B>>) -> Self {
        Self { store }
    }

    fn collection(&self) -> TypedCollection<'_, B, Book> {
        self.store.typed_collection::<Book>()
    }

    /// Validates and persists a new book.
    pub async fn create(&self, input: BookInput) -> Result<Book, ApiError> {
        let now = Utc::now();
        let book = input
            .build(Uuid::new(), now, now)
            .map_err(ApiError::Validation)?;

        self.collection().insert(vec![book.clone()]).await?;

        Ok(book)
    }

    /// Lists books matching the given filters, newest first.
    pub async fn list(&self, filter: BookFilter) -> Result<Vec<Book>, ApiError> {
        let mut exprs = Vec::new();

        if let Some(genre) = filter.genre {
            exprs.push(Filter::eq("genre", genre));
        }
        if let Some(author) = filter.author {
            exprs.push(Filter::contains("author", author));
        }
        if let Some(min_price) = filter.min_price {
            exprs.push(Filter::gte("price", min_price));
        }
        if let Some(max_price) = filter.max_price {
            exprs.push(Filter::lte("price", max_price));
        }
        // Only the literal "true" narrows to in-stock books; every other
        // value, "false" included, means no filter.
        if filter.available.as_deref() == Some("true") {
            exprs.push(Filter::gt("availableCopies", 0i64));
        }

        let mut query = Query::builder().sort("createdAt", SortDirection::Desc);
        if !exprs.is_empty() {
            query = query.filter(Filter::and(exprs));
        }

        Ok(self.collection().query(query.build()).await?)
    }

    /// Fetches a single book by its identifier.
    pub async fn get(&self, id: &str) -> Result<Book, ApiError> {
        let id = parse_id(id)?;

        self.collection()
            .get(vec![id])
            .await?
            .into_iter()
            .next()
            .ok_or(ApiError::NotFound(RESOURCE))
    }

    /// Replaces a book in full: the stored record becomes exactly what the
    /// payload (plus defaults) describes, keeping only the original creation
    /// time.
    pub async fn update(&self, id: &str, input: BookInput) -> Result<Book, ApiError> {
        let id = parse_id(id)?;
        let now = Utc::now();
        let mut book = input
            .build(id, now, now)
            .map_err(ApiError::Validation)?;

        let existing = self
            .collection()
            .get(vec![id])
            .await?
            .into_iter()
            .next()
            .ok_or(ApiError::NotFound(RESOURCE))?;
        book.created_at = existing.created_at;

        self.collection()
            .update(vec![book.clone()])
            .await
            .map_err(|err| match err {
                StoreError::DocumentNotFound(..) => ApiError::NotFound(RESOURCE),
                other => other.into(),
            })?;

        Ok(book)
    }

    /// Deletes a book and returns the removed record.
    pub async fn delete(&self, id: &str) -> Result<Book, ApiError> {
        let id = parse_id(id)?;

        let book = self
            .collection()
            .get(vec![id])
            .await?
            .into_iter()
            .next()
            .ok_or(ApiError::NotFound(RESOURCE))?;

        self.collection()
            .delete(vec![id])
            .await
            .map_err(|err| match err {
                StoreError::DocumentNotFound(..) => ApiError::NotFound(RESOURCE),
                other => other.into(),
            })?;

        Ok(book)
    }

    /// Aggregates the whole collection; `None` when no books exist.
    pub async fn stats_summary(&self) -> Result<Option<BookStats>, ApiError> {
        let books = self.collection().query(Query::new()).await?;

        if books.is_empty() {
            return Ok(None);
        }

        let total_copies = books.iter().map(|book| book.available_copies).sum();
        let avg_price = books.iter().map(|book| book.price).sum::<f64>() / books.len() as f64;
        let genres: Vec<String> = books
            .iter()
            .map(|book| book.genre.as_str().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Ok(Some(BookStats {
            total_books: books.len() as u64,
            total_copies,
            avg_price,
            genres,
        }))
    }
}

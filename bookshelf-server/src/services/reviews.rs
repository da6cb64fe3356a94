//! Review query service: CRUD plus the per-book average-rating aggregate.

use std::sync::Arc;

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
    models::{RatingSummary, Review, ReviewFilter, ReviewInput},
    services::parse_id,
};

const RESOURCE: &str = "Review";

/// Application service for the reviews collection.
pub struct ReviewService<B: StoreBackend> {
    store: Arc<DocumentStore<B>>,
}

impl<B: StoreBackend> Clone for ReviewService<B> {
    fn clone(&self) -> Self {
        Self { store: self.store.clone() }
    }
}

impl<B: StoreBackend> ReviewService<B> {
    pub fn new(store: Arc<DocumentStore<B>>) -> Self {
        Self { store }
    }

    fn collection(&self) -> TypedCollection<'_, B, Review> {
        self.store.typed_collection::<Review>()
    }

    /// Validates and persists a new review.
    ///
    /// The referenced book is not checked for existence; a review may point at
    /// a book that was never created or has since been deleted.
    pub async fn create(&self, input: ReviewInput) -> Result<Review, ApiError> {
        let now = Utc::now();
        let review = input
            .build(Uuid::new(), now, now)
            .map_err(ApiError::Validation)?;

        self.collection().insert(vec![review.clone()]).await?;

        Ok(review)
    }

    /// Lists reviews, optionally restricted to one book, newest first.
    pub async fn list(&self, filter: ReviewFilter) -> Result<Vec<Review>, ApiError> {
        let mut query = Query::builder().sort("createdAt", SortDirection::Desc);

        if let Some(book_id) = filter.book_id {
            let book_id = parse_id(&book_id)?;
            query = query.filter(Filter::eq("bookId", book_id));
        }

        Ok(self.collection().query(query.build()).await?)
    }

    /// Fetches a single review by its identifier.
    pub async fn get(&self, id: &str) -> Result<Review, ApiError> {
        let id = parse_id(id)?;

        self.collection()
            .get(vec![id])
            .await?
            .into_iter()
            .next()
            .ok_or(ApiError::NotFound(RESOURCE))
    }

    /// Replaces a review in full, keeping only the original creation time.
    pub async fn update(&self, id: &str, input: ReviewInput) -> Result<Review, ApiError> {
        let id = parse_id(id)?;
        let now = Utc::now();
        let mut review = input
            .build(id, now, now)
            .map_err(ApiError::Validation)?;

        let existing = self
            .collection()
            .get(vec![id])
            .await?
            .into_iter()
            .next()
            .ok_or(ApiError::NotFound(RESOURCE))?;
        review.created_at = existing.created_at;

        self.collection()
            .update(vec![review.clone()])
            .await
            .map_err(|err| match err {
                StoreError::DocumentNotFound(..) => ApiError::NotFound(RESOURCE),
                other => other.into(),
            })?;

        Ok(review)
    }

    /// Deletes a review and returns the removed record.
    pub async fn delete(&self, id: &str) -> Result<Review, ApiError> {
        let id = parse_id(id)?;

        let review = self
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

        Ok(review)
    }

    /// Averages the ratings of one book's reviews.
    ///
    /// A book with no reviews yields `{avgRating: 0, count: 0}` rather than an
    /// error.
    pub async fn average_for_book(&self, book_id: &str) -> Result<RatingSummary, ApiError> {
        let book_id = parse_id(book_id)?;

        let reviews = self
            .collection()
            .query(
                Query::builder()
                    .filter(Filter::eq("bookId", book_id))
                    .build(),
            )
            .await?;

        if reviews.is_empty() {
            return Ok(RatingSummary { avg_rating: 0.0, count: 0 });
        }

        let avg_rating =
            reviews.iter().map(|review| review.rating).sum::<f64>() / reviews.len() as f64;

        Ok(RatingSummary {
            avg_rating,
            count: reviews.len() as u64,
        })
    }
}

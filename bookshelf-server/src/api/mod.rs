//! HTTP surface: routing, shared state, and the endpoints common to the whole API.

pub mod books;
pub mod reviews;

use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use bookshelf_core::{backend::StoreBackend, store::DocumentStore};

use crate::{
    response::Envelope,
    services::{BookService, ReviewService},
};

/// Shared per-request state: one service per collection, both borrowing the
/// single store handle created at startup.
pub struct AppState<B: StoreBackend> {
    pub books: BookService<B>,
    pub reviews: ReviewService<B>,
}

impl<B: StoreBackend> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            books: self.books.clone(),
            reviews: self.reviews.clone(),
        }
    }
}

impl<B: StoreBackend> AppState<B> {
    pub fn new(store: Arc<DocumentStore<B>>) -> Self {
        Self {
            books: BookService::new(store.clone()),
            reviews: ReviewService::new(store),
        }
    }
}

/// Builds the application router over any storage backend.
pub fn router<B: StoreBackend + 'static>(state: AppState<B>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/books", post(books::create_book::<B>).get(books::list_books::<B>))
        .route("/books/stats/summary", get(books::book_stats::<B>))
        .route(
            "/books/:id",
            get(books::get_book::<B>)
                .put(books::update_book::<B>)
                .delete(books::delete_book::<B>),
        )
        .route(
            "/reviews",
            post(reviews::create_review::<B>).get(reviews::list_reviews::<B>),
        )
        .route(
            "/reviews/:id",
            get(reviews::get_review::<B>)
                .put(reviews::update_review::<B>)
                .delete(reviews::delete_review::<B>),
        )
        .route("/reviews/book/:book_id/average", get(reviews::average_rating::<B>))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Self-describing API index.
async fn index() -> Json<Value> {
    Json(json!({
        "message": "Book Library API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "books": {
                "GET /books": "Get all books",
                "GET /books/:id": "Get book by ID",
                "POST /books": "Create new book",
                "PUT /books/:id": "Update book",
                "DELETE /books/:id": "Delete book",
                "GET /books/stats/summary": "Get book statistics",
            },
            "reviews": {
                "GET /reviews": "Get all reviews",
                "GET /reviews/:id": "Get review by ID",
                "POST /reviews": "Create new review",
                "PUT /reviews/:id": "Update review",
                "DELETE /reviews/:id": "Delete review",
                "GET /reviews/book/:bookId/average": "Get average rating for a book",
            },
        },
    }))
}

async fn not_found() -> (StatusCode, Json<Envelope<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(Envelope::failure("Route not found")),
    )
}

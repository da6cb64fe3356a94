//! Book endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use bookshelf_core::backend::StoreBackend;

use crate::{
    api::AppState,
    error::ApiError,
    models::{Book, BookFilter, BookInput},
    response::Envelope,
};

pub async fn create_book<B: StoreBackend + 'static>(
    State(state): State<AppState<B>>,
    Json(input): Json<BookInput>,
) -> Result<(StatusCode, Json<Envelope<Book>>), ApiError> {
    let book = state.books.create(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_message("Book created successfully", book)),
    ))
}

pub async fn list_books<B: StoreBackend + 'static>(
    State(state): State<AppState<B>>,
    Query(filter): Query<BookFilter>,
) -> Result<Json<Envelope<Vec<Book>>>, ApiError> {
    let books = state.books.list(filter).await?;

    Ok(Json(Envelope::list(books.len(), books)))
}

pub async fn get_book<B: StoreBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Book>>, ApiError> {
    let book = state.books.get(&id).await?;

    Ok(Json(Envelope::data(book)))
}

pub async fn update_book<B: StoreBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
    Json(input): Json<BookInput>,
) -> Result<Json<Envelope<Book>>, ApiError> {
    let book = state.books.update(&id, input).await?;

    Ok(Json(Envelope::with_message("Book updated successfully", book)))
}

pub async fn delete_book<B: StoreBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Book>>, ApiError> {
    let book = state.books.delete(&id).await?;

    Ok(Json(Envelope::with_message("Book deleted successfully", book)))
}

pub async fn book_stats<B: StoreBackend + 'static>(
    State(state): State<AppState<B>>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    // No books yet renders as an empty object, not null
    let data = match state.books.stats_summary().await? {
        Some(stats) => {
            serde_json::to_value(stats).map_err(|err| ApiError::Internal(err.to_string()))?
        }
        None => json!({}),
    };

    Ok(Json(Envelope::data(data)))
}

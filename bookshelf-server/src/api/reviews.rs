//! Review endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use bookshelf_core::backend::StoreBackend;

use crate::{
    api::AppState,
    error::ApiError,
    models::{RatingSummary, Review, ReviewFilter, ReviewInput},
    response::Envelope,
};

pub async fn create_review<B: StoreBackend + 'static>(
    State(state): State<AppState<B>>,
    Json(input): Json<ReviewInput>,
) -> Result<(StatusCode, Json<Envelope<Review>>), ApiError> {
    let review = state.reviews.create(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_message("Review created successfully", review)),
    ))
}

pub async fn list_reviews<B: StoreBackend + 'static>(
    State(state): State<AppState<B>>,
    Query(filter): Query<ReviewFilter>,
) -> Result<Json<Envelope<Vec<Review>>>, ApiError> {
    let reviews = state.reviews.list(filter).await?;

    Ok(Json(Envelope::list(reviews.len(), reviews)))
}

pub async fn get_review<B: StoreBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Review>>, ApiError> {
    let review = state.reviews.get(&id).await?;

    Ok(Json(Envelope::data(review)))
}

pub async fn update_review<B: StoreBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
    Json(input): Json<ReviewInput>,
) -> Result<Json<Envelope<Review>>, ApiError> {
    let review = state.reviews.update(&id, input).await?;

    Ok(Json(Envelope::with_message("Review updated successfully", review)))
}

pub async fn delete_review<B: StoreBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Review>>, ApiError> {
    let review = state.reviews.delete(&id).await?;

    Ok(Json(Envelope::with_message("Review deleted successfully", review)))
}

pub async fn average_rating<B: StoreBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(book_id): Path<String>,
) -> Result<Json<Envelope<RatingSummary>>, ApiError> {
    let summary = state.reviews.average_for_book(&book_id).await?;

    Ok(Json(Envelope::data(summary)))
}

//! End-to-end tests for the review endpoints against the in-memory store.

mod common;

use axum::{Router, http::StatusCode};
use serde_json::{Value, json};

use common::{delete, get, post, put, test_app};

const MISSING_ID: &str = "00000000-0000-4000-8000-000000000000";

fn review_payload(book_id: &str, rating: f64) -> Value {
    json!({
        "bookId": book_id,
        "reviewerName": "Alice",
        "rating": rating,
        "comment": "A sweeping, meticulous space opera.",
    })
}

async fn create_book(app: &Router) -> String {
    let (status, body) = post(
        app,
        "/books",
        json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "isbn": "9780441172719",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    body["data"]["id"].as_str().unwrap().to_string()
}

async fn create_review(app: &Router, payload: Value) -> String {
    let (status, body) = post(app, "/reviews", payload).await;
    assert_eq!(status, StatusCode::CREATED);

    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn create_then_fetch_returns_the_stored_review() {
    let app = test_app().await;
    let book_id = create_book(&app).await;

    let (status, body) = post(&app, "/reviews", review_payload(&book_id, 4.0)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], json!("Review created successfully"));
    assert_eq!(body["data"]["bookId"], json!(book_id));
    assert_eq!(body["data"]["verified"], json!(false));
    assert_eq!(body["data"]["helpful"], json!(0));

    let id = body["data"]["id"].as_str().unwrap();
    let (status, fetched) = get(&app, &format!("/reviews/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["reviewerName"], json!("Alice"));
    assert_eq!(fetched["data"]["rating"], json!(4.0));
}

#[tokio::test]
async fn invalid_payload_reports_every_violation() {
    let app = test_app().await;

    let (status, body) = post(
        &app,
        "/reviews",
        json!({
            "bookId": "not-a-uuid",
            "reviewerName": "A",
            "rating": 6,
            "comment": "meh",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);

    let errors: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e.as_str().unwrap())
        .collect();
    assert!(errors.contains(&"Book ID must be a valid identifier"));
    assert!(errors.contains(&"Reviewer name must be at least 2 characters long"));
    assert!(errors.contains(&"Rating must be between 1 and 5"));
    assert!(errors.contains(&"Comment must be at least 10 characters long"));
}

#[tokio::test]
async fn list_filters_by_book() {
    let app = test_app().await;
    let reviewed = create_book(&app).await;
    let other = MISSING_ID;

    create_review(&app, review_payload(&reviewed, 4.0)).await;
    create_review(&app, review_payload(&reviewed, 5.0)).await;
    create_review(&app, review_payload(other, 2.0)).await;

    let (status, body) = get(&app, &format!("/reviews?bookId={reviewed}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(2));
    assert!(
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .all(|review| review["bookId"] == json!(reviewed))
    );

    let (_, body) = get(&app, "/reviews").await;
    assert_eq!(body["count"], json!(3));

    let (status, body) = get(&app, "/reviews?bookId=garbage").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Invalid ID format"));
}

#[tokio::test]
async fn average_rating_for_a_book() {
    let app = test_app().await;
    let book_id = create_book(&app).await;

    for rating in [3.0, 4.0, 5.0] {
        create_review(&app, review_payload(&book_id, rating)).await;
    }

    let (status, body) = get(&app, &format!("/reviews/book/{book_id}/average")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["avgRating"], json!(4.0));
    assert_eq!(body["data"]["count"], json!(3));
}

#[tokio::test]
async fn average_rating_without_reviews_is_zero() {
    let app = test_app().await;

    let (status, body) = get(&app, &format!("/reviews/book/{MISSING_ID}/average")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({"avgRating": 0.0, "count": 0}));

    let (status, _) = get(&app, "/reviews/book/garbage/average").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_replaces_the_full_review() {
    let app = test_app().await;
    let book_id = create_book(&app).await;

    let mut payload = review_payload(&book_id, 4.0);
    payload["verified"] = json!(true);
    payload["helpful"] = json!(12);
    let id = create_review(&app, payload).await;

    // Omit verified and helpful entirely
    let (status, body) = put(&app, &format!("/reviews/{id}"), review_payload(&book_id, 2.0)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Review updated successfully"));
    assert_eq!(body["data"]["rating"], json!(2.0));
    // Omitted fields revert to their defaults
    assert_eq!(body["data"]["verified"], json!(false));
    assert_eq!(body["data"]["helpful"], json!(0));
}

#[tokio::test]
async fn delete_returns_the_removed_review() {
    let app = test_app().await;
    let book_id = create_book(&app).await;
    let id = create_review(&app, review_payload(&book_id, 4.0)).await;

    let (status, body) = delete(&app, &format!("/reviews/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Review deleted successfully"));

    let (status, body) = get(&app, &format!("/reviews/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Review not found"));
}

#[tokio::test]
async fn reviews_survive_deleting_their_book() {
    let app = test_app().await;
    let book_id = create_book(&app).await;
    let review_id = create_review(&app, review_payload(&book_id, 4.0)).await;

    let (status, _) = delete(&app, &format!("/books/{book_id}")).await;
    assert_eq!(status, StatusCode::OK);

    // No cascade: the review dangles but stays readable
    let (status, body) = get(&app, &format!("/reviews/{review_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["bookId"], json!(book_id));

    let (_, body) = get(&app, &format!("/reviews/book/{book_id}/average")).await;
    assert_eq!(body["data"]["count"], json!(1));
}

#[tokio::test]
async fn malformed_review_id_is_invalid_not_missing() {
    let app = test_app().await;

    let (status, body) = get(&app, "/reviews/garbage").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Invalid ID format"));

    let (status, _) = get(&app, &format!("/reviews/{MISSING_ID}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

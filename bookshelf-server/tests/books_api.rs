//! End-to-end tests for the book endpoints against the in-memory store.

mod common;

use std::time::Duration;

use axum::{Router, http::StatusCode};
use serde_json::{Value, json};

use common::{delete, get, post, put, test_app};

fn book_payload(title: &str, isbn: &str) -> Value {
    json!({
        "title": title,
        "author": "Frank Herbert",
        "isbn": isbn,
        "genre": "Science Fiction",
        "price": 9.99,
        "availableCopies": 3,
    })
}

/// Creates a book and returns its generated identifier.
async fn create_book(app: &Router, payload: Value) -> String {
    let (status, body) = post(app, "/books", payload).await;
    assert_eq!(status, StatusCode::CREATED);

    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn create_then_fetch_returns_the_stored_record() {
    let app = test_app().await;

    let (status, body) = post(&app, "/books", book_payload("Dune", "978-0-441-17271-9")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Book created successfully"));
    // Hyphens are stripped on the way in
    assert_eq!(body["data"]["isbn"], json!("9780441172719"));

    let id = body["data"]["id"].as_str().unwrap();
    let (status, fetched) = get(&app, &format!("/books/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["title"], json!("Dune"));
    assert_eq!(fetched["data"]["author"], json!("Frank Herbert"));
    assert_eq!(fetched["data"]["genre"], json!("Science Fiction"));
    assert_eq!(fetched["data"]["price"], json!(9.99));
    assert_eq!(fetched["data"]["availableCopies"], json!(3));
    assert_eq!(fetched["data"]["language"], json!("English"));
    assert!(fetched["data"]["createdAt"].is_string());
    assert!(fetched["data"]["updatedAt"].is_string());
}

#[tokio::test]
async fn duplicate_isbn_is_rejected_ignoring_hyphens() {
    let app = test_app().await;

    create_book(&app, book_payload("Dune", "978-0-441-17271-9")).await;

    let (status, body) = post(&app, "/books", book_payload("Dune (reissue)", "9780441172719")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("A book with this ISBN already exists"));
}

#[tokio::test]
async fn invalid_payload_reports_every_violation() {
    let app = test_app().await;

    let (status, body) = post(
        &app,
        "/books",
        json!({
            "title": "",
            "author": "",
            "isbn": "12345",
            "price": -1,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));

    let errors: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e.as_str().unwrap())
        .collect();
    assert!(errors.contains(&"Book title is required"));
    assert!(errors.contains(&"Author name is required"));
    assert!(errors.contains(&"Please provide a valid ISBN (10 or 13 digits)"));
    assert!(errors.contains(&"Price cannot be negative"));
}

#[tokio::test]
async fn list_applies_price_and_availability_filters() {
    let app = test_app().await;

    let mut cheap = book_payload("Cheap", "1111111111");
    cheap["price"] = json!(5.0);
    let mut middle = book_payload("Middle", "2222222222");
    middle["price"] = json!(15.0);
    let mut pricey = book_payload("Pricey", "3333333333");
    pricey["price"] = json!(25.0);
    pricey["availableCopies"] = json!(0);

    for payload in [cheap, middle, pricey] {
        create_book(&app, payload).await;
    }

    let (status, body) = get(&app, "/books?minPrice=10&maxPrice=20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["data"][0]["title"], json!("Middle"));

    // Inclusive bounds
    let (_, body) = get(&app, "/books?minPrice=5&maxPrice=15").await;
    assert_eq!(body["count"], json!(2));

    let (_, body) = get(&app, "/books?available=true").await;
    assert_eq!(body["count"], json!(2));
    assert!(
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .all(|book| book["availableCopies"].as_i64().unwrap() > 0)
    );

    // Anything but the literal "true" leaves the availability filter off
    let (_, body) = get(&app, "/books?available=false").await;
    assert_eq!(body["count"], json!(3));
}

#[tokio::test]
async fn list_matches_author_case_insensitively_and_genre_exactly() {
    let app = test_app().await;

    create_book(&app, book_payload("Dune", "1111111111")).await;

    let mut fantasy = book_payload("Earthsea", "2222222222");
    fantasy["author"] = json!("Ursula K. Le Guin");
    fantasy["genre"] = json!("Fantasy");
    create_book(&app, fantasy).await;

    let (_, body) = get(&app, "/books?author=le%20guin").await;
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["data"][0]["title"], json!("Earthsea"));

    let (_, body) = get(&app, "/books?genre=Fantasy").await;
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["data"][0]["title"], json!("Earthsea"));

    // Exact match only: an unknown genre label simply matches nothing
    let (_, body) = get(&app, "/books?genre=fantasy").await;
    assert_eq!(body["count"], json!(0));
}

#[tokio::test]
async fn list_orders_newest_first() {
    let app = test_app().await;

    for (title, isbn) in [("First", "1111111111"), ("Second", "2222222222"), ("Third", "3333333333")] {
        create_book(&app, book_payload(title, isbn)).await;
        // Creation timestamps carry millisecond precision
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let (_, body) = get(&app, "/books").await;
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|book| book["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Third", "Second", "First"]);
}

#[tokio::test]
async fn malformed_id_is_invalid_not_missing() {
    let app = test_app().await;

    let (status, body) = get(&app, "/books/not-a-valid-id").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Invalid ID format"));

    let (status, body) = get(&app, "/books/00000000-0000-4000-8000-000000000000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Book not found"));
}

#[tokio::test]
async fn update_replaces_the_full_document() {
    let app = test_app().await;

    let mut payload = book_payload("Dune", "1111111111");
    payload["description"] = json!("Desert planet epic");
    payload["publisher"] = json!("Chilton Books");
    let id = create_book(&app, payload).await;

    let (_, before) = get(&app, &format!("/books/{id}")).await;
    let created_at = before["data"]["createdAt"].clone();

    // Omit description, publisher, and availableCopies entirely
    let (status, body) = put(
        &app,
        &format!("/books/{id}"),
        json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "isbn": "1111111111",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Book updated successfully"));
    // Omitted optionals revert to their defaults, not their previous values
    assert!(body["data"].get("description").is_none());
    assert!(body["data"].get("publisher").is_none());
    assert_eq!(body["data"]["availableCopies"], json!(1));
    assert_eq!(body["data"]["genre"], json!("Other"));
    assert_eq!(body["data"]["price"], json!(0.0));
    // Creation time survives the replacement
    assert_eq!(body["data"]["createdAt"], created_at);
}

#[tokio::test]
async fn update_rejects_stealing_an_existing_isbn() {
    let app = test_app().await;

    create_book(&app, book_payload("Dune", "1111111111")).await;
    let id = create_book(&app, book_payload("Hyperion", "2222222222")).await;

    let (status, body) = put(&app, &format!("/books/{id}"), book_payload("Hyperion", "1111111111")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("A book with this ISBN already exists"));
}

#[tokio::test]
async fn update_of_a_missing_book_is_404() {
    let app = test_app().await;

    let (status, _) = put(
        &app,
        "/books/00000000-0000-4000-8000-000000000000",
        book_payload("Ghost", "1111111111"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_returns_the_removed_record() {
    let app = test_app().await;

    let id = create_book(&app, book_payload("Dune", "1111111111")).await;

    let (status, body) = delete(&app, &format!("/books/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Book deleted successfully"));
    assert_eq!(body["data"]["title"], json!("Dune"));

    let (status, _) = get(&app, &format!("/books/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = delete(&app, &format!("/books/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stats_summary_aggregates_the_catalog() {
    let app = test_app().await;

    // Empty catalog renders as an empty object
    let (status, body) = get(&app, "/books/stats/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({}));

    let mut first = book_payload("A", "1111111111");
    first["price"] = json!(10.0);
    first["availableCopies"] = json!(2);
    let mut second = book_payload("B", "2222222222");
    second["price"] = json!(20.0);
    second["availableCopies"] = json!(3);
    let mut third = book_payload("C", "3333333333");
    third["price"] = json!(30.0);
    third["availableCopies"] = json!(4);
    third["genre"] = json!("Fantasy");

    for payload in [first, second, third] {
        create_book(&app, payload).await;
    }

    let (_, body) = get(&app, "/books/stats/summary").await;
    assert_eq!(body["data"]["totalBooks"], json!(3));
    assert_eq!(body["data"]["totalCopies"], json!(9));
    assert_eq!(body["data"]["avgPrice"], json!(20.0));
    assert_eq!(body["data"]["genres"], json!(["Fantasy", "Science Fiction"]));
}

#[tokio::test]
async fn unmatched_routes_return_the_envelope_404() {
    let app = test_app().await;

    let (status, body) = get(&app, "/no/such/route").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "message": "Route not found"}));
}

#[tokio::test]
async fn index_describes_the_api() {
    let app = test_app().await;

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Book Library API"));
    assert!(body["endpoints"]["books"].is_object());
}

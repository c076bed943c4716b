//! API integration tests against a running server

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api";

/// Helper to create a book and return its response body
async fn create_book(client: &Client, title: &str, author: &str) -> Value {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": title,
            "isbn": "978-0-00-000000-0",
            "author": { "name": author }
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_list_books() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_create_update_and_delete_book() {
    let client = Client::new();

    let created = create_book(&client, "Test Book", "Integration Author").await;
    let book_id = created["id"].as_i64().expect("No book ID");
    assert_eq!(created["author"]["name"], "Integration Author");

    // Update
    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({
            "title": "Renamed Book",
            "isbn": "1",
            "author": { "name": "Integration Author" }
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id"], book_id);
    assert_eq!(body["title"], "Renamed Book");

    // Delete twice, both succeed
    for _ in 0..2 {
        let response = client
            .delete(format!("{}/books/{}", BASE_URL, book_id))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), 204);
    }

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_update_missing_book() {
    let client = Client::new();

    let response = client
        .put(format!("{}/books/{}", BASE_URL, i64::MAX))
        .json(&json!({
            "title": "X",
            "isbn": "1",
            "author": { "name": "Nobody" }
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_home_page() {
    let client = Client::new();

    let response = client
        .get("http://localhost:8080/")
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let page = response.text().await.expect("Failed to read page");
    assert!(page.contains("<h1>Books</h1>"));
}

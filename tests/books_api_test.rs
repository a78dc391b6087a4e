// Copyright 2025 The Shelf Server Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Book API Integration Tests
//!
//! Drives the complete application router through tower's oneshot, covering
//! the CRUD lifecycle, validation failures, the write-access guard, and the
//! unversioned operational endpoints.

#![allow(clippy::unwrap_used)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use shelf_server::{ShelfServer, ShelfServerConfig};
use tower::ServiceExt;

fn test_app(read_only: bool) -> Router {
    let mut config = ShelfServerConfig::default();
    config.server.read_only = read_only;
    let server = ShelfServer::from_config(config).expect("valid config");
    server.build_app().expect("app builds")
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).to_string(),
        ))
    };
    (status, value)
}

#[tokio::test]
async fn test_list_books_returns_seed_data() {
    let (status, body) = send(test_app(false), "GET", "/v1/books", None).await;

    assert_eq!(status, StatusCode::OK);
    let books = body.as_array().expect("array body");
    assert_eq!(books.len(), 2);
    assert_eq!(books[0]["title"], json!("1984"));
    assert_eq!(books[1]["author"], json!("J.R.R. Tolkien"));
}

#[tokio::test]
async fn test_get_book_by_id() {
    let (status, body) = send(test_app(false), "GET", "/v1/books/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["title"], json!("1984"));
    assert_eq!(body["author"], json!("George Orwell"));
}

#[tokio::test]
async fn test_get_unknown_book_returns_404() {
    let (status, body) = send(test_app(false), "GET", "/v1/books/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("BOOK_NOT_FOUND"));
}

#[tokio::test]
async fn test_get_non_numeric_id_returns_404() {
    let (status, body) = send(test_app(false), "GET", "/v1/books/not-a-number", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("BOOK_NOT_FOUND"));
}

#[tokio::test]
async fn test_create_book() {
    let app = test_app(false);

    let (status, body) = send(
        app.clone(),
        "POST",
        "/v1/books",
        Some(json!({"title": "Dune", "author": "Frank Herbert"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], json!(3));
    assert_eq!(body["title"], json!("Dune"));

    let (status, body) = send(app, "GET", "/v1/books/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["author"], json!("Frank Herbert"));
}

#[tokio::test]
async fn test_create_book_missing_author_returns_400() {
    let (status, body) = send(
        test_app(false),
        "POST",
        "/v1/books",
        Some(json!({"title": "Dune"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("INVALID_REQUEST"));
}

#[tokio::test]
async fn test_update_book_replaces_record() {
    let app = test_app(false);

    let (status, body) = send(
        app.clone(),
        "PUT",
        "/v1/books/1",
        Some(json!({"title": "Animal Farm", "author": "George Orwell"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["title"], json!("Animal Farm"));

    let (_, body) = send(app, "GET", "/v1/books/1", None).await;
    assert_eq!(body["title"], json!("Animal Farm"));
}

#[tokio::test]
async fn test_update_unknown_book_returns_404() {
    let (status, body) = send(
        test_app(false),
        "PUT",
        "/v1/books/999",
        Some(json!({"title": "x", "author": "y"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("BOOK_NOT_FOUND"));
}

#[tokio::test]
async fn test_delete_book_then_get_returns_404() {
    let app = test_app(false);

    let (status, body) = send(app.clone(), "DELETE", "/v1/books/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], json!("The Hobbit"));

    let (status, _) = send(app, "GET", "/v1/books/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_read_only_server_rejects_mutations() {
    let app = test_app(true);

    let (status, body) = send(
        app.clone(),
        "POST",
        "/v1/books",
        Some(json!({"title": "Dune", "author": "Frank Herbert"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], json!("WRITE_ACCESS_DENIED"));

    let (status, _) = send(app.clone(), "DELETE", "/v1/books/1", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Reads stay available
    let (status, _) = send(app, "GET", "/v1/books", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = send(test_app(false), "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn test_unmatched_path_serves_html_404() {
    let app = test_app(false);
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/no/such/path")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("404 - Not Found"));
}

#[tokio::test]
async fn test_routes_require_the_version_prefix() {
    let (status, _) = send(test_app(false), "GET", "/books", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_responses_carry_frame_options_header() {
    let app = test_app(false);
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(header::X_FRAME_OPTIONS).unwrap(),
        "DENY"
    );
}

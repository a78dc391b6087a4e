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

//! API v1 handler functions for the book catalog.
//!
//! Payload validation is done against the raw JSON body so that a missing
//! or empty field yields a 400 with an error code instead of the extractor's
//! default rejection.

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::response::Json;

use crate::api::error::{error_codes, ErrorResponse};
use crate::api::models::{Book, BookPayload};
use crate::store::BookStore;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn book_not_found(id: &str) -> ApiError {
    ErrorResponse::new(
        error_codes::BOOK_NOT_FOUND,
        format!("Book '{id}' not found"),
    )
    .with_status()
}

/// A non-numeric id cannot match any record, so it reads as not found
/// rather than a malformed request.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse().map_err(|_| book_not_found(raw))
}

fn parse_payload(value: &serde_json::Value) -> Result<BookPayload, ApiError> {
    let title = value.get("title").and_then(|v| v.as_str()).unwrap_or("");
    let author = value.get("author").and_then(|v| v.as_str()).unwrap_or("");
    if title.is_empty() || author.is_empty() {
        return Err(ErrorResponse::new(
            error_codes::INVALID_REQUEST,
            "Both 'title' and 'author' are required",
        )
        .with_status());
    }
    Ok(BookPayload {
        title: title.to_string(),
        author: author.to_string(),
    })
}

/// GET /v1/books
pub async fn list_books(Extension(store): Extension<BookStore>) -> Json<Vec<Book>> {
    Json(store.list().await)
}

/// GET /v1/books/:id
pub async fn get_book(
    Extension(store): Extension<BookStore>,
    Path(id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let id = parse_id(&id)?;
    store
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| book_not_found(&id.to_string()))
}

/// POST /v1/books
pub async fn create_book(
    Extension(store): Extension<BookStore>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let payload = parse_payload(&body)?;
    let book = store.create(payload).await;
    Ok((StatusCode::CREATED, Json(book)))
}

/// PUT /v1/books/:id
pub async fn update_book(
    Extension(store): Extension<BookStore>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Book>, ApiError> {
    let parsed = parse_id(&id)?;
    let payload = parse_payload(&body)?;
    store
        .update(parsed, payload)
        .await
        .map(Json)
        .ok_or_else(|| book_not_found(&id))
}

/// DELETE /v1/books/:id
pub async fn delete_book(
    Extension(store): Extension<BookStore>,
    Path(id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let parsed = parse_id(&id)?;
    store
        .delete(parsed)
        .await
        .map(Json)
        .ok_or_else(|| book_not_found(&id))
}

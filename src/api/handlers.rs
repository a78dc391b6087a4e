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

//! Handlers that are not tied to an API version.

use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;

use crate::api::responses::HealthResponse;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Catch-all for unmatched paths. Serves a small HTML page rather than the
/// default empty body.
pub async fn not_found() -> (StatusCode, Html<&'static str>) {
    (
        StatusCode::NOT_FOUND,
        Html("<html><body><h1>404 - Not Found</h1></body></html>"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_check_reports_healthy() {
        let Json(response) = health_check().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn not_found_serves_html() {
        let (status, Html(body)) = not_found().await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("404 - Not Found"));
    }
}

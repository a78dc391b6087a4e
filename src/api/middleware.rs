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

//! Route middleware guarding mutating endpoints.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::{error_codes, ErrorResponse};
use crate::routing::Middleware;

/// Whether mutating endpoints are enabled. Injected as a request extension
/// by the server so the guard stays free of configuration concerns.
#[derive(Debug, Clone, Copy)]
pub struct WriteAccess {
    pub enabled: bool,
}

/// Rejects the request with 403 unless write access is enabled. A missing
/// extension counts as disabled.
pub async fn require_write_access(req: Request, next: Next) -> Response {
    let enabled = req
        .extensions()
        .get::<WriteAccess>()
        .map(|access| access.enabled)
        .unwrap_or(false);
    if enabled {
        next.run(req).await
    } else {
        ErrorResponse::new(
            error_codes::WRITE_ACCESS_DENIED,
            "Write access is disabled on this server",
        )
        .with_status()
        .into_response()
    }
}

/// The guard packaged for attachment to a route definition.
pub fn write_guard() -> Middleware {
    Middleware::new(require_write_access)
}

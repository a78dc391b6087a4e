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

//! REST API implementation for Shelf Server.
//!
//! ## API Structure
//!
//! ```text
//! /health              - Health check (unversioned)
//! /docs                - Interactive API documentation
//! /openapi.json        - Aggregated OpenAPI document
//! /v1/books            - Book catalog management
//! ```
//!
//! ## Module Organization
//!
//! - `error` - Error codes and the API error envelope
//! - `handlers` - Handlers not tied to an API version
//! - `middleware` - Route guards for mutating endpoints
//! - `models` - Wire models for the catalog
//! - `responses` - Response types shared across versions
//! - `v1` - API version 1 implementation

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod responses;
pub mod v1;

pub use error::{error_codes, ErrorResponse};
pub use responses::HealthResponse;

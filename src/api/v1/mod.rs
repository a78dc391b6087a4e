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

//! API Version 1 (v1) implementation.
//!
//! All v1 endpoints are served under the `/v1/` prefix; their documented
//! paths omit the version and start at the resource base path.
//!
//! ## Endpoint Structure
//!
//! - `GET /v1/books` - List all books
//! - `GET /v1/books/{id}` - Get a book by id
//! - `POST /v1/books` - Add a book (write access required)
//! - `PUT /v1/books/{id}` - Replace a book (write access required)
//! - `DELETE /v1/books/{id}` - Remove a book (write access required)

pub mod handlers;
pub mod routes;

pub use routes::books;

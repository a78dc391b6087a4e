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

//! API v1 route definitions.
//!
//! One declarative route group per resource; the group derives both the
//! mounted router and the documented operations.

use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::response::ResponseBuilder;
use utoipa::openapi::schema::ArrayBuilder;
use utoipa::openapi::{Content, Ref, Required, Response};
use utoipa::ToSchema;

use super::handlers;
use crate::api::middleware::write_guard;
use crate::api::models::{Book, BookPayload};
use crate::api::ErrorResponse;
use crate::routing::{ApiMeta, ParamSpec, RouteDefinition, RouteGroup};

fn json_of(schema_name: &str) -> Content {
    Content::new(Ref::from_schema_name(schema_name))
}

fn json_response(description: &str, schema_name: &str) -> Response {
    ResponseBuilder::new()
        .description(description)
        .content("application/json", json_of(schema_name))
        .build()
}

fn error_response(description: &str) -> Response {
    json_response(description, "ErrorResponse")
}

fn book_body() -> utoipa::openapi::request_body::RequestBody {
    RequestBodyBuilder::new()
        .content("application/json", json_of("BookPayload"))
        .required(Some(Required::True))
        .build()
}

fn id_param() -> ParamSpec {
    ParamSpec::path("id")
        .required(true)
        .description("Book identifier")
}

/// The v1 book catalog group: CRUD over `/v1/books`, documented under
/// `/books`, with mutating routes behind the write-access guard.
pub fn books() -> RouteGroup {
    RouteGroup::new("books-v1")
        .version(1)
        .base_path("/books")
        .tag("Books")
        .route(
            RouteDefinition::get("/", handlers::list_books).api(
                ApiMeta::new()
                    .summary("List all books")
                    .response(
                        "200",
                        ResponseBuilder::new()
                            .description("All books in the catalog")
                            .content(
                                "application/json",
                                Content::new(
                                    ArrayBuilder::new()
                                        .items(Ref::from_schema_name("Book"))
                                        .build(),
                                ),
                            )
                            .build(),
                    )
                    .component(Book::schema())
                    .component(BookPayload::schema())
                    .component(ErrorResponse::schema()),
            ),
        )
        .route(
            RouteDefinition::get("/:id", handlers::get_book).api(
                ApiMeta::new()
                    .summary("Get a book by id")
                    .param(id_param())
                    .response("200", json_response("The requested book", "Book"))
                    .response("404", error_response("Book not found")),
            ),
        )
        .route(
            RouteDefinition::post("/", handlers::create_book)
                .middleware(write_guard())
                .api(
                    ApiMeta::new()
                        .summary("Add a book")
                        .request_body(book_body())
                        .response("201", json_response("The created book", "Book"))
                        .response("400", error_response("Missing title or author"))
                        .response("403", error_response("Write access is disabled")),
                ),
        )
        .route(
            RouteDefinition::put("/:id", handlers::update_book)
                .middleware(write_guard())
                .api(
                    ApiMeta::new()
                        .summary("Replace a book")
                        .param(id_param())
                        .request_body(book_body())
                        .response("200", json_response("The updated book", "Book"))
                        .response("400", error_response("Missing title or author"))
                        .response("403", error_response("Write access is disabled"))
                        .response("404", error_response("Book not found")),
                ),
        )
        .route(
            RouteDefinition::delete("/:id", handlers::delete_book)
                .middleware(write_guard())
                .api(
                    ApiMeta::new()
                        .summary("Remove a book")
                        .param(id_param())
                        .response("200", json_response("The removed book", "Book"))
                        .response("403", error_response("Write access is disabled"))
                        .response("404", error_response("Book not found")),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_builds_and_documents_both_paths() {
        let built = books().build().expect("group builds");
        assert_eq!(built.mount_prefix(), "/v1/books");

        let fragment = built.fragment();
        let paths: Vec<&String> = fragment.paths.keys().collect();
        assert_eq!(paths, ["/books", "/books/{id}"]);

        let by_id = &fragment.paths["/books/{id}"];
        assert_eq!(by_id.len(), 3);
        assert!(fragment.schemas.contains_key("Book"));
        assert!(fragment.schemas.contains_key("BookPayload"));
        assert!(fragment.schemas.contains_key("ErrorResponse"));
    }
}

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

//! In-memory book storage. [`BookStore`] is a cheap clonable handle shared
//! across handlers; insertion order is preserved for listings.

use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::api::models::{Book, BookPayload};

struct Inner {
    books: IndexMap<u64, Book>,
    next_id: u64,
}

#[derive(Clone)]
pub struct BookStore {
    inner: Arc<RwLock<Inner>>,
}

impl BookStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                books: IndexMap::new(),
                next_id: 1,
            })),
        }
    }

    /// A store preloaded with the sample catalog.
    pub fn with_seed_data() -> Self {
        let mut books = IndexMap::new();
        let mut next_id = 1;
        for (title, author) in [("1984", "George Orwell"), ("The Hobbit", "J.R.R. Tolkien")] {
            books.insert(
                next_id,
                Book {
                    id: next_id,
                    title: title.to_string(),
                    author: author.to_string(),
                },
            );
            next_id += 1;
        }
        Self {
            inner: Arc::new(RwLock::new(Inner { books, next_id })),
        }
    }

    pub async fn list(&self) -> Vec<Book> {
        self.inner.read().await.books.values().cloned().collect()
    }

    pub async fn get(&self, id: u64) -> Option<Book> {
        self.inner.read().await.books.get(&id).cloned()
    }

    /// Ids are assigned from a monotonic counter and never reused, so a
    /// create after a delete cannot collide with a live record.
    pub async fn create(&self, payload: BookPayload) -> Book {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;
        let book = Book {
            id,
            title: payload.title,
            author: payload.author,
        };
        inner.books.insert(id, book.clone());
        book
    }

    /// Full replacement of an existing record. Returns `None` when the id
    /// is unknown.
    pub async fn update(&self, id: u64, payload: BookPayload) -> Option<Book> {
        let mut inner = self.inner.write().await;
        if !inner.books.contains_key(&id) {
            return None;
        }
        let book = Book {
            id,
            title: payload.title,
            author: payload.author,
        };
        inner.books.insert(id, book.clone());
        Some(book)
    }

    /// Removes a record, returning it when it existed.
    pub async fn delete(&self, id: u64) -> Option<Book> {
        self.inner.write().await.books.shift_remove(&id)
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}

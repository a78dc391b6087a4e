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

//! Aggregation of per-group document fragments into one OpenAPI document.
//!
//! Merging is deterministic in fragment order: paths are merged key by key
//! and method by method, and for a collision on the same path and method the
//! later fragment wins. Schema components collide by name with the same
//! last-writer rule. `merge` rebuilds the document from scratch on every
//! call, so repeated aggregation of the same fragments is stable.

use indexmap::IndexMap;
use log::debug;
use utoipa::openapi::path::{Operation, PathItem, PathsBuilder};
use utoipa::openapi::schema::Schema;
use utoipa::openapi::{
    ComponentsBuilder, InfoBuilder, OpenApi, OpenApiBuilder, RefOr, Server,
};

use super::method::Method;

/// The documentation half of a built route group: canonical path keys
/// (version prefix excluded), one operation per method, and the named
/// schemas those operations reference.
#[derive(Clone, Default)]
pub struct Fragment {
    pub label: String,
    pub paths: IndexMap<String, IndexMap<Method, Operation>>,
    pub schemas: IndexMap<String, RefOr<Schema>>,
}

impl Fragment {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }
}

/// Top-level document identity. The server URL, when set, becomes the single
/// `servers` entry.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub version: String,
    pub server_url: Option<String>,
}

impl DocumentInfo {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            server_url: None,
        }
    }

    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }
}

/// Merge fragments, in order, into a complete OpenAPI document.
pub fn merge(info: &DocumentInfo, fragments: &[Fragment]) -> OpenApi {
    let mut paths: IndexMap<String, IndexMap<Method, Operation>> = IndexMap::new();
    let mut schemas: IndexMap<String, RefOr<Schema>> = IndexMap::new();

    for fragment in fragments {
        for (path, methods) in &fragment.paths {
            let merged = paths.entry(path.clone()).or_default();
            for (method, operation) in methods {
                if merged.insert(*method, operation.clone()).is_some() {
                    debug!(
                        "document: {} {} overridden by fragment '{}'",
                        method, path, fragment.label
                    );
                }
            }
        }
        for (name, schema) in &fragment.schemas {
            if schemas.insert(name.clone(), schema.clone()).is_some() {
                debug!(
                    "document: schema '{}' overridden by fragment '{}'",
                    name, fragment.label
                );
            }
        }
    }

    let mut paths_builder = PathsBuilder::new();
    for (path, methods) in paths {
        let mut item: Option<PathItem> = None;
        for (method, operation) in methods {
            item = Some(match item {
                None => PathItem::new(method.path_item_type(), operation),
                Some(mut existing) => {
                    existing.operations.insert(method.path_item_type(), operation);
                    existing
                }
            });
        }
        if let Some(item) = item {
            paths_builder = paths_builder.path(path, item);
        }
    }

    let components = schemas
        .into_iter()
        .fold(ComponentsBuilder::new(), |builder, (name, schema)| {
            builder.schema(name, schema)
        })
        .build();

    let servers = info
        .server_url
        .as_ref()
        .map(|url| vec![Server::new(url.clone())]);

    OpenApiBuilder::new()
        .info(
            InfoBuilder::new()
                .title(info.title.clone())
                .version(info.version.clone())
                .build(),
        )
        .paths(paths_builder.build())
        .components(Some(components))
        .servers(servers)
        .build()
}

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

//! Path translation between the dispatch engine's route syntax and the
//! OpenAPI path syntax.
//!
//! The dispatch engine marks path parameters with a `:` sigil (`/books/:id`);
//! the API description uses brace-delimited parameters (`/books/{id}`).
//! All functions here are pure and idempotent under re-application.

/// Collapse runs of `/` into one and strip a trailing slash.
///
/// A bare `"/"` is preserved; an empty input stays empty (an empty mount
/// prefix means "mounted at the root").
fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for c in path.chars() {
        if c == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(c);
    }
    while out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}

/// Join a mount prefix and a route path into one normalized path.
pub fn join(prefix: &str, path: &str) -> String {
    normalize(&format!("{prefix}{path}"))
}

/// Compute the canonical mount path for a versioned group: `/v{version}`
/// concatenated with the base path, slash-normalized. When `version` is
/// absent the version segment is omitted entirely.
pub fn mount_path(version: Option<u32>, base_path: &str) -> String {
    match version {
        Some(v) => normalize(&format!("/v{v}{base_path}")),
        None => normalize(base_path),
    }
}

/// Translate a dispatch-engine route path into its API-description form.
///
/// Concatenates `prefix` and `route_path`, normalizes slashes, and rewrites
/// every whole `:name` segment (name = alphanumeric/underscore) to `{name}`,
/// preserving the parameter name exactly. Does not check that path
/// parameters are also declared in the route's parameter list.
pub fn to_api_path(prefix: &str, route_path: &str) -> String {
    join(prefix, route_path)
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name)
                if !name.is_empty()
                    && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') =>
            {
                format!("{{{name}}}")
            }
            _ => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

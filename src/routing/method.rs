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

//! The closed set of HTTP methods a route definition may use.
//!
//! Routes declare their method through this enum rather than a free-form
//! string, and the mapping to the dispatch engine's registration filter is
//! checked exhaustively when a group is built. A method the engine cannot
//! bind fails at construction time, not at request time.

use std::fmt;

use axum::routing::MethodFilter;
use utoipa::openapi::PathItemType;

/// HTTP method of a route definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
    Connect,
}

impl Method {
    /// Get the uppercase method name (e.g. "GET").
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Connect => "CONNECT",
        }
    }

    /// Get all methods in the enum.
    pub fn all() -> &'static [Method] {
        &[
            Method::Get,
            Method::Post,
            Method::Put,
            Method::Patch,
            Method::Delete,
            Method::Head,
            Method::Options,
            Method::Trace,
            Method::Connect,
        ]
    }

    /// Registration filter for the dispatch engine.
    ///
    /// Returns `None` for methods the engine exposes no registration
    /// operation for; group construction turns that into a fail-fast error.
    pub fn dispatch_filter(&self) -> Option<MethodFilter> {
        match self {
            Method::Get => Some(MethodFilter::GET),
            Method::Post => Some(MethodFilter::POST),
            Method::Put => Some(MethodFilter::PUT),
            Method::Patch => Some(MethodFilter::PATCH),
            Method::Delete => Some(MethodFilter::DELETE),
            Method::Head => Some(MethodFilter::HEAD),
            Method::Options => Some(MethodFilter::OPTIONS),
            Method::Trace => Some(MethodFilter::TRACE),
            Method::Connect => None,
        }
    }

    /// The API-description key for this method.
    pub fn path_item_type(&self) -> PathItemType {
        match self {
            Method::Get => PathItemType::Get,
            Method::Post => PathItemType::Post,
            Method::Put => PathItemType::Put,
            Method::Patch => PathItemType::Patch,
            Method::Delete => PathItemType::Delete,
            Method::Head => PathItemType::Head,
            Method::Options => PathItemType::Options,
            Method::Trace => PathItemType::Trace,
            Method::Connect => PathItemType::Connect,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            "HEAD" => Ok(Method::Head),
            "OPTIONS" => Ok(Method::Options),
            "TRACE" => Ok(Method::Trace),
            "CONNECT" => Ok(Method::Connect),
            _ => Err(format!("Unknown HTTP method: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn round_trips_through_strings() {
        for method in Method::all() {
            assert_eq!(Method::from_str(method.as_str()), Ok(*method));
        }
        assert_eq!(Method::from_str("get"), Ok(Method::Get));
        assert!(Method::from_str("FETCH").is_err());
    }

    #[test]
    fn every_method_except_connect_is_dispatchable() {
        for method in Method::all() {
            let supported = method.dispatch_filter().is_some();
            assert_eq!(supported, *method != Method::Connect, "{method}");
        }
    }
}

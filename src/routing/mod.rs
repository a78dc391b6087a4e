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

//! Declarative route registration. Routes are described once and two
//! artifacts are derived from that single description: a live axum router
//! and an OpenAPI document fragment, which [`merge`] aggregates across
//! groups into the served document.

pub mod document;
pub mod group;
pub mod method;
pub mod operation;
pub mod path;

pub use document::{merge, DocumentInfo, Fragment};
pub use group::{BuiltGroup, Middleware, RouteDefinition, RouteError, RouteGroup};
pub use method::Method;
pub use operation::{ApiMeta, ParamLocation, ParamSpec};

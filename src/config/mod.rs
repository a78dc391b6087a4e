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

//! Configuration management for Shelf Server.
//!
//! Configuration files are YAML (JSON also accepted) and all loading paths
//! interpolate environment variables with POSIX-style syntax:
//! - `${VAR_NAME}` - required variable
//! - `${VAR_NAME:-default}` - variable with a default value
//!
//! # Configuration File Example
//!
//! ```yaml
//! app:
//!   name: "${APP_NAME:-Shelf Server API}"
//!
//! server:
//!   host: "${SERVER_HOST:-0.0.0.0}"
//!   port: "${SERVER_PORT:-8080}"
//!   log_level: "${LOG_LEVEL:-info}"
//!   read_only: false
//!
//! docs:
//!   path: "/docs"
//! ```

pub mod env_interpolation;
pub mod loader;
pub mod types;

// Re-export commonly used types
pub use loader::{from_json_str, from_yaml_str, load_config_file, save_config_file, ConfigError};
pub use types::{AppSettings, CorsSettings, DocsSettings, ServerSettings, ShelfServerConfig};

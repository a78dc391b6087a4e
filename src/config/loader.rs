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

//! Centralized configuration loading with automatic environment variable
//! interpolation. Files are tried as YAML first, then JSON.

use super::env_interpolation;
use super::types::ShelfServerConfig;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Unified error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Environment variable interpolation failed: {0}")]
    InterpolationError(#[from] env_interpolation::InterpolationError),

    #[error("Failed to parse config file '{path}': YAML error: {yaml_err}, JSON error: {json_err}")]
    ParseError {
        path: String,
        yaml_err: String,
        json_err: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(#[from] anyhow::Error),
}

/// Deserialize YAML after substituting `${VAR}` and `${VAR:-default}`
/// references.
pub fn from_yaml_str<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    let interpolated = env_interpolation::interpolate(s)?;
    Ok(serde_yaml::from_str(&interpolated)?)
}

/// Deserialize JSON after substituting `${VAR}` and `${VAR:-default}`
/// references.
pub fn from_json_str<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    let interpolated = env_interpolation::interpolate(s)?;
    Ok(serde_json::from_str(&interpolated)?)
}

/// Load and validate a [`ShelfServerConfig`] from a YAML or JSON file.
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<ShelfServerConfig, ConfigError> {
    let path_ref = path.as_ref();
    let content = fs::read_to_string(path_ref)?;

    let interpolated = env_interpolation::interpolate(&content)?;

    let config = match serde_yaml::from_str::<ShelfServerConfig>(&interpolated) {
        Ok(config) => config,
        Err(yaml_err) => match serde_json::from_str::<ShelfServerConfig>(&interpolated) {
            Ok(config) => config,
            Err(json_err) => {
                return Err(ConfigError::ParseError {
                    path: path_ref.display().to_string(),
                    yaml_err: yaml_err.to_string(),
                    json_err: json_err.to_string(),
                });
            }
        },
    };

    config.validate()?;

    Ok(config)
}

/// Save a configuration to a file in YAML format. Environment variable
/// references are not preserved; the interpolated values are written.
pub fn save_config_file<P: AsRef<Path>>(
    config: &ShelfServerConfig,
    path: P,
) -> Result<(), ConfigError> {
    let content = serde_yaml::to_string(config)?;
    Ok(fs::write(path, content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_yaml_str_interpolates() {
        use serde::Deserialize;

        #[derive(Deserialize, Debug, PartialEq)]
        struct TestConfig {
            name: String,
            value: i32,
        }

        env::set_var("SHELF_TEST_NAME", "test");
        env::set_var("SHELF_TEST_VALUE", "42");

        let yaml = "name: ${SHELF_TEST_NAME}\nvalue: ${SHELF_TEST_VALUE}\n";
        let config: TestConfig = from_yaml_str(yaml).unwrap();
        assert_eq!(
            config,
            TestConfig {
                name: "test".to_string(),
                value: 42
            }
        );
    }

    #[test]
    fn test_from_json_str_interpolates() {
        use serde::Deserialize;

        #[derive(Deserialize)]
        struct TestConfig {
            token: String,
        }

        env::set_var("SHELF_TEST_TOKEN", "secret");

        let json = r#"{"token": "${SHELF_TEST_TOKEN}"}"#;
        let config: TestConfig = from_json_str(json).unwrap();
        assert_eq!(config.token, "secret");
    }

    #[test]
    fn test_load_config_file_with_env_vars() {
        env::set_var("SHELF_TEST_HOST", "127.0.0.1");
        env::set_var("SHELF_TEST_PORT", "9090");

        let config_content = r#"
server:
  host: ${SHELF_TEST_HOST}
  port: ${SHELF_TEST_PORT}
  log_level: info
"#;

        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), config_content).unwrap();

        let config = load_config_file(temp_file.path()).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn test_load_config_file_with_defaults() {
        env::remove_var("SHELF_TEST_MISSING_HOST");

        let config_content = r#"
server:
  host: ${SHELF_TEST_MISSING_HOST:-localhost}
  port: 8080
"#;

        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), config_content).unwrap();

        let config = load_config_file(temp_file.path()).unwrap();
        assert_eq!(config.server.host, "localhost");
    }

    #[test]
    fn test_load_config_file_missing_required_var() {
        env::remove_var("SHELF_TEST_REQUIRED");

        let config_content = "server:\n  host: ${SHELF_TEST_REQUIRED}\n";

        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), config_content).unwrap();

        let result = load_config_file(temp_file.path());
        assert!(matches!(result, Err(ConfigError::InterpolationError(_))));
    }

    #[test]
    fn test_load_config_file_rejects_invalid_settings() {
        let config_content = "docs:\n  path: no-leading-slash\n";

        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), config_content).unwrap();

        let result = load_config_file(temp_file.path());
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_save_and_load_config_file() {
        let temp_file = NamedTempFile::new().unwrap();

        let mut config = ShelfServerConfig::default();
        config.server.host = "localhost".to_string();
        config.server.port = 9090;
        config.server.read_only = true;

        save_config_file(&config, temp_file.path()).unwrap();
        let loaded = load_config_file(temp_file.path()).unwrap();

        assert_eq!(loaded.server.host, "localhost");
        assert_eq!(loaded.server.port, 9090);
        assert!(loaded.server.read_only);
    }

    #[test]
    fn test_json_config_is_accepted() {
        let config_content = r#"{"server": {"port": 3000}}"#;

        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), config_content).unwrap();

        let config = load_config_file(temp_file.path()).unwrap();
        assert_eq!(config.server.port, 3000);
    }
}

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

//! Environment variable interpolation for configuration files.
//!
//! Replaces POSIX-style references before the file is parsed:
//! - `${VAR_NAME}` - required variable
//! - `${VAR_NAME:-default}` - default used when unset or empty
//!
//! # Examples
//!
//! ```
//! use shelf_server::config::env_interpolation::interpolate;
//! use std::env;
//!
//! env::set_var("SHELF_PORT", "8080");
//!
//! let input = "port: ${SHELF_PORT}\ndocs: ${SHELF_DOCS:-/docs}";
//! let result = interpolate(input).unwrap();
//! assert!(result.contains("port: 8080"));
//! assert!(result.contains("docs: /docs"));
//! ```

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::env;

/// Cap on the interpolated output size.
const MAX_INTERPOLATED_LENGTH: usize = 10_000_000; // 10MB

lazy_static! {
    /// Matches `${NAME}` and `${NAME:-default}` where NAME follows POSIX
    /// naming rules. Group 1 is the name, group 3 the default if present.
    static ref ENV_VAR_PATTERN: Regex = Regex::new(
        r"\$\{([A-Za-z_][A-Za-z0-9_]*)(:-([^}]*))?\}"
    ).expect("Invalid regex pattern");
}

/// Errors that can occur during environment variable interpolation.
#[derive(Debug, thiserror::Error)]
pub enum InterpolationError {
    #[error("Environment variable '{name}' is not set and has no default value")]
    MissingVariable { name: String },

    #[error("Interpolated result exceeds maximum allowed length of {MAX_INTERPOLATED_LENGTH} bytes")]
    ResultTooLarge,
}

/// Interpolate environment variables in the input string.
///
/// Only well-formed `${...}` patterns are processed; there is no recursive
/// expansion. An unset variable without a default is an error, as is an
/// interpolated result over the size cap.
pub fn interpolate(input: &str) -> Result<String, InterpolationError> {
    let mut result = String::with_capacity(input.len());
    let mut last_match_end = 0;
    let mut variables_used = Vec::new();

    for caps in ENV_VAR_PATTERN.captures_iter(input) {
        let full_match = caps.get(0).expect("capture 0 always present");
        let var_name = caps.get(1).expect("name group always present").as_str();
        let default_value = caps.get(3).map(|m| m.as_str());

        result.push_str(&input[last_match_end..full_match.start()]);

        let value = match env::var(var_name) {
            Ok(val) if !val.is_empty() => val,
            Ok(_) | Err(env::VarError::NotPresent) => match default_value {
                Some(default) => default.to_string(),
                None => {
                    return Err(InterpolationError::MissingVariable {
                        name: var_name.to_string(),
                    });
                }
            },
            Err(env::VarError::NotUnicode(_)) => {
                return Err(InterpolationError::MissingVariable {
                    name: format!("{var_name} (contains invalid Unicode)"),
                });
            }
        };

        variables_used.push(var_name);
        result.push_str(&value);
        last_match_end = full_match.end();

        if result.len() > MAX_INTERPOLATED_LENGTH {
            return Err(InterpolationError::ResultTooLarge);
        }
    }

    result.push_str(&input[last_match_end..]);

    // Names only, never values
    if !variables_used.is_empty() {
        debug!(
            "Interpolated environment variables: {}",
            variables_used.join(", ")
        );
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_interpolation() {
        env::set_var("INTERP_VAR1", "value1");
        env::set_var("INTERP_VAR2", "value2");

        let result = interpolate("a: ${INTERP_VAR1}\nb: ${INTERP_VAR2}").unwrap();
        assert_eq!(result, "a: value1\nb: value2");
    }

    #[test]
    fn test_default_value_when_var_not_set() {
        env::remove_var("INTERP_NONEXISTENT");

        let result = interpolate("value: ${INTERP_NONEXISTENT:-fallback}").unwrap();
        assert_eq!(result, "value: fallback");
    }

    #[test]
    fn test_default_value_when_var_is_empty() {
        env::set_var("INTERP_EMPTY", "");

        let result = interpolate("value: ${INTERP_EMPTY:-fallback}").unwrap();
        assert_eq!(result, "value: fallback");
    }

    #[test]
    fn test_variable_value_overrides_default() {
        env::set_var("INTERP_SET", "actual");

        let result = interpolate("value: ${INTERP_SET:-fallback}").unwrap();
        assert_eq!(result, "value: actual");
    }

    #[test]
    fn test_missing_variable_without_default() {
        env::remove_var("INTERP_MISSING");

        let result = interpolate("value: ${INTERP_MISSING}");
        assert!(matches!(
            result,
            Err(InterpolationError::MissingVariable { .. })
        ));
    }

    #[test]
    fn test_multiple_variables_in_same_string() {
        env::set_var("INTERP_HOST", "localhost");
        env::set_var("INTERP_PORT", "8080");

        let result = interpolate("url: http://${INTERP_HOST}:${INTERP_PORT}/v1").unwrap();
        assert_eq!(result, "url: http://localhost:8080/v1");
    }

    #[test]
    fn test_empty_default_value() {
        env::remove_var("INTERP_EMPTY_DEFAULT");

        let result = interpolate("value: ${INTERP_EMPTY_DEFAULT:-}").unwrap();
        assert_eq!(result, "value: ");
    }

    #[test]
    fn test_no_variables_returns_unchanged() {
        let input = "plain: text\nwith: no variables";
        assert_eq!(interpolate(input).unwrap(), input);
    }

    #[test]
    fn test_invalid_variable_name_with_dash() {
        // Dashes are not valid in POSIX names, so the pattern must not match
        let input = "value: ${INVALID-NAME}";
        assert_eq!(interpolate(input).unwrap(), input);
    }

    #[test]
    fn test_special_characters_in_values() {
        env::set_var("INTERP_SPECIAL", "value with spaces & symbols! @#$%");

        let result = interpolate("key: ${INTERP_SPECIAL}").unwrap();
        assert_eq!(result, "key: value with spaces & symbols! @#$%");
    }

    #[test]
    fn test_variable_in_quoted_string() {
        env::set_var("INTERP_SECRET", "secret123");

        let result = interpolate(r#"password: "${INTERP_SECRET}""#).unwrap();
        assert_eq!(result, r#"password: "secret123""#);
    }

    #[test]
    fn test_result_size_cap() {
        let long_value = "x".repeat(MAX_INTERPOLATED_LENGTH + 1);
        env::set_var("INTERP_VERY_LONG", &long_value);

        let result = interpolate("${INTERP_VERY_LONG}");
        assert!(matches!(result, Err(InterpolationError::ResultTooLarge)));
    }
}

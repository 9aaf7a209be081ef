// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Collects every failure instead of stopping at the first one.

use crate::diagnostic::ConfigError;
use crate::model::{OracleProvider, TaskwireConfig};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
pub fn validate_config(config: &TaskwireConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |field: &str, message: String| {
        errors.push(ConfigError::Validation {
            field: field.to_string(),
            message,
        });
    };

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host", "must not be empty".into());
    } else if host.parse::<std::net::IpAddr>().is_err()
        && !host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        fail(
            "server.host",
            format!("`{host}` is not a valid IP address or hostname"),
        );
    }

    if !LOG_LEVELS.contains(&config.server.log_level.as_str()) {
        fail(
            "server.log_level",
            format!(
                "`{}` is not one of {}",
                config.server.log_level,
                LOG_LEVELS.join(", ")
            ),
        );
    }

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path", "must not be empty".into());
    }

    if config.interpreter.timeout_secs == 0 {
        fail("interpreter.timeout_secs", "must be at least 1".into());
    }

    if config.users.lookup_limit == 0 {
        fail("users.lookup_limit", "must be at least 1".into());
    }

    if config.oracle.provider == OracleProvider::Anthropic {
        if config.anthropic.default_model.trim().is_empty() {
            fail("anthropic.default_model", "must not be empty".into());
        }
        if config.anthropic.max_tokens == 0 {
            fail("anthropic.max_tokens", "must be at least 1".into());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

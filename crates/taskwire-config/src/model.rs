// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Taskwire service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Taskwire configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TaskwireConfig {
    /// HTTP listener and logging settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Anthropic API settings.
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// Which oracle interprets commands.
    #[serde(default)]
    pub oracle: OracleConfig,

    /// Command interpreter behavior.
    #[serde(default)]
    pub interpreter: InterpreterConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// User roster settings.
    #[serde(default)]
    pub users: UsersConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind the HTTP listener to.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Anthropic API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnthropicConfig {
    /// Anthropic API key. `None` falls back to `ANTHROPIC_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for command interpretation.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Maximum tokens in a response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Anthropic API version header value.
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_model: default_model(),
            max_tokens: default_max_tokens(),
            api_version: default_api_version(),
        }
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

/// Which oracle backs the command interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleProvider {
    /// Anthropic Messages API with tool use.
    #[default]
    Anthropic,
    /// Local keyword heuristics, no network.
    Heuristic,
}

/// Oracle selection.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OracleConfig {
    #[serde(default)]
    pub provider: OracleProvider,
}

/// What the interpreter does when the oracle produces no usable intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Always produce an intent; unusable oracle output becomes a single
    /// medium-priority create with the raw command as title.
    #[default]
    Create,
    /// Pass the oracle's free text back to the caller.
    Message,
}

/// Command interpreter configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InterpreterConfig {
    #[serde(default)]
    pub fallback: FallbackPolicy,

    /// Upper bound on a single oracle call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of todos rendered into the oracle context.
    #[serde(default = "default_max_context_todos")]
    pub max_context_todos: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            fallback: FallbackPolicy::default(),
            timeout_secs: default_timeout_secs(),
            max_context_todos: default_max_context_todos(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_context_todos() -> usize {
    200
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("taskwire").join("taskwire.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("taskwire.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// User roster configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UsersConfig {
    /// Maximum number of profiles returned by the users endpoint and
    /// offered to the oracle for assignment.
    #[serde(default = "default_lookup_limit")]
    pub lookup_limit: usize,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            lookup_limit: default_lookup_limit(),
        }
    }
}

fn default_lookup_limit() -> usize {
    50
}

// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./taskwire.toml` > `~/.config/taskwire/taskwire.toml` >
//! `/etc/taskwire/taskwire.toml` with environment variable overrides via `TASKWIRE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::TaskwireConfig;

/// Sections that may be targeted from `TASKWIRE_<SECTION>_<KEY>` variables.
const ENV_SECTIONS: &[&str] = &[
    "server",
    "anthropic",
    "oracle",
    "interpreter",
    "storage",
    "users",
];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/taskwire/taskwire.toml` (system-wide)
/// 3. `~/.config/taskwire/taskwire.toml` (user XDG config)
/// 4. `./taskwire.toml` (local directory)
/// 5. `TASKWIRE_*` environment variables
pub fn load_config() -> Result<TaskwireConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<TaskwireConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TaskwireConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TaskwireConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TaskwireConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(TaskwireConfig::default()))
        .merge(Toml::file("/etc/taskwire/taskwire.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("taskwire/taskwire.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("taskwire.toml"))
        .merge(env_provider())
}

/// Environment provider mapping `TASKWIRE_SECTION_KEY` to `section.key`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `TASKWIRE_STORAGE_DATABASE_PATH` maps to `storage.database_path`.
fn env_provider() -> Env {
    Env::prefixed("TASKWIRE_").map(|key| {
        let key_str = key.as_str();
        ENV_SECTIONS
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or_else(|| key_str.to_string())
            .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FallbackPolicy, OracleProvider};

    #[test]
    fn env_overrides_nested_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TASKWIRE_STORAGE_DATABASE_PATH", "/tmp/jail.db");
            jail.set_env("TASKWIRE_INTERPRETER_FALLBACK", "message");
            jail.set_env("TASKWIRE_ORACLE_PROVIDER", "heuristic");
            jail.set_env("TASKWIRE_SERVER_PORT", "8088");

            let config = load_config_from_path(Path::new("missing.toml"))?;
            assert_eq!(config.storage.database_path, "/tmp/jail.db");
            assert_eq!(config.interpreter.fallback, FallbackPolicy::Message);
            assert_eq!(config.oracle.provider, OracleProvider::Heuristic);
            assert_eq!(config.server.port, 8088);
            Ok(())
        });
    }

    #[test]
    fn local_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "taskwire.toml",
                "[users]\nlookup_limit = 10\n[interpreter]\ntimeout_secs = 5\n",
            )?;
            let config = load_config()?;
            assert_eq!(config.users.lookup_limit, 10);
            assert_eq!(config.interpreter.timeout_secs, 5);
            Ok(())
        });
    }
}

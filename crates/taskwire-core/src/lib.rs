// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Taskwire todo service.
//!
//! This crate provides the record types, the error type, and the adapter
//! traits that the store, the oracles and the gateway are written against.

pub mod error;
pub mod traits;
pub mod types;

pub use error::TaskwireError;
pub use types::{
    AdapterType, ChangeEvent, HealthStatus, NewTodo, OracleReply, OracleRequest, Priority,
    Profile, ScopedChange, Todo, TodoPatch, ToolSpec,
};

pub use traits::{AuthAdapter, OracleAdapter, PluginAdapter, TodoStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_classified() {
        assert!(TaskwireError::Validation("empty".into()).is_client_error());
        assert!(TaskwireError::Authentication.is_client_error());
        assert!(
            TaskwireError::NoMatch {
                criteria: "xyz".into()
            }
            .is_client_error()
        );
        assert!(!TaskwireError::interpretation("oracle down").is_client_error());
        assert!(
            !TaskwireError::Persistence {
                source: Box::new(std::io::Error::other("disk")),
            }
            .is_client_error()
        );
    }

    #[test]
    fn adapter_type_round_trips_through_strings() {
        use std::str::FromStr;

        for variant in [AdapterType::Storage, AdapterType::Oracle, AdapterType::Auth] {
            let parsed = AdapterType::from_str(&variant.to_string()).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_store<T: TodoStore>() {}
        fn _assert_oracle<T: OracleAdapter>() {}
        fn _assert_auth<T: AuthAdapter>() {}
    }
}

// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Taskwire service.

use thiserror::Error;

/// The primary error type used across all Taskwire adapter traits and the
/// command pipeline.
#[derive(Debug, Error)]
pub enum TaskwireError {
    /// Caller input was rejected before any work was done (empty command,
    /// malformed request body).
    #[error("validation error: {0}")]
    Validation(String),

    /// The actor could not be identified.
    #[error("authentication required")]
    Authentication,

    /// The oracle failed, timed out, or produced output that does not map to
    /// a known intent.
    #[error("interpretation error: {message}")]
    Interpretation {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A completion criteria selected zero todos.
    #[error("no todos match `{criteria}`")]
    NoMatch { criteria: String },

    /// Record store failure (connection, query, constraint).
    #[error("persistence error: {source}")]
    Persistence {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The actor is neither the owner nor the assignee of the todo.
    #[error("todo {todo_id} is not accessible to this user")]
    Forbidden { todo_id: String },

    /// A referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TaskwireError {
    /// Shorthand for an interpretation error without an underlying cause.
    pub fn interpretation(message: impl Into<String>) -> Self {
        Self::Interpretation {
            message: message.into(),
            source: None,
        }
    }

    /// Whether this error was caused by the caller rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::Authentication
                | Self::NoMatch { .. }
                | Self::Forbidden { .. }
                | Self::NotFound { .. }
        )
    }
}

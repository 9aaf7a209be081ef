// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record types shared by the store, the command pipeline and the gateway.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Storage,
    Oracle,
    Auth,
}

/// Todo priority. Ordered from least to most pressing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// A user profile. Read-only to the command pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Profile {
    /// Human-facing label: name, then full name, then the email local part.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| self.full_name.as_deref().filter(|n| !n.trim().is_empty()))
            .unwrap_or_else(|| self.email_local_part())
    }

    /// The part of the email before `@`.
    pub fn email_local_part(&self) -> &str {
        self.email.split('@').next().unwrap_or(&self.email)
    }
}

/// A persisted todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub order_index: i64,
    /// Owner (creator) profile id.
    pub user_id: String,
    #[serde(default)]
    pub assigned_user_id: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl Todo {
    /// Whether `user_id` may see and mutate this todo.
    pub fn is_visible_to(&self, user_id: &str) -> bool {
        self.user_id == user_id || self.assigned_user_id.as_deref() == Some(user_id)
    }
}

/// A todo that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub order_index: i64,
    pub user_id: String,
    pub assigned_user_id: Option<String>,
    pub priority: Option<Priority>,
}

/// Partial update applied to an existing todo. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TodoPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    /// `Some(None)` clears the assignee.
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_user_id: Option<Option<String>>,
    #[serde(default)]
    pub order_index: Option<i64>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.completed.is_none()
            && self.assigned_user_id.is_none()
            && self.order_index.is_none()
    }
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// A row-level change emitted by the record store after a successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum ChangeEvent {
    Insert { todo: Todo },
    Update { todo: Todo },
    Delete { id: String },
}

impl ChangeEvent {
    /// Event name used on the wire (SSE `event:` field).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Insert { .. } => "insert",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
        }
    }

    /// Id of the todo this event concerns.
    pub fn todo_id(&self) -> &str {
        match self {
            Self::Insert { todo } | Self::Update { todo } => &todo.id,
            Self::Delete { id } => id,
        }
    }
}

/// A store-wide change as broadcast by the record store. Carries the scope
/// information needed to route it to the right subscribers.
#[derive(Debug, Clone)]
pub struct ScopedChange {
    pub event: ChangeEvent,
    /// Users who could see the todo before this change.
    pub previous_audience: Vec<String>,
}

impl ScopedChange {
    /// Project this change onto what `user_id` should observe, if anything.
    ///
    /// A user who loses visibility through an update observes a delete.
    pub fn for_user(&self, user_id: &str) -> Option<ChangeEvent> {
        let was_visible = self.previous_audience.iter().any(|u| u == user_id);
        match &self.event {
            ChangeEvent::Insert { todo } => {
                todo.is_visible_to(user_id).then(|| self.event.clone())
            }
            ChangeEvent::Update { todo } => {
                if todo.is_visible_to(user_id) {
                    Some(if was_visible {
                        self.event.clone()
                    } else {
                        ChangeEvent::Insert { todo: todo.clone() }
                    })
                } else if was_visible {
                    Some(ChangeEvent::Delete {
                        id: todo.id.clone(),
                    })
                } else {
                    None
                }
            }
            ChangeEvent::Delete { .. } => was_visible.then(|| self.event.clone()),
        }
    }
}

// --- Oracle types ---

/// A function the oracle may call, described by a JSON Schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// A single-shot interpretation request sent to an oracle.
#[derive(Debug, Clone)]
pub struct OracleRequest {
    /// The trimmed raw command.
    pub command: String,
    /// Rendered snapshot of todos, roster and actor.
    pub context: String,
    /// Users that may be assigned, for oracles that resolve names locally.
    pub roster: Vec<Profile>,
    pub tools: Vec<ToolSpec>,
    /// When true the oracle must answer with a function call.
    pub require_tool: bool,
}

/// What the oracle answered.
#[derive(Debug, Clone, PartialEq)]
pub enum OracleReply {
    Call {
        name: String,
        arguments: serde_json::Value,
    },
    Text(String),
}

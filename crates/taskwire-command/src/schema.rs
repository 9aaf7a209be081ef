// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The closed set of intents a command can produce, and their function
//! schemas.
//!
//! Wire names match the function names offered to the oracle
//! (`create_todos`, `filter_todos`, `complete_todos`) and argument keys are
//! camelCase.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use taskwire_core::{Priority, TaskwireError, Todo, ToolSpec};
use tracing::warn;

pub const CREATE_TODOS: &str = "create_todos";
pub const FILTER_TODOS: &str = "filter_todos";
pub const COMPLETE_TODOS: &str = "complete_todos";

/// One todo to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Reference to the intended assignee, normally a roster email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_user_email: Option<String>,
}

/// Conjunctive filter over the visible todo set. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_me: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_me: Option<bool>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether `todo` satisfies every set field, as seen by `actor_id`.
    pub fn matches(&self, todo: &Todo, actor_id: &str) -> bool {
        let keyword_ok = self.keyword.as_deref().is_none_or(|k| {
            todo.title
                .to_lowercase()
                .contains(&k.trim().to_lowercase())
        });
        let priority_ok = self.priority.is_none_or(|p| todo.priority == Some(p));
        let completed_ok = self.completed.is_none_or(|c| todo.completed == c);
        let assigned_ok = self
            .assigned_to_me
            .is_none_or(|want| (todo.assigned_user_id.as_deref() == Some(actor_id)) == want);
        let created_ok = self
            .created_by_me
            .is_none_or(|want| (todo.user_id == actor_id) == want);
        keyword_ok && priority_ok && completed_ok && assigned_ok && created_ok
    }

    /// Set fields as `(wire key, value)` pairs, in schema order.
    pub fn describe(&self) -> Vec<(&'static str, String)> {
        let mut parts = Vec::new();
        if let Some(k) = &self.keyword {
            parts.push(("keyword", k.clone()));
        }
        if let Some(p) = self.priority {
            parts.push(("priority", p.to_string()));
        }
        if let Some(c) = self.completed {
            parts.push(("completed", c.to_string()));
        }
        if let Some(a) = self.assigned_to_me {
            parts.push(("assignedToMe", a.to_string()));
        }
        if let Some(c) = self.created_by_me {
            parts.push(("createdByMe", c.to_string()));
        }
        parts
    }
}

/// A structured command. Constructed by the interpreter, consumed once by
/// the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "function", content = "arguments", rename_all = "snake_case")]
pub enum Intent {
    CreateTodos { todos: Vec<TodoDraft> },
    FilterTodos { criteria: FilterCriteria },
    CompleteTodos { criteria: String },
}

// Lenient shapes accepted from oracles before normalization.

#[derive(Deserialize)]
struct RawCreate {
    todos: Vec<RawDraft>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDraft {
    #[serde(default)]
    title: String,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    assigned_user_email: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCriteria {
    #[serde(default)]
    keyword: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    completed: Option<bool>,
    #[serde(default)]
    assigned_to_me: Option<bool>,
    #[serde(default)]
    created_by_me: Option<bool>,
}

#[derive(Deserialize)]
struct RawFilter {
    #[serde(default)]
    criteria: Option<RawCriteria>,
}

#[derive(Deserialize)]
struct RawComplete {
    criteria: String,
}

fn parse_priority(raw: Option<String>) -> Option<Priority> {
    let raw = raw?;
    match Priority::from_str(raw.trim()) {
        Ok(p) => Some(p),
        Err(_) => {
            warn!(priority = %raw, "ignoring unknown priority");
            None
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn bad_arguments(function: &str, e: serde_json::Error) -> TaskwireError {
    TaskwireError::Interpretation {
        message: format!("malformed arguments for {function}: {e}"),
        source: Some(Box::new(e)),
    }
}

impl Intent {
    /// Parse a function-call payload into an intent.
    ///
    /// Unknown function names and malformed arguments are interpretation
    /// errors. Drafts with blank titles are dropped; a create with no drafts
    /// left is an error.
    pub fn from_call(name: &str, arguments: Value) -> Result<Self, TaskwireError> {
        match name {
            CREATE_TODOS => {
                let raw: RawCreate =
                    serde_json::from_value(arguments).map_err(|e| bad_arguments(name, e))?;
                let todos: Vec<TodoDraft> = raw
                    .todos
                    .into_iter()
                    .filter_map(|d| {
                        let title = d.title.trim().to_string();
                        (!title.is_empty()).then(|| TodoDraft {
                            title,
                            priority: parse_priority(d.priority),
                            assigned_user_email: non_blank(d.assigned_user_email),
                        })
                    })
                    .collect();
                if todos.is_empty() {
                    return Err(TaskwireError::interpretation(
                        "create_todos call contained no usable titles",
                    ));
                }
                Ok(Self::CreateTodos { todos })
            }
            FILTER_TODOS => {
                let raw: RawFilter =
                    serde_json::from_value(arguments).map_err(|e| bad_arguments(name, e))?;
                let criteria = raw
                    .criteria
                    .map(|c| FilterCriteria {
                        keyword: non_blank(c.keyword),
                        priority: parse_priority(c.priority),
                        completed: c.completed,
                        assigned_to_me: c.assigned_to_me,
                        created_by_me: c.created_by_me,
                    })
                    .unwrap_or_default();
                Ok(Self::FilterTodos { criteria })
            }
            COMPLETE_TODOS => {
                let raw: RawComplete =
                    serde_json::from_value(arguments).map_err(|e| bad_arguments(name, e))?;
                let criteria = raw.criteria.trim().to_string();
                if criteria.is_empty() {
                    return Err(TaskwireError::interpretation(
                        "complete_todos call had empty criteria",
                    ));
                }
                Ok(Self::CompleteTodos { criteria })
            }
            other => Err(TaskwireError::interpretation(format!(
                "unknown function `{other}`"
            ))),
        }
    }

    /// The single-entry create used when nothing better is available.
    pub fn default_create(raw_command: &str) -> Self {
        Self::CreateTodos {
            todos: vec![TodoDraft {
                title: raw_command.trim().to_string(),
                priority: Some(Priority::Medium),
                assigned_user_email: None,
            }],
        }
    }

    pub fn function_name(&self) -> &'static str {
        match self {
            Self::CreateTodos { .. } => CREATE_TODOS,
            Self::FilterTodos { .. } => FILTER_TODOS,
            Self::CompleteTodos { .. } => COMPLETE_TODOS,
        }
    }

    /// Arguments in wire form.
    pub fn arguments(&self) -> Value {
        match self {
            Self::CreateTodos { todos } => json!({ "todos": todos }),
            Self::FilterTodos { criteria } => json!({ "criteria": criteria }),
            Self::CompleteTodos { criteria } => json!({ "criteria": criteria }),
        }
    }
}

fn priority_schema(description: &str) -> Value {
    json!({
        "type": "string",
        "enum": ["low", "medium", "high", "urgent"],
        "description": description
    })
}

/// Function definitions offered to the oracle.
pub fn tool_specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: CREATE_TODOS.into(),
            description: "Create one or more new todos".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "todos": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "title": {
                                    "type": "string",
                                    "description": "Short actionable title"
                                },
                                "priority": priority_schema("Priority of the todo"),
                                "assignedUserEmail": {
                                    "type": "string",
                                    "description": "Email of the user to assign the todo to"
                                }
                            },
                            "required": ["title"]
                        }
                    }
                },
                "required": ["todos"]
            }),
        },
        ToolSpec {
            name: FILTER_TODOS.into(),
            description: "Show only the todos matching the given criteria".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "criteria": {
                        "type": "object",
                        "properties": {
                            "keyword": {
                                "type": "string",
                                "description": "Text that must appear in the title"
                            },
                            "priority": priority_schema("Only todos with this priority"),
                            "completed": {
                                "type": "boolean",
                                "description": "Only completed (true) or open (false) todos"
                            },
                            "assignedToMe": {
                                "type": "boolean",
                                "description": "Only todos assigned to the current user"
                            },
                            "createdByMe": {
                                "type": "boolean",
                                "description": "Only todos created by the current user"
                            }
                        }
                    }
                },
                "required": ["criteria"]
            }),
        },
        ToolSpec {
            name: COMPLETE_TODOS.into(),
            description: "Mark the todos described by the criteria as complete".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "criteria": {
                        "type": "string",
                        "description": "Which todos to complete, e.g. \"urgent\", \"kitchen\", \"all\""
                    }
                },
                "required": ["criteria"]
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(title: &str, owner: &str, assignee: Option<&str>) -> Todo {
        Todo {
            id: title.into(),
            title: title.into(),
            completed: false,
            order_index: 0,
            user_id: owner.into(),
            assigned_user_id: assignee.map(String::from),
            priority: Some(Priority::High),
            created_at: String::new(),
        }
    }

    #[test]
    fn parses_create_and_drops_blank_titles() {
        let intent = Intent::from_call(
            CREATE_TODOS,
            json!({"todos": [
                {"title": " Clean garage ", "priority": "URGENT", "assignedUserEmail": "john@company.com"},
                {"title": "   "},
                {"title": "Buy milk", "priority": "someday", "assignedUserEmail": ""}
            ]}),
        )
        .unwrap();
        assert_eq!(
            intent,
            Intent::CreateTodos {
                todos: vec![
                    TodoDraft {
                        title: "Clean garage".into(),
                        priority: Some(Priority::Urgent),
                        assigned_user_email: Some("john@company.com".into()),
                    },
                    TodoDraft {
                        title: "Buy milk".into(),
                        priority: None,
                        assigned_user_email: None,
                    },
                ]
            }
        );
    }

    #[test]
    fn create_without_titles_is_rejected() {
        let err = Intent::from_call(CREATE_TODOS, json!({"todos": [{"title": ""}]})).unwrap_err();
        assert!(matches!(err, TaskwireError::Interpretation { .. }));
        assert!(Intent::from_call(CREATE_TODOS, json!({"todos": "nope"})).is_err());
    }

    #[test]
    fn unknown_function_is_rejected() {
        let err = Intent::from_call("delete_everything", json!({})).unwrap_err();
        assert!(err.to_string().contains("delete_everything"));
    }

    #[test]
    fn filter_defaults_missing_criteria() {
        let intent = Intent::from_call(FILTER_TODOS, json!({})).unwrap();
        assert_eq!(
            intent,
            Intent::FilterTodos {
                criteria: FilterCriteria::default()
            }
        );
    }

    #[test]
    fn complete_requires_criteria() {
        assert!(Intent::from_call(COMPLETE_TODOS, json!({"criteria": "  "})).is_err());
        assert!(Intent::from_call(COMPLETE_TODOS, json!({})).is_err());
    }

    #[test]
    fn wire_form_uses_camel_case_keys() {
        let intent = Intent::FilterTodos {
            criteria: FilterCriteria {
                assigned_to_me: Some(true),
                ..Default::default()
            },
        };
        assert_eq!(intent.function_name(), "filter_todos");
        assert_eq!(
            intent.arguments(),
            json!({"criteria": {"assignedToMe": true}})
        );
        let tagged = serde_json::to_value(&intent).unwrap();
        assert_eq!(tagged["function"], "filter_todos");
    }

    #[test]
    fn arguments_parse_back_to_the_same_intent() {
        let intent = Intent::default_create("water the plants");
        let parsed = Intent::from_call(intent.function_name(), intent.arguments()).unwrap();
        assert_eq!(parsed, intent);
    }

    #[test]
    fn criteria_match_conjunctively() {
        let mine = todo("Clean kitchen", "me", None);
        let assigned = todo("Kitchen floor", "boss", Some("me"));
        let criteria = FilterCriteria {
            keyword: Some("KITCHEN".into()),
            assigned_to_me: Some(true),
            ..Default::default()
        };
        assert!(!criteria.matches(&mine, "me"));
        assert!(criteria.matches(&assigned, "me"));

        let created = FilterCriteria {
            created_by_me: Some(true),
            priority: Some(Priority::High),
            ..Default::default()
        };
        assert!(created.matches(&mine, "me"));
        assert!(!created.matches(&assigned, "me"));
        assert!(FilterCriteria::default().matches(&assigned, "me"));
    }

    #[test]
    fn tool_specs_cover_every_intent() {
        let names: Vec<String> = tool_specs().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec![CREATE_TODOS, FILTER_TODOS, COMPLETE_TODOS]);
    }
}

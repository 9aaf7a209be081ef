// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Applies intents, and direct board edits, to the record store.
//!
//! The executor holds no state between calls. Every mutation of an existing
//! todo requires the actor to be its owner or assignee.

use std::sync::Arc;

use serde::Serialize;
use taskwire_core::{NewTodo, Priority, Profile, TaskwireError, Todo, TodoPatch, TodoStore};
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::schema::{FilterCriteria, Intent, TodoDraft};

/// Which intent an [`ExecutionResult`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Filter,
    Complete,
}

/// A single write that failed inside an otherwise applied batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionFailure {
    pub todo_id: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    pub action: Action,
    /// Created, matched or completed todos, depending on the action.
    pub todos: Vec<Todo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ExecutionFailure>,
}

/// Todos a completion criteria selects, among the incomplete ones.
///
/// The criteria is free text. `urgent`/`important` select titles carrying
/// either word and todos with high or urgent priority; `kitchen` selects
/// kitchen titles; `all` or `everything` selects every open todo; anything
/// else is matched against titles verbatim.
pub fn select_for_completion<'a>(criteria: &str, todos: &'a [Todo]) -> Vec<&'a Todo> {
    let needle = criteria.trim().to_lowercase();
    let open = todos.iter().filter(|t| !t.completed);

    if needle.contains("urgent") || needle.contains("important") {
        open.filter(|t| {
            title_has(t, "urgent")
                || title_has(t, "important")
                || matches!(t.priority, Some(Priority::High | Priority::Urgent))
        })
        .collect()
    } else if needle.contains("kitchen") {
        open.filter(|t| title_has(t, "kitchen")).collect()
    } else if needle
        .split(|c: char| !c.is_alphanumeric())
        .any(|w| w == "all" || w == "everything")
    {
        open.collect()
    } else {
        open.filter(|t| title_has(t, &needle)).collect()
    }
}

fn title_has(todo: &Todo, term: &str) -> bool {
    todo.title.to_lowercase().contains(term)
}

/// Next free order index in a scope: `max(existing, 0) + 1`.
pub fn next_order_index(todos: &[Todo]) -> i64 {
    todos.iter().map(|t| t.order_index).max().unwrap_or(0).max(0) + 1
}

pub struct Executor {
    store: Arc<dyn TodoStore>,
}

impl Executor {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// Apply `intent` on behalf of `actor`.
    pub async fn execute(
        &self,
        intent: Intent,
        actor: &Profile,
    ) -> Result<ExecutionResult, TaskwireError> {
        match intent {
            Intent::CreateTodos { todos } => self.create(todos, actor).await,
            Intent::FilterTodos { criteria } => self.filter(&criteria, actor).await,
            Intent::CompleteTodos { criteria } => self.complete(&criteria, actor).await,
        }
    }

    async fn create(
        &self,
        drafts: Vec<TodoDraft>,
        actor: &Profile,
    ) -> Result<ExecutionResult, TaskwireError> {
        let visible = self.store.list_visible_todos(&actor.id).await?;
        let first = next_order_index(&visible);

        let mut rows = Vec::with_capacity(drafts.len());
        for (offset, draft) in drafts.into_iter().enumerate() {
            let assigned_user_id = match draft.assigned_user_email.as_deref() {
                Some(email) => self.assignee_id(email).await,
                None => None,
            };
            rows.push(NewTodo {
                title: draft.title,
                order_index: first + offset as i64,
                user_id: actor.id.clone(),
                assigned_user_id,
                priority: draft.priority,
            });
        }

        let created = self.store.insert_todos(rows).await?;
        info!(actor = %actor.email, count = created.len(), "todos created");
        Ok(ExecutionResult {
            action: Action::Create,
            todos: created,
            failures: Vec::new(),
        })
    }

    /// Exact email lookup. An unknown or unreadable assignee leaves the todo
    /// unassigned.
    async fn assignee_id(&self, email: &str) -> Option<String> {
        match self.store.get_profile_by_email(email).await {
            Ok(Some(profile)) => Some(profile.id),
            Ok(None) => {
                debug!(reference = %email, "assignee not on roster, leaving unassigned");
                None
            }
            Err(e) => {
                warn!(reference = %email, error = %e, "assignee lookup failed, leaving unassigned");
                None
            }
        }
    }

    async fn filter(
        &self,
        criteria: &FilterCriteria,
        actor: &Profile,
    ) -> Result<ExecutionResult, TaskwireError> {
        let todos = self
            .store
            .list_visible_todos(&actor.id)
            .await?
            .into_iter()
            .filter(|t| criteria.matches(t, &actor.id))
            .collect();
        Ok(ExecutionResult {
            action: Action::Filter,
            todos,
            failures: Vec::new(),
        })
    }

    async fn complete(
        &self,
        criteria: &str,
        actor: &Profile,
    ) -> Result<ExecutionResult, TaskwireError> {
        let visible = self.store.list_visible_todos(&actor.id).await?;
        let selected: Vec<String> = select_for_completion(criteria, &visible)
            .into_iter()
            .map(|t| t.id.clone())
            .collect();
        if selected.is_empty() {
            return Err(TaskwireError::NoMatch {
                criteria: criteria.to_string(),
            });
        }

        let mut completed = Vec::with_capacity(selected.len());
        let mut failures = Vec::new();
        let mut first_error = None;
        for id in selected {
            let patch = TodoPatch {
                completed: Some(true),
                ..Default::default()
            };
            match self.store.update_todo(&id, patch).await {
                Ok(todo) => completed.push(todo),
                Err(e) => {
                    warn!(todo_id = %id, error = %e, "failed to complete todo");
                    failures.push(ExecutionFailure {
                        todo_id: id,
                        error: e.to_string(),
                    });
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        if completed.is_empty()
            && let Some(e) = first_error
        {
            return Err(e);
        }
        info!(
            actor = %actor.email,
            completed = completed.len(),
            failed = failures.len(),
            "todos completed"
        );
        Ok(ExecutionResult {
            action: Action::Complete,
            todos: completed,
            failures,
        })
    }

    /// Load a todo the actor may mutate.
    async fn accessible(&self, id: &str, actor: &Profile) -> Result<Todo, TaskwireError> {
        let todo = self
            .store
            .get_todo(id)
            .await?
            .ok_or_else(|| TaskwireError::NotFound {
                entity: "todo",
                id: id.to_string(),
            })?;
        if !todo.is_visible_to(&actor.id) {
            return Err(TaskwireError::Forbidden {
                todo_id: id.to_string(),
            });
        }
        Ok(todo)
    }

    /// Add a single todo at the end of the actor's list.
    pub async fn add_todo(&self, title: &str, actor: &Profile) -> Result<Todo, TaskwireError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskwireError::Validation("title must not be empty".into()));
        }
        let visible = self.store.list_visible_todos(&actor.id).await?;
        let row = NewTodo {
            title: title.to_string(),
            order_index: next_order_index(&visible),
            user_id: actor.id.clone(),
            assigned_user_id: None,
            priority: None,
        };
        self.store
            .insert_todos(vec![row])
            .await?
            .pop()
            .ok_or_else(|| TaskwireError::Internal("insert returned no row".into()))
    }

    pub async fn update_todo(
        &self,
        id: &str,
        patch: TodoPatch,
        actor: &Profile,
    ) -> Result<Todo, TaskwireError> {
        if patch.is_empty() {
            return Err(TaskwireError::Validation("nothing to update".into()));
        }
        self.accessible(id, actor).await?;
        if let Some(Some(assignee)) = &patch.assigned_user_id
            && self.store.get_profile(assignee).await?.is_none()
        {
            return Err(TaskwireError::Validation(format!(
                "unknown assignee `{assignee}`"
            )));
        }
        self.store.update_todo(id, patch).await
    }

    pub async fn delete_todo(&self, id: &str, actor: &Profile) -> Result<(), TaskwireError> {
        self.accessible(id, actor).await?;
        self.store.delete_todo(id).await
    }

    /// Put the actor's board in the order given by `ids`.
    ///
    /// The new order is computed up front and returned; each changed index
    /// is then persisted with its own update. Concurrent reorders are
    /// last-write-wins per row.
    pub async fn reorder(
        &self,
        ids: &[String],
        actor: &Profile,
    ) -> Result<Vec<Todo>, TaskwireError> {
        let mut board = Board::from_snapshot(
            actor.id.clone(),
            self.store.list_visible_todos(&actor.id).await?,
        );
        if let Some(unknown) = ids.iter().find(|id| board.get(id).is_none()) {
            return Err(TaskwireError::NotFound {
                entity: "todo",
                id: unknown.clone(),
            });
        }

        let changes = board.reorder(ids);
        debug!(actor = %actor.email, changed = changes.len(), "reordering board");
        for (id, order_index) in changes {
            let patch = TodoPatch {
                order_index: Some(order_index),
                ..Default::default()
            };
            self.store.update_todo(&id, patch).await?;
        }
        Ok(board.all().into_iter().cloned().collect())
    }
}

// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record store trait for todos and profiles.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::TaskwireError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{NewTodo, Profile, ScopedChange, Todo, TodoPatch};

/// Persistence for todos and the profile roster, plus a change feed.
///
/// Every successful write is published on the change feed after it commits.
#[async_trait]
pub trait TodoStore: PluginAdapter {
    /// Initializes the backend (migrations, connection).
    async fn initialize(&self) -> Result<(), TaskwireError>;

    /// Flushes pending writes and releases the connection.
    async fn close(&self) -> Result<(), TaskwireError>;

    /// Todos owned by or assigned to `user_id`, ordered by order index.
    async fn list_visible_todos(&self, user_id: &str) -> Result<Vec<Todo>, TaskwireError>;

    async fn get_todo(&self, id: &str) -> Result<Option<Todo>, TaskwireError>;

    /// Inserts all todos in one transaction. Either every row is written or
    /// none is.
    async fn insert_todos(&self, todos: Vec<NewTodo>) -> Result<Vec<Todo>, TaskwireError>;

    /// Applies a partial update and returns the updated row.
    async fn update_todo(&self, id: &str, patch: TodoPatch) -> Result<Todo, TaskwireError>;

    async fn delete_todo(&self, id: &str) -> Result<(), TaskwireError>;

    /// Up to `limit` profiles ordered by email.
    async fn list_profiles(&self, limit: usize) -> Result<Vec<Profile>, TaskwireError>;

    async fn get_profile(&self, id: &str) -> Result<Option<Profile>, TaskwireError>;

    async fn get_profile_by_email(&self, email: &str) -> Result<Option<Profile>, TaskwireError>;

    /// Subscribe to the store-wide change feed.
    fn subscribe(&self) -> broadcast::Receiver<ScopedChange>;
}

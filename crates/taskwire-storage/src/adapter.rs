// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the record store and token authentication.

use async_trait::async_trait;
use tokio::sync::{OnceCell, broadcast};
use tracing::{debug, trace};

use taskwire_config::model::StorageConfig;
use taskwire_core::{
    AdapterType, AuthAdapter, ChangeEvent, HealthStatus, NewTodo, PluginAdapter, Profile,
    ScopedChange, TaskwireError, Todo, TodoPatch, TodoStore,
};

use crate::database::Database;
use crate::queries;

/// Buffered change events per subscriber before it is considered lagging.
const CHANGE_FEED_CAPACITY: usize = 256;

/// SQLite-backed record store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily opened on the first call to
/// [`TodoStore::initialize`]. Every committed write is published on a
/// broadcast change feed.
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
    changes: broadcast::Sender<ScopedChange>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until [`TodoStore::initialize`] is called.
    pub fn new(config: StorageConfig) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_FEED_CAPACITY);
        Self {
            config,
            db: OnceCell::new(),
            changes,
        }
    }

    /// An initialized store over a private in-memory database.
    pub async fn open_in_memory() -> Result<Self, TaskwireError> {
        let db = Database::open_in_memory().await?;
        let (changes, _) = broadcast::channel(CHANGE_FEED_CAPACITY);
        Ok(Self {
            config: StorageConfig {
                database_path: ":memory:".to_string(),
                wal_mode: false,
            },
            db: OnceCell::new_with(Some(db)),
            changes,
        })
    }

    fn db(&self) -> Result<&Database, TaskwireError> {
        self.db.get().ok_or_else(|| TaskwireError::Persistence {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }

    fn publish(&self, event: ChangeEvent, previous_audience: Vec<String>) {
        trace!(kind = event.kind(), id = event.todo_id(), "publishing change");
        // No subscribers is not an error.
        let _ = self.changes.send(ScopedChange {
            event,
            previous_audience,
        });
    }

    /// Register a new profile.
    pub async fn create_profile(
        &self,
        email: &str,
        name: Option<&str>,
        full_name: Option<&str>,
    ) -> Result<Profile, TaskwireError> {
        if !email.contains('@') {
            return Err(TaskwireError::Validation(format!(
                "`{email}` is not an email address"
            )));
        }
        queries::profiles::insert(self.db()?, email, name, full_name).await
    }

    /// Issue a bearer token for an existing profile.
    pub async fn issue_token(&self, user_id: &str) -> Result<String, TaskwireError> {
        queries::sessions::create(self.db()?, user_id).await
    }

    /// Revoke a bearer token.
    pub async fn revoke_token(&self, token: &str) -> Result<bool, TaskwireError> {
        queries::sessions::revoke(self.db()?, token).await
    }
}

fn audience(todo: &Todo) -> Vec<String> {
    let mut users = vec![todo.user_id.clone()];
    if let Some(assignee) = &todo.assigned_user_id
        && assignee != &todo.user_id
    {
        users.push(assignee.clone());
    }
    users
}

fn check_title(title: &str) -> Result<(), TaskwireError> {
    if title.trim().is_empty() {
        return Err(TaskwireError::Validation("title must not be empty".into()));
    }
    Ok(())
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, TaskwireError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), TaskwireError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl TodoStore for SqliteStorage {
    async fn initialize(&self) -> Result<(), TaskwireError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| TaskwireError::Persistence {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), TaskwireError> {
        self.db()?.checkpoint().await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    async fn list_visible_todos(&self, user_id: &str) -> Result<Vec<Todo>, TaskwireError> {
        queries::todos::list_visible(self.db()?, user_id).await
    }

    async fn get_todo(&self, id: &str) -> Result<Option<Todo>, TaskwireError> {
        queries::todos::get(self.db()?, id).await
    }

    async fn insert_todos(&self, todos: Vec<NewTodo>) -> Result<Vec<Todo>, TaskwireError> {
        for todo in &todos {
            check_title(&todo.title)?;
        }
        let inserted = queries::todos::insert_batch(self.db()?, todos).await?;
        for todo in &inserted {
            self.publish(ChangeEvent::Insert { todo: todo.clone() }, Vec::new());
        }
        Ok(inserted)
    }

    async fn update_todo(&self, id: &str, patch: TodoPatch) -> Result<Todo, TaskwireError> {
        if let Some(title) = &patch.title {
            check_title(title)?;
        }
        let (before, after) = queries::todos::update(self.db()?, id, patch)
            .await?
            .ok_or_else(|| TaskwireError::NotFound {
                entity: "todo",
                id: id.to_string(),
            })?;
        self.publish(
            ChangeEvent::Update {
                todo: after.clone(),
            },
            audience(&before),
        );
        Ok(after)
    }

    async fn delete_todo(&self, id: &str) -> Result<(), TaskwireError> {
        let before = queries::todos::delete(self.db()?, id)
            .await?
            .ok_or_else(|| TaskwireError::NotFound {
                entity: "todo",
                id: id.to_string(),
            })?;
        self.publish(
            ChangeEvent::Delete {
                id: before.id.clone(),
            },
            audience(&before),
        );
        Ok(())
    }

    async fn list_profiles(&self, limit: usize) -> Result<Vec<Profile>, TaskwireError> {
        queries::profiles::list(self.db()?, limit).await
    }

    async fn get_profile(&self, id: &str) -> Result<Option<Profile>, TaskwireError> {
        queries::profiles::get(self.db()?, id).await
    }

    async fn get_profile_by_email(&self, email: &str) -> Result<Option<Profile>, TaskwireError> {
        queries::profiles::get_by_email(self.db()?, email).await
    }

    fn subscribe(&self) -> broadcast::Receiver<ScopedChange> {
        self.changes.subscribe()
    }
}

#[async_trait]
impl AuthAdapter for SqliteStorage {
    async fn authenticate(&self, token: &str) -> Result<Profile, TaskwireError> {
        if token.is_empty() {
            return Err(TaskwireError::Authentication);
        }
        queries::sessions::profile_for_token(self.db()?, token)
            .await?
            .ok_or(TaskwireError::Authentication)
    }
}

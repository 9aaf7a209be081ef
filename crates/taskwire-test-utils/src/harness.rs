// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a temp-file SQLite store, a roster of profiles
//! with session tokens, and a command pipeline backed by either the
//! [`MockOracle`] or the heuristic oracle.

use std::sync::Arc;

use taskwire_command::{CommandPipeline, HeuristicOracle, RunOutcome};
use taskwire_config::model::{FallbackPolicy, StorageConfig, TaskwireConfig};
use taskwire_core::{OracleAdapter, OracleReply, Profile, TaskwireError, Todo, TodoStore};
use taskwire_storage::SqliteStorage;

use crate::mock_oracle::MockOracle;

/// Email of the profile every harness acts as by default.
pub const ACTOR_EMAIL: &str = "me@company.com";

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    replies: Vec<OracleReply>,
    heuristic: bool,
    fallback: FallbackPolicy,
    users: Vec<(String, String)>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            replies: Vec::new(),
            heuristic: false,
            fallback: FallbackPolicy::Create,
            users: Vec::new(),
        }
    }

    /// Set scripted oracle replies.
    pub fn with_oracle_replies(mut self, replies: Vec<OracleReply>) -> Self {
        self.replies = replies;
        self
    }

    /// Interpret commands with the keyword heuristics instead of the mock.
    pub fn with_heuristic_oracle(mut self) -> Self {
        self.heuristic = true;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Register an extra profile alongside the acting user.
    pub fn with_user(mut self, email: &str, name: &str) -> Self {
        self.users.push((email.to_string(), name.to_string()));
        self
    }

    /// Build the harness, creating the database and all profiles.
    pub async fn build(self) -> Result<TestHarness, TaskwireError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| TaskwireError::Persistence { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let mut config = TaskwireConfig::default();
        config.storage = StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        };
        config.interpreter.fallback = self.fallback;

        let storage = SqliteStorage::new(config.storage.clone());
        storage.initialize().await?;
        let storage = Arc::new(storage);

        let actor = storage
            .create_profile(ACTOR_EMAIL, Some("Me"), None)
            .await?;
        let actor_token = storage.issue_token(&actor.id).await?;
        let mut users = vec![actor.clone()];
        for (email, name) in &self.users {
            users.push(storage.create_profile(email, Some(name), None).await?);
        }

        let mock_oracle = Arc::new(MockOracle::with_replies(self.replies));
        let oracle: Arc<dyn OracleAdapter> = if self.heuristic {
            Arc::new(HeuristicOracle::new())
        } else {
            mock_oracle.clone()
        };
        let pipeline = Arc::new(CommandPipeline::new(storage.clone(), oracle, &config));

        tracing::debug!(users = users.len(), heuristic = self.heuristic, "test harness ready");

        Ok(TestHarness {
            mock_oracle,
            storage,
            pipeline,
            config,
            actor,
            actor_token,
            users,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with a scripted oracle and temp storage.
pub struct TestHarness {
    /// The scripted oracle; unused when built with the heuristic oracle.
    pub mock_oracle: Arc<MockOracle>,
    /// SQLite store (temp DB, cleaned up on drop).
    pub storage: Arc<SqliteStorage>,
    pub pipeline: Arc<CommandPipeline>,
    pub config: TaskwireConfig,
    /// The profile commands run as by default.
    pub actor: Profile,
    /// Bearer token for [`TestHarness::actor`].
    pub actor_token: String,
    users: Vec<Profile>,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Look up a registered profile by email.
    pub fn user(&self, email: &str) -> Option<&Profile> {
        self.users.iter().find(|u| u.email == email)
    }

    /// Issue a fresh bearer token for a registered profile.
    pub async fn token_for(&self, email: &str) -> Result<String, TaskwireError> {
        let profile = self.user(email).ok_or_else(|| TaskwireError::NotFound {
            entity: "profile",
            id: email.to_string(),
        })?;
        self.storage.issue_token(&profile.id).await
    }

    /// Interpret and apply a command as the acting user.
    pub async fn run(&self, command: &str) -> Result<RunOutcome, TaskwireError> {
        self.pipeline.run(command, &self.actor).await
    }

    /// Interpret and apply a command as another registered user.
    pub async fn run_as(&self, email: &str, command: &str) -> Result<RunOutcome, TaskwireError> {
        let profile = self.user(email).ok_or_else(|| TaskwireError::NotFound {
            entity: "profile",
            id: email.to_string(),
        })?;
        self.pipeline.run(command, profile).await
    }

    /// Todos visible to a registered user.
    pub async fn todos_of(&self, email: &str) -> Result<Vec<Todo>, TaskwireError> {
        let profile = self.user(email).ok_or_else(|| TaskwireError::NotFound {
            entity: "profile",
            id: email.to_string(),
        })?;
        self.storage.list_visible_todos(&profile.id).await
    }

    /// Queue a reply on the scripted oracle.
    pub async fn add_oracle_reply(&self, reply: OracleReply) {
        self.mock_oracle.add_reply(reply).await;
    }
}

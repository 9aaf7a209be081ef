// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wires the interpreter and the executor to a record store.

use std::sync::Arc;

use taskwire_config::model::TaskwireConfig;
use taskwire_core::{OracleAdapter, Profile, TaskwireError, TodoStore};
use tracing::{debug, instrument};

use crate::executor::{ExecutionResult, Executor};
use crate::interpreter::{CommandContext, Interpretation, Interpreter};
use crate::preview::{self, Preview};
use crate::schema::Intent;

/// Result of [`CommandPipeline::run`].
#[derive(Debug)]
pub enum RunOutcome {
    Applied {
        intent: Intent,
        preview: Preview,
        result: ExecutionResult,
    },
    Message(String),
}

pub struct CommandPipeline {
    store: Arc<dyn TodoStore>,
    interpreter: Interpreter,
    executor: Executor,
    roster_limit: usize,
}

impl CommandPipeline {
    pub fn new(
        store: Arc<dyn TodoStore>,
        oracle: Arc<dyn OracleAdapter>,
        config: &TaskwireConfig,
    ) -> Self {
        Self {
            interpreter: Interpreter::new(oracle, &config.interpreter),
            executor: Executor::new(store.clone()),
            store,
            roster_limit: config.users.lookup_limit,
        }
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Snapshot of what `actor` can see plus the assignable roster.
    pub async fn context_for(&self, actor: &Profile) -> Result<CommandContext, TaskwireError> {
        Ok(CommandContext {
            todos: self.store.list_visible_todos(&actor.id).await?,
            users: self.store.list_profiles(self.roster_limit).await?,
            current_user_email: actor.email.clone(),
        })
    }

    /// Interpret `raw` for `actor` without applying it.
    #[instrument(skip_all, fields(actor = %actor.email))]
    pub async fn interpret(
        &self,
        raw: &str,
        actor: &Profile,
    ) -> Result<Interpretation, TaskwireError> {
        if raw.trim().is_empty() {
            return Err(TaskwireError::Validation("Command is required".into()));
        }
        let context = self.context_for(actor).await?;
        debug!(
            todos = context.todos.len(),
            users = context.users.len(),
            "context loaded"
        );
        self.interpreter.interpret(raw, &context).await
    }

    pub async fn apply(
        &self,
        intent: Intent,
        actor: &Profile,
    ) -> Result<ExecutionResult, TaskwireError> {
        self.executor.execute(intent, actor).await
    }

    /// Interpret and immediately apply.
    pub async fn run(&self, raw: &str, actor: &Profile) -> Result<RunOutcome, TaskwireError> {
        match self.interpret(raw, actor).await? {
            Interpretation::Intent(intent) => {
                let preview = preview::render(&intent);
                let result = self.apply(intent.clone(), actor).await?;
                Ok(RunOutcome::Applied {
                    intent,
                    preview,
                    result,
                })
            }
            Interpretation::Message(text) => Ok(RunOutcome::Message(text)),
        }
    }
}

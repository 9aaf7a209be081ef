// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot subcommands: roster management, token issuance and running a
//! single command against the local database.

use std::sync::Arc;

use taskwire_command::{CommandPipeline, Interpretation, Preview, RunOutcome, preview};
use taskwire_config::model::TaskwireConfig;
use taskwire_core::{Profile, TaskwireError, TodoStore};
use taskwire_storage::SqliteStorage;
use tracing::debug;

use crate::serve::{build_oracle, open_storage};

/// `taskwire user add`
pub async fn run_user_add(
    config: &TaskwireConfig,
    email: &str,
    name: Option<&str>,
    full_name: Option<&str>,
) -> Result<(), TaskwireError> {
    let storage = open_storage(config).await?;
    let profile = storage.create_profile(email, name, full_name).await?;
    let token = storage.issue_token(&profile.id).await?;
    println!("created {} ({})", profile.email, profile.id);
    println!("token: {token}");
    storage.close().await
}

/// `taskwire user list`
pub async fn run_user_list(config: &TaskwireConfig, json: bool) -> Result<(), TaskwireError> {
    let storage = open_storage(config).await?;
    let users = storage.list_profiles(config.users.lookup_limit).await?;
    if json {
        let out = serde_json::to_string_pretty(&users)
            .map_err(|e| TaskwireError::Internal(format!("failed to encode users: {e}")))?;
        println!("{out}");
    } else if users.is_empty() {
        println!("no users");
    } else {
        for user in &users {
            println!("{}", render_user(user));
        }
    }
    storage.close().await
}

/// `taskwire token <email>`
pub async fn run_token(config: &TaskwireConfig, email: &str) -> Result<(), TaskwireError> {
    let storage = open_storage(config).await?;
    let profile = find_profile(&storage, email).await?;
    println!("{}", storage.issue_token(&profile.id).await?);
    storage.close().await
}

/// `taskwire run --as <email> <command>`
///
/// With `dry_run` the command is only interpreted and the preview printed.
pub async fn run_command(
    config: &TaskwireConfig,
    email: &str,
    command: &str,
    dry_run: bool,
) -> Result<(), TaskwireError> {
    let storage = open_storage(config).await?;
    let actor = find_profile(&storage, email).await?;
    let pipeline = CommandPipeline::new(storage.clone(), build_oracle(config)?, config);
    debug!(actor = %actor.email, dry_run, "running command");

    let output = if dry_run {
        match pipeline.interpret(command, &actor).await? {
            Interpretation::Intent(intent) => render_preview(&preview::render(&intent)),
            Interpretation::Message(text) => text,
        }
    } else {
        render_outcome(&pipeline.run(command, &actor).await?)
    };
    println!("{output}");
    storage.close().await
}

async fn find_profile(
    storage: &Arc<SqliteStorage>,
    email: &str,
) -> Result<Profile, TaskwireError> {
    storage
        .get_profile_by_email(email)
        .await?
        .ok_or_else(|| TaskwireError::NotFound {
            entity: "profile",
            id: email.to_string(),
        })
}

fn render_user(user: &Profile) -> String {
    match &user.name {
        Some(name) => format!("{}  {}  {}", user.id, user.email, name),
        None => format!("{}  {}", user.id, user.email),
    }
}

fn render_preview(preview: &Preview) -> String {
    format!("{}\n{}", preview.title, preview.description)
}

fn render_outcome(outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::Applied {
            preview, result, ..
        } => {
            let mut lines = vec![render_preview(preview)];
            let noun = if result.todos.len() == 1 { "todo" } else { "todos" };
            lines.push(format!("applied: {} ({} {noun})", preview.action, result.todos.len()));
            for todo in &result.todos {
                let mark = if todo.completed { "x" } else { " " };
                lines.push(format!("[{mark}] {}", todo.title));
            }
            for failure in &result.failures {
                lines.push(format!("failed: {}: {}", failure.todo_id, failure.error));
            }
            lines.join("\n")
        }
        RunOutcome::Message(text) => text.clone(),
    }
}

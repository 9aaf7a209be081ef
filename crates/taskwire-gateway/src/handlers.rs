// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.
//!
//! Handles the command endpoints, the users lookup, direct board edits
//! under /v1/todos, and the public health check.

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use taskwire_command::{Intent, Interpretation, Preview, preview};
use taskwire_core::{
    HealthStatus, PluginAdapter, Profile, TaskwireError, Todo, TodoPatch, TodoStore,
};

use crate::server::GatewayState;

/// Response body for POST /v1/commands.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandResponse {
    /// An intent awaiting confirmation; nothing has been written yet.
    FunctionCall {
        function: &'static str,
        arguments: Value,
        preview: Preview,
        raw_command: String,
    },
    /// Free text from the oracle (message policy only).
    Message { content: String },
}

impl CommandResponse {
    fn from_interpretation(interpretation: Interpretation, raw_command: String) -> Self {
        match interpretation {
            Interpretation::Intent(intent) => Self::FunctionCall {
                function: intent.function_name(),
                arguments: intent.arguments(),
                preview: preview::render(&intent),
                raw_command,
            },
            Interpretation::Message(content) => Self::Message { content },
        }
    }
}

/// Request body for POST /v1/commands/apply.
#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub function: String,
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Debug, Deserialize)]
pub struct NewTodoRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<Profile>,
}

#[derive(Debug, Serialize)]
pub struct TodoListResponse {
    pub todos: Vec<Todo>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

pub(crate) fn error_body(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Maps a [`TaskwireError`] onto a status code and a JSON error body.
///
/// Server-side failures get a generic body; the detail goes to the log.
#[derive(Debug)]
pub struct ApiError(pub TaskwireError);

impl From<TaskwireError> for ApiError {
    fn from(err: TaskwireError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            TaskwireError::Validation(_) => StatusCode::BAD_REQUEST,
            TaskwireError::Authentication => StatusCode::UNAUTHORIZED,
            TaskwireError::Forbidden { .. } => StatusCode::FORBIDDEN,
            TaskwireError::NoMatch { .. } | TaskwireError::NotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        match self.0 {
            TaskwireError::Validation(message) => error_body(status, &message),
            err if status.is_server_error() => {
                error!(error = %err, "request failed");
                error_body(status, "Internal server error")
            }
            err => error_body(status, &err.to_string()),
        }
    }
}

/// POST /v1/commands
///
/// Interprets a command and returns the intent with a preview. Nothing is
/// written; the client confirms through `/v1/commands/apply`.
pub async fn post_command(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Profile>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let command = payload
        .ok()
        .and_then(|Json(body)| body.get("command").and_then(Value::as_str).map(str::to_owned));
    let Some(command) = command.filter(|c| !c.trim().is_empty()) else {
        return error_body(StatusCode::BAD_REQUEST, "Command is required");
    };

    match state.pipeline.interpret(&command, &actor).await {
        Ok(interpretation) => (
            StatusCode::OK,
            Json(CommandResponse::from_interpretation(interpretation, command)),
        )
            .into_response(),
        Err(TaskwireError::Validation(message)) => {
            error_body(StatusCode::BAD_REQUEST, &message)
        }
        Err(err) => {
            error!(error = %err, actor = %actor.email, "command interpretation failed");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "Failed to process command")
        }
    }
}

/// POST /v1/commands/apply
pub async fn apply_command(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Profile>,
    payload: Result<Json<ApplyRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) =
        payload.map_err(|e| TaskwireError::Validation(format!("malformed intent: {e}")))?;
    let intent = Intent::from_call(&request.function, request.arguments).map_err(|e| match e {
        TaskwireError::Interpretation { message, .. } => TaskwireError::Validation(message),
        other => other,
    })?;
    let result = state.pipeline.apply(intent, &actor).await?;
    info!(actor = %actor.email, action = ?result.action, todos = result.todos.len(), "intent applied");
    Ok((StatusCode::OK, Json(result)).into_response())
}

/// GET /v1/users
pub async fn list_users(State(state): State<GatewayState>) -> Response {
    match state.store.list_profiles(state.users_limit).await {
        Ok(users) => (StatusCode::OK, Json(UserListResponse { users })).into_response(),
        Err(err) => {
            error!(error = %err, "failed to list users");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "Could not load users")
        }
    }
}

/// GET /v1/todos
pub async fn list_todos(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Profile>,
) -> Result<Json<TodoListResponse>, ApiError> {
    let todos = state.store.list_visible_todos(&actor.id).await?;
    Ok(Json(TodoListResponse { todos }))
}

/// POST /v1/todos
pub async fn create_todo(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Profile>,
    payload: Result<Json<NewTodoRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) =
        payload.map_err(|_| TaskwireError::Validation("title is required".into()))?;
    let todo = state
        .pipeline
        .executor()
        .add_todo(&request.title, &actor)
        .await?;
    Ok((StatusCode::CREATED, Json(todo)).into_response())
}

/// PATCH /v1/todos/{id}
pub async fn update_todo(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Profile>,
    Path(id): Path<String>,
    payload: Result<Json<TodoPatch>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Json(patch) =
        payload.map_err(|e| TaskwireError::Validation(format!("malformed update: {e}")))?;
    let todo = state
        .pipeline
        .executor()
        .update_todo(&id, patch, &actor)
        .await?;
    Ok(Json(todo))
}

/// DELETE /v1/todos/{id}
pub async fn delete_todo(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Profile>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.pipeline.executor().delete_todo(&id, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/todos/reorder
pub async fn reorder_todos(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Profile>,
    payload: Result<Json<ReorderRequest>, JsonRejection>,
) -> Result<Json<TodoListResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|_| TaskwireError::Validation("ids are required".into()))?;
    let todos = state
        .pipeline
        .executor()
        .reorder(&request.ids, &actor)
        .await?;
    Ok(Json(TodoListResponse { todos }))
}

/// GET /health
///
/// Unauthenticated. Reports `degraded` when the store health check fails.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let status = match state.store.health_check().await {
        Ok(HealthStatus::Healthy) => "ok",
        _ => "degraded",
    };
    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
    })
}

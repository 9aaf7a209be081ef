// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, patch, post},
};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use taskwire_command::CommandPipeline;
use taskwire_config::model::ServerConfig;
use taskwire_core::{AuthAdapter, TaskwireError, TodoStore};

use crate::auth::auth_middleware;
use crate::handlers;
use crate::sse;

/// Health state for the unauthenticated health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub store: Arc<dyn TodoStore>,
    /// Resolves bearer tokens to profiles.
    pub auth: Arc<dyn AuthAdapter>,
    pub pipeline: Arc<CommandPipeline>,
    /// Cap on profiles returned by GET /v1/users.
    pub users_limit: usize,
    pub health: HealthState,
}

impl GatewayState {
    pub fn new(
        store: Arc<dyn TodoStore>,
        auth: Arc<dyn AuthAdapter>,
        pipeline: Arc<CommandPipeline>,
        users_limit: usize,
    ) -> Self {
        Self {
            store,
            auth,
            pipeline,
            users_limit,
            health: HealthState {
                start_time: Instant::now(),
            },
        }
    }
}

/// Build the gateway router.
///
/// - GET /health (public)
/// - POST /v1/commands, POST /v1/commands/apply
/// - GET /v1/users
/// - GET|POST /v1/todos, PATCH|DELETE /v1/todos/{id}, POST /v1/todos/reorder
/// - GET /v1/todos/events (SSE)
pub fn router(state: GatewayState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/v1/commands", post(handlers::post_command))
        .route("/v1/commands/apply", post(handlers::apply_command))
        .route("/v1/users", get(handlers::list_users))
        .route(
            "/v1/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route("/v1/todos/reorder", post(handlers::reorder_todos))
        .route("/v1/todos/events", get(sse::todo_events))
        .route(
            "/v1/todos/{id}",
            patch(handlers::update_todo).delete(handlers::delete_todo),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind and serve until `cancel` fires, then drain in-flight requests.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    cancel: CancellationToken,
) -> Result<(), TaskwireError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TaskwireError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| TaskwireError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("Gateway server stopped");
    Ok(())
}

// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication middleware for the gateway.
//!
//! Every `/v1/*` request must carry `Authorization: Bearer <session token>`.
//! The token is resolved to a [`Profile`](taskwire_core::Profile) through the
//! configured [`AuthAdapter`](taskwire_core::AuthAdapter) and the profile is
//! attached to the request extensions for handlers to extract.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{debug, error};

use taskwire_core::TaskwireError;

use crate::handlers::error_body;
use crate::server::GatewayState;

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Middleware that resolves the bearer token to the acting profile.
///
/// Missing or unknown tokens are rejected with 401. A store failure while
/// resolving the token is a 500.
pub async fn auth_middleware(
    State(state): State<GatewayState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()).map(str::to_owned) else {
        debug!(path = %request.uri().path(), "request without bearer token");
        return error_body(StatusCode::UNAUTHORIZED, "Authentication required");
    };

    match state.auth.authenticate(&token).await {
        Ok(profile) => {
            request.extensions_mut().insert(profile);
            next.run(request).await
        }
        Err(TaskwireError::Authentication) => {
            debug!("rejected unknown bearer token");
            error_body(StatusCode::UNAUTHORIZED, "Authentication required")
        }
        Err(err) => {
            error!(error = %err, "token lookup failed");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

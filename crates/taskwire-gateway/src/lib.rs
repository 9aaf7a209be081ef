// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Taskwire todo service.
//!
//! Exposes the command pipeline (interpret, then apply on confirmation),
//! the user roster, direct board edits, and a per-user SSE change feed.
//! All `/v1/*` routes are authenticated with a bearer session token.

pub mod auth;
pub mod handlers;
pub mod server;
pub mod sse;

pub use handlers::{ApiError, CommandResponse, ErrorResponse, HealthResponse};
pub use server::{GatewayState, HealthState, router, start_server};
pub use sse::FeedItem;

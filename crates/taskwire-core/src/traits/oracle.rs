// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Oracle adapter trait for turning free text into a function call.

use async_trait::async_trait;

use crate::error::TaskwireError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{OracleReply, OracleRequest};

/// A single-shot text-to-function-call service (an LLM or a local heuristic).
///
/// Implementations never see the record store; everything they may use is in
/// the request.
#[async_trait]
pub trait OracleAdapter: PluginAdapter {
    async fn interpret(&self, request: OracleRequest) -> Result<OracleReply, TaskwireError>;
}

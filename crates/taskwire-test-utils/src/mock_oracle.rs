// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted oracle adapter for deterministic testing.
//!
//! `MockOracle` implements `OracleAdapter` with pre-configured replies and
//! records every request it receives, so tests can assert on the rendered
//! context as well as on the outcome.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use taskwire_core::{
    AdapterType, HealthStatus, OracleAdapter, OracleReply, OracleRequest, PluginAdapter,
    TaskwireError,
};

/// A mock oracle that answers from a FIFO queue.
///
/// When the queue is empty a default `"mock response"` text reply is
/// returned, which the interpreter treats as "no usable intent".
pub struct MockOracle {
    replies: Arc<Mutex<VecDeque<Result<OracleReply, String>>>>,
    requests: Arc<Mutex<Vec<OracleRequest>>>,
}

impl MockOracle {
    /// Create a new mock oracle with an empty reply queue.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock oracle pre-loaded with the given replies.
    pub fn with_replies(replies: Vec<OracleReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().map(Ok).collect())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shorthand for a function-call reply.
    pub fn call(name: &str, arguments: Value) -> OracleReply {
        OracleReply::Call {
            name: name.to_string(),
            arguments,
        }
    }

    /// Queue a reply.
    pub async fn add_reply(&self, reply: OracleReply) {
        self.replies.lock().await.push_back(Ok(reply));
    }

    /// Queue a failure; the next call returns an interpretation error.
    pub async fn add_failure(&self, message: &str) {
        self.replies.lock().await.push_back(Err(message.to_string()));
    }

    /// Every request seen so far, oldest first.
    pub async fn requests(&self) -> Vec<OracleRequest> {
        self.requests.lock().await.clone()
    }

    async fn next_reply(&self) -> Result<OracleReply, String> {
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(OracleReply::Text("mock response".to_string())))
    }
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockOracle {
    fn name(&self) -> &str {
        "mock-oracle"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Oracle
    }

    async fn health_check(&self) -> Result<HealthStatus, TaskwireError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), TaskwireError> {
        Ok(())
    }
}

#[async_trait]
impl OracleAdapter for MockOracle {
    async fn interpret(&self, request: OracleRequest) -> Result<OracleReply, TaskwireError> {
        self.requests.lock().await.push(request);
        self.next_reply()
            .await
            .map_err(TaskwireError::interpretation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(command: &str) -> OracleRequest {
        OracleRequest {
            command: command.to_string(),
            context: String::new(),
            roster: vec![],
            tools: vec![],
            require_tool: true,
        }
    }

    #[tokio::test]
    async fn default_reply_when_queue_empty() {
        let oracle = MockOracle::new();
        let reply = oracle.interpret(request("hello")).await.unwrap();
        assert_eq!(reply, OracleReply::Text("mock response".to_string()));
    }

    #[tokio::test]
    async fn queued_replies_returned_in_order() {
        let oracle = MockOracle::with_replies(vec![
            MockOracle::call("complete_todos", json!({ "criteria": "all" })),
            OracleReply::Text("second".to_string()),
        ]);
        oracle.add_failure("quota exceeded").await;

        let first = oracle.interpret(request("a")).await.unwrap();
        assert!(matches!(first, OracleReply::Call { ref name, .. } if name == "complete_todos"));
        assert_eq!(
            oracle.interpret(request("b")).await.unwrap(),
            OracleReply::Text("second".to_string())
        );
        let err = oracle.interpret(request("c")).await.unwrap_err();
        assert!(matches!(err, TaskwireError::Interpretation { .. }));
    }

    #[tokio::test]
    async fn requests_are_recorded() {
        let oracle = MockOracle::new();
        oracle.interpret(request("first")).await.unwrap();
        oracle.interpret(request("second")).await.unwrap();
        let seen: Vec<String> = oracle
            .requests()
            .await
            .into_iter()
            .map(|r| r.command)
            .collect();
        assert_eq!(seen, vec!["first", "second"]);
    }
}

// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Claude oracle for the Taskwire command interpreter.
//!
//! Implements [`OracleAdapter`] on top of the Messages API with tool use: the
//! command becomes the user turn, the intent schemas become tools, and the
//! first `tool_use` block in the answer becomes the function call.

pub mod client;
pub mod prompt;
pub mod types;

use async_trait::async_trait;
use taskwire_config::model::AnthropicConfig;
use taskwire_core::{
    AdapterType, HealthStatus, OracleAdapter, OracleReply, OracleRequest, PluginAdapter,
    TaskwireError,
};
use tracing::debug;

use crate::client::AnthropicClient;
use crate::types::{ApiMessage, MessageRequest, ResponseContentBlock, ToolChoice, ToolDefinition};

/// Low temperature keeps extraction stable across identical commands.
const TEMPERATURE: f32 = 0.1;

/// Oracle backed by the Anthropic Messages API.
pub struct AnthropicOracle {
    client: AnthropicClient,
    max_tokens: u32,
}

impl AnthropicOracle {
    /// Creates a new oracle from configuration.
    ///
    /// The API key comes from config, falling back to `ANTHROPIC_API_KEY`.
    pub fn new(config: &AnthropicConfig) -> Result<Self, TaskwireError> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                TaskwireError::Config(
                    "Anthropic API key not found: set anthropic.api_key or ANTHROPIC_API_KEY"
                        .into(),
                )
            })?;
        let client = AnthropicClient::new(
            &api_key,
            &config.api_version,
            config.default_model.clone(),
        )?;
        Ok(Self {
            client,
            max_tokens: config.max_tokens,
        })
    }

    /// Creates an oracle from a prebuilt client (tests use a wiremock URL).
    pub fn with_client(client: AnthropicClient, max_tokens: u32) -> Self {
        Self { client, max_tokens }
    }

    fn build_request(&self, request: OracleRequest) -> MessageRequest {
        let tools: Vec<ToolDefinition> = request
            .tools
            .into_iter()
            .map(|t| ToolDefinition {
                name: t.name,
                description: t.description,
                input_schema: t.parameters,
            })
            .collect();
        let tool_choice = (!tools.is_empty()).then(|| {
            if request.require_tool {
                ToolChoice::Any
            } else {
                ToolChoice::Auto
            }
        });
        MessageRequest {
            model: self.client.default_model().to_string(),
            messages: vec![ApiMessage {
                role: "user".into(),
                content: request.command,
            }],
            system: Some(prompt::system_prompt(&request.context)),
            max_tokens: self.max_tokens,
            temperature: Some(TEMPERATURE),
            tools,
            tool_choice,
        }
    }
}

/// First tool call wins; otherwise all text blocks are joined.
fn reply_from_blocks(blocks: Vec<ResponseContentBlock>) -> OracleReply {
    let mut text = Vec::new();
    for block in blocks {
        match block {
            ResponseContentBlock::ToolUse { name, input, .. } => {
                return OracleReply::Call {
                    name,
                    arguments: input,
                };
            }
            ResponseContentBlock::Text { text: t } => text.push(t),
            ResponseContentBlock::Other => {}
        }
    }
    OracleReply::Text(text.join("\n").trim().to_string())
}

#[async_trait]
impl PluginAdapter for AnthropicOracle {
    fn name(&self) -> &str {
        "anthropic"
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
impl OracleAdapter for AnthropicOracle {
    async fn interpret(&self, request: OracleRequest) -> Result<OracleReply, TaskwireError> {
        let api_request = self.build_request(request);
        let response = self.client.complete_message(&api_request).await?;
        debug!(
            id = %response.id,
            model = %response.model,
            stop_reason = ?response.stop_reason,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "oracle response"
        );
        Ok(reply_from_blocks(response.content))
    }
}

// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command interpretation: raw text plus a context snapshot in, one intent
//! (or a clarifying message) out.
//!
//! The interpreter never touches the record store. It renders the snapshot
//! it is given into the oracle request, bounds the oracle call with a
//! timeout, and applies the configured fallback policy to whatever comes
//! back.

use std::sync::Arc;
use std::time::Duration;

use taskwire_config::model::{FallbackPolicy, InterpreterConfig};
use taskwire_core::{OracleAdapter, OracleReply, OracleRequest, Profile, TaskwireError, Todo};
use tracing::{debug, warn};

use crate::schema::{Intent, tool_specs};

/// Shown when the oracle answers with nothing usable under the message policy.
pub const FALLBACK_HINT: &str = "I didn't understand that command. Try something like \
\"Add urgent task to clean garage\" or \"Show completed tasks only\".";

/// Snapshot of application state a command is interpreted against.
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    /// Todos visible to the actor, in display order.
    pub todos: Vec<Todo>,
    /// Users that may be assigned.
    pub users: Vec<Profile>,
    pub current_user_email: String,
}

/// What a command was understood as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpretation {
    Intent(Intent),
    /// Free text to show verbatim. Only produced under
    /// [`FallbackPolicy::Message`].
    Message(String),
}

pub struct Interpreter {
    oracle: Arc<dyn OracleAdapter>,
    policy: FallbackPolicy,
    timeout: Duration,
    max_context_todos: usize,
}

impl Interpreter {
    pub fn new(oracle: Arc<dyn OracleAdapter>, config: &InterpreterConfig) -> Self {
        Self {
            oracle,
            policy: config.fallback,
            timeout: Duration::from_secs(config.timeout_secs),
            max_context_todos: config.max_context_todos,
        }
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Render the context blob sent alongside the command.
    ///
    /// Three lines: the JSON todo snapshot, the roster as `label (email)`
    /// pairs, and the actor's email.
    pub fn render_context(&self, context: &CommandContext) -> String {
        let shown = context.todos.len().min(self.max_context_todos);
        if shown < context.todos.len() {
            debug!(
                total = context.todos.len(),
                shown, "truncating todo snapshot for oracle context"
            );
        }
        let todos = serde_json::to_string(&context.todos[..shown])
            .unwrap_or_else(|_| "[]".to_string());
        let roster = context
            .users
            .iter()
            .map(|u| format!("{} ({})", u.display_name(), u.email))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Current todos: {todos}\nAvailable users for assignment: {roster}\nCurrent user email: {}",
            context.current_user_email
        )
    }

    /// Interpret `raw` against `context`.
    ///
    /// Blank input is rejected before the oracle is consulted. Under the
    /// create policy every other input yields an intent; under the message
    /// policy oracle text is passed through and oracle failures are errors.
    pub async fn interpret(
        &self,
        raw: &str,
        context: &CommandContext,
    ) -> Result<Interpretation, TaskwireError> {
        let command = raw.trim();
        if command.is_empty() {
            return Err(TaskwireError::Validation("Command is required".into()));
        }

        let request = OracleRequest {
            command: command.to_string(),
            context: self.render_context(context),
            roster: context.users.clone(),
            tools: tool_specs(),
            require_tool: self.policy == FallbackPolicy::Create,
        };

        let outcome = self.consult(request).await.and_then(|reply| match reply {
            OracleReply::Call { name, arguments } => {
                Intent::from_call(&name, arguments).map(Interpretation::Intent)
            }
            OracleReply::Text(text) => Ok(Interpretation::Message(text)),
        });

        match (self.policy, outcome) {
            (_, Ok(Interpretation::Intent(intent))) => {
                debug!(function = intent.function_name(), "command interpreted");
                Ok(Interpretation::Intent(intent))
            }
            (FallbackPolicy::Message, Ok(Interpretation::Message(text))) => {
                let text = text.trim();
                Ok(Interpretation::Message(if text.is_empty() {
                    FALLBACK_HINT.to_string()
                } else {
                    text.to_string()
                }))
            }
            (FallbackPolicy::Message, Err(e)) => Err(e),
            (FallbackPolicy::Create, Ok(Interpretation::Message(text))) => {
                warn!(
                    reply = %text,
                    "oracle answered without a function call, creating todo from raw command"
                );
                Ok(Interpretation::Intent(Intent::default_create(command)))
            }
            (FallbackPolicy::Create, Err(e)) => {
                warn!(error = %e, "interpretation failed, creating todo from raw command");
                Ok(Interpretation::Intent(Intent::default_create(command)))
            }
        }
    }

    async fn consult(&self, request: OracleRequest) -> Result<OracleReply, TaskwireError> {
        match tokio::time::timeout(self.timeout, self.oracle.interpret(request)).await {
            Ok(result) => result,
            Err(_) => Err(TaskwireError::Interpretation {
                message: format!("oracle `{}` did not answer in time", self.oracle.name()),
                source: Some(Box::new(TaskwireError::Timeout {
                    duration: self.timeout,
                })),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use taskwire_core::{AdapterType, HealthStatus, PluginAdapter, Priority};
    use tracing_test::traced_test;

    use crate::schema::TodoDraft;

    enum Step {
        Reply(OracleReply),
        Fail,
        Hang,
    }

    #[derive(Default)]
    struct ScriptedOracle {
        steps: Mutex<VecDeque<Step>>,
        seen: Mutex<Vec<OracleRequest>>,
    }

    impl ScriptedOracle {
        fn with(steps: Vec<Step>) -> Arc<Self> {
            Arc::new(Self {
                steps: Mutex::new(steps.into()),
                seen: Mutex::default(),
            })
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PluginAdapter for ScriptedOracle {
        fn name(&self) -> &str {
            "scripted"
        }
        fn version(&self) -> semver::Version {
            semver::Version::new(0, 0, 0)
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
    impl OracleAdapter for ScriptedOracle {
        async fn interpret(&self, request: OracleRequest) -> Result<OracleReply, TaskwireError> {
            self.seen.lock().unwrap().push(request);
            let step = self.steps.lock().unwrap().pop_front();
            match step {
                Some(Step::Reply(reply)) => Ok(reply),
                Some(Step::Hang) => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(OracleReply::Text(String::new()))
                }
                Some(Step::Fail) | None => Err(TaskwireError::interpretation("oracle unavailable")),
            }
        }
    }

    fn interpreter(oracle: Arc<ScriptedOracle>, fallback: FallbackPolicy) -> Interpreter {
        let config = InterpreterConfig {
            fallback,
            timeout_secs: 5,
            max_context_todos: 2,
        };
        Interpreter::new(oracle, &config)
    }

    fn context() -> CommandContext {
        let todo = |id: &str| Todo {
            id: id.into(),
            title: format!("todo {id}"),
            completed: false,
            order_index: 1,
            user_id: "u1".into(),
            assigned_user_id: None,
            priority: None,
            created_at: "2026-01-01T00:00:00.000Z".into(),
        };
        CommandContext {
            todos: vec![todo("a"), todo("b"), todo("c")],
            users: vec![Profile {
                id: "u2".into(),
                email: "john@company.com".into(),
                name: Some("John".into()),
                full_name: None,
                avatar_url: None,
            }],
            current_user_email: "me@company.com".into(),
        }
    }

    fn raw_create(title: &str) -> Interpretation {
        Interpretation::Intent(Intent::CreateTodos {
            todos: vec![TodoDraft {
                title: title.into(),
                priority: Some(Priority::Medium),
                assigned_user_email: None,
            }],
        })
    }

    #[tokio::test]
    async fn blank_command_never_reaches_the_oracle() {
        let oracle = ScriptedOracle::with(vec![]);
        let interp = interpreter(oracle.clone(), FallbackPolicy::Create);
        let err = interp.interpret("   ", &context()).await.unwrap_err();
        assert!(matches!(err, TaskwireError::Validation(ref m) if m == "Command is required"));
        assert_eq!(oracle.calls(), 0);
    }

    #[tokio::test]
    async fn function_call_becomes_intent() {
        let oracle = ScriptedOracle::with(vec![Step::Reply(OracleReply::Call {
            name: "complete_todos".into(),
            arguments: json!({"criteria": "kitchen"}),
        })]);
        let interp = interpreter(oracle, FallbackPolicy::Message);
        let result = interp.interpret("finish kitchen stuff", &context()).await.unwrap();
        assert_eq!(
            result,
            Interpretation::Intent(Intent::CompleteTodos {
                criteria: "kitchen".into()
            })
        );
    }

    #[tokio::test]
    async fn request_carries_rendered_context_and_policy() {
        let oracle = ScriptedOracle::with(vec![Step::Fail]);
        let interp = interpreter(oracle.clone(), FallbackPolicy::Create);
        interp.interpret("  buy milk ", &context()).await.unwrap();

        let seen = oracle.seen.lock().unwrap();
        let request = &seen[0];
        assert_eq!(request.command, "buy milk");
        assert!(request.require_tool);
        assert_eq!(request.tools.len(), 3);
        assert!(request.context.contains("Available users for assignment: John (john@company.com)"));
        assert!(request.context.ends_with("Current user email: me@company.com"));
        assert!(request.context.contains("todo b"));
        assert!(!request.context.contains("todo c"));
    }

    #[tokio::test]
    #[traced_test]
    async fn create_policy_turns_text_and_failures_into_a_create() {
        let oracle = ScriptedOracle::with(vec![
            Step::Reply(OracleReply::Text("Sure, noted.".into())),
            Step::Fail,
            Step::Reply(OracleReply::Call {
                name: "create_todos".into(),
                arguments: json!({"todos": []}),
            }),
        ]);
        let interp = interpreter(oracle, FallbackPolicy::Create);
        for _ in 0..3 {
            let result = interp.interpret("water the plants", &context()).await.unwrap();
            assert_eq!(result, raw_create("water the plants"));
        }
        assert!(logs_contain("oracle answered without a function call"));
        assert!(logs_contain("interpretation failed, creating todo from raw command"));
    }

    #[tokio::test]
    async fn message_policy_passes_text_through() {
        let oracle = ScriptedOracle::with(vec![
            Step::Reply(OracleReply::Text("Which list do you mean?".into())),
            Step::Reply(OracleReply::Text("  ".into())),
        ]);
        let interp = interpreter(oracle.clone(), FallbackPolicy::Message);
        assert_eq!(
            interp.interpret("hmm", &context()).await.unwrap(),
            Interpretation::Message("Which list do you mean?".into())
        );
        assert_eq!(
            interp.interpret("hmm", &context()).await.unwrap(),
            Interpretation::Message(FALLBACK_HINT.into())
        );
        assert!(!oracle.seen.lock().unwrap()[0].require_tool);
    }

    #[tokio::test]
    async fn message_policy_surfaces_failures() {
        let oracle = ScriptedOracle::with(vec![Step::Fail]);
        let interp = interpreter(oracle, FallbackPolicy::Message);
        let err = interp.interpret("do things", &context()).await.unwrap_err();
        assert!(matches!(err, TaskwireError::Interpretation { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_is_an_interpretation_failure() {
        let oracle = ScriptedOracle::with(vec![Step::Hang, Step::Hang]);

        let interp = interpreter(oracle.clone(), FallbackPolicy::Message);
        let err = interp.interpret("slow", &context()).await.unwrap_err();
        let TaskwireError::Interpretation { source, .. } = err else {
            panic!("expected interpretation error");
        };
        assert!(source.unwrap().to_string().contains("timed out"));

        let interp = interpreter(oracle, FallbackPolicy::Create);
        let result = interp.interpret("slow", &context()).await.unwrap();
        assert_eq!(result, raw_create("slow"));
    }
}

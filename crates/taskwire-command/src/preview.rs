// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Human-readable summary of an intent, shown before it is applied.

use serde::Serialize;

use crate::schema::Intent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub title: String,
    pub description: String,
    /// `create`, `filter` or `complete`.
    pub action: &'static str,
}

pub fn render(intent: &Intent) -> Preview {
    match intent {
        Intent::CreateTodos { todos } => Preview {
            title: format!(
                "Create {} new todo{}",
                todos.len(),
                if todos.len() == 1 { "" } else { "s" }
            ),
            description: todos
                .iter()
                .map(|t| format!("• {}", t.title))
                .collect::<Vec<_>>()
                .join("\n"),
            action: "create",
        },
        Intent::FilterTodos { criteria } => Preview {
            title: "Filter todos".to_string(),
            description: format!(
                "Show todos matching: {}",
                criteria
                    .describe()
                    .iter()
                    .map(|(key, value)| format!("{key}: {value}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            action: "filter",
        },
        Intent::CompleteTodos { criteria } => Preview {
            title: "Complete todos".to_string(),
            description: format!("Mark as complete: {criteria}"),
            action: "complete",
        },
    }
}

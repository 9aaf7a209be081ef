// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Natural-language command handling for Taskwire.
//!
//! This crate provides:
//! - [`Intent`]: the closed set of structured commands and their function schemas
//! - [`Interpreter`]: raw text plus context to an intent, with a fallback policy
//! - [`HeuristicOracle`]: an offline, deterministic oracle
//! - [`resolver::resolve`]: free-text person references to roster profiles
//! - [`Executor`]: applies intents and direct edits to the record store
//! - [`preview::render`]: a short summary shown before an intent is applied
//! - [`Board`]: the per-viewer board projection over the change feed
//! - [`CommandPipeline`]: all of the above wired to a store

pub mod board;
pub mod executor;
pub mod heuristic;
pub mod interpreter;
pub mod pipeline;
pub mod preview;
pub mod resolver;
pub mod schema;

pub use board::Board;
pub use executor::{Action, ExecutionFailure, ExecutionResult, Executor};
pub use heuristic::HeuristicOracle;
pub use interpreter::{CommandContext, FALLBACK_HINT, Interpretation, Interpreter};
pub use pipeline::{CommandPipeline, RunOutcome};
pub use preview::Preview;
pub use schema::{FilterCriteria, Intent, TodoDraft, tool_specs};

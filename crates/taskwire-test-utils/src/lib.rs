// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Taskwire integration tests.
//!
//! Provides a scripted oracle and a harness over a temp-file SQLite store,
//! so the whole command path can be driven without network access.
//!
//! # Components
//!
//! - [`MockOracle`] - Oracle adapter answering from a FIFO queue of replies
//! - [`TestHarness`] - Store, roster, tokens and pipeline wired together

pub mod harness;
pub mod mock_oracle;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_oracle::MockOracle;

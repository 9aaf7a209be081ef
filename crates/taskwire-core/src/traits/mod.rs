// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod auth;
pub mod oracle;
pub mod storage;

pub use adapter::PluginAdapter;
pub use auth::AuthAdapter;
pub use oracle::OracleAdapter;
pub use storage::TodoStore;

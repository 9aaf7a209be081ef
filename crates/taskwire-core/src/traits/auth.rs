// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication adapter trait for identity verification.

use async_trait::async_trait;

use crate::error::TaskwireError;
use crate::traits::adapter::PluginAdapter;
use crate::types::Profile;

/// Resolves an opaque session token to the profile of the acting user.
#[async_trait]
pub trait AuthAdapter: PluginAdapter {
    /// Returns the profile bound to `token`, or
    /// [`TaskwireError::Authentication`] if the token is unknown.
    async fn authenticate(&self, token: &str) -> Result<Profile, TaskwireError>;
}

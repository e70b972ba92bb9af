// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! Asset configuration for the managed workspace root.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. gitward.toml (cwd)
//! 3. --config FILE
//! 4. GITWARD_* env vars
//! 5. per-call CLI overrides (--uri/--branch)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GITWARD_REPO_URI=https://...  → repo_uri
//! GITWARD_PASSWORD=...          → password (never logged)
//! GITWARD_STATE_DIR=/var/lib/.. → state_dir
//! ```

pub mod loader;

#[cfg(test)]
mod tests;

use serde::Deserialize;
use std::path::PathBuf;

use crate::error::ConfigError;

/// A string that never renders its contents in Debug or Display.
///
/// Holds the asset password; the raw value is only reachable through
/// [`Secret::expose`] at the single point it is embedded into a
/// transport URI.
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the underlying value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl std::fmt::Display for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("***")
    }
}

/// Stored configuration for one asset (one remote repository identity).
///
/// Read-only to the rest of the crate; per-call overrides are layered
/// on top by the transport resolver, never written back.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetConfig {
    /// Remote repository URI. Optional here so a per-call override can
    /// supply it; resolution fails if neither source does.
    pub repo_uri: Option<String>,

    /// Explicit workspace name. When absent the name is derived from
    /// the URI stem plus the branch.
    pub repo_name: Option<String>,

    /// Branch to clone and track.
    #[serde(default = "default_branch")]
    pub branch_name: String,

    /// Username for HTTP(S) basic auth and the commit identity.
    pub username: Option<String>,

    /// Password for HTTP(S) basic auth.
    pub password: Option<Secret>,

    /// Managed root under which all workspaces live.
    pub state_dir: PathBuf,

    /// Identity scope for the SSH keypair directory.
    #[serde(default = "default_asset_id")]
    pub asset_id: String,

    /// Directory backing the content vault (opaque reference → bytes).
    pub vault_dir: Option<PathBuf>,

    /// Directory the attachment sink persists generated public keys to.
    pub attachments_dir: Option<PathBuf>,
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_asset_id() -> String {
    "default".to_string()
}

impl AssetConfig {
    /// Validate the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `state_dir` is empty or a configured
    /// `repo_name` contains path separators.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.state_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingKey {
                key: "state_dir".to_string(),
            });
        }
        if let Some(name) = &self.repo_name
            && (name.is_empty() || name.contains('/') || name.contains('\\'))
        {
            return Err(ConfigError::InvalidValue {
                key: "repo_name".to_string(),
                message: format!("'{name}' is not a filesystem-safe directory name"),
            });
        }
        Ok(())
    }
}

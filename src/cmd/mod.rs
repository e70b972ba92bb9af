// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers --> ActionOutcome (JSON on stdout)
//!   repo: list-repos, verify, clone, delete-clone
//!   file: add-file, update-file, delete-file
//!   git:  commit, push, pull, status
//!   ssh:  configure-ssh
//! ```
//!
//! Every handler resolves the call, acquires the workspace lock where
//! it mutates state, and reports through one `ActionOutcome`. Logs go
//! to stderr; stdout carries only the outcome JSON.

pub mod file;
pub mod git;
pub mod repo;
pub mod ssh;

use serde::Serialize;
use serde_json::Value;

use crate::config::AssetConfig;
use crate::error::WardResult;
use crate::transport::{self, CallOverrides, RepositoryIdentity, Transport};
use crate::workspace::{self, Workspace};

/// Terminal status of one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Failed,
}

/// The single JSON document an action run produces on stdout.
#[derive(Debug, Serialize)]
pub struct ActionOutcome {
    pub status: OutcomeStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub data: Value,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub summary: Value,
}

impl ActionOutcome {
    #[must_use]
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Self {
            status: OutcomeStatus::Success,
            message: message.into(),
            data,
            summary: Value::Null,
        }
    }

    /// Failure outcome; the caller is responsible for scrubbing
    /// credentials out of `message` before it gets here.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Failed,
            message: message.into(),
            data: Value::Null,
            summary: Value::Null,
        }
    }

    #[must_use]
    pub fn with_summary(mut self, summary: Value) -> Self {
        self.summary = summary;
        self
    }
}

/// Resolve identity and transport from stored configuration only.
pub(crate) fn resolve_stored(
    config: &AssetConfig,
) -> WardResult<(RepositoryIdentity, Transport)> {
    transport::resolve(config, &CallOverrides::default())
}

/// Resolve the configured identity and open its workspace.
pub(crate) fn open_workspace(
    config: &AssetConfig,
) -> WardResult<(RepositoryIdentity, Workspace)> {
    let (identity, _) = resolve_stored(config)?;
    let workspace = workspace::verify(&config.state_dir, &identity.name)?;
    Ok((identity, workspace))
}

// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! Repository lifecycle command arguments.
//!
//! Both clone and delete-clone accept per-call overrides for the remote
//! URI and the branch. An overridden URI always derives a fresh
//! workspace name so it never collides with the configured one.

use clap::Args;

/// Arguments for the `clone` command.
#[derive(Debug, Clone, Default, Args)]
pub struct CloneArgs {
    /// Remote URI, overriding the configured repo_uri for this call.
    #[arg(long, value_name = "URI")]
    pub uri: Option<String>,

    /// Branch to clone, overriding the configured branch_name.
    #[arg(long, value_name = "BRANCH")]
    pub branch: Option<String>,
}

/// Arguments for the `delete-clone` command.
#[derive(Debug, Clone, Default, Args)]
pub struct DeleteCloneArgs {
    /// Remote URI whose workspace should be deleted, overriding the
    /// configured repo_uri for this call.
    #[arg(long, value_name = "URI")]
    pub uri: Option<String>,

    /// Branch of the workspace to delete, overriding the configured
    /// branch_name.
    #[arg(long, value_name = "BRANCH")]
    pub branch: Option<String>,
}

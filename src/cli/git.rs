// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! Commit command arguments. Push, pull and status take no arguments
//! beyond the globals.

use clap::Args;

/// Arguments for the `commit` command.
#[derive(Debug, Clone, Args)]
pub struct CommitArgs {
    /// Commit message.
    #[arg(short = 'm', long, required = true, value_name = "MESSAGE")]
    pub message: String,

    /// Push to the remote after committing.
    #[arg(short = 'p', long)]
    pub push: bool,
}

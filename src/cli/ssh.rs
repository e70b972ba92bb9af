// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! SSH key management command arguments.

use clap::Args;

/// Arguments for the `configure-ssh` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigureSshArgs {
    /// Replace any existing keypair. Without this flag an existing key
    /// is an error so a key already installed on remotes is never
    /// silently replaced.
    #[arg(long = "force-new")]
    pub force_new: bool,
}

// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! File staging command arguments.
//!
//! Content for add/update comes from exactly one source:
//!
//! ```text
//! --contents TEXT   inline text, backslash escapes decoded
//! --vault-id ID     opaque reference resolved through the vault dir
//! ```

use clap::{ArgGroup, Args};

/// Arguments for the `add-file` command.
#[derive(Debug, Clone, Args)]
#[command(group(ArgGroup::new("content").required(true)))]
pub struct AddFileArgs {
    /// Repository-relative path of the file to create.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Inline file contents.
    #[arg(long, value_name = "TEXT", group = "content")]
    pub contents: Option<String>,

    /// Vault reference to fetch the contents from.
    #[arg(long = "vault-id", value_name = "ID", group = "content")]
    pub vault_id: Option<String>,
}

/// Arguments for the `update-file` command.
#[derive(Debug, Clone, Args)]
#[command(group(ArgGroup::new("content").required(true)))]
pub struct UpdateFileArgs {
    /// Repository-relative path of the file to overwrite.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Inline file contents.
    #[arg(long, value_name = "TEXT", group = "content")]
    pub contents: Option<String>,

    /// Vault reference to fetch the contents from.
    #[arg(long = "vault-id", value_name = "ID", group = "content")]
    pub vault_id: Option<String>,
}

/// Arguments for the `delete-file` command.
#[derive(Debug, Clone, Args)]
pub struct DeleteFileArgs {
    /// Repository-relative path of the file to delete.
    #[arg(value_name = "PATH")]
    pub path: String,
}

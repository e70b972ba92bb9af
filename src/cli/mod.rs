// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI module for gitward using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! gitward [global options] <command>
//! list-repos
//! verify
//! clone [--uri URI] [--branch BRANCH]
//! delete-clone [--uri URI] [--branch BRANCH]
//! add-file PATH {--contents TEXT | --vault-id ID}
//! update-file PATH {--contents TEXT | --vault-id ID}
//! delete-file PATH
//! commit -m MESSAGE [--push]
//! push | pull | status
//! configure-ssh [--force-new]
//! ```

pub mod file;
pub mod git;
pub mod global;
pub mod repo;
pub mod ssh;

#[cfg(test)]
mod tests;

use crate::cli::file::{AddFileArgs, DeleteFileArgs, UpdateFileArgs};
use crate::cli::git::CommitArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::repo::{CloneArgs, DeleteCloneArgs};
use crate::cli::ssh::ConfigureSshArgs;
use clap::{Parser, Subcommand};

/// Managed git workspaces for automation pipelines.
///
/// Clones remote repositories under a managed state directory and
/// exposes file staging and git operations as discrete actions with a
/// JSON result on stdout.
#[derive(Debug, Parser)]
#[command(
    name = "gitward",
    author,
    version,
    about = "Managed Git Workspaces for Automation",
    after_help = "CONFIG FILES:\n\n\
                  By default, gitward loads `gitward.toml` from the current\n\
                  directory when present. Additional files can be passed with\n\
                  --config and are layered on top, later files overriding\n\
                  earlier ones. Environment variables prefixed with `GITWARD_`\n\
                  override every file. Use --no-default-configs to disable\n\
                  auto detection and only use --config."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists the workspaces under the managed state directory.
    #[command(name = "list-repos")]
    ListRepos,

    /// Verifies connectivity to the configured remote.
    Verify,

    /// Clones the remote repository into the managed state directory.
    Clone(CloneArgs),

    /// Deletes a cloned workspace.
    #[command(name = "delete-clone")]
    DeleteClone(DeleteCloneArgs),

    /// Adds a new file to the workspace and stages it.
    #[command(name = "add-file")]
    AddFile(AddFileArgs),

    /// Overwrites an existing file in the workspace and stages it.
    #[command(name = "update-file")]
    UpdateFile(UpdateFileArgs),

    /// Deletes a file from the workspace and the index.
    #[command(name = "delete-file")]
    DeleteFile(DeleteFileArgs),

    /// Commits staged changes.
    Commit(CommitArgs),

    /// Pushes local commits to the remote.
    Push,

    /// Pulls the remote branch into the workspace.
    Pull,

    /// Shows the workspace status (human text plus parsed report).
    Status,

    /// Generates the RSA keypair for SSH transports.
    #[command(name = "configure-ssh")]
    ConfigureSsh(ConfigureSshArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version
/// information was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}

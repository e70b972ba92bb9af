// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! Git operations against one workspace, with per-operation failure
//! translation.
//!
//! ```text
//! clone   remote-missing  -> RepositoryNotFound
//!         branch-missing  -> InvalidBranch
//!         auth markers    -> AuthenticationFailed
//!         perm denied     -> PermissionDenied
//!         dest exists     -> AlreadyCloned
//!         unmatched       -> CloneFailed
//! commit  clean tree      -> NothingToCommit
//! push    needs pull      -> NonFastForward
//! pull    open merge      -> UnresolvedMerge / UnmergedFiles
//! ```
//!
//! Matching is substring-based against git's human-readable stderr —
//! a heuristic, not a contract. Each operation owns exactly one
//! translation function so a wording change only touches one place,
//! and every unmatched failure still surfaces with its raw (scrubbed)
//! message.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{GitError, WardResult};
use crate::transport::{RepositoryIdentity, Transport};
use crate::workspace::Workspace;

use super::cmd::git_command;
use super::status::{self, StatusReport};

/// Clone `identity` into `managed_root/<name>`.
///
/// # Errors
///
/// `CredentialsRequired` for an HTTP(S) remote without a credential
/// pair, `AlreadyCloned` if the destination exists (which is left
/// untouched), otherwise per the clone translation table.
pub fn clone(
    identity: &RepositoryIdentity,
    transport: &Transport,
    managed_root: &Path,
) -> WardResult<Workspace> {
    transport.require_credentials()?;

    let dest = managed_root.join(&identity.name);
    if dest.exists() {
        return Err(GitError::AlreadyCloned {
            name: identity.name.clone(),
        }
        .into());
    }

    let dest_str = dest.to_str().ok_or_else(|| GitError::CloneFailed {
        uri: transport.display_uri().to_string(),
        message: "invalid destination path".to_string(),
    })?;

    info!(workspace = %identity.name, branch = %identity.branch, "cloning repository");
    git_command(
        &[
            "clone",
            "--quiet",
            "--branch",
            &identity.branch,
            transport.remote_uri(),
            dest_str,
        ],
        managed_root,
        transport.env(),
    )
    .map_err(|e| classify_clone(&e, identity, transport))?;

    Ok(Workspace {
        name: identity.name.clone(),
        root: dest,
    })
}

fn classify_clone(
    err: &crate::error::WardError,
    identity: &RepositoryIdentity,
    transport: &Transport,
) -> crate::error::WardError {
    let message = err.to_string();
    let lower = message.to_lowercase();

    let classified = if lower.contains(&format!("branch {} not found", identity.branch.to_lowercase()))
        || lower.contains("could not find remote branch")
    {
        GitError::InvalidBranch {
            branch: identity.branch.clone(),
        }
    } else if lower.contains("repository not found") || lower.contains("repository does not exist")
    {
        GitError::RepositoryNotFound {
            uri: transport.display_uri().to_string(),
        }
    } else if lower.contains("username") || lower.contains("authentication failed") {
        GitError::AuthenticationFailed
    } else if lower.contains("permission denied") {
        GitError::PermissionDenied
    } else if lower.contains("already exists") {
        GitError::AlreadyCloned {
            name: identity.name.clone(),
        }
    } else {
        GitError::CloneFailed {
            uri: transport.display_uri().to_string(),
            message,
        }
    };
    classified.into()
}

/// Commit staged changes.
///
/// The local commit identity is set to the configured username (or a
/// fixed default) first, so commits never depend on ambient git
/// configuration.
///
/// # Errors
///
/// `NothingToCommit` for a clean working tree — distinct so callers
/// can branch on it — otherwise `Unclassified` with the raw message.
pub fn commit(workspace: &Workspace, message: &str, username: Option<&str>) -> WardResult<()> {
    let author = username.unwrap_or("default");
    git_command(&["config", "user.name", author], &workspace.root, &[])?;
    git_command(&["config", "user.email", author], &workspace.root, &[])?;

    info!(workspace = %workspace.name, "committing");
    git_command(&["commit", "-m", message], &workspace.root, &[]).map_err(|e| {
        let text = e.to_string();
        if text.to_lowercase().contains("nothing to commit") {
            GitError::NothingToCommit.into()
        } else {
            crate::error::WardError::from(GitError::Unclassified { message: text })
        }
    })?;
    Ok(())
}

/// Push the workspace to its remote.
///
/// # Errors
///
/// `NonFastForward` when the remote has changes the local repo lacks,
/// `AuthenticationFailed` on credential rejection, else `PushFailed`.
pub fn push(workspace: &Workspace, transport: &Transport) -> WardResult<()> {
    transport.require_credentials()?;

    info!(workspace = %workspace.name, "pushing");
    git_command(&["push"], &workspace.root, transport.env()).map_err(|e| {
        let message = e.to_string();
        let lower = message.to_lowercase();
        let classified = if lower.contains("integrate the remote changes") {
            GitError::NonFastForward
        } else if lower.contains("invalid username or password")
            || lower.contains("authentication failed")
            || lower.contains("username")
        {
            GitError::AuthenticationFailed
        } else {
            GitError::PushFailed { message }
        };
        crate::error::WardError::from(classified)
    })?;
    Ok(())
}

/// Pull the tracked branch. Returns git's stdout for the caller's
/// payload.
///
/// # Errors
///
/// `CredentialsRequired` for bare HTTP(S), `UnresolvedMerge` /
/// `UnmergedFiles` for open merge states, else `PullFailed`.
pub fn pull(workspace: &Workspace, transport: &Transport) -> WardResult<String> {
    transport.require_credentials()?;

    info!(workspace = %workspace.name, "pulling");
    git_command(&["pull"], &workspace.root, transport.env()).map_err(|e| {
        let message = e.to_string();
        let lower = message.to_lowercase();
        let classified = if lower.contains("not concluded your merge") {
            GitError::UnresolvedMerge
        } else if lower.contains("unmerged files") {
            GitError::UnmergedFiles
        } else {
            GitError::PullFailed { message }
        };
        crate::error::WardError::from(classified)
    })
}

/// List remote refs (`git ls-remote`) as `(oid, ref)` pairs.
///
/// # Errors
///
/// `CredentialsRequired` for bare HTTP(S); other failures pass through
/// as the raw command error (connectivity checks report them whole).
pub fn ls_remote(transport: &Transport, cwd: &Path) -> WardResult<Vec<(String, String)>> {
    transport.require_credentials()?;

    let stdout = git_command(&["ls-remote", transport.remote_uri()], cwd, transport.env())?;
    Ok(stdout
        .lines()
        .filter_map(|line| {
            let (oid, reference) = line.split_once('\t')?;
            Some((oid.to_string(), reference.to_string()))
        })
        .collect())
}

/// Whether `branch` exists among remote refs.
#[must_use]
pub fn branch_in_refs(refs: &[(String, String)], branch: &str) -> bool {
    refs.iter()
        .any(|(_, reference)| reference.rsplit('/').next() == Some(branch))
}

/// Capture the human-readable status text and the parsed porcelain
/// report.
///
/// # Errors
///
/// Returns the raw command error if either status invocation fails.
pub fn status(workspace: &Workspace) -> WardResult<(String, StatusReport)> {
    let human = git_command(&["status"], &workspace.root, &[])?;
    let porcelain = git_command(&["status", "--porcelain"], &workspace.root, &[])?;
    debug!(workspace = %workspace.name, "parsed status");
    Ok((human, status::parse(&porcelain)))
}

/// Stage one path into the index.
///
/// # Errors
///
/// Returns the raw command error if `git add` fails.
pub fn stage_path(workspace: &Workspace, relative: &str) -> WardResult<()> {
    git_command(&["add", "--", relative], &workspace.root, &[])?;
    Ok(())
}

/// Remove one path from the index (the working tree copy is already
/// gone by the time this runs).
///
/// # Errors
///
/// Returns the raw command error if the index update fails.
pub fn unstage_path(workspace: &Workspace, relative: &str) -> WardResult<()> {
    git_command(&["rm", "--cached", "--quiet", "--", relative], &workspace.root, &[])?;
    Ok(())
}

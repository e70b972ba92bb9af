// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! Repository lifecycle handlers: list, verify, clone, delete.

use anyhow::Context;
use serde_json::json;
use tracing::info;

use crate::cli::repo::{CloneArgs, DeleteCloneArgs};
use crate::cmd::ActionOutcome;
use crate::config::AssetConfig;
use crate::error::{GitError, Result, WardError};
use crate::git::executor;
use crate::transport::{self, CallOverrides, TransportScheme};
use crate::workspace::{self, Workspace, lock::WorkspaceLock};

/// Enumerates the workspaces under the managed root.
///
/// # Errors
///
/// Returns an error if the managed root cannot be read.
pub fn run_list_repos(config: &AssetConfig) -> Result<ActionOutcome> {
    let workspaces = workspace::enumerate(&config.state_dir)?;

    let repos: Vec<&str> = workspaces.iter().map(|w| w.name.as_str()).collect();
    let repo_dirs: Vec<String> = workspaces
        .iter()
        .map(|w| w.root.display().to_string())
        .collect();
    let total = workspaces.len();

    Ok(ActionOutcome::success(
        format!("Total repos: {total}"),
        json!({ "repos": repos, "repo_dirs": repo_dirs }),
    )
    .with_summary(json!({ "total_repos": total })))
}

/// Verifies that the configured remote is reachable and carries the
/// configured branch.
///
/// # Errors
///
/// Returns an error when resolution fails, the remote cannot be
/// queried, or the branch is not among the remote refs.
pub fn run_verify(config: &AssetConfig) -> Result<ActionOutcome> {
    let (identity, transport) = transport::resolve(config, &CallOverrides::default())?;
    info!(uri = %transport.display_uri(), "querying the remote to verify the repo URI");

    std::fs::create_dir_all(&config.state_dir)
        .with_context(|| format!("failed to create state dir {}", config.state_dir.display()))?;

    let refs = executor::ls_remote(&transport, &config.state_dir).map_err(|e| {
        if matches!(transport.scheme(), TransportScheme::Ssh) {
            info!("remote query failed over SSH, configure-ssh may still need to run");
        }
        e
    })?;

    if !executor::branch_in_refs(&refs, &identity.branch) {
        return Err(WardError::from(GitError::InvalidBranch {
            branch: identity.branch,
        })
        .into());
    }

    Ok(ActionOutcome::success(
        "Test connectivity passed",
        json!({
            "repo_uri": transport.display_uri(),
            "branch_name": identity.branch,
            "total_refs": refs.len(),
        }),
    ))
}

/// Clones the remote into the managed root.
///
/// # Errors
///
/// Returns an error when resolution, locking or the clone itself fails.
pub fn run_clone(config: &AssetConfig, args: &CloneArgs) -> Result<ActionOutcome> {
    let overrides = CallOverrides {
        uri: args.uri.clone(),
        branch: args.branch.clone(),
    };
    let (identity, transport) = transport::resolve(config, &overrides)?;

    std::fs::create_dir_all(&config.state_dir)
        .with_context(|| format!("failed to create state dir {}", config.state_dir.display()))?;
    let _lock = WorkspaceLock::acquire(&config.state_dir, &identity.name)?;

    let workspace = executor::clone(&identity, &transport, &config.state_dir)?;

    Ok(ActionOutcome::success(
        format!("Repo {} cloned successfully", identity.name),
        json!({
            "repo_name": workspace.name,
            "repo_dir": workspace.root.display().to_string(),
            "branch_name": identity.branch,
        }),
    ))
}

/// Deletes a cloned workspace, best-effort.
///
/// Partial deletion is reported as success with the leftover paths in
/// the payload, matching the best-effort delete semantics of the store.
///
/// # Errors
///
/// Returns an error when the workspace is missing or is not a git
/// repository; nothing is removed in either case.
pub fn run_delete_clone(config: &AssetConfig, args: &DeleteCloneArgs) -> Result<ActionOutcome> {
    let overrides = CallOverrides {
        uri: args.uri.clone(),
        branch: args.branch.clone(),
    };
    let (identity, _) = transport::resolve(config, &overrides)?;

    let _lock = WorkspaceLock::acquire(&config.state_dir, &identity.name)?;
    let workspace = Workspace {
        name: identity.name.clone(),
        root: config.state_dir.join(&identity.name),
    };

    let report = workspace::delete(&workspace)?;
    let unable_to_delete: Vec<String> = report
        .failed
        .iter()
        .map(|p| p.display().to_string())
        .collect();

    let message = if report.is_clean() {
        "Successfully deleted repository".to_string()
    } else {
        "Some files could not be deleted in the repo, check permissions of the files before trying again".to_string()
    };

    Ok(ActionOutcome::success(
        message,
        json!({
            "repo_name": workspace.name,
            "repo_dir": workspace.root.display().to_string(),
            "unable_to_delete": unable_to_delete,
        }),
    ))
}

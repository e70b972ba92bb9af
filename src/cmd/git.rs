// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! Git operation handlers: commit, push, pull, status.

use serde_json::json;

use crate::cli::git::CommitArgs;
use crate::cmd::{ActionOutcome, open_workspace, resolve_stored};
use crate::config::AssetConfig;
use crate::error::Result;
use crate::git::executor;
use crate::git::status::StatusReport;
use crate::workspace::lock::WorkspaceLock;

/// Commits staged changes, optionally pushing afterwards.
///
/// # Errors
///
/// Returns an error when the workspace is unavailable, there is
/// nothing to commit, or the follow-up push is rejected.
pub fn run_commit(config: &AssetConfig, args: &CommitArgs) -> Result<ActionOutcome> {
    let (identity, workspace) = open_workspace(config)?;
    let _lock = WorkspaceLock::acquire(&config.state_dir, &identity.name)?;

    executor::commit(&workspace, &args.message, config.username.as_deref())?;

    if args.push {
        let (_, transport) = resolve_stored(config)?;
        executor::push(&workspace, &transport)?;
    }

    Ok(ActionOutcome::success(
        format!("Commit to repo {} completed successfully", identity.name),
        json!({
            "repo_name": workspace.name,
            "repo_dir": workspace.root.display().to_string(),
            "branch_name": identity.branch,
            "commit_message": args.message,
        }),
    ))
}

/// Pushes local commits to the remote.
///
/// # Errors
///
/// Returns an error when the workspace is unavailable, credentials are
/// missing, or the remote rejects the push.
pub fn run_push(config: &AssetConfig) -> Result<ActionOutcome> {
    let (identity, workspace) = open_workspace(config)?;
    let _lock = WorkspaceLock::acquire(&config.state_dir, &identity.name)?;

    let (_, transport) = resolve_stored(config)?;
    executor::push(&workspace, &transport)?;

    Ok(ActionOutcome::success(
        format!("Repo {} pushed successfully", identity.name),
        json!({
            "repo_name": workspace.name,
            "repo_dir": workspace.root.display().to_string(),
            "branch_name": identity.branch,
        }),
    ))
}

/// Pulls the remote branch into the workspace.
///
/// # Errors
///
/// Returns an error when the workspace is unavailable, credentials are
/// missing, or the merge cannot proceed.
pub fn run_pull(config: &AssetConfig) -> Result<ActionOutcome> {
    let (identity, workspace) = open_workspace(config)?;
    let _lock = WorkspaceLock::acquire(&config.state_dir, &identity.name)?;

    let (_, transport) = resolve_stored(config)?;
    let response = executor::pull(&workspace, &transport)?;

    Ok(ActionOutcome::success(
        format!("Repo {} pulled successfully", identity.name),
        json!({
            "response": response,
            "repo_name": workspace.name,
            "repo_dir": workspace.root.display().to_string(),
            "branch_name": identity.branch,
        }),
    ))
}

/// Captures the workspace status: human text, parsed report, and a
/// flattened changed-file list for quick scanning.
///
/// # Errors
///
/// Returns an error when the workspace is unavailable or git itself
/// fails.
pub fn run_status(config: &AssetConfig) -> Result<ActionOutcome> {
    let (_, workspace) = open_workspace(config)?;

    let (human, report) = executor::status(&workspace)?;
    let changed_files = flatten_report(&report);
    // second line of `git status` carries the ahead/behind summary
    let summary_line = human.lines().nth(1).unwrap_or_default().to_string();

    Ok(ActionOutcome::success(
        summary_line.clone(),
        json!({
            "output": human,
            "staged": report.staged,
            "unstaged": report.unstaged,
            "untracked_files": report.untracked,
            "changed_files": changed_files,
            "repo_dir": workspace.root.display().to_string(),
        }),
    )
    .with_summary(json!({ "status": summary_line })))
}

/// Flatten the categorized report into one list of touched paths, in
/// report order: staged, then unstaged, then untracked.
fn flatten_report(report: &StatusReport) -> Vec<String> {
    let mut files: Vec<String> = Vec::new();
    for paths in report.staged.values() {
        files.extend(paths.iter().cloned());
    }
    for paths in report.unstaged.values() {
        files.extend(paths.iter().cloned());
    }
    files.extend(report.untracked.iter().cloned());
    files.dedup();
    files
}

#[cfg(test)]
mod tests {
    use super::flatten_report;
    use crate::git::status;

    #[test]
    fn test_flatten_report_covers_all_categories() {
        let report = status::parse("M  staged.txt\n M worktree.txt\nMM both.txt\n?? junk.log\n");
        let files = flatten_report(&report);
        assert_eq!(
            files,
            ["staged.txt", "both.txt", "worktree.txt", "both.txt", "junk.log"]
        );
    }
}

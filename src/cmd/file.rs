// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! File staging handlers: add, update, delete.
//!
//! All three run against the configured workspace (file paths are
//! relative to it, so per-call URI overrides make no sense here) and
//! hold the workspace lock for the duration of the mutation.

use serde_json::json;

use crate::cli::file::{AddFileArgs, DeleteFileArgs, UpdateFileArgs};
use crate::cmd::{ActionOutcome, open_workspace};
use crate::config::AssetConfig;
use crate::error::Result;
use crate::staging::{self, ContentSource, FileOperation, MutationRequest};
use crate::vault::{ContentVault, DirVault};
use crate::workspace::lock::WorkspaceLock;

/// Creates a new file in the workspace and stages it.
///
/// # Errors
///
/// Returns an error when the path escapes the workspace, the file
/// already exists, or content resolution fails.
pub fn run_add_file(config: &AssetConfig, args: &AddFileArgs) -> Result<ActionOutcome> {
    run_mutation(
        config,
        FileOperation::Add,
        &args.path,
        content_source(args.contents.as_deref(), args.vault_id.as_deref()),
    )
}

/// Overwrites an existing file in the workspace and stages it.
///
/// # Errors
///
/// Returns an error when the path escapes the workspace, the file is
/// missing, or content resolution fails.
pub fn run_update_file(config: &AssetConfig, args: &UpdateFileArgs) -> Result<ActionOutcome> {
    run_mutation(
        config,
        FileOperation::Update,
        &args.path,
        content_source(args.contents.as_deref(), args.vault_id.as_deref()),
    )
}

/// Deletes a file from the workspace and the index.
///
/// # Errors
///
/// Returns an error when the path escapes the workspace or the file is
/// missing.
pub fn run_delete_file(config: &AssetConfig, args: &DeleteFileArgs) -> Result<ActionOutcome> {
    run_mutation(config, FileOperation::Delete, &args.path, ContentSource::None)
}

// clap guarantees exactly one source is present for add/update
fn content_source(contents: Option<&str>, vault_id: Option<&str>) -> ContentSource {
    match (contents, vault_id) {
        (Some(text), _) => ContentSource::Inline(text.to_string()),
        (None, Some(id)) => ContentSource::Reference(id.to_string()),
        (None, None) => ContentSource::None,
    }
}

fn run_mutation(
    config: &AssetConfig,
    operation: FileOperation,
    path: &str,
    content: ContentSource,
) -> Result<ActionOutcome> {
    let (identity, workspace) = open_workspace(config)?;
    let _lock = WorkspaceLock::acquire(&config.state_dir, &identity.name)?;

    let vault = config.vault_dir.clone().map(DirVault::new);
    let request = MutationRequest {
        relative_path: path.to_string(),
        operation,
        content,
    };
    let normalized = staging::mutate(
        &workspace,
        &request,
        vault.as_ref().map(|v| v as &dyn ContentVault),
    )?;

    Ok(ActionOutcome::success(
        format!("File '{}' {} successfully", normalized, operation.past_tense()),
        json!({
            "repo_name": workspace.name,
            "repo_dir": workspace.root.display().to_string(),
            "file_path": normalized,
        }),
    ))
}

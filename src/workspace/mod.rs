// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! Workspace store: on-disk clones under one managed root.
//!
//! ```text
//! <state_dir>/
//!   tools-main/        (workspace: opens as git repo)
//!   widgets-develop/   (workspace)
//!   .ssh-asset-7/      (skipped: hidden)
//!   .tools-main.lock   (advisory lock, see lock.rs)
//! ```
//!
//! Existence on disk is the source of truth; there is no registry.
//! Workspaces are created by clone and destroyed by explicit delete,
//! never garbage-collected.

pub mod guard;
pub mod lock;


use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{WardResult, WorkspaceError};

/// One on-disk clone managed by gitward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// Directory name under the managed root, unique per identity.
    pub name: String,
    /// Absolute workspace root. All operations are expressed against
    /// this path; nothing ever changes the process working directory.
    pub root: PathBuf,
}

/// Outcome of a workspace delete. Partial deletion is reported as
/// success-with-warnings, not a hard failure.
#[derive(Debug, Default)]
pub struct DeleteReport {
    /// Paths that could not be removed, if any.
    pub failed: Vec<PathBuf>,
}

impl DeleteReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Walk the immediate subdirectories of the managed root and collect
/// those that open as git repositories, deduplicated by name. Hidden
/// directories (key stores, the manager's own state) are skipped.
///
/// Returns workspaces sorted by name for deterministic output.
///
/// # Errors
///
/// Returns `WorkspaceError::AccessError` if the managed root itself
/// cannot be read.
pub fn enumerate(managed_root: &Path) -> WardResult<Vec<Workspace>> {
    let entries = std::fs::read_dir(managed_root).map_err(|e| WorkspaceError::AccessError {
        name: managed_root.display().to_string(),
        message: e.to_string(),
    })?;

    let mut workspaces: Vec<Workspace> = Vec::new();
    for entry in entries {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        if gix::open(&path).is_err() {
            continue;
        }
        if workspaces.iter().any(|w| w.name == name) {
            continue;
        }
        workspaces.push(Workspace {
            name: name.to_string(),
            root: path,
        });
    }

    workspaces.sort_by(|a, b| a.name.cmp(&b.name));
    debug!(root = %managed_root.display(), count = workspaces.len(), "enumerated workspaces");
    Ok(workspaces)
}

/// Open `managed_root/name` as a git repository.
///
/// Never creates a directory as a side effect.
///
/// # Errors
///
/// - `WorkspaceError::NotFound` when the path is missing
/// - `WorkspaceError::NotARepository` when it exists but does not open
///   as a git repository
/// - `WorkspaceError::AccessError` for any other I/O failure
pub fn verify(managed_root: &Path, name: &str) -> WardResult<Workspace> {
    let root = managed_root.join(name);

    match std::fs::symlink_metadata(&root) {
        Ok(meta) if !meta.is_dir() => {
            return Err(WorkspaceError::NotARepository {
                name: name.to_string(),
            }
            .into());
        }
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(WorkspaceError::NotFound {
                name: name.to_string(),
            }
            .into());
        }
        Err(e) => {
            return Err(WorkspaceError::AccessError {
                name: name.to_string(),
                message: e.to_string(),
            }
            .into());
        }
    }

    match gix::open(&root) {
        Ok(_) => Ok(Workspace {
            name: name.to_string(),
            root,
        }),
        Err(gix::open::Error::NotARepository { .. }) => Err(WorkspaceError::NotARepository {
            name: name.to_string(),
        }
        .into()),
        Err(e) => Err(WorkspaceError::AccessError {
            name: name.to_string(),
            message: e.to_string(),
        }
        .into()),
    }
}

/// Delete a workspace directory recursively, best-effort.
///
/// The directory must exist and contain a `.git` metadata subdirectory
/// before anything is removed; per-file failures are collected in the
/// report instead of aborting the walk.
///
/// # Errors
///
/// - `WorkspaceError::NotFound` when the directory is missing
/// - `WorkspaceError::NotARepository` when `.git` is absent (nothing
///   is deleted in that case)
pub fn delete(workspace: &Workspace) -> WardResult<DeleteReport> {
    if !workspace.root.is_dir() {
        return Err(WorkspaceError::NotFound {
            name: workspace.name.clone(),
        }
        .into());
    }
    if !workspace.root.join(".git").is_dir() {
        return Err(WorkspaceError::NotARepository {
            name: workspace.name.clone(),
        }
        .into());
    }

    let mut report = DeleteReport::default();
    remove_tree_best_effort(&workspace.root, &mut report.failed);
    if !report.is_clean() {
        warn!(
            workspace = %workspace.name,
            leftover = report.failed.len(),
            "some files could not be deleted, check permissions"
        );
    }
    Ok(report)
}

fn remove_tree_best_effort(dir: &Path, failed: &mut Vec<PathBuf>) {
    match std::fs::read_dir(dir) {
        Ok(entries) => {
            for entry in entries.flatten() {
                let path = entry.path();
                let is_real_dir = entry.file_type().is_ok_and(|t| t.is_dir() && !t.is_symlink());
                if is_real_dir {
                    remove_tree_best_effort(&path, failed);
                } else if std::fs::remove_file(&path).is_err() {
                    failed.push(path);
                }
            }
        }
        Err(_) => {
            failed.push(dir.to_path_buf());
            return;
        }
    }
    if std::fs::remove_dir(dir).is_err() {
        failed.push(dir.to_path_buf());
    }
}

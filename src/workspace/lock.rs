// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! Advisory per-workspace mutual exclusion.
//!
//! ```text
//! <managed root>/.<workspace>.lock   (O_EXCL create)
//!        |
//!        v
//!   WorkspaceLock (removed on drop)
//! ```
//!
//! One mutation in flight per workspace; a second caller gets
//! `WorkspaceError::Locked` instead of racing the first. The lock is
//! advisory: only gitward itself takes it.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{WardResult, WorkspaceError};

/// Held for the duration of one mutating operation.
#[derive(Debug)]
pub struct WorkspaceLock {
    path: PathBuf,
}

impl WorkspaceLock {
    /// Acquire the lock for `name` under `managed_root`.
    ///
    /// # Errors
    ///
    /// Returns `WorkspaceError::Locked` if another operation holds the
    /// lock, or `WorkspaceError::AccessError` if the lock file cannot
    /// be created at all.
    pub fn acquire(managed_root: &Path, name: &str) -> WardResult<Self> {
        let path = managed_root.join(format!(".{name}.lock"));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                // pid is informational only, for operators inspecting
                // a stale lock
                let _ = write!(file, "{}", std::process::id());
                Ok(Self { path })
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(WorkspaceError::Locked {
                    name: name.to_string(),
                }
                .into())
            }
            Err(e) => Err(WorkspaceError::AccessError {
                name: name.to_string(),
                message: format!("failed to create lock file: {e}"),
            }
            .into()),
        }
    }
}

impl Drop for WorkspaceLock {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!(lock = %self.path.display(), error = %e, "failed to remove lock file");
        }
    }
}

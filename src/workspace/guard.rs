// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! Path boundary enforcement for caller-supplied relative paths.
//!
//! ```text
//! "  /conf//app.toml " --normalize--> "conf/app.toml"
//!          |
//!          v
//! canonical(root) + canonical(existing prefix) + remainder
//!          |
//!          v
//! component-prefix check against canonical root
//!   pass -> absolute target path
//!   fail -> PathEscape ("path outside git repository")
//! ```
//!
//! The check runs after symlink resolution of every existing ancestor,
//! so `..` and symlink-based escapes are both caught on the resolved
//! path, not the raw string.

use std::path::{Component, Path, PathBuf};

use crate::error::{WardResult, WorkspaceError};

/// Normalize a caller-supplied relative path.
///
/// Splits on `/`, drops empty and whitespace-only segments, rejects
/// `..` outright. `.` segments are dropped as no-ops.
fn normalize(relative: &str) -> Result<Vec<&str>, WorkspaceError> {
    let mut segments = Vec::new();
    for segment in relative.trim().split('/') {
        let segment = segment.trim();
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment == ".." {
            return Err(WorkspaceError::PathEscape {
                path: relative.trim().to_string(),
            });
        }
        segments.push(segment);
    }
    if segments.is_empty() {
        return Err(WorkspaceError::PathEscape {
            path: relative.trim().to_string(),
        });
    }
    Ok(segments)
}

/// Resolve `relative` against `root`, guaranteeing the result is a
/// descendant of `root`.
///
/// Returns the absolute target path together with the normalized
/// repository-relative path (the form handed to `git add`).
///
/// # Errors
///
/// Returns `WorkspaceError::PathEscape` when normalization rejects the
/// input or the resolved path leaves the root; the violation is
/// terminal and never silently corrected.
pub fn resolve(root: &Path, relative: &str) -> WardResult<(PathBuf, String)> {
    let segments = normalize(relative)?;
    let normalized = segments.join("/");

    let canonical_root = root.canonicalize().map_err(|e| WorkspaceError::AccessError {
        name: root.display().to_string(),
        message: e.to_string(),
    })?;

    let mut candidate = canonical_root.clone();
    for segment in &segments {
        candidate.push(segment);
    }

    let resolved = resolve_existing_prefix(&candidate);
    if !is_descendant(&canonical_root, &resolved) {
        return Err(WorkspaceError::PathEscape {
            path: normalized,
        }
        .into());
    }

    Ok((resolved, normalized))
}

/// Canonicalize the deepest existing ancestor of `path` and reattach
/// the not-yet-existing remainder. The target itself may not exist
/// (Add creates it), but any symlink in the existing part resolves.
fn resolve_existing_prefix(path: &Path) -> PathBuf {
    let mut existing = path.to_path_buf();
    let mut remainder = Vec::new();

    loop {
        if let Ok(canonical) = existing.canonicalize() {
            let mut resolved = canonical;
            for part in remainder.iter().rev() {
                resolved.push(part);
            }
            return resolved;
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                remainder.push(name.to_os_string());
                existing = parent.to_path_buf();
            }
            _ => return path.to_path_buf(),
        }
    }
}

/// Strict component-prefix comparison of canonical paths.
fn is_descendant(root: &Path, candidate: &Path) -> bool {
    let root_components: Vec<Component<'_>> = root.components().collect();
    let candidate_components: Vec<Component<'_>> = candidate.components().collect();
    candidate_components.len() > root_components.len()
        && candidate_components[..root_components.len()] == root_components[..]
}

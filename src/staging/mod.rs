// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! File staging engine: add/update/delete one tracked file.
//!
//! ```text
//! MutationRequest
//!   | PathGuard (every operation)
//!   | precondition  Add: target absent   Update/Delete: target present
//!   v
//! Add/Update: content (inline | vault ref) --> unescape (best effort)
//!             --> tempfile in target dir --> persist --> git add
//! Delete:     unlink --> git rm --cached
//! ```
//!
//! Side effects are confined to the single target file and its index
//! entry. Writes are atomic from a reader's point of view: the bytes
//! land in a temp file in the same directory and are renamed over the
//! target.


use std::borrow::Cow;

use tracing::{debug, info};

use crate::error::{StagingError, WardResult};
use crate::git::executor;
use crate::vault::ContentVault;
use crate::workspace::{Workspace, guard};

/// Mutation kind for one tracked file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
    Add,
    Update,
    Delete,
}

impl FileOperation {
    /// Past-tense verb for result messages ("added", "updated", "deleted").
    #[must_use]
    pub const fn past_tense(self) -> &'static str {
        match self {
            Self::Add => "added",
            Self::Update => "updated",
            Self::Delete => "deleted",
        }
    }
}

/// Where the new file content comes from. Irrelevant for Delete.
#[derive(Debug, Clone)]
pub enum ContentSource {
    /// Caller-supplied text.
    Inline(String),
    /// Opaque reference resolved through the content vault.
    Reference(String),
    /// No content (Delete).
    None,
}

/// One requested file mutation. `relative_path` is caller-supplied and
/// untrusted until the guard has resolved it.
#[derive(Debug, Clone)]
pub struct MutationRequest {
    pub relative_path: String,
    pub operation: FileOperation,
    pub content: ContentSource,
}

/// Perform one file mutation inside the workspace boundary.
///
/// Returns the normalized repository-relative path on success.
///
/// # Errors
///
/// - `WorkspaceError::PathEscape` when the path leaves the workspace
///   root; the filesystem is untouched in that case
/// - `StagingError::AlreadyExists` / `StagingError::NotFound` on
///   precondition violations
/// - `StagingError::InvalidReference` when the vault cannot resolve
///   the content reference
/// - `StagingError::IndexRemoveFailed` when the file left the disk but
///   the index update failed (the next status call will reveal the
///   divergence)
pub fn mutate(
    workspace: &Workspace,
    request: &MutationRequest,
    vault: Option<&dyn ContentVault>,
) -> WardResult<String> {
    let (absolute, normalized) = guard::resolve(&workspace.root, &request.relative_path)?;

    let exists = absolute.exists();
    match request.operation {
        FileOperation::Add if exists => {
            return Err(StagingError::AlreadyExists { path: normalized }.into());
        }
        FileOperation::Update | FileOperation::Delete if !exists => {
            return Err(StagingError::NotFound { path: normalized }.into());
        }
        _ => {}
    }

    match request.operation {
        FileOperation::Add | FileOperation::Update => {
            let text = resolve_content(&request.content, vault)?;
            let text = unescape_best_effort(&text);
            write_atomic(&absolute, text.as_bytes(), &normalized)?;
            executor::stage_path(workspace, &normalized)?;
            info!(
                workspace = %workspace.name,
                path = %normalized,
                op = request.operation.past_tense(),
                "staged file"
            );
        }
        FileOperation::Delete => {
            std::fs::remove_file(&absolute).map_err(|e| StagingError::RemoveFailed {
                path: normalized.clone(),
                source: e,
            })?;
            // disk and index may diverge here; the error records that
            // the unlink already succeeded
            executor::unstage_path(workspace, &normalized).map_err(|e| {
                StagingError::IndexRemoveFailed {
                    path: normalized.clone(),
                    message: e.to_string(),
                }
            })?;
            info!(workspace = %workspace.name, path = %normalized, "deleted file");
        }
    }

    Ok(normalized)
}

fn resolve_content(
    content: &ContentSource,
    vault: Option<&dyn ContentVault>,
) -> WardResult<String> {
    match content {
        ContentSource::Inline(text) => Ok(text.clone()),
        ContentSource::Reference(reference) => {
            let vault = vault.ok_or_else(|| StagingError::InvalidReference {
                reference: reference.clone(),
                message: "no content vault configured".to_string(),
            })?;
            let bytes = vault.fetch(reference)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        ContentSource::None => Ok(String::new()),
    }
}

fn write_atomic(
    absolute: &std::path::Path,
    bytes: &[u8],
    normalized: &str,
) -> WardResult<()> {
    use std::io::Write;

    let io_err = |e: std::io::Error| StagingError::WriteFailed {
        path: normalized.to_string(),
        source: e,
    };

    let parent = absolute
        .parent()
        .ok_or_else(|| io_err(std::io::Error::other("target has no parent directory")))?;
    std::fs::create_dir_all(parent).map_err(io_err)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent).map_err(io_err)?;
    temp.write_all(bytes).map_err(io_err)?;
    temp.persist(absolute)
        .map_err(|e| io_err(e.error))?;

    debug!(path = %normalized, bytes = bytes.len(), "wrote file");
    Ok(())
}

/// Best-effort decoding of common backslash escapes (`\n`, `\t`, `\r`,
/// `\\`, `\"`, `\'`, `\0`).
///
/// Unknown escapes pass through unchanged; a trailing lone backslash
/// makes the whole input ambiguous, so the raw content is returned
/// untouched. This mirrors how platform callers historically sent
/// escaped text and is deliberately conservative.
pub(crate) fn unescape_best_effort(content: &str) -> Cow<'_, str> {
    if !content.contains('\\') {
        return Cow::Borrowed(content);
    }

    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => return Cow::Borrowed(content),
        }
    }
    Cow::Owned(out)
}

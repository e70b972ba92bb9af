// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! Boundary collaborators of the hosting platform.
//!
//! ```text
//! ContentVault    opaque reference id --> file bytes
//! AttachmentSink  generated public key --> operator retrieval
//! ```
//!
//! The core treats both purely as byte/file boundaries; the directory
//! implementations back the standalone CLI.


use std::path::{Path, PathBuf};

use crate::error::{SshError, StagingError, WardResult};

/// Resolves an opaque content reference into raw bytes.
pub trait ContentVault {
    /// Fetch the bytes behind `reference`.
    ///
    /// # Errors
    ///
    /// Returns `StagingError::InvalidReference` when the reference is
    /// unknown or unreadable.
    fn fetch(&self, reference: &str) -> WardResult<Vec<u8>>;
}

/// Accepts a generated public key for operator retrieval.
pub trait AttachmentSink {
    /// Persist the file at `path` under the attachment name `name`.
    ///
    /// # Errors
    ///
    /// Returns `SshError::PublishFailed` carrying the sink's own
    /// message verbatim.
    fn publish(&self, path: &Path, name: &str) -> WardResult<()>;
}

/// Directory-backed vault: a reference id is a file name inside the
/// vault directory.
#[derive(Debug, Clone)]
pub struct DirVault {
    dir: PathBuf,
}

impl DirVault {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ContentVault for DirVault {
    fn fetch(&self, reference: &str) -> WardResult<Vec<u8>> {
        // reference ids are opaque, not paths
        if reference.is_empty() || reference.contains('/') || reference.contains('\\') {
            return Err(StagingError::InvalidReference {
                reference: reference.to_string(),
                message: "reference id must not contain path separators".to_string(),
            }
            .into());
        }
        let path = self.dir.join(reference);
        std::fs::read(&path).map_err(|e| {
            StagingError::InvalidReference {
                reference: reference.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }
}

/// Directory-backed attachment sink: copies the file into the
/// attachments directory under the given name.
#[derive(Debug, Clone)]
pub struct DirAttachmentSink {
    dir: PathBuf,
}

impl DirAttachmentSink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl AttachmentSink for DirAttachmentSink {
    fn publish(&self, path: &Path, name: &str) -> WardResult<()> {
        let publish = || -> std::io::Result<()> {
            std::fs::create_dir_all(&self.dir)?;
            std::fs::copy(path, self.dir.join(name))?;
            Ok(())
        };
        publish().map_err(|e| {
            SshError::PublishFailed {
                message: e.to_string(),
            }
            .into()
        })
    }
}

// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! RSA keypair management for SSH transports.
//!
//! ```text
//! <state_dir>/.ssh-<asset_id>/
//!   id_rsa       private key, OpenSSH PEM, mode 0600
//!   id_rsa.pub   single OpenSSH public key line
//! ```
//!
//! One keypair per asset. The private key path feeds straight into the
//! `GIT_SSH_COMMAND` the transport layer builds; the public key line is
//! what operators install on the remote.

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use russh_keys::ssh_key::private::{KeypairData, RsaKeypair};
use russh_keys::ssh_key::{LineEnding, PrivateKey};
use tracing::{debug, info};

use crate::error::{SshError, WardResult};
use crate::vault::AttachmentSink;

const PRIVATE_KEY_FILE: &str = "id_rsa";
const PUBLIC_KEY_FILE: &str = "id_rsa.pub";
const KEY_COMMENT: &str = "gitward";
const RSA_BITS: usize = 2048;

/// Directory holding the keypair for one asset.
#[must_use]
pub fn key_dir(state_dir: &Path, asset_id: &str) -> PathBuf {
    state_dir.join(format!(".ssh-{asset_id}"))
}

/// Private key location for one asset, whether or not it exists yet.
#[must_use]
pub fn private_key_path(state_dir: &Path, asset_id: &str) -> PathBuf {
    key_dir(state_dir, asset_id).join(PRIVATE_KEY_FILE)
}

/// Manages the on-disk RSA keypair for a single asset.
#[derive(Debug, Clone)]
pub struct KeyManager {
    dir: PathBuf,
}

impl KeyManager {
    #[must_use]
    pub fn new(state_dir: &Path, asset_id: &str) -> Self {
        Self {
            dir: key_dir(state_dir, asset_id),
        }
    }

    #[must_use]
    pub fn private_key_path(&self) -> PathBuf {
        self.dir.join(PRIVATE_KEY_FILE)
    }

    #[must_use]
    pub fn public_key_path(&self) -> PathBuf {
        self.dir.join(PUBLIC_KEY_FILE)
    }

    /// Read the stored public key line, trimmed.
    ///
    /// # Errors
    ///
    /// Returns `SshError::Io` when the public key file cannot be read.
    pub fn public_key(&self) -> WardResult<String> {
        let path = self.public_key_path();
        let line = std::fs::read_to_string(&path).map_err(|e| SshError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(line.trim().to_string())
    }

    /// Generate a fresh RSA-2048 keypair and return the public key line.
    ///
    /// With `force_new`, any existing pair is removed first. Without it,
    /// an existing private key is a hard error so a key already handed
    /// to operators is never silently replaced.
    ///
    /// # Errors
    ///
    /// - `SshError::KeyExists` when a key is present and `force_new` is
    ///   not set
    /// - `SshError::GenerationFailed` when keypair generation or
    ///   encoding fails
    /// - `SshError::Io` on filesystem failures
    pub fn generate(&self, force_new: bool) -> WardResult<String> {
        let private_path = self.private_key_path();
        if private_path.exists() {
            if !force_new {
                return Err(SshError::KeyExists {
                    path: private_path.display().to_string(),
                }
                .into());
            }
            debug!(dir = %self.dir.display(), "replacing existing keypair");
            let _ = std::fs::remove_file(&private_path);
            let _ = std::fs::remove_file(self.public_key_path());
        }

        std::fs::create_dir_all(&self.dir).map_err(|e| SshError::Io {
            path: self.dir.display().to_string(),
            source: e,
        })?;

        let keypair = RsaKeypair::random(&mut rand::rngs::OsRng, RSA_BITS).map_err(|e| {
            SshError::GenerationFailed {
                message: e.to_string(),
            }
        })?;
        let private = PrivateKey::new(KeypairData::Rsa(keypair), KEY_COMMENT).map_err(|e| {
            SshError::GenerationFailed {
                message: e.to_string(),
            }
        })?;
        let private_pem = private
            .to_openssh(LineEnding::LF)
            .map_err(|e| SshError::GenerationFailed {
                message: e.to_string(),
            })?;
        let public_line = private
            .public_key()
            .to_openssh()
            .map_err(|e| SshError::GenerationFailed {
                message: e.to_string(),
            })?;

        write_private(&private_path, private_pem.as_bytes())?;
        write_file(&self.public_key_path(), public_line.as_bytes())?;

        info!(path = %private_path.display(), "generated RSA keypair");
        Ok(public_line)
    }

    /// Hand the public key file to the attachment sink.
    ///
    /// # Errors
    ///
    /// Returns `SshError::PublishFailed` with the sink's message.
    pub fn publish(&self, sink: &dyn AttachmentSink) -> WardResult<()> {
        sink.publish(&self.public_key_path(), PUBLIC_KEY_FILE)
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> WardResult<()> {
    std::fs::write(path, bytes).map_err(|e| {
        SshError::Io {
            path: path.display().to_string(),
            source: e,
        }
        .into()
    })
}

// ssh refuses keys readable by anyone else, so the mode is set at
// creation rather than after the write
#[cfg(unix)]
fn write_private(path: &Path, bytes: &[u8]) -> WardResult<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;
    let io_err = |e: std::io::Error| SshError::Io {
        path: path.display().to_string(),
        source: e,
    };
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)
        .map_err(io_err)?;
    file.write_all(bytes).map_err(io_err)?;
    Ok(())
}

#[cfg(not(unix))]
fn write_private(path: &Path, bytes: &[u8]) -> WardResult<()> {
    write_file(path, bytes)
}

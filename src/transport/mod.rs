// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! Transport resolution: stored configuration + per-call overrides
//! into a repository identity and an authenticated transport.
//!
//! ```text
//! AssetConfig + CallOverrides
//!        |
//!        v
//!   resolve()
//!    |      |
//!    v      v
//! http(s)  everything else = SSH
//! userinfo  GIT_SSH_COMMAND
//! embedded  -i <state>/.ssh-<asset>/id_rsa
//!    |      -o StrictHostKeyChecking=no
//!    v
//! RepositoryIdentity + Transport
//! ```
//!
//! The transport URI (with embedded credentials) is used only as the
//! argument to git; the display URI stays the original string so
//! credentials never reach logs or callers. SSH environment is carried
//! as per-call data on the spawned command, never set process-wide.

#[cfg(test)]
mod tests;

use tracing::debug;
use url::Url;

use crate::config::AssetConfig;
use crate::error::{ConfigError, GitError, WardResult};
use crate::ssh;

/// Logical identity of one managed repository clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryIdentity {
    /// Filesystem-safe workspace directory name under the managed root.
    pub name: String,
    /// Original remote URI, safe for display.
    pub uri: String,
    /// Branch this workspace tracks.
    pub branch: String,
}

/// Transport scheme the remote URI resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportScheme {
    Http,
    Ssh,
}

/// Remote address plus the material needed to authenticate against it.
#[derive(Debug, Clone)]
pub struct Transport {
    scheme: TransportScheme,
    remote_uri: String,
    display_uri: String,
    env: Vec<(String, String)>,
    has_credentials: bool,
}

impl Transport {
    /// URI handed to git. May embed percent-encoded credentials; must
    /// never be logged or surfaced.
    #[must_use]
    pub fn remote_uri(&self) -> &str {
        &self.remote_uri
    }

    /// Credential-free URI for logs and result payloads.
    #[must_use]
    pub fn display_uri(&self) -> &str {
        &self.display_uri
    }

    /// Per-call environment for the git subprocess.
    #[must_use]
    pub fn env(&self) -> &[(String, String)] {
        &self.env
    }

    #[must_use]
    pub const fn scheme(&self) -> TransportScheme {
        self.scheme
    }

    /// Clone/push/pull over HTTP(S) need both username and password;
    /// SSH authenticates through the managed key instead.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CredentialsRequired` for an HTTP(S) remote
    /// without a full credential pair.
    pub const fn require_credentials(&self) -> Result<(), GitError> {
        match self.scheme {
            TransportScheme::Http if !self.has_credentials => Err(GitError::CredentialsRequired),
            _ => Ok(()),
        }
    }
}

/// Per-call overrides taking priority over stored configuration.
#[derive(Debug, Clone, Default)]
pub struct CallOverrides {
    pub uri: Option<String>,
    pub branch: Option<String>,
}

/// Resolve identity and transport for one call.
///
/// Override precedence: explicit per-call `uri`/`branch` beat stored
/// configuration. An explicit `repo_name` only applies when the URI was
/// not overridden (a different remote must not collide with the
/// configured workspace).
///
/// # Errors
///
/// Returns `ConfigError::MissingUri` when neither source provides a
/// URI, or `ConfigError::InvalidUri` for a URI that cannot be split
/// into scheme/host/path.
pub fn resolve(
    config: &AssetConfig,
    overrides: &CallOverrides,
) -> WardResult<(RepositoryIdentity, Transport)> {
    let uri = overrides
        .uri
        .as_deref()
        .or(config.repo_uri.as_deref())
        .ok_or(ConfigError::MissingUri)?
        .trim()
        .to_string();
    let branch = overrides
        .branch
        .as_deref()
        .unwrap_or(&config.branch_name)
        .to_string();

    let configured_name = match overrides.uri {
        None => config.repo_name.as_deref(),
        Some(_) => None,
    };
    let name = derive_name(&uri, &branch, configured_name)?;

    let transport = if uri.starts_with("http://") || uri.starts_with("https://") {
        resolve_http(config, &uri)?
    } else {
        resolve_ssh(config, &uri)?
    };

    debug!(
        workspace = %name,
        uri = %transport.display_uri(),
        branch = %branch,
        ssh = matches!(transport.scheme(), TransportScheme::Ssh),
        "resolved transport"
    );

    let identity = RepositoryIdentity { name, uri, branch };
    Ok((identity, transport))
}

fn resolve_http(config: &AssetConfig, uri: &str) -> WardResult<Transport> {
    let has_credentials = config.username.is_some() && config.password.is_some();

    let remote_uri = if let (Some(username), Some(password)) = (&config.username, &config.password)
    {
        let mut parsed = Url::parse(uri).map_err(|e| ConfigError::InvalidUri {
            uri: uri.to_string(),
            message: e.to_string(),
        })?;
        // set_username/set_password percent-encode the userinfo, so
        // '@', '/' and whitespace cannot corrupt the URI
        parsed
            .set_username(username)
            .and_then(|()| parsed.set_password(Some(password.expose())))
            .map_err(|()| ConfigError::InvalidUri {
                uri: uri.to_string(),
                message: "URI cannot carry userinfo".to_string(),
            })?;
        parsed.to_string()
    } else {
        uri.to_string()
    };

    Ok(Transport {
        scheme: TransportScheme::Http,
        remote_uri,
        display_uri: uri.to_string(),
        env: Vec::new(),
        has_credentials,
    })
}

fn resolve_ssh(config: &AssetConfig, uri: &str) -> WardResult<Transport> {
    let key_path = ssh::private_key_path(&config.state_dir, &config.asset_id);
    let ssh_command = format!(
        "ssh -o StrictHostKeyChecking=no -i {}",
        key_path.display()
    );

    Ok(Transport {
        scheme: TransportScheme::Ssh,
        remote_uri: uri.to_string(),
        display_uri: uri.to_string(),
        env: vec![("GIT_SSH_COMMAND".to_string(), ssh_command)],
        has_credentials: true,
    })
}

/// Derive the workspace directory name.
///
/// Last URI path segment, `.git` suffix stripped. Without an explicit
/// `repo_name` the branch is appended so two clones of one URL on
/// different branches never collide under the managed root.
fn derive_name(
    uri: &str,
    branch: &str,
    configured: Option<&str>,
) -> Result<String, ConfigError> {
    if let Some(name) = configured {
        return Ok(name.to_string());
    }

    let trimmed = uri.trim_end_matches('/');
    let last = trimmed
        .rsplit(['/', ':'])
        .next()
        .unwrap_or_default();
    let stem = last.strip_suffix(".git").unwrap_or(last);

    // A URI with no path segment cannot name a workspace
    if stem.is_empty() || stem == trimmed {
        return Err(ConfigError::InvalidUri {
            uri: uri.to_string(),
            message: "cannot split into scheme/host/path".to_string(),
        });
    }

    Ok(format!("{stem}-{}", sanitize_segment(branch)))
}

/// Replace anything that is not filesystem-safe with '-'.
fn sanitize_segment(segment: &str) -> String {
    segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

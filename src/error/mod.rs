// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error handling module.
//!
//! ```text
//!              WardError (~24 bytes)
//!                     |
//!   +--------+--------+--------+--------+--------+
//!   |        |        |        |        |        |
//!   v        v        v        v        v        v
//! Config Workspace Staging   Git      Ssh    Io/Other
//!   Box     Box      Box     Box      Box    Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Config    MissingUri, InvalidUri, MissingKey, InvalidValue
//!   Workspace PathEscape, NotARepository, NotFound, AccessError, Locked
//!   Staging   AlreadyExists, NotFound, InvalidReference, WriteFailed
//!   Git       CredentialsRequired, AuthenticationFailed, AlreadyCloned, ...
//!   Ssh       KeyExists, GenerationFailed, PublishFailed
//!
//! All variants boxed => WardError fits in 24 bytes.
//! ```
//!
//! Every failure an action can surface resolves to exactly one variant
//! at the point it is detected; raw git stderr that matches no known
//! pattern lands in [`GitError::Unclassified`] rather than being
//! swallowed.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`WardError`].
pub type WardResult<T> = std::result::Result<T, WardError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum WardError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Workspace resolution or boundary error.
    #[error("workspace error: {0}")]
    Workspace(#[from] Box<WorkspaceError>),

    /// File staging error.
    #[error("staging error: {0}")]
    Staging(#[from] Box<StagingError>),

    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// SSH key management error.
    #[error("ssh error: {0}")]
    Ssh(#[from] Box<SshError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for WardError {
                fn from(err: $error) -> Self {
                    WardError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    WorkspaceError => Workspace,
    StagingError => Staging,
    GitError => Git,
    SshError => Ssh,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No repository URI available from configuration or overrides.
    #[error("no repository URI configured and none supplied with the call")]
    MissingUri,

    /// URI could not be split into scheme/host/path.
    #[error("malformed repository URI '{uri}': {message}")]
    InvalidUri { uri: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}'")]
    MissingKey { key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to load or deserialize configuration sources.
    #[error("failed to load configuration: {message}")]
    LoadError { message: String },
}

// --- Workspace Errors ---

/// Workspace store and path boundary errors.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// Resolved path escapes the workspace root. Terminal, never
    /// silently corrected.
    #[error("path outside git repository: {path}")]
    PathEscape { path: String },

    /// Directory exists but does not open as a git repository.
    #[error("directory is not a git repository: {name}")]
    NotARepository { name: String },

    /// Workspace directory is missing from the managed root.
    #[error("repository is not available: {name}")]
    NotFound { name: String },

    /// Any other I/O failure while opening the workspace.
    #[error("error while verifying the repo '{name}': {message}")]
    AccessError { name: String, message: String },

    /// Another operation holds the workspace lock.
    #[error("workspace '{name}' is locked by another operation")]
    Locked { name: String },
}

// --- Staging Errors ---

/// File staging errors.
#[derive(Debug, Error)]
pub enum StagingError {
    /// Add target already present in the working tree.
    #[error("file '{path}' already exists in the local repository")]
    AlreadyExists { path: String },

    /// Update/delete target missing from the working tree.
    #[error("file '{path}' is not present in the local repository")]
    NotFound { path: String },

    /// Content reference could not be resolved to bytes.
    #[error("unable to resolve content reference '{reference}': {message}")]
    InvalidReference { reference: String, message: String },

    /// Writing the target file failed.
    #[error("failed to write '{path}': {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Removing the target file from disk failed.
    #[error("unable to delete file '{path}': {source}")]
    RemoveFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File was removed from disk but the index update failed.
    #[error("file '{path}' removed from disk but index update failed: {message}")]
    IndexRemoveFailed { path: String, message: String },
}

// --- Git Errors ---

/// Git operation errors.
///
/// Classification of raw git stderr is best-effort substring matching;
/// the tool's wording is not a stable contract, so every operation
/// keeps [`GitError::Unclassified`] as an escape hatch.
#[derive(Debug, Error)]
pub enum GitError {
    /// HTTP(S) transport without both username and password.
    #[error("username and password are required in case of http(s) URI")]
    CredentialsRequired,

    /// Remote repository does not exist.
    #[error("repo not found: {uri}")]
    RepositoryNotFound { uri: String },

    /// Requested branch does not exist on the remote.
    #[error("branch '{branch}' is invalid/incorrect")]
    InvalidBranch { branch: String },

    /// Remote rejected the supplied credentials.
    #[error("authentication failed, check username, password and access rights")]
    AuthenticationFailed,

    /// Remote denied access.
    #[error("permission denied, check access rights")]
    PermissionDenied,

    /// Destination workspace already exists on disk.
    #[error("repo '{name}' already exists")]
    AlreadyCloned { name: String },

    /// Clone failed for a reason no pattern matched.
    #[error("failed to clone {uri}: {message}")]
    CloneFailed { uri: String, message: String },

    /// Working tree clean; reported distinctly so callers can branch on it.
    #[error("nothing to commit, working directory clean")]
    NothingToCommit,

    /// Remote has changes not present locally.
    #[error("latest changes are not available in the local repo, pull before pushing again")]
    NonFastForward,

    /// Push failed for a reason no pattern matched.
    #[error("failed to push: {message}")]
    PushFailed { message: String },

    /// A previous merge was never concluded.
    #[error("commit your changes before you can merge")]
    UnresolvedMerge,

    /// Unmerged files block the pull.
    #[error("pull is not possible because of unmerged files, fix them and make a commit")]
    UnmergedFiles,

    /// Pull failed for a reason no pattern matched.
    #[error("failed to pull: {message}")]
    PullFailed { message: String },

    /// Raw git invocation failure, before any per-operation classification.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Last-resort bucket carrying the underlying message.
    #[error("unclassified git failure: {message}")]
    Unclassified { message: String },
}

// --- SSH Errors ---

/// SSH key management errors.
#[derive(Debug, Error)]
pub enum SshError {
    /// A keypair already exists and rotation was not requested.
    #[error("RSA key already exists: {path}")]
    KeyExists { path: String },

    /// Key generation failed.
    #[error("failed to generate RSA keypair: {message}")]
    GenerationFailed { message: String },

    /// I/O failure while persisting key material.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The attachment sink rejected the public key; surfaced verbatim.
    #[error("error adding public key to attachment sink: {message}")]
    PublishFailed { message: String },
}

#[cfg(test)]
mod tests;

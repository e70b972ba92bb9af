// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! Raw git command execution.
//!
//! ```text
//! git_command(args, cwd, env) --> git (CLI)
//!   GIT_TERMINAL_PROMPT=0  GCM_INTERACTIVE=never
//!   cwd: absolute workspace/managed-root path
//!   env: explicit per-call pairs (GIT_SSH_COMMAND), never process-wide
//! ```
//!
//! Credentials embedded in URIs are scrubbed from every command line
//! and stderr before they can reach an error value.

use std::path::Path;
use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::error::{GitError, WardResult};

/// Matches `scheme://user:password@` userinfo in URIs.
static USERINFO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<scheme>[a-zA-Z][a-zA-Z0-9+.-]*://)[^/@\s]+@").expect("static regex")
});

/// Replace embedded URI credentials with `***` so they never surface
/// in messages or logs.
#[must_use]
pub fn scrub_credentials(text: &str) -> String {
    USERINFO.replace_all(text, "${scheme}***@").into_owned()
}

/// Execute a git command with prompts disabled.
///
/// Returns trimmed stdout on success.
///
/// # Errors
///
/// Returns `GitError::CommandFailed` carrying the scrubbed command
/// line and stderr when git exits non-zero or cannot be spawned.
pub(crate) fn git_command(
    args: &[&str],
    cwd: &Path,
    env: &[(String, String)],
) -> WardResult<String> {
    trace!(cwd = %cwd.display(), command = %scrub_credentials(&args.join(" ")), "running git");

    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GCM_INTERACTIVE", "never")
        .env("GIT_TERMINAL_PROMPT", "0")
        .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .output()
        .map_err(|e| GitError::CommandFailed {
            command: "git".to_string(),
            message: format!("failed to execute git: {e}"),
        })?;

    if !output.status.success() {
        return Err(GitError::CommandFailed {
            command: scrub_credentials(&format!("git {}", args.join(" "))),
            message: scrub_credentials(String::from_utf8_lossy(&output.stderr).trim()),
        }
        .into());
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

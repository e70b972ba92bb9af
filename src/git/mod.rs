// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! Git operations module.
//!
//! ```text
//!          Public API
//!    executor.rs   status.rs
//!         |            ^
//!         v            |
//!      cmd.rs     porcelain text
//!         |
//!         v
//!     git CLI  (clone/commit/push/pull/status/config/ls-remote)
//! ```
//!
//! **`cmd`** — one raw invocation point: absolute cwd, per-call env,
//! prompts disabled, credentials scrubbed from anything that surfaces.
//! **`executor`** — operations plus one best-effort stderr translation
//! function each.
//! **`status`** — porcelain parsing into a categorized report.
//!
//! Read-only repository checks elsewhere go through gix; everything
//! that talks to a remote or mutates state goes through the CLI here.

pub mod cmd;
pub mod executor;
pub mod status;

#[cfg(test)]
mod tests;

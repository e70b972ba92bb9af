// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |            repo / file / git / ssh
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML + env, AssetConfig  |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!            transport    workspace   ssh
//!            URI + auth   store/guard keypair
//!                 |           |
//!                 +-----+-----+
//!                       v
//!              staging --> git
//!              mutations   CLI exec + gix
//!                           status parse
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging, vault     |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod git;
pub mod logging;
pub mod ssh;
pub mod staging;
pub mod transport;
pub mod vault;
pub mod workspace;

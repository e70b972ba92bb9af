// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! Porcelain status parsing.
//!
//! ```text
//! "XY path"    X = staged indicator, Y = unstaged indicator
//! "?? path"    untracked
//! "R  a -> b"  rename keeps the full "a -> b" text as the path
//!
//! M -> modified   R -> renamed   D -> deleted   A -> new_file
//! anything else -> the literal indicator character
//! ```
//!
//! Parsing never fails: a line too short to classify is skipped and
//! whatever was accumulated is still returned.

use std::collections::BTreeMap;

use serde::Serialize;

/// Categorized view of one `git status --porcelain` run.
///
/// Built fresh on every status call; never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// The porcelain text this report was parsed from.
    pub raw_output: String,
    /// Staged changes, change kind -> paths.
    pub staged: BTreeMap<String, Vec<String>>,
    /// Unstaged changes, change kind -> paths.
    pub unstaged: BTreeMap<String, Vec<String>>,
    /// Untracked paths.
    pub untracked: Vec<String>,
}

fn change_kind(indicator: char) -> String {
    match indicator {
        'M' => "modified".to_string(),
        'R' => "renamed".to_string(),
        'D' => "deleted".to_string(),
        'A' => "new_file".to_string(),
        other => other.to_string(),
    }
}

/// Parse porcelain status lines into a categorized report.
///
/// A single line may contribute to both the staged and the unstaged
/// map.
#[must_use]
pub fn parse(porcelain: &str) -> StatusReport {
    let mut report = StatusReport {
        raw_output: porcelain.to_string(),
        ..StatusReport::default()
    };

    for line in porcelain.lines() {
        let mut chars = line.chars();
        let (Some(staged), Some(unstaged)) = (chars.next(), chars.next()) else {
            continue;
        };
        // indicators are ASCII, so the path starts at byte offset 3
        let Some(path) = line.get(3..).filter(|p| !p.is_empty()) else {
            continue;
        };

        if staged == '?' && unstaged == '?' {
            report.untracked.push(path.to_string());
            continue;
        }

        if staged != ' ' {
            report
                .staged
                .entry(change_kind(staged))
                .or_default()
                .push(path.to_string());
        }
        if unstaged != ' ' {
            report
                .unstaged
                .entry(change_kind(unstaged))
                .or_default()
                .push(path.to_string());
        }
    }

    report
}

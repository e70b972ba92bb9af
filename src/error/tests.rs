// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

use super::{ConfigError, GitError, StagingError, WardError, WardResult, WorkspaceError};

#[test]
fn test_path_escape_display() {
    let err = WorkspaceError::PathEscape {
        path: "../../etc/passwd".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"path outside git repository: ../../etc/passwd"
    );
}

#[test]
fn test_credentials_required_display() {
    let err = GitError::CredentialsRequired;
    insta::assert_snapshot!(
        err.to_string(),
        @"username and password are required in case of http(s) URI"
    );
}

#[test]
fn test_nothing_to_commit_display() {
    let err = GitError::NothingToCommit;
    insta::assert_snapshot!(err.to_string(), @"nothing to commit, working directory clean");
}

#[test]
fn test_staging_already_exists_display() {
    let err = StagingError::AlreadyExists {
        path: "conf/app.toml".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"file 'conf/app.toml' already exists in the local repository"
    );
}

#[test]
fn test_config_error_wraps_into_ward_error() {
    let err: WardError = ConfigError::MissingUri.into();
    assert!(matches!(err, WardError::Config(_)));
    assert!(err.to_string().contains("no repository URI"));
}

#[test]
fn test_ward_error_size() {
    // WardError should be reasonably small
    // Box<str> variant (Other) is 16 bytes (fat pointer: ptr + len)
    // With discriminant + alignment = 24 bytes
    let size = std::mem::size_of::<WardError>();
    assert!(size <= 24, "WardError is {size} bytes, expected <= 24");
}

#[test]
fn test_ward_result_size() {
    let size = std::mem::size_of::<WardResult<()>>();
    assert!(size <= 24, "WardResult<()> is {size} bytes, expected <= 24");
}

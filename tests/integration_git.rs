// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the git executor.
//!
//! Uses local path remotes so clone, push and pull run against real
//! repositories without any network.

use gitward::config::AssetConfig;
use gitward::git::executor;
use gitward::staging::{ContentSource, FileOperation, MutationRequest, mutate};
use gitward::transport::{self, CallOverrides};
use gitward::workspace::Workspace;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Helper to run git commands in a directory.
fn run_git(args: &[&str], cwd: &Path) -> bool {
    Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@test.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@test.com")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Create a bare remote on branch `main` seeded with one README commit.
fn init_remote(base: &Path) -> PathBuf {
    let seed = base.join("seed");
    fs::create_dir_all(&seed).unwrap();
    assert!(run_git(&["init", "-q"], &seed));
    assert!(run_git(&["checkout", "-q", "-b", "main"], &seed));
    assert!(run_git(&["config", "user.email", "test@test.com"], &seed));
    assert!(run_git(&["config", "user.name", "Test"], &seed));
    fs::write(seed.join("README.md"), "# Test\n").unwrap();
    assert!(run_git(&["add", "."], &seed));
    assert!(run_git(&["commit", "-q", "-m", "Initial commit"], &seed));

    let remote = base.join("remote.git");
    assert!(run_git(
        &[
            "clone",
            "-q",
            "--bare",
            seed.to_str().unwrap(),
            remote.to_str().unwrap(),
        ],
        base,
    ));
    remote
}

fn asset_config(state_dir: &Path, uri: &str) -> AssetConfig {
    AssetConfig {
        repo_uri: Some(uri.to_string()),
        repo_name: None,
        branch_name: "main".to_string(),
        username: None,
        password: None,
        state_dir: state_dir.to_path_buf(),
        asset_id: "default".to_string(),
        vault_dir: None,
        attachments_dir: None,
    }
}

fn clone_into(config: &AssetConfig) -> Workspace {
    let (identity, transport) =
        transport::resolve(config, &CallOverrides::default()).expect("resolve");
    fs::create_dir_all(&config.state_dir).unwrap();
    executor::clone(&identity, &transport, &config.state_dir).expect("clone should succeed")
}

fn add_and_stage(workspace: &Workspace, path: &str, contents: &str) {
    let request = MutationRequest {
        relative_path: path.to_string(),
        operation: FileOperation::Add,
        content: ContentSource::Inline(contents.to_string()),
    };
    mutate(workspace, &request, None).expect("mutation should succeed");
}

// =============================================================================
// clone
// =============================================================================

#[test]
fn git_clone_creates_workspace() {
    let temp = temp_dir();
    let remote = init_remote(temp.path());
    let state = temp.path().join("state");
    let config = asset_config(&state, remote.to_str().unwrap());

    let workspace = clone_into(&config);
    assert_eq!(workspace.name, "remote-main");
    assert!(workspace.root.join(".git").is_dir());
    assert!(workspace.root.join("README.md").is_file());
}

#[test]
fn git_clone_twice_reports_already_cloned() {
    let temp = temp_dir();
    let remote = init_remote(temp.path());
    let state = temp.path().join("state");
    let config = asset_config(&state, remote.to_str().unwrap());

    clone_into(&config);
    let (identity, transport) =
        transport::resolve(&config, &CallOverrides::default()).expect("resolve");
    let err = executor::clone(&identity, &transport, &config.state_dir)
        .expect_err("second clone must fail");
    assert!(err.to_string().contains("already exists"), "got: {err}");
}

#[test]
fn git_clone_unknown_branch_is_classified() {
    let temp = temp_dir();
    let remote = init_remote(temp.path());
    let state = temp.path().join("state");
    let config = asset_config(&state, remote.to_str().unwrap());

    let overrides = CallOverrides {
        uri: None,
        branch: Some("nope".to_string()),
    };
    let (identity, transport) = transport::resolve(&config, &overrides).expect("resolve");
    fs::create_dir_all(&config.state_dir).unwrap();
    let err = executor::clone(&identity, &transport, &config.state_dir)
        .expect_err("clone of unknown branch must fail");
    assert!(err.to_string().contains("invalid/incorrect"), "got: {err}");
}

// =============================================================================
// ls-remote / connectivity
// =============================================================================

#[test]
fn git_ls_remote_lists_branch() {
    let temp = temp_dir();
    let remote = init_remote(temp.path());
    let state = temp.path().join("state");
    fs::create_dir_all(&state).unwrap();
    let config = asset_config(&state, remote.to_str().unwrap());

    let (_, transport) = transport::resolve(&config, &CallOverrides::default()).expect("resolve");
    let refs = executor::ls_remote(&transport, &state).expect("ls-remote should succeed");
    assert!(executor::branch_in_refs(&refs, "main"));
    assert!(!executor::branch_in_refs(&refs, "nope"));
}

// =============================================================================
// commit / push / pull round trip
// =============================================================================

#[test]
fn git_commit_clean_tree_reports_nothing_to_commit() {
    let temp = temp_dir();
    let remote = init_remote(temp.path());
    let state = temp.path().join("state");
    let config = asset_config(&state, remote.to_str().unwrap());

    let workspace = clone_into(&config);
    let err = executor::commit(&workspace, "empty", None).expect_err("clean tree must fail");
    assert!(err.to_string().contains("nothing to commit"), "got: {err}");
}

#[test]
fn git_push_then_pull_propagates_commit() {
    let temp = temp_dir();
    let remote = init_remote(temp.path());
    let uri = remote.to_str().unwrap().to_string();

    let state_a = temp.path().join("state-a");
    let state_b = temp.path().join("state-b");
    let config_a = asset_config(&state_a, &uri);
    let config_b = asset_config(&state_b, &uri);

    let ws_a = clone_into(&config_a);
    let ws_b = clone_into(&config_b);

    add_and_stage(&ws_a, "conf/app.toml", "v = 1\n");
    executor::commit(&ws_a, "add app config", Some("automation")).expect("commit");

    let (_, transport_a) =
        transport::resolve(&config_a, &CallOverrides::default()).expect("resolve");
    executor::push(&ws_a, &transport_a).expect("push should succeed");

    let (_, transport_b) =
        transport::resolve(&config_b, &CallOverrides::default()).expect("resolve");
    executor::pull(&ws_b, &transport_b).expect("pull should succeed");

    assert_eq!(
        fs::read_to_string(ws_b.root.join("conf/app.toml")).expect("pulled file"),
        "v = 1\n"
    );
}

#[test]
fn git_push_without_local_commits_is_noop() {
    let temp = temp_dir();
    let remote = init_remote(temp.path());
    let state = temp.path().join("state");
    let config = asset_config(&state, remote.to_str().unwrap());

    let workspace = clone_into(&config);
    let (_, transport) = transport::resolve(&config, &CallOverrides::default()).expect("resolve");
    executor::push(&workspace, &transport).expect("push with nothing new should succeed");
}

// =============================================================================
// status
// =============================================================================

#[test]
fn git_status_reports_staged_file() {
    let temp = temp_dir();
    let remote = init_remote(temp.path());
    let state = temp.path().join("state");
    let config = asset_config(&state, remote.to_str().unwrap());

    let workspace = clone_into(&config);
    add_and_stage(&workspace, "new.txt", "fresh\n");
    fs::write(workspace.root.join("junk.log"), "junk\n").unwrap();

    let (human, report) = executor::status(&workspace).expect("status should succeed");
    assert!(human.contains("new.txt"));
    assert_eq!(
        report.staged.get("new_file").map(Vec::as_slice),
        Some(&["new.txt".to_string()][..])
    );
    assert_eq!(report.untracked, ["junk.log"]);
}

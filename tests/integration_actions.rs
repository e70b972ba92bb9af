// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the action handlers.
//!
//! Drives the cmd layer end-to-end against local path remotes and
//! checks the outcome payloads the CLI would print.

use gitward::cli::file::{AddFileArgs, DeleteFileArgs, UpdateFileArgs};
use gitward::cli::git::CommitArgs;
use gitward::cli::repo::{CloneArgs, DeleteCloneArgs};
use gitward::cli::ssh::ConfigureSshArgs;
use gitward::cmd::file::{run_add_file, run_delete_file, run_update_file};
use gitward::cmd::git::{run_commit, run_pull, run_status};
use gitward::cmd::repo::{run_clone, run_delete_clone, run_list_repos, run_verify};
use gitward::cmd::ssh::run_configure_ssh;
use gitward::cmd::{ActionOutcome, OutcomeStatus};
use gitward::config::AssetConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

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
        username: Some("automation".to_string()),
        password: None,
        state_dir: state_dir.to_path_buf(),
        asset_id: "default".to_string(),
        vault_dir: None,
        attachments_dir: None,
    }
}

fn assert_success(outcome: &ActionOutcome) {
    assert_eq!(outcome.status, OutcomeStatus::Success, "{}", outcome.message);
}

// =============================================================================
// repo lifecycle
// =============================================================================

#[test]
fn actions_clone_list_delete_round_trip() {
    let temp = temp_dir();
    let remote = init_remote(temp.path());
    let state = temp.path().join("state");
    let config = asset_config(&state, remote.to_str().unwrap());

    let outcome = run_clone(&config, &CloneArgs::default()).expect("clone");
    assert_success(&outcome);
    assert_eq!(outcome.data["repo_name"], "remote-main");
    assert!(state.join("remote-main/.git").is_dir());

    let outcome = run_list_repos(&config).expect("list");
    assert_success(&outcome);
    assert_eq!(outcome.message, "Total repos: 1");
    assert_eq!(outcome.data["repos"][0], "remote-main");
    assert_eq!(outcome.summary["total_repos"], 1);

    let outcome = run_delete_clone(&config, &DeleteCloneArgs::default()).expect("delete");
    assert_success(&outcome);
    assert_eq!(outcome.message, "Successfully deleted repository");
    assert!(!state.join("remote-main").exists());

    // the lock file must not linger as a phantom repo
    let outcome = run_list_repos(&config).expect("list after delete");
    assert_eq!(outcome.message, "Total repos: 0");
}

#[test]
fn actions_verify_passes_for_reachable_remote() {
    let temp = temp_dir();
    let remote = init_remote(temp.path());
    let state = temp.path().join("state");
    let config = asset_config(&state, remote.to_str().unwrap());

    let outcome = run_verify(&config).expect("verify");
    assert_success(&outcome);
    assert_eq!(outcome.data["branch_name"], "main");
}

#[test]
fn actions_verify_rejects_unknown_branch() {
    let temp = temp_dir();
    let remote = init_remote(temp.path());
    let state = temp.path().join("state");
    let mut config = asset_config(&state, remote.to_str().unwrap());
    config.branch_name = "nope".to_string();

    let err = run_verify(&config).expect_err("verify must fail");
    assert!(err.to_string().contains("invalid/incorrect"), "got: {err}");
}

#[test]
fn actions_delete_clone_missing_workspace_fails() {
    let temp = temp_dir();
    let remote = init_remote(temp.path());
    let state = temp.path().join("state");
    fs::create_dir_all(&state).unwrap();
    let config = asset_config(&state, remote.to_str().unwrap());

    let err = run_delete_clone(&config, &DeleteCloneArgs::default())
        .expect_err("delete of missing workspace must fail");
    assert!(err.to_string().contains("not available"), "got: {err}");
}

// =============================================================================
// file staging + commit + pull
// =============================================================================

#[test]
fn actions_file_lifecycle_commits_and_propagates() {
    let temp = temp_dir();
    let remote = init_remote(temp.path());
    let uri = remote.to_str().unwrap().to_string();

    let state_a = temp.path().join("state-a");
    let state_b = temp.path().join("state-b");
    let config_a = asset_config(&state_a, &uri);
    let config_b = asset_config(&state_b, &uri);

    assert_success(&run_clone(&config_a, &CloneArgs::default()).expect("clone a"));
    assert_success(&run_clone(&config_b, &CloneArgs::default()).expect("clone b"));

    let add = AddFileArgs {
        path: "conf/app.toml".to_string(),
        contents: Some("v = 1".to_string()),
        vault_id: None,
    };
    let outcome = run_add_file(&config_a, &add).expect("add file");
    assert_success(&outcome);
    assert_eq!(outcome.message, "File 'conf/app.toml' added successfully");

    let update = UpdateFileArgs {
        path: "conf/app.toml".to_string(),
        contents: Some("v = 2".to_string()),
        vault_id: None,
    };
    assert_success(&run_update_file(&config_a, &update).expect("update file"));

    let commit = CommitArgs {
        message: "update app config".to_string(),
        push: true,
    };
    let outcome = run_commit(&config_a, &commit).expect("commit and push");
    assert_success(&outcome);
    assert_eq!(outcome.data["commit_message"], "update app config");

    let outcome = run_pull(&config_b).expect("pull");
    assert_success(&outcome);
    assert_eq!(
        fs::read_to_string(state_b.join("remote-main/conf/app.toml")).expect("pulled file"),
        "v = 2"
    );

    let delete = DeleteFileArgs {
        path: "conf/app.toml".to_string(),
    };
    let outcome = run_delete_file(&config_b, &delete).expect("delete file");
    assert_success(&outcome);
    assert!(!state_b.join("remote-main/conf/app.toml").exists());
}

#[test]
fn actions_status_reports_changes() {
    let temp = temp_dir();
    let remote = init_remote(temp.path());
    let state = temp.path().join("state");
    let config = asset_config(&state, remote.to_str().unwrap());

    assert_success(&run_clone(&config, &CloneArgs::default()).expect("clone"));
    let add = AddFileArgs {
        path: "new.txt".to_string(),
        contents: Some("fresh".to_string()),
        vault_id: None,
    };
    assert_success(&run_add_file(&config, &add).expect("add file"));

    let outcome = run_status(&config).expect("status");
    assert_success(&outcome);
    assert_eq!(outcome.data["staged"]["new_file"][0], "new.txt");
    assert_eq!(outcome.data["changed_files"][0], "new.txt");
    assert!(outcome.data["output"].as_str().unwrap().contains("new.txt"));
}

// =============================================================================
// configure-ssh
// =============================================================================

#[test]
fn actions_configure_ssh_generates_and_publishes() {
    let temp = temp_dir();
    let state = temp.path().join("state");
    fs::create_dir_all(&state).unwrap();
    let attachments = temp.path().join("attachments");
    let mut config = asset_config(&state, "git@example.com:org/tools.git");
    config.attachments_dir = Some(attachments.clone());

    let outcome =
        run_configure_ssh(&config, &ConfigureSshArgs::default()).expect("configure ssh");
    assert_success(&outcome);
    assert!(outcome.message.starts_with("Rsa pub key: ssh-rsa "));
    assert!(state.join(".ssh-default/id_rsa").is_file());
    assert!(attachments.join("id_rsa.pub").is_file());

    // second run without force-new fails but still reports the key
    let err = run_configure_ssh(&config, &ConfigureSshArgs::default())
        .expect_err("existing key must fail");
    let message = err.to_string();
    assert!(message.contains("already exists"), "got: {message}");
    assert!(message.contains("ssh-rsa "), "got: {message}");
}

// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::cli::{Cli, Command};
use clap::Parser;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["gitward", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "gitward",
        "-l",
        "5",
        "-c",
        "/etc/gitward/prod.toml",
        "--log-file",
        "/tmp/gitward.log",
        "status",
    ])
    .unwrap();
    assert_eq!(cli.global.log_level, Some(5));
    assert_eq!(cli.global.configs.len(), 1);
    assert!(cli.global.log_file.is_some());
    assert!(matches!(cli.command, Some(Command::Status)));
}

#[test]
fn test_parse_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["gitward", "-l", "6", "status"]).is_err());
}

#[test]
fn test_parse_clone_overrides() {
    let cli = Cli::try_parse_from([
        "gitward",
        "clone",
        "--uri",
        "https://example.com/org/tools.git",
        "--branch",
        "develop",
    ])
    .unwrap();
    let Some(Command::Clone(args)) = cli.command else {
        panic!("expected clone command");
    };
    assert_eq!(args.uri.as_deref(), Some("https://example.com/org/tools.git"));
    assert_eq!(args.branch.as_deref(), Some("develop"));
}

#[test]
fn test_parse_add_file_inline() {
    let cli = Cli::try_parse_from([
        "gitward",
        "add-file",
        "conf/app.toml",
        "--contents",
        "v = 1",
    ])
    .unwrap();
    let Some(Command::AddFile(args)) = cli.command else {
        panic!("expected add-file command");
    };
    assert_eq!(args.path, "conf/app.toml");
    assert_eq!(args.contents.as_deref(), Some("v = 1"));
    assert!(args.vault_id.is_none());
}

#[test]
fn test_parse_add_file_requires_one_content_source() {
    assert!(Cli::try_parse_from(["gitward", "add-file", "a.txt"]).is_err());
    assert!(
        Cli::try_parse_from([
            "gitward",
            "add-file",
            "a.txt",
            "--contents",
            "x",
            "--vault-id",
            "v1",
        ])
        .is_err()
    );
}

#[test]
fn test_parse_commit_with_push() {
    let cli = Cli::try_parse_from(["gitward", "commit", "-m", "update config", "--push"]).unwrap();
    let Some(Command::Commit(args)) = cli.command else {
        panic!("expected commit command");
    };
    assert_eq!(args.message, "update config");
    assert!(args.push);
}

#[test]
fn test_parse_commit_requires_message() {
    assert!(Cli::try_parse_from(["gitward", "commit"]).is_err());
}

#[test]
fn test_parse_configure_ssh() {
    let cli = Cli::try_parse_from(["gitward", "configure-ssh", "--force-new"]).unwrap();
    let Some(Command::ConfigureSsh(args)) = cli.command else {
        panic!("expected configure-ssh command");
    };
    assert!(args.force_new);
}

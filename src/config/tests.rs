// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

use super::loader::ConfigLoader;
use super::{AssetConfig, Secret};

fn loaded(toml: &str) -> AssetConfig {
    ConfigLoader::new()
        .add_toml_str(toml)
        .build()
        .expect("config should load")
}

#[test]
fn test_minimal_config_loads_with_defaults() {
    let config = loaded(
        r#"
        repo_uri = "https://example.com/org/tools.git"
        state_dir = "/var/lib/gitward"
        "#,
    );
    assert_eq!(
        config.repo_uri.as_deref(),
        Some("https://example.com/org/tools.git")
    );
    assert_eq!(config.branch_name, "main");
    assert_eq!(config.asset_id, "default");
    assert!(config.repo_name.is_none());
    assert!(config.username.is_none());
}

#[test]
fn test_full_config_loads() {
    let config = loaded(
        r#"
        repo_uri = "git@example.com:org/tools.git"
        repo_name = "tools"
        branch_name = "develop"
        username = "automation"
        password = "p@ss word"
        state_dir = "/var/lib/gitward"
        asset_id = "asset-42"
        vault_dir = "/var/lib/gitward/vault"
        "#,
    );
    assert_eq!(config.repo_name.as_deref(), Some("tools"));
    assert_eq!(config.branch_name, "develop");
    assert_eq!(config.asset_id, "asset-42");
    assert_eq!(
        config.password.as_ref().map(Secret::expose),
        Some("p@ss word")
    );
}

#[test]
fn test_missing_state_dir_rejected() {
    let result = ConfigLoader::new()
        .add_toml_str(r#"repo_uri = "https://example.com/a.git""#)
        .build();
    assert!(result.is_err());
}

#[test]
fn test_repo_name_with_separator_rejected() {
    let result = ConfigLoader::new()
        .add_toml_str(
            r#"
            repo_uri = "https://example.com/a.git"
            repo_name = "../escape"
            state_dir = "/var/lib/gitward"
            "#,
        )
        .build();
    let err = result.expect_err("repo_name with separator must fail validation");
    assert!(err.to_string().contains("filesystem-safe"));
}

#[test]
fn test_secret_never_renders_in_debug_or_display() {
    let secret = Secret::new("hunter2");
    assert_eq!(format!("{secret}"), "***");
    assert_eq!(format!("{secret:?}"), "Secret(***)");
    let config = loaded(
        r#"
        repo_uri = "https://example.com/a.git"
        password = "hunter2"
        state_dir = "/var/lib/gitward"
        "#,
    );
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("hunter2"));
}

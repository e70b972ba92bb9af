// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Command Dispatch --> ActionOutcome JSON
//!   ListRepos | Verify | Clone | DeleteClone
//!   AddFile | UpdateFile | DeleteFile
//!   Commit | Push | Pull | Status | ConfigureSsh
//! ```
//!
//! Logs go to stderr; stdout carries exactly one JSON document per run.

use std::process::ExitCode;

use gitward::cli::global::GlobalOptions;
use gitward::cli::{self, Command};
use gitward::cmd::ActionOutcome;
use gitward::cmd::file::{run_add_file, run_delete_file, run_update_file};
use gitward::cmd::git::{run_commit, run_pull, run_push, run_status};
use gitward::cmd::repo::{run_clone, run_delete_clone, run_list_repos, run_verify};
use gitward::cmd::ssh::run_configure_ssh;
use gitward::config::AssetConfig;
use gitward::config::loader::ConfigLoader;
use gitward::git::cmd::scrub_credentials;
use gitward::logging::{LogConfig, LogLevel, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli)
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Some(Command::ListRepos) => load_config(&cli.global).and_then(|c| run_list_repos(&c)),
        Some(Command::Verify) => load_config(&cli.global).and_then(|c| run_verify(&c)),
        Some(Command::Clone(args)) => load_config(&cli.global).and_then(|c| run_clone(&c, args)),
        Some(Command::DeleteClone(args)) => {
            load_config(&cli.global).and_then(|c| run_delete_clone(&c, args))
        }
        Some(Command::AddFile(args)) => {
            load_config(&cli.global).and_then(|c| run_add_file(&c, args))
        }
        Some(Command::UpdateFile(args)) => {
            load_config(&cli.global).and_then(|c| run_update_file(&c, args))
        }
        Some(Command::DeleteFile(args)) => {
            load_config(&cli.global).and_then(|c| run_delete_file(&c, args))
        }
        Some(Command::Commit(args)) => load_config(&cli.global).and_then(|c| run_commit(&c, args)),
        Some(Command::Push) => load_config(&cli.global).and_then(|c| run_push(&c)),
        Some(Command::Pull) => load_config(&cli.global).and_then(|c| run_pull(&c)),
        Some(Command::Status) => load_config(&cli.global).and_then(|c| run_status(&c)),
        Some(Command::ConfigureSsh(args)) => {
            load_config(&cli.global).and_then(|c| run_configure_ssh(&c, args))
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            return ExitCode::FAILURE;
        }
    };

    let (outcome, code) = match result {
        Ok(outcome) => (outcome, ExitCode::SUCCESS),
        Err(e) => (
            // the full chain, with any embedded credentials masked
            ActionOutcome::failure(scrub_credentials(&format!("{e:#}"))),
            ExitCode::FAILURE,
        ),
    };

    match serde_json::to_string_pretty(&outcome) {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => {
            eprintln!("Failed to render outcome: {e}");
            return ExitCode::FAILURE;
        }
    }
    code
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new();
    if !global.no_default_configs {
        loader = loader.add_toml_file_optional("gitward.toml");
    }
    for config_path in &global.configs {
        loader = loader.add_toml_file(config_path);
    }
    loader.with_env_prefix("GITWARD")
}

fn load_config(global: &GlobalOptions) -> gitward::error::Result<AssetConfig> {
    let loader = build_config_loader(global);
    for (kind, path) in loader.loaded_files() {
        tracing::debug!(kind, path = %path.display(), "config source");
    }
    Ok(loader.build()?)
}

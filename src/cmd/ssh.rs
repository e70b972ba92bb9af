// gitward: Managed Git Workspaces for Automation
//
// SPDX-FileCopyrightText: 2026 Gitward Contributors
// SPDX-License-Identifier: Apache-2.0

//! SSH key management handler.

use serde_json::json;

use crate::cli::ssh::ConfigureSshArgs;
use crate::cmd::ActionOutcome;
use crate::config::AssetConfig;
use crate::error::Result;
use crate::ssh::KeyManager;
use crate::vault::DirAttachmentSink;

/// Generates the RSA keypair used for SSH transports and hands the
/// public key to the attachment sink when one is configured.
///
/// An existing key without `--force-new` is an error; the message
/// carries the existing public key so operators can still retrieve it.
///
/// # Errors
///
/// Returns an error when a key already exists (without `--force-new`),
/// generation fails, or the sink rejects the public key.
pub fn run_configure_ssh(config: &AssetConfig, args: &ConfigureSshArgs) -> Result<ActionOutcome> {
    let manager = KeyManager::new(&config.state_dir, &config.asset_id);

    let public_key = match manager.generate(args.force_new) {
        Ok(key) => key,
        Err(e) => {
            // surface the existing key alongside the failure
            if let Ok(existing) = manager.public_key() {
                return Err(anyhow::anyhow!("{e}. Existing public key: {existing}"));
            }
            return Err(e.into());
        }
    };

    if let Some(dir) = &config.attachments_dir {
        let sink = DirAttachmentSink::new(dir.clone());
        manager.publish(&sink)?;
    }

    Ok(ActionOutcome::success(
        format!("Rsa pub key: {public_key}"),
        json!({ "rsa_pub_key": public_key }),
    )
    .with_summary(json!({ "rsa_pub_key": public_key })))
}

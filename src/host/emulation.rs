// ABOUTME: Architecture emulation (binfmt_misc) check.
// ABOUTME: The ubt_a32a64 handler must be registered and enabled for 32-bit guest binaries.

use super::scripts::RestartScripts;
use crate::config::HostConfig;
use crate::error::Result;

/// Whether the binfmt_misc entry exists and reports `enabled`.
pub fn check_emulation(config: &HostConfig) -> bool {
    let path = &config.emulation_status;
    path.is_file()
        && std::fs::read_to_string(path)
            .map(|content| content.starts_with("enabled"))
            .unwrap_or(false)
}

/// Run the host restart script, then re-check.
pub async fn recover_emulation(config: &HostConfig, scripts: &RestartScripts) -> Result<bool> {
    let output = scripts.restart_host().await?;
    if !output.success {
        tracing::warn!("host restart reported failure: {}", output.stderr.trim());
    }
    Ok(check_emulation(config))
}

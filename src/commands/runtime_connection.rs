// ABOUTME: Shared helper for connecting to the local container runtime.
// ABOUTME: Eliminates duplication across check, recover, log and resource commands.

use kbox_maintainer::config::Config;
use kbox_maintainer::error::Result;
use kbox_maintainer::output::Output;
use kbox_maintainer::runtime::{BollardRuntime, RuntimeError, RuntimeInfo, detect_local};

/// Connect to the Docker daemon on this host.
///
/// This handles the common pattern of:
/// 1. Detecting the socket path
/// 2. Outputting progress messages
/// 3. Establishing and verifying the connection
pub async fn connect_to_runtime(config: &Config, output: &Output) -> Result<BollardRuntime> {
    let detected = detect_local(&config.runtime).map_err(RuntimeError::from)?;

    output.progress(&format!(
        "  → Using Docker at {} ({})",
        detected.socket_path, detected.source
    ));

    let runtime = BollardRuntime::connect(&detected)
        .map_err(RuntimeError::from)?
        .with_exec_timeout(config.runtime.exec_timeout);

    runtime.ping().await.map_err(RuntimeError::from)?;

    if let Ok(info) = runtime.info().await {
        tracing::debug!("{} {} ({}/{})", info.name, info.version, info.os, info.arch);
    }

    Ok(runtime)
}

// ABOUTME: Host-side artifacts for the hostos/ subtree.
// ABOUTME: Log runs pack /var/log, dmesg and docker stats; resource runs copy amdgpu_pm_info.

use super::CollectKind;
use super::archive::pack_dir;
use crate::config::CollectConfig;
use crate::error::{Error, Result};
use crate::process;
use std::path::Path;

/// Gather the host artifacts for `kind` into `host_dir`. Any failure is fatal.
pub async fn collect_host(kind: CollectKind, config: &CollectConfig, host_dir: &Path) -> Result<()> {
    match kind {
        CollectKind::Log => collect_host_logs(config, host_dir).await,
        CollectKind::Resource => collect_gpu_pm_info(&config.gpu_debug_root, host_dir).map(|copied| {
            tracing::debug!("copied {} amdgpu_pm_info file(s)", copied);
        }),
    }
}

async fn collect_host_logs(config: &CollectConfig, host_dir: &Path) -> Result<()> {
    tracing::info!("packing {}", config.host_log_dir.display());
    pack_dir(&config.host_log_dir, &host_dir.join("var_log.tar"))?;

    if !process::run_to_file("dmesg", &["-T"], &host_dir.join("dmesg.log")).await? {
        tracing::error!("dmesg failed");
        return Err(Error::HostCollection("dmesg failed".to_string()));
    }

    if !process::run_to_file(
        "docker",
        &["stats", "--no-stream"],
        &host_dir.join("docker_stats.log"),
    )
    .await?
    {
        tracing::error!("docker stats failed");
        return Err(Error::HostCollection("docker stats failed".to_string()));
    }

    Ok(())
}

/// Copy `<root>/<card>/amdgpu_pm_info` to `amdgpu_pm_info_<card>` for every card.
///
/// A debug root that is missing or cannot be listed yields nothing; a card
/// file that cannot be read is fatal. Returns the number of files copied.
pub fn collect_gpu_pm_info(root: &Path, host_dir: &Path) -> Result<usize> {
    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("{} not present", root.display());
            return Ok(0);
        }
        Err(e) => {
            // /sys/kernel/debug is root-only
            tracing::warn!("skipping GPU stats, cannot list {}: {}", root.display(), e);
            return Ok(0);
        }
    };

    let mut cards: Vec<_> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|card| card.join("amdgpu_pm_info").is_file())
        .collect();
    cards.sort();

    for card in &cards {
        let src = card.join("amdgpu_pm_info");
        let card_name = card
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dest = host_dir.join(format!("amdgpu_pm_info_{card_name}"));

        // debugfs reports a zero size, so read through instead of fs::copy
        let content = std::fs::read(&src).map_err(|e| {
            Error::HostCollection(format!("cannot read {}: {}", src.display(), e))
        })?;
        std::fs::write(&dest, content)?;
    }

    Ok(cards.len())
}

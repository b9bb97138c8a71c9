// ABOUTME: Host preconditions for Kbox containers.
// ABOUTME: Gates check/recover on loaded kernel modules and enabled emulation.

mod emulation;
mod modules;
mod scripts;

pub use emulation::{check_emulation, recover_emulation};
pub use modules::{check_binder_ashmem, modules_loaded, recover_binder_ashmem};
pub use scripts::RestartScripts;

use crate::config::{HostConfig, ScriptsConfig};
use crate::error::{Error, Result};
use std::path::Path;

/// Fail unless the host is ready, pointing at `recover` when it is not.
pub async fn ensure_ready(config: &HostConfig) -> Result<()> {
    if !check_binder_ashmem(config).await {
        tracing::error!("binder ashmem not loaded");
        return Err(Error::Precondition(
            "binder ashmem not insmod, using [kbox-maintainer recover]".to_string(),
        ));
    }

    if !check_emulation(config) {
        tracing::error!("exagear not registered");
        return Err(Error::Precondition(
            "exagear not register, using [kbox-maintainer recover]".to_string(),
        ));
    }

    Ok(())
}

/// Bring the host up, attempting each recovery once.
pub async fn restore(config: &HostConfig, scripts_dir: &Path, scripts: &ScriptsConfig) -> Result<()> {
    if !check_binder_ashmem(config).await && !recover_binder_ashmem(config).await {
        tracing::error!("binder ashmem cannot insmod");
        return Err(Error::Precondition("binder ashmem cannot insmod!!!".to_string()));
    }

    if !check_emulation(config) {
        let scripts = RestartScripts::locate(scripts_dir, scripts)?;
        if !recover_emulation(config, &scripts).await? {
            tracing::error!("exagear cannot recover");
            return Err(Error::Precondition("exagear cannot recover!!!".to_string()));
        }
    }

    Ok(())
}

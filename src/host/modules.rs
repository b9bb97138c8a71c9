// ABOUTME: Binder and ashmem kernel module checks.
// ABOUTME: Reads the lsmod listing and inserts the Kbox modules when asked to recover.

use crate::config::HostConfig;
use crate::process;

/// Whether every required name appears somewhere in an `lsmod` listing.
///
/// Matching is by substring, so `aosp9_binder_linux` satisfies `binder`.
pub fn modules_loaded(listing: &str, required: &[String]) -> bool {
    required
        .iter()
        .all(|name| listing.lines().any(|line| line.contains(name.as_str())))
}

/// Query `lsmod` and check that binder and ashmem are loaded.
pub async fn check_binder_ashmem(config: &HostConfig) -> bool {
    match process::run("lsmod", &[] as &[&str]).await {
        Ok(output) if output.success => modules_loaded(&output.stdout, &config.required_modules),
        Ok(output) => {
            tracing::warn!("lsmod exited with {:?}", output.exit_code);
            false
        }
        Err(e) => {
            tracing::warn!("{}", e);
            false
        }
    }
}

/// Insert the binder module (with its parameters) and then ashmem.
///
/// Single attempt; returns the post-insertion state of [`check_binder_ashmem`].
pub async fn recover_binder_ashmem(config: &HostConfig) -> bool {
    if !(config.binder_module.is_file() && config.ashmem_module.is_file()) {
        tracing::error!(".ko file not found");
        return false;
    }

    let mut binder_args = vec![config.binder_module.display().to_string()];
    binder_args.extend(config.binder_params.iter().cloned());
    if !insmod(&binder_args).await {
        tracing::error!("insmod binder failed");
        return false;
    }

    let ashmem_args = vec![config.ashmem_module.display().to_string()];
    if !insmod(&ashmem_args).await {
        tracing::error!("insmod ashmem failed");
        return false;
    }

    check_binder_ashmem(config).await
}

async fn insmod(args: &[String]) -> bool {
    match process::run("insmod", args).await {
        Ok(output) => output.success,
        Err(e) => {
            tracing::error!("{}", e);
            false
        }
    }
}

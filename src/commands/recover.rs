// ABOUTME: Recover command implementation.
// ABOUTME: Restores host modules and emulation, then restarts unhealthy containers.

use super::runtime_connection::connect_to_runtime;
use kbox_maintainer::config::Config;
use kbox_maintainer::error::Result;
use kbox_maintainer::health::recover_containers;
use kbox_maintainer::host::{self, RestartScripts};
use kbox_maintainer::output::Output;
use std::path::Path;

/// Recover the host, then the given containers, or all of them.
pub async fn recover(
    config: Config,
    containers: Vec<String>,
    cwd: &Path,
    mut output: Output,
) -> Result<()> {
    output.start_timer();
    let scripts_dir = config.scripts_dir(cwd);

    output.progress("  → Restoring binder/ashmem modules and exagear...");
    host::restore(&config.host, &scripts_dir, &config.scripts).await?;

    let runtime = connect_to_runtime(&config, &output).await?;
    let scripts = RestartScripts::new(&scripts_dir, &config.scripts);

    output.progress("  → Checking containers...");
    let report = recover_containers(
        &runtime,
        &containers,
        &config.recovery.index_label,
        &scripts,
    )
    .await?;
    output.report(&report);

    if report.unrecovered().is_empty() {
        output.success("Recovery complete");
    }

    Ok(())
}

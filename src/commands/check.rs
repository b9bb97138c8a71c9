// ABOUTME: Check command implementation.
// ABOUTME: Gates on host readiness, then reports containers whose guest has not booted.

use super::runtime_connection::connect_to_runtime;
use kbox_maintainer::config::Config;
use kbox_maintainer::error::Result;
use kbox_maintainer::health::check_containers;
use kbox_maintainer::host;
use kbox_maintainer::output::Output;

/// Check the host and the given containers, or all of them.
pub async fn check(config: Config, containers: Vec<String>, output: Output) -> Result<()> {
    output.progress("  → Checking binder/ashmem modules and exagear...");
    host::ensure_ready(&config.host).await?;

    let runtime = connect_to_runtime(&config, &output).await?;

    output.progress("  → Checking containers...");
    let report = check_containers(&runtime, &containers).await?;
    output.report(&report);

    Ok(())
}

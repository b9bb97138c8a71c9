// ABOUTME: Log and resource command implementations.
// ABOUTME: Both collect into a working directory and leave a single tar.gz behind.

use super::runtime_connection::connect_to_runtime;
use kbox_maintainer::collect::{CollectKind, collect};
use kbox_maintainer::config::Config;
use kbox_maintainer::diagnostics::Diagnostics;
use kbox_maintainer::error::Result;
use kbox_maintainer::output::Output;
use std::path::Path;

/// Collect host and guest logs.
pub async fn log(config: Config, containers: Vec<String>, cwd: &Path, output: Output) -> Result<()> {
    run(CollectKind::Log, config, containers, cwd, output).await
}

/// Collect host and guest resource usage.
pub async fn resource(
    config: Config,
    containers: Vec<String>,
    cwd: &Path,
    output: Output,
) -> Result<()> {
    run(CollectKind::Resource, config, containers, cwd, output).await
}

async fn run(
    kind: CollectKind,
    config: Config,
    containers: Vec<String>,
    cwd: &Path,
    mut output: Output,
) -> Result<()> {
    output.start_timer();
    let runtime = connect_to_runtime(&config, &output).await?;
    let output_dir = config.output_dir(cwd);

    let mut diag = Diagnostics::default();
    output.progress(&format!("  → Collecting into {}...", output_dir.display()));
    let result = collect(
        &runtime,
        &containers,
        kind,
        &config.collect,
        &output_dir,
        &mut diag,
    )
    .await;

    // Emit collected warnings
    for warning in diag.warnings() {
        output.warning(&warning.message);
    }

    let report = result?;
    output.report(&report);
    output.progress(&format!("  → Archive: {}", report.archive.display()));

    let finished = match kind {
        CollectKind::Log => "===log finished===",
        CollectKind::Resource => "===resource stats finished===",
    };
    output.success(finished);

    Ok(())
}

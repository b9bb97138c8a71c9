// ABOUTME: Per-container collection into guestos/<name>.
// ABOUTME: Runs the guest plan, extracts the guest temp dir, then always removes it.

use super::CollectKind;
use super::plan::{GuestStep, cleanup_step, guest_plan, guest_tmp_path};
use super::workdir::WorkDir;
use crate::diagnostics::{Diagnostics, Warning};
use crate::runtime::{
    ArchiveOps, ContainerOps, ContainerState, ContainerSummary, ExecConfig, ExecOps,
};
use crate::types::ContainerId;
use std::path::Path;
use thiserror::Error;

/// Why one container's collection failed. Only the first failure is kept.
#[derive(Debug, Error)]
pub enum ContainerFailure {
    #[error("is {0}")]
    NotRunning(ContainerState),

    #[error("docker inspect failed: {0}")]
    Inspect(String),

    #[error("cmd[{command}] run failed: {reason}")]
    Step { command: String, reason: String },

    #[error("extracting {path} failed: {reason}")]
    Extract { path: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Options shared by every container of one run.
pub struct ContainerJob<'a> {
    pub kind: CollectKind,
    pub workdir: &'a WorkDir,
    pub bind_mount_root: Option<&'a Path>,
}

/// Collect one container. `Ok` only when every guest step, the extraction and
/// the cleanup succeeded.
pub async fn collect_container<R>(
    runtime: &R,
    target: &ContainerSummary,
    job: &ContainerJob<'_>,
    diagnostics: &mut Diagnostics,
) -> Result<(), ContainerFailure>
where
    R: ContainerOps + ExecOps + ArchiveOps,
{
    let info = runtime
        .inspect_container(target.id.as_str())
        .await
        .map_err(|e| ContainerFailure::Inspect(e.to_string()))?;

    if !info.state.is_running() {
        return Err(ContainerFailure::NotRunning(info.state));
    }

    let out_dir = job.workdir.guest_dir(&info.name)?;

    if job.kind == CollectKind::Log {
        let document = runtime
            .inspect_document(info.id.as_str())
            .await
            .map_err(|e| ContainerFailure::Inspect(e.to_string()))?;
        let pretty = serde_json::to_string_pretty(&document)
            .map_err(|e| ContainerFailure::Inspect(e.to_string()))?;
        std::fs::write(out_dir.join("docker_inspect.log"), pretty)?;
    }

    let tmp = guest_tmp_path(job.kind, job.workdir.name());

    let mut outcome = Ok(());
    for step in guest_plan(job.kind, &tmp) {
        if let Err(e) = run_step(runtime, &info.id, &step, &out_dir).await {
            outcome = Err(e);
            break;
        }
    }

    let tar_path = out_dir.join(format!("{}_{}.tar", job.kind.tag(), info.name));
    let extracted = runtime
        .download_archive(&info.id, &tmp, &tar_path)
        .await
        .map(|bytes| tracing::debug!("extracted {} bytes from {}:{}", bytes, info.name, tmp))
        .map_err(|e| ContainerFailure::Extract {
            path: tmp.clone(),
            reason: e.to_string(),
        });

    if job.kind == CollectKind::Resource {
        if let Some(root) = job.bind_mount_root {
            mirror_bind_mount(root, &info.name, &tmp, &out_dir, diagnostics);
        }
    }

    let cleanup = GuestStep {
        command: cleanup_step(&tmp),
        capture: false,
    };
    let cleaned = run_step(runtime, &info.id, &cleanup, &out_dir).await;

    outcome.and(extracted).and(cleaned)
}

async fn run_step<R: ExecOps>(
    runtime: &R,
    container: &ContainerId,
    step: &GuestStep,
    out_dir: &Path,
) -> Result<(), ContainerFailure> {
    let failed = |reason: String| ContainerFailure::Step {
        command: step.command.clone(),
        reason,
    };

    let result = runtime
        .exec(container, &ExecConfig::command(&step.command))
        .await
        .map_err(|e| failed(e.to_string()))?;

    if !result.success() {
        return Err(failed(format!("exit code {}", result.exit_code)));
    }

    if step.capture {
        std::fs::write(out_dir.join(step.capture_file()), result.output())?;
    }

    Ok(())
}

/// Copy `<root>/<name>/<tmp>` to `<out_dir>/data`. Problems are warnings only.
fn mirror_bind_mount(
    root: &Path,
    name: &str,
    tmp: &str,
    out_dir: &Path,
    diagnostics: &mut Diagnostics,
) {
    let src = root.join(name).join(tmp.trim_start_matches('/'));
    if let Err(e) = copy_dir_all(&src, &out_dir.join("data")) {
        diagnostics.warn(Warning::bind_mount_copy(format!(
            "{}: cannot copy {}: {}",
            name,
            src.display(),
            e
        )));
    }
}

fn copy_dir_all(src: &Path, dest: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dest)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), target)?;
        }
    }
    Ok(())
}

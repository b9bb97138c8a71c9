// ABOUTME: Log and resource collection into a timestamped tar.gz.
// ABOUTME: Host artifacts, then each container, then archive and working directory cleanup.

mod archive;
mod container;
mod host;
mod plan;
mod workdir;

pub use archive::{FLEET_NAME, archive_name, pack_dir, pack_dir_gz};
pub use container::{ContainerFailure, ContainerJob, collect_container};
pub use host::{collect_gpu_pm_info, collect_host};
pub use plan::{GuestStep, cleanup_step, guest_plan, guest_tmp_path};
pub use workdir::WorkDir;

use crate::config::CollectConfig;
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{Error, Result};
use crate::output::name_list;
use crate::runtime::{ArchiveOps, ContainerOps, ContainerSummary, ExecOps};
use crate::targets::resolve_targets;
use chrono::Utc;
use std::fmt;
use std::path::{Path, PathBuf};

/// Which diagnostics a run gathers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectKind {
    Log,
    Resource,
}

impl CollectKind {
    /// Short tag used in directory, tar and archive names.
    pub fn tag(&self) -> &'static str {
        match self {
            CollectKind::Log => "log",
            CollectKind::Resource => "res",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            CollectKind::Log => "log",
            CollectKind::Resource => "resource",
        }
    }
}

#[derive(Debug)]
pub struct CollectReport {
    pub kind: CollectKind,
    pub total: usize,
    pub failed: Vec<(ContainerSummary, ContainerFailure)>,
    pub archive: PathBuf,
}

impl CollectReport {
    pub fn failed_names(&self) -> Vec<&str> {
        self.failed.iter().map(|(c, _)| c.name.as_str()).collect()
    }
}

impl fmt::Display for CollectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===container {} report===", self.kind.title())?;
        writeln!(f)?;
        write!(f, "Total containers: {}", self.total)?;
        if !self.failed.is_empty() {
            writeln!(f)?;
            writeln!(f)?;
            write!(f, "Failed containers: {}", name_list(self.failed_names()))?;
        }
        Ok(())
    }
}

/// Run a full collection and leave only the archive in `output_dir`.
pub async fn collect<R>(
    runtime: &R,
    references: &[String],
    kind: CollectKind,
    config: &CollectConfig,
    output_dir: &Path,
    diagnostics: &mut Diagnostics,
) -> Result<CollectReport>
where
    R: ContainerOps + ExecOps + ArchiveOps,
{
    let workdir = WorkDir::create(output_dir, kind)?;
    collect_host(kind, config, &workdir.host_dir()).await?;
    collect_into(runtime, references, kind, workdir, config, output_dir, diagnostics).await
}

/// Everything after the host stage, against an existing working directory.
async fn collect_into<R>(
    runtime: &R,
    references: &[String],
    kind: CollectKind,
    workdir: WorkDir,
    config: &CollectConfig,
    output_dir: &Path,
    diagnostics: &mut Diagnostics,
) -> Result<CollectReport>
where
    R: ContainerOps + ExecOps + ArchiveOps,
{
    let targets = resolve_targets(runtime, references).await?;
    if targets.is_empty() {
        tracing::error!("no container found");
        return Err(Error::NoContainers);
    }

    let job = ContainerJob {
        kind,
        workdir: &workdir,
        bind_mount_root: config.bind_mount_root.as_deref(),
    };

    let mut failed = Vec::new();
    for target in &targets {
        tracing::info!("collecting {} from {}", kind.title(), target.name);
        if let Err(failure) = collect_container(runtime, target, &job, diagnostics).await {
            tracing::warn!(
                "container[short_id:{}, name:{}] {}",
                target.id.short(),
                target.name,
                failure
            );
            failed.push((target.clone(), failure));
        }
    }

    let archive = output_dir.join(archive_name(kind, &targets, Utc::now()));
    pack_dir_gz(workdir.path(), &archive)?;
    tracing::info!("wrote {}", archive.display());

    let workdir_path = workdir.path().to_path_buf();
    if let Err(e) = workdir.close() {
        diagnostics.warn(Warning::workdir_cleanup(format!(
            "cannot remove {}: {}",
            workdir_path.display(),
            e
        )));
    }

    Ok(CollectReport {
        kind,
        total: targets.len(),
        failed,
        archive,
    })
}

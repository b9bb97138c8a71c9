// ABOUTME: Restart-based recovery of unhealthy Kbox containers.
// ABOUTME: Checks, restarts each unhealthy container by index, then re-checks those restarted.

use super::checker::{CheckReport, Verdict, check_container, check_containers};
use crate::error::Result;
use crate::host::RestartScripts;
use crate::output::name_list;
use crate::runtime::{ContainerOps, ContainerSummary, ExecOps};
use crate::types::{ContainerIndex, ContainerIndexError};
use async_trait::async_trait;
use std::fmt;

/// Restarts a single container by its index.
///
/// `prepare` runs once before the first restart; an error there aborts the
/// recovery without touching any container.
#[async_trait]
pub trait Restarter: Send + Sync {
    async fn prepare(&self) -> Result<()>;

    /// Returns whether the restart command exited successfully.
    async fn restart(&self, index: ContainerIndex) -> Result<bool>;
}

#[async_trait]
impl Restarter for RestartScripts {
    async fn prepare(&self) -> Result<()> {
        self.ensure()
    }

    async fn restart(&self, index: ContainerIndex) -> Result<bool> {
        Ok(self.restart_container(index).await?.success)
    }
}

/// Per-container recovery outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Recovered,
    StillUnhealthy(Verdict),
    /// No usable index, so no restart was attempted.
    NoIndex(ContainerIndexError),
}

impl Outcome {
    pub fn is_recovered(&self) -> bool {
        matches!(self, Outcome::Recovered)
    }
}

#[derive(Debug, Clone)]
pub struct RecoverReport {
    /// The check pass that selected containers for recovery.
    pub check: CheckReport,
    /// One entry per pre-recovery unhealthy container, in check order.
    pub results: Vec<(ContainerSummary, Outcome)>,
}

impl RecoverReport {
    /// Containers a restart was issued for.
    pub fn attempted(&self) -> impl Iterator<Item = &ContainerSummary> {
        self.results
            .iter()
            .filter(|(_, o)| !matches!(o, Outcome::NoIndex(_)))
            .map(|(c, _)| c)
    }

    pub fn unrecovered(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|(_, o)| !o.is_recovered())
            .map(|(c, _)| c.name.as_str())
            .collect()
    }
}

impl fmt::Display for RecoverReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.check)?;
        if self.check.all_healthy() {
            return Ok(());
        }

        writeln!(f)?;
        writeln!(f)?;
        writeln!(f, "===container recover report===")?;
        writeln!(f)?;
        let unrecovered = self.unrecovered();
        if unrecovered.is_empty() {
            write!(f, "All the containers are recovered!")
        } else {
            write!(f, "Unrecovered containers: {}", name_list(unrecovered))
        }
    }
}

/// Check `references`, restart the unhealthy ones and re-check them.
pub async fn recover_containers<R, S>(
    runtime: &R,
    references: &[String],
    index_label: &str,
    restarter: &S,
) -> Result<RecoverReport>
where
    R: ContainerOps + ExecOps,
    S: Restarter,
{
    let check = check_containers(runtime, references).await?;
    if check.all_healthy() {
        return Ok(RecoverReport {
            check,
            results: Vec::new(),
        });
    }

    restarter.prepare().await?;

    let mut restarted = Vec::with_capacity(check.unhealthy.len());
    for (container, _) in &check.unhealthy {
        match ContainerIndex::resolve(&container.name, &container.labels, index_label) {
            Ok(index) => {
                tracing::info!("restarting {} (index {})", container.name, index);
                if !restarter.restart(index).await? {
                    tracing::warn!("restart of {} exited unsuccessfully", container.name);
                }
                restarted.push((container, None));
            }
            Err(e) => {
                tracing::warn!("cannot restart {}: {}", container.name, e);
                restarted.push((container, Some(e)));
            }
        }
    }

    let mut results = Vec::with_capacity(restarted.len());
    for (container, index_error) in restarted {
        let outcome = match index_error {
            Some(e) => Outcome::NoIndex(e),
            None => match check_container(runtime, container).await {
                Verdict::Healthy => Outcome::Recovered,
                verdict => Outcome::StillUnhealthy(verdict),
            },
        };
        results.push((container.clone(), outcome));
    }

    Ok(RecoverReport { check, results })
}

// ABOUTME: Boot-completion health check for Kbox containers.
// ABOUTME: A container is healthy only when running and its guest reports sys.boot_completed=1.

use crate::error::Result;
use crate::output::name_list;
use crate::runtime::{ContainerOps, ContainerState, ContainerSummary, ExecConfig, ExecOps};
use crate::targets::resolve_targets;
use std::fmt;

/// Command run inside the guest to ask whether Android finished booting.
pub const BOOT_PROBE: &str = "getprop sys.boot_completed";

/// Exact probe output of a fully booted guest.
pub const BOOT_COMPLETED: &[u8] = b"1\n";

/// Why a container was classified the way it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Healthy,
    /// Not running; the probe was not attempted.
    NotRunning(ContainerState),
    /// The probe ran but exited non-zero.
    ProbeFailed { exit_code: i64 },
    /// The probe succeeded but the guest has not finished booting.
    BootIncomplete,
    /// The runtime could not inspect or exec into the container.
    Unreachable(String),
}

impl Verdict {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Verdict::Healthy)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Healthy => write!(f, "is healthy"),
            Verdict::NotRunning(state) => write!(f, "is {state}"),
            Verdict::ProbeFailed { exit_code } => {
                write!(f, "getprop failed, exit_code={exit_code}")
            }
            Verdict::BootIncomplete => write!(f, "system boot is incomplete!!!"),
            Verdict::Unreachable(reason) => write!(f, "is unreachable: {reason}"),
        }
    }
}

/// Result of one check pass.
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// Every container examined, in resolution order.
    pub checked: Vec<ContainerSummary>,
    /// The unhealthy subset, in the same order.
    pub unhealthy: Vec<(ContainerSummary, Verdict)>,
}

impl CheckReport {
    pub fn all_healthy(&self) -> bool {
        self.unhealthy.is_empty()
    }

    pub fn unhealthy_names(&self) -> Vec<&str> {
        self.unhealthy.iter().map(|(c, _)| c.name.as_str()).collect()
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===container check report===")?;
        writeln!(f)?;
        writeln!(f, "Total checked containers: {}", self.checked.len())?;
        writeln!(f)?;
        if self.all_healthy() {
            write!(f, "All the checked containers are healthy!")
        } else {
            write!(
                f,
                "Unhealthy containers: {}",
                name_list(self.unhealthy_names())
            )
        }
    }
}

/// Classify one container, re-reading its state first.
pub async fn check_container<R>(runtime: &R, target: &ContainerSummary) -> Verdict
where
    R: ContainerOps + ExecOps,
{
    let info = match runtime.inspect_container(target.id.as_str()).await {
        Ok(info) => info,
        Err(e) => return Verdict::Unreachable(e.to_string()),
    };

    if !info.state.is_running() {
        return Verdict::NotRunning(info.state);
    }

    let result = match runtime.exec(&info.id, &ExecConfig::command(BOOT_PROBE)).await {
        Ok(result) => result,
        Err(e) => return Verdict::Unreachable(e.to_string()),
    };

    if !result.success() {
        return Verdict::ProbeFailed {
            exit_code: result.exit_code,
        };
    }

    if result.output() != BOOT_COMPLETED {
        return Verdict::BootIncomplete;
    }

    Verdict::Healthy
}

/// Resolve `references` and check each container once.
pub async fn check_containers<R>(runtime: &R, references: &[String]) -> Result<CheckReport>
where
    R: ContainerOps + ExecOps,
{
    let checked = resolve_targets(runtime, references).await?;

    let mut unhealthy = Vec::new();
    for target in &checked {
        let verdict = check_container(runtime, target).await;
        if verdict.is_healthy() {
            tracing::debug!("container {} is healthy", target.name);
        } else {
            tracing::warn!(
                "container[short_id:{}, name:{}] {}",
                target.id.short(),
                target.name,
                verdict
            );
            unhealthy.push((target.clone(), verdict));
        }
    }

    Ok(CheckReport { checked, unhealthy })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::fake::{FakeContainer, FakeRuntime};

    #[tokio::test]
    async fn healthy_when_booted() {
        let runtime = FakeRuntime::new(vec![FakeContainer::running("android_1")]);
        let report = check_containers(&runtime, &[]).await.unwrap();
        assert!(report.all_healthy());
        assert_eq!(report.checked.len(), 1);
    }

    #[tokio::test]
    async fn stopped_container_is_not_probed() {
        let runtime = FakeRuntime::new(vec![FakeContainer::exited("android_2")]);
        let report = check_containers(&runtime, &[]).await.unwrap();

        assert_eq!(
            report.unhealthy[0].1,
            Verdict::NotRunning(ContainerState::Exited)
        );
        assert!(runtime.execs_for("android_2").is_empty());
    }

    #[tokio::test]
    async fn probe_exit_code_makes_unhealthy() {
        let runtime =
            FakeRuntime::new(vec![FakeContainer::running("android_1").boot_exit(127)]);
        let report = check_containers(&runtime, &[]).await.unwrap();
        assert_eq!(
            report.unhealthy[0].1,
            Verdict::ProbeFailed { exit_code: 127 }
        );
    }

    #[tokio::test]
    async fn marker_must_match_exactly() {
        let outputs: [&[u8]; 5] = [b"0\n", b"1", b"1\n\n", b" 1\n", b""];
        for output in outputs {
            let runtime =
                FakeRuntime::new(vec![FakeContainer::running("android_1").boot_output(output)]);
            let report = check_containers(&runtime, &[]).await.unwrap();
            assert_eq!(
                report.unhealthy[0].1,
                Verdict::BootIncomplete,
                "output {:?} should not count as booted",
                output
            );
        }
    }

    #[tokio::test]
    async fn boot_incomplete_and_stopped_reported_in_order() {
        let runtime = FakeRuntime::new(vec![
            FakeContainer::running("android_1").boot_output(b"0\n"),
            FakeContainer::exited("android_2"),
        ]);

        let report = check_containers(&runtime, &[]).await.unwrap();

        assert_eq!(report.unhealthy_names(), vec!["android_1", "android_2"]);
        let rendered = report.to_string();
        assert!(rendered.contains("Total checked containers: 2"));
        assert!(rendered.contains("android_1"));
        assert!(rendered.contains("android_2"));
    }

    #[tokio::test]
    async fn explicit_reference_checks_only_that_container() {
        let runtime = FakeRuntime::new(vec![
            FakeContainer::running("android_1"),
            FakeContainer::exited("android_2"),
        ]);

        let report = check_containers(&runtime, &["android_1".to_string()])
            .await
            .unwrap();

        assert_eq!(report.checked.len(), 1);
        assert!(report.all_healthy());
        assert!(report.to_string().ends_with("All the checked containers are healthy!"));
    }
}

// ABOUTME: Fixed in-container command sequences for log and resource collection.
// ABOUTME: Each step either prepares the temp directory or captures its output to a file.

use super::CollectKind;

/// One command run inside the guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestStep {
    pub command: String,
    /// Write the command output to `guestos/<name>/<capture file>`.
    pub capture: bool,
}

impl GuestStep {
    fn run(command: String) -> Self {
        Self {
            command,
            capture: false,
        }
    }

    fn capture(command: &str) -> Self {
        Self {
            command: command.to_string(),
            capture: true,
        }
    }

    /// `dumpsys meminfo` -> `dumpsys_meminfo.log`
    pub fn capture_file(&self) -> String {
        format!("{}.log", self.command.replace(' ', "_"))
    }
}

/// Temp directory inside the guest, named after the host working directory.
pub fn guest_tmp_path(kind: CollectKind, workdir_name: &str) -> String {
    match kind {
        CollectKind::Log => format!("/{workdir_name}"),
        CollectKind::Resource => format!("/data/{workdir_name}"),
    }
}

/// Commands run in order, stopping at the first failure.
pub fn guest_plan(kind: CollectKind, tmp: &str) -> Vec<GuestStep> {
    let mut steps = vec![GuestStep::run(format!("mkdir -p {tmp}"))];

    match kind {
        CollectKind::Log => {
            steps.push(GuestStep::run(format!("logcat -d -f {tmp}/logcat.log")));
            steps.push(GuestStep::run(format!("cp -r /data/anr {tmp}")));
            steps.extend(
                ["getprop", "dumpsys activity", "dumpsys meminfo", "dumpsys input", "ps -a"]
                    .into_iter()
                    .map(GuestStep::capture),
            );
        }
        CollectKind::Resource => {
            steps.push(GuestStep::run(format!("cp -r /proc/cpuinfo {tmp}")));
            steps.extend(
                ["dumpsys meminfo", "top -n1", "df -h", "lspci"]
                    .into_iter()
                    .map(GuestStep::capture),
            );
        }
    }

    steps
}

/// Removes the guest temp directory; runs whatever happened before.
pub fn cleanup_step(tmp: &str) -> String {
    format!("rm -rf {tmp}")
}

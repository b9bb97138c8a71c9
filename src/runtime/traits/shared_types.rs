// ABOUTME: Shared types used across runtime trait definitions.
// ABOUTME: ContainerInfo, ContainerSummary, ContainerState, ExecConfig, ExecResult, RuntimeMetadata.

use crate::types::ContainerId;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Information about a container, as returned by inspect.
#[derive(Debug, Clone)]
pub struct ContainerInfo {
    /// Container ID.
    pub id: ContainerId,
    /// Container name, without the leading slash.
    pub name: String,
    /// Current state.
    pub state: ContainerState,
    /// Labels.
    pub labels: HashMap<String, String>,
}

/// Summary information about a container, as returned by list.
#[derive(Debug, Clone)]
pub struct ContainerSummary {
    /// Container ID.
    pub id: ContainerId,
    /// Container name.
    pub name: String,
    /// State at listing time.
    pub state: ContainerState,
    /// Labels.
    pub labels: HashMap<String, String>,
}

impl From<ContainerInfo> for ContainerSummary {
    fn from(info: ContainerInfo) -> Self {
        Self {
            id: info.id,
            name: info.name,
            state: info.state,
            labels: info.labels,
        }
    }
}

/// Container state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    Exited,
    Dead,
}

impl ContainerState {
    pub fn is_running(&self) -> bool {
        matches!(self, ContainerState::Running)
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContainerState::Created => "created",
            ContainerState::Running => "running",
            ContainerState::Paused => "paused",
            ContainerState::Restarting => "restarting",
            ContainerState::Removing => "removing",
            ContainerState::Exited => "exited",
            ContainerState::Dead => "dead",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ContainerState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "created" => Ok(ContainerState::Created),
            "running" => Ok(ContainerState::Running),
            "paused" => Ok(ContainerState::Paused),
            "restarting" => Ok(ContainerState::Restarting),
            "removing" => Ok(ContainerState::Removing),
            "exited" => Ok(ContainerState::Exited),
            "dead" => Ok(ContainerState::Dead),
            other => Err(format!("unknown container state: {other}")),
        }
    }
}

/// Exec configuration for running commands in containers.
#[derive(Debug, Clone)]
pub struct ExecConfig {
    /// Command and arguments to run.
    pub cmd: Vec<String>,
    /// Environment variables.
    pub env: Vec<String>,
    /// Working directory.
    pub working_dir: Option<String>,
    /// User to run as.
    pub user: Option<String>,
    /// Attach stdout.
    pub attach_stdout: bool,
    /// Attach stderr.
    pub attach_stderr: bool,
    /// Allocate a TTY.
    pub tty: bool,
    /// Run in privileged mode.
    pub privileged: bool,
    /// Upper bound for the whole exec; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ExecConfig {
    /// Split a shell-style command line on whitespace.
    pub fn command(line: &str) -> Self {
        Self {
            cmd: line.split_whitespace().map(str::to_string).collect(),
            ..Default::default()
        }
    }
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            cmd: Vec::new(),
            env: Vec::new(),
            working_dir: None,
            user: None,
            attach_stdout: true,
            attach_stderr: true,
            tty: false,
            privileged: false,
            timeout: None,
        }
    }
}

/// Result of an exec operation.
#[derive(Debug, Clone, Default)]
pub struct ExecResult {
    /// Exit code.
    pub exit_code: i64,
    /// Standard output.
    pub stdout: Vec<u8>,
    /// Standard error.
    pub stderr: Vec<u8>,
}

impl ExecResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout followed by stderr.
    pub fn output(&self) -> Vec<u8> {
        let mut combined = Vec::with_capacity(self.stdout.len() + self.stderr.len());
        combined.extend_from_slice(&self.stdout);
        combined.extend_from_slice(&self.stderr);
        combined
    }
}

/// Runtime metadata.
#[derive(Debug, Clone)]
pub struct RuntimeMetadata {
    /// Runtime name (e.g., "Docker").
    pub name: String,
    /// Runtime version.
    pub version: String,
    /// API version.
    pub api_version: String,
    /// Operating system.
    pub os: String,
    /// Architecture.
    pub arch: String,
}

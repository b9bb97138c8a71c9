// ABOUTME: Runtime connection types.
// ABOUTME: DetectedRuntime describes the detected socket; RuntimeConfig holds user overrides.

use serde::Deserialize;
use std::time::Duration;

/// Where the detected socket came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketSource {
    /// `runtime.socket` in the config file.
    Configured,
    /// The `DOCKER_HOST` environment variable.
    Environment,
    /// Rootless Docker under `/run/user/$UID`.
    Rootless,
    /// The system-wide Docker socket.
    Default,
}

impl std::fmt::Display for SocketSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SocketSource::Configured => write!(f, "config"),
            SocketSource::Environment => write!(f, "DOCKER_HOST"),
            SocketSource::Rootless => write!(f, "rootless"),
            SocketSource::Default => write!(f, "default"),
        }
    }
}

/// Detected runtime information.
#[derive(Debug, Clone)]
pub struct DetectedRuntime {
    /// Path to the Docker socket.
    pub socket_path: String,
    /// How the socket was found.
    pub source: SocketSource,
}

/// Configuration for explicit runtime overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Explicit socket path (overrides detection).
    #[serde(default)]
    pub socket: Option<String>,
    /// Bound for each in-container command.
    #[serde(default, with = "humantime_serde")]
    pub exec_timeout: Option<Duration>,
}

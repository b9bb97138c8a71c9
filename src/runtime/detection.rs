// ABOUTME: Docker socket detection on the local host.
// ABOUTME: Checks the config override, DOCKER_HOST, rootless and system sockets in order.

use super::types::{DetectedRuntime, RuntimeConfig, SocketSource};
use std::path::Path;

/// Error during runtime detection.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("no container runtime found (checked DOCKER_HOST, rootless and system Docker sockets)")]
    NoRuntimeFound,

    #[error("unsupported DOCKER_HOST '{0}': only unix:// sockets are supported")]
    UnsupportedHost(String),
}

const DOCKER_SOCKET: &str = "/var/run/docker.sock";

/// Detect the Docker socket on the local system.
///
/// Detection order:
/// 1. `runtime.socket` from the config file
/// 2. `DOCKER_HOST` (`unix://` only)
/// 3. Rootless Docker socket (`/run/user/$UID/docker.sock`)
/// 4. System Docker socket (`/var/run/docker.sock`)
pub fn detect_local(config: &RuntimeConfig) -> Result<DetectedRuntime, DetectionError> {
    if let Some(ref socket) = config.socket {
        return Ok(DetectedRuntime {
            socket_path: socket.clone(),
            source: SocketSource::Configured,
        });
    }

    if let Ok(host) = std::env::var("DOCKER_HOST")
        && !host.is_empty()
    {
        let socket_path = socket_from_docker_host(&host)?;
        return Ok(DetectedRuntime {
            socket_path,
            source: SocketSource::Environment,
        });
    }

    if let Some(uid) = get_uid() {
        let rootless_socket = format!("/run/user/{}/docker.sock", uid);
        if Path::new(&rootless_socket).exists() {
            return Ok(DetectedRuntime {
                socket_path: rootless_socket,
                source: SocketSource::Rootless,
            });
        }
    }

    if Path::new(DOCKER_SOCKET).exists() {
        return Ok(DetectedRuntime {
            socket_path: DOCKER_SOCKET.to_string(),
            source: SocketSource::Default,
        });
    }

    Err(DetectionError::NoRuntimeFound)
}

fn socket_from_docker_host(host: &str) -> Result<String, DetectionError> {
    host.strip_prefix("unix://")
        .filter(|path| !path.is_empty())
        .map(str::to_string)
        .ok_or_else(|| DetectionError::UnsupportedHost(host.to_string()))
}

fn get_uid() -> Option<String> {
    std::env::var("UID").ok().or_else(|| {
        // Fall back to reading /proc/self/status
        std::fs::read_to_string("/proc/self/status")
            .ok()
            .and_then(|s| {
                s.lines()
                    .find(|l| l.starts_with("Uid:"))
                    .and_then(|l| l.split_whitespace().nth(1))
                    .map(|s| s.to_string())
            })
    })
}

// ABOUTME: Exec operations trait for the container runtime.
// ABOUTME: Execute commands inside running containers.

use super::sealed::Sealed;
use super::shared_types::{ExecConfig, ExecResult};
use crate::types::ContainerId;
use async_trait::async_trait;

/// Exec operations: run commands in containers.
#[async_trait]
pub trait ExecOps: Sealed + Send + Sync {
    /// Create and run an exec instance, returning its exit code and output.
    async fn exec(
        &self,
        container: &ContainerId,
        config: &ExecConfig,
    ) -> Result<ExecResult, ExecError>;
}

/// Errors from exec operations.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    #[error("container not running: {0}")]
    ContainerNotRunning(String),

    #[error("exec instance not found: {0}")]
    ExecNotFound(String),

    #[error("exec failed: {0}")]
    Failed(String),

    #[error("exec timed out after {0:?}")]
    TimedOut(std::time::Duration),

    #[error("runtime error: {0}")]
    Runtime(String),
}

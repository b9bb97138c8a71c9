// ABOUTME: Archive operations trait for the container runtime.
// ABOUTME: Copy a path out of a container as a tar stream.

use super::sealed::Sealed;
use crate::types::ContainerId;
use async_trait::async_trait;
use std::path::Path;

/// Filesystem extraction from containers.
#[async_trait]
pub trait ArchiveOps: Sealed + Send + Sync {
    /// Stream `path` from inside the container into a local tar file at `dest`.
    ///
    /// Returns the number of bytes written. On error nothing is left at `dest`.
    async fn download_archive(
        &self,
        container: &ContainerId,
        path: &str,
        dest: &Path,
    ) -> Result<u64, ArchiveError>;
}

/// Errors from archive operations.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("path not found in container: {0}")]
    PathNotFound(String),

    #[error("container not found: {0}")]
    ContainerNotFound(String),

    #[error("failed to write archive: {0}")]
    Io(#[from] std::io::Error),

    #[error("runtime error: {0}")]
    Runtime(String),
}

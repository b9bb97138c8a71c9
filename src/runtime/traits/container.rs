// ABOUTME: Container operations trait for the container runtime.
// ABOUTME: Resolve, inspect and list cloud-phone containers.

use super::sealed::Sealed;
use super::shared_types::{ContainerInfo, ContainerSummary};
use async_trait::async_trait;

/// Read-only container queries.
#[async_trait]
pub trait ContainerOps: Sealed + Send + Sync {
    /// Get current information about a container, by name or ID.
    async fn inspect_container(&self, reference: &str) -> Result<ContainerInfo, ContainerError>;

    /// Get the raw inspect document, as `docker inspect` would print it.
    async fn inspect_document(&self, reference: &str)
    -> Result<serde_json::Value, ContainerError>;

    /// List containers matching the given filters.
    async fn list_containers(
        &self,
        filters: &ContainerFilters,
    ) -> Result<Vec<ContainerSummary>, ContainerError>;
}

/// Filters for listing containers.
#[derive(Debug, Clone, Default)]
pub struct ContainerFilters {
    /// Include stopped containers.
    pub all: bool,
}

impl ContainerFilters {
    /// Every container the runtime knows about, stopped ones included.
    pub fn all() -> Self {
        Self { all: true }
    }
}

/// Errors from container operations.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("container not found: {0}")]
    NotFound(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}

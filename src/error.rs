// ABOUTME: Application-wide error types for kbox-maintainer.
// ABOUTME: Uses thiserror for ergonomic error handling.

use crate::runtime::{ContainerError, RuntimeError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{0}")]
    Precondition(String),

    #[error("no such container: {reference} ({source})")]
    ContainerLookup {
        reference: String,
        source: ContainerError,
    },

    #[error("failed to list containers: {0}")]
    ContainerList(ContainerError),

    #[error("no container found")]
    NoContainers,

    #[error("{} is not found", .0.display())]
    ScriptNotFound(PathBuf),

    #[error("failed to run {command}: {source}")]
    Command {
        command: String,
        source: std::io::Error,
    },

    #[error("host collection failed: {0}")]
    HostCollection(String),

    #[error("failed to pack {}: {source}", path.display())]
    Pack {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write archive {}: {source}", path.display())]
    Archive {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

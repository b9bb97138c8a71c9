// ABOUTME: Composable capability traits for the container runtime.
// ABOUTME: Defines ContainerOps, ExecOps, ArchiveOps and RuntimeInfo, each sealed.

mod archive;
mod container;
mod exec;
mod runtime_info;
pub(crate) mod sealed;
mod shared_types;

pub use archive::{ArchiveError, ArchiveOps};
pub use container::{ContainerError, ContainerFilters, ContainerOps};
pub use exec::{ExecError, ExecOps};
pub use runtime_info::{RuntimeInfo, RuntimeInfoError};
pub use shared_types::*;

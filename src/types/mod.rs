// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Uses phantom types to keep container and exec IDs apart.

mod container_index;
mod id;

pub use container_index::{ContainerIndex, ContainerIndexError};
pub use id::{ContainerId, ExecId};

// ABOUTME: Target container resolution shared by every command.
// ABOUTME: No references means every container the runtime knows; otherwise each must resolve.

use crate::error::{Error, Result};
use crate::runtime::{ContainerFilters, ContainerOps, ContainerSummary};

/// Resolve command-line references to containers, keeping their order.
///
/// An empty slice selects every container, stopped ones included. Any
/// reference that does not resolve fails the whole resolution.
pub async fn resolve_targets<R: ContainerOps>(
    runtime: &R,
    references: &[String],
) -> Result<Vec<ContainerSummary>> {
    if references.is_empty() {
        return runtime
            .list_containers(&ContainerFilters::all())
            .await
            .map_err(Error::ContainerList);
    }

    let mut targets = Vec::with_capacity(references.len());
    for reference in references {
        let info = runtime
            .inspect_container(reference)
            .await
            .map_err(|source| Error::ContainerLookup {
                reference: reference.clone(),
                source,
            })?;
        targets.push(ContainerSummary::from(info));
    }

    Ok(targets)
}

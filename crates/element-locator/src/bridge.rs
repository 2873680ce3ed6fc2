//! Native handle bridge: snapshot node to live, actionable reference.

use dom_snapshot::{structural_path, DomSnapshot, NodeId};
use tracing::debug;

use crate::errors::ResolveError;
use crate::ports::BrowserPort;
use crate::types::ActionableHandle;

/// Resolve one snapshot node against the live document.
///
/// Fails with [`ResolveError::StaleNode`] when the live document has
/// diverged since the snapshot (node removed or reflowed). Never retries:
/// the caller re-snapshots and resolves again.
pub async fn to_handle<P>(
    port: &P,
    snapshot: &DomSnapshot,
    node: NodeId,
) -> Result<ActionableHandle, ResolveError>
where
    P: BrowserPort + ?Sized,
{
    let path = structural_path(snapshot.node(node));
    match port.resolve(&path).await? {
        Some(id) => Ok(ActionableHandle { id, path }),
        None => {
            debug!(%path, "live document diverged from snapshot");
            Err(ResolveError::StaleNode { path })
        }
    }
}

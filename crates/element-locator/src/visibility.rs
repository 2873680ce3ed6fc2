//! Visibility filtering over live displayedness.
//!
//! Displayedness is a live-render property absent from the static
//! snapshot, so filtering is a two-pass resolve-then-test: bridge every
//! candidate to a live handle, keep the displayed ones in their original
//! relative order, then re-apply z-index ranking, since removing hidden
//! siblings can change relative layering significance.

use dom_snapshot::{DomSnapshot, NodeId};
use tracing::debug;

use crate::bridge;
use crate::container;
use crate::errors::ResolveError;
use crate::ports::BrowserPort;

/// Reduce candidates to the currently rendered ones, re-ranked.
///
/// A candidate that no longer resolves against the live document is
/// treated as not displayed, not as an error.
pub async fn filter_displayed<P>(
    port: &P,
    snapshot: &DomSnapshot,
    candidates: &[NodeId],
) -> Result<Vec<NodeId>, ResolveError>
where
    P: BrowserPort + ?Sized,
{
    let mut displayed = Vec::with_capacity(candidates.len());
    for id in candidates {
        match bridge::to_handle(port, snapshot, *id).await {
            Ok(handle) => {
                if port.is_displayed(&handle.id).await? {
                    displayed.push(*id);
                }
            }
            Err(ResolveError::StaleNode { path }) => {
                debug!(%path, "candidate vanished before visibility test");
            }
            Err(other) => return Err(other),
        }
    }
    debug!(
        kept = displayed.len(),
        dropped = candidates.len() - displayed.len(),
        "visibility filter"
    );
    Ok(container::rank_by_z_index(snapshot, displayed))
}

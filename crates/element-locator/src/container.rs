//! Container resolution: rank candidate UI layers by stacking order.

use dom_snapshot::{DomSnapshot, NodeId, SelectorList};
use tracing::{debug, trace};

/// Sort descending by derived z-index. The sort is stable, so candidates
/// with equal z-index keep their original document order.
pub fn rank_by_z_index(snapshot: &DomSnapshot, mut ids: Vec<NodeId>) -> Vec<NodeId> {
    ids.sort_by_key(|id| std::cmp::Reverse(snapshot.node(*id).z_index()));
    ids
}

/// Topmost container candidate for a selector, or `None` when nothing
/// matches. Ranking is purely positional: a hidden dialog with a higher
/// z-index still wins, because the topmost dialog is assumed to be the
/// active one.
pub fn topmost(snapshot: &DomSnapshot, selector: &SelectorList) -> Option<NodeId> {
    let candidates = snapshot.select(selector);
    trace!(candidates = candidates.len(), "container candidates");
    let ranked = rank_by_z_index(snapshot, candidates);
    let top = ranked.first().copied();
    if let Some(id) = top {
        debug!(
            ?id,
            z = snapshot.node(id).z_index(),
            "topmost container selected"
        );
    }
    top
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_snapshot::DomSnapshot;

    fn dialogs() -> DomSnapshot {
        DomSnapshot::parse(
            r#"<html><body>
                <div class="dialog" id="back" style="z-index:10;"></div>
                <div class="dialog" id="front" style="z-index:20;"></div>
                <div class="dialog" id="plain"></div>
                <div class="dialog" id="plain2"></div>
            </body></html>"#,
        )
    }

    fn id_attr(snapshot: &DomSnapshot, id: NodeId) -> &str {
        snapshot.node(id).attr("id").unwrap_or("")
    }

    #[test]
    fn highest_z_index_wins() {
        let snapshot = dialogs();
        let selector = SelectorList::parse(".dialog").unwrap();
        let top = topmost(&snapshot, &selector).unwrap();
        assert_eq!(id_attr(&snapshot, top), "front");
    }

    #[test]
    fn ties_keep_document_order() {
        let snapshot = dialogs();
        let selector = SelectorList::parse(".dialog").unwrap();
        let ranked = rank_by_z_index(&snapshot, snapshot.select(&selector));
        let order: Vec<_> = ranked.iter().map(|id| id_attr(&snapshot, *id)).collect();
        assert_eq!(order, vec!["front", "back", "plain", "plain2"]);
    }

    #[test]
    fn no_candidates_yields_none() {
        let snapshot = dialogs();
        let selector = SelectorList::parse(".missing").unwrap();
        assert!(topmost(&snapshot, &selector).is_none());
    }
}

//! The five search strategies, dispatched by exhaustive match.

use dom_snapshot::{DomSnapshot, NodeId, SelectorList};
use tracing::debug;

use crate::errors::ResolveError;
use crate::label;
use crate::types::{SearchRequest, SearchStrategy};

/// Run a snapshot-scoped strategy inside the chosen container.
///
/// The two live-page strategies have no snapshot arm here: XPath is
/// reachable only through the existence check and yields an empty match
/// set from `locate`, and the script strategy is dispatched before a
/// container is ever resolved.
pub fn run_in_container(
    snapshot: &DomSnapshot,
    container: NodeId,
    request: &SearchRequest,
) -> Result<Vec<NodeId>, ResolveError> {
    let scope = snapshot.node(container);
    match request.strategy {
        SearchStrategy::CssSelector => {
            let selector = SelectorList::parse(&request.term)?;
            Ok(scope.select(&selector))
        }
        SearchStrategy::TextContains => {
            if request.label {
                Ok(label::associated_input(scope, &request.term)
                    .into_iter()
                    .collect())
            } else {
                let block_children = SelectorList::parse("div > *")?;
                Ok(retain_containing_text(
                    snapshot,
                    scope.select(&block_children),
                    &request.term,
                ))
            }
        }
        SearchStrategy::Mixed => {
            let secondary = request.optional_term.as_deref().ok_or_else(|| {
                ResolveError::locator("mixed search requires a secondary selector term")
            })?;
            let selector = SelectorList::parse(secondary)?;
            Ok(retain_containing_text(
                snapshot,
                scope.select(&selector),
                &request.term,
            ))
        }
        SearchStrategy::XPath => {
            debug!(term = %request.term, "xpath strategy is exists-only; empty locate result");
            Ok(Vec::new())
        }
        SearchStrategy::ScriptEvaluated => Err(ResolveError::locator(
            "script strategy runs against the live page, not a snapshot",
        )),
    }
}

/// Keep candidates whose aggregate rendered text contains the term,
/// case-insensitively, preserving order.
fn retain_containing_text(
    snapshot: &DomSnapshot,
    candidates: Vec<NodeId>,
    term: &str,
) -> Vec<NodeId> {
    let needle = term.to_lowercase();
    candidates
        .into_iter()
        .filter(|id| snapshot.node(*id).text().to_lowercase().contains(&needle))
        .collect()
}

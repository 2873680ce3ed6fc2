//! Structural path derivation.
//!
//! A path is the tag/position chain from the document root down to one
//! snapshot node; it is how a snapshot node is handed to the live browser
//! boundary for re-resolution. Position is counted among same-tag element
//! siblings and omitted when the tag is unique at that level, so the
//! rendered form matches the usual absolute-XPath shape.

use stackpilot_core_types::{NodePath, PathStep};

use crate::model::NodeRef;

/// Derive the structural path of a node. Text nodes take the path of their
/// nearest element ancestor, since only elements are actionable.
pub fn structural_path(node: NodeRef<'_>) -> NodePath {
    let mut steps = Vec::new();
    let mut current = if node.is_element() {
        Some(node)
    } else {
        node.parent()
    };

    while let Some(element) = current {
        let tag = match element.tag() {
            Some(tag) => tag,
            None => break,
        };
        let step = match element.parent() {
            Some(parent) => position_step(
                tag,
                element,
                parent.children().filter(|c| c.tag() == Some(tag)),
            ),
            None => position_step(
                tag,
                element,
                element.snapshot().roots().filter(|r| r.tag() == Some(tag)),
            ),
        };
        steps.push(step);
        current = element.parent();
    }

    steps.reverse();
    NodePath(steps)
}

fn position_step<'a>(
    tag: &str,
    element: NodeRef<'a>,
    same_tag: impl Iterator<Item = NodeRef<'a>>,
) -> PathStep {
    let peers: Vec<_> = same_tag.map(|n| n.id).collect();
    let index = if peers.len() == 1 {
        None
    } else {
        peers.iter().position(|id| *id == element.id).map(|p| p + 1)
    };
    PathStep {
        tag: tag.to_string(),
        index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DomSnapshot;

    #[test]
    fn indexes_repeated_tags_only() {
        let snapshot = DomSnapshot::parse(
            "<html><body><div>first</div><div><input></div></body></html>",
        );
        let input = snapshot
            .iter()
            .find(|n| n.tag() == Some("input"))
            .expect("input present");
        assert_eq!(structural_path(input).as_xpath(), "/html/body/div[2]/input");
    }

    #[test]
    fn text_nodes_borrow_their_parent_path() {
        let snapshot = DomSnapshot::parse("<html><body><span>hi</span></body></html>");
        let text = snapshot
            .iter()
            .find(|n| n.data().is_text())
            .expect("text present");
        assert_eq!(structural_path(text).as_xpath(), "/html/body/span");
    }
}

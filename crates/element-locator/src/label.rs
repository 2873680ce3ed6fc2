//! Label association: find the input control a label's text points at.

use dom_snapshot::{DomNode, NodeId, NodeRef};
use regex::Regex;
use tracing::debug;

/// Input control associated with `label_text` inside the container.
///
/// The label text node must match `^<text>\*?\s+$` (optional trailing
/// required-field asterisk, trailing whitespace). The first matching text
/// node wins even when several labels match; its nearest `div` ancestor is
/// the block the control lives in, and the control is the following
/// sibling `input` of that block. Absence at any step yields `None`,
/// never an error.
pub fn associated_input(container: NodeRef<'_>, label_text: &str) -> Option<NodeId> {
    let pattern = label_pattern(label_text)?;

    let matched = container.descendants().find(|node| match node.data() {
        DomNode::Text(content) => pattern.is_match(content),
        DomNode::Element { .. } => false,
    })?;

    let block = first_div_ancestor(matched)?;
    let input = block
        .following_sibling_elements()
        .find(|sibling| sibling.tag() == Some("input"));
    debug!(label = label_text, found = input.is_some(), "label association");
    input.map(|node| node.id)
}

fn label_pattern(label_text: &str) -> Option<Regex> {
    // The escaped text makes the pattern well-formed by construction.
    Regex::new(&format!(r"^{}\*?\s+$", regex::escape(label_text))).ok()
}

/// Nearest `div` ancestor. Text nodes never qualify and elements of other
/// tags force the climb to continue; running out of ancestors means no
/// block exists.
fn first_div_ancestor(node: NodeRef<'_>) -> Option<NodeRef<'_>> {
    node.ancestors().find(|ancestor| ancestor.tag() == Some("div"))
}

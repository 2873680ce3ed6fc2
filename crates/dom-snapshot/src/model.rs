//! Arena tree model: the Element/Text sum type and the snapshot cursor.

use serde::{Deserialize, Serialize};

/// Index of a node inside its [`DomSnapshot`] arena.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    fn idx(self) -> usize {
        self.0 as usize
    }
}

/// One parsed node. Text content is kept verbatim, trailing whitespace
/// included: label association matches on it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum DomNode {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
}

impl DomNode {
    pub fn tag(&self) -> Option<&str> {
        match self {
            DomNode::Element { tag, .. } => Some(tag),
            DomNode::Text(_) => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            DomNode::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            DomNode::Text(_) => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, DomNode::Element { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(self, DomNode::Text(_))
    }
}

#[derive(Clone, Debug)]
struct Slot {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: DomNode,
}

/// Immutable parsed tree captured at one instant.
///
/// Owned exclusively by the call that created it; node ids are only
/// meaningful against the snapshot that produced them.
#[derive(Clone, Debug, Default)]
pub struct DomSnapshot {
    slots: Vec<Slot>,
    roots: Vec<NodeId>,
}

impl DomSnapshot {
    pub(crate) fn new_node(&mut self, data: DomNode) -> NodeId {
        let id = NodeId(self.slots.len() as u32);
        self.slots.push(Slot {
            parent: None,
            children: Vec::new(),
            data,
        });
        id
    }

    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.slots[child.idx()].parent = Some(parent);
        self.slots[parent.idx()].children.push(child);
    }

    pub(crate) fn push_root(&mut self, id: NodeId) {
        self.roots.push(id);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, id: NodeId) -> &DomNode {
        &self.slots[id.idx()].data
    }

    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { snap: self, id }
    }

    /// Top-level element nodes (normally just `html`).
    pub fn roots(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        self.roots.iter().map(move |id| self.node(*id))
    }

    /// All nodes in document (pre-) order.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        Walk::from_roots(self)
    }
}

/// Cheap cursor pairing a snapshot with one of its nodes.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    snap: &'a DomSnapshot,
    pub id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn snapshot(&self) -> &'a DomSnapshot {
        self.snap
    }

    pub fn data(&self) -> &'a DomNode {
        self.snap.get(self.id)
    }

    pub fn tag(&self) -> Option<&'a str> {
        self.data().tag()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.data().attr(name)
    }

    pub fn is_element(&self) -> bool {
        self.data().is_element()
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.snap.slots[self.id.idx()]
            .parent
            .map(|id| self.snap.node(id))
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let snap = self.snap;
        self.snap.slots[self.id.idx()]
            .children
            .iter()
            .map(move |id| snap.node(*id))
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let mut current = *self;
        std::iter::from_fn(move || {
            let parent = current.parent()?;
            current = parent;
            Some(parent)
        })
    }

    /// Strict descendants in document order.
    pub fn descendants(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        Walk::below(*self)
    }

    /// Following sibling elements in document order, skipping text nodes.
    pub fn following_sibling_elements(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let snap = self.snap;
        let id = self.id;
        let after: Vec<NodeId> = match self.parent() {
            Some(parent) => {
                let siblings = &snap.slots[parent.id.idx()].children;
                match siblings.iter().position(|s| *s == id) {
                    Some(pos) => siblings[pos + 1..].to_vec(),
                    None => Vec::new(),
                }
            }
            None => Vec::new(),
        };
        after
            .into_iter()
            .map(move |id| snap.node(id))
            .filter(|n| n.is_element())
    }

    /// Following sibling element, skipping intervening text nodes.
    pub fn next_sibling_element(&self) -> Option<NodeRef<'a>> {
        self.following_sibling_elements().next()
    }

    /// Concatenated text of this node and all descendants, verbatim.
    pub fn text(&self) -> String {
        let mut out = String::new();
        if let DomNode::Text(content) = self.data() {
            out.push_str(content);
        }
        for node in self.descendants() {
            if let DomNode::Text(content) = node.data() {
                out.push_str(content);
            }
        }
        out
    }

    /// Derived stacking value from the inline style, 0 when absent or
    /// unparsable.
    pub fn z_index(&self) -> i64 {
        self.attr("style").map(z_index_from_style).unwrap_or(0)
    }
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("data", self.data())
            .finish()
    }
}

/// Integer following a `z-index:` marker up to the next `;`. Anything
/// malformed behaves as 0.
pub fn z_index_from_style(style: &str) -> i64 {
    style
        .split("z-index:")
        .nth(1)
        .and_then(|rest| rest.split(';').next())
        .and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(0)
}

/// Explicit-stack pre-order walk.
struct Walk<'a> {
    snap: &'a DomSnapshot,
    stack: Vec<NodeId>,
}

impl<'a> Walk<'a> {
    fn from_roots(snap: &'a DomSnapshot) -> Self {
        let mut stack: Vec<NodeId> = snap.roots.clone();
        stack.reverse();
        Self { snap, stack }
    }

    fn below(node: NodeRef<'a>) -> Self {
        let snap = node.snap;
        let mut stack: Vec<NodeId> = snap.slots[node.id.idx()].children.clone();
        stack.reverse();
        Self { snap, stack }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<NodeRef<'a>> {
        let id = self.stack.pop()?;
        let children = &self.snap.slots[id.idx()].children;
        self.stack.extend(children.iter().rev());
        Some(self.snap.node(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z_index_parses_well_formed_styles() {
        assert_eq!(z_index_from_style("z-index:10;"), 10);
        assert_eq!(z_index_from_style("position:absolute;z-index: 42 ;top:0"), 42);
        assert_eq!(z_index_from_style("z-index:-3;"), -3);
    }

    #[test]
    fn z_index_defaults_to_zero() {
        assert_eq!(z_index_from_style(""), 0);
        assert_eq!(z_index_from_style("color:red"), 0);
        assert_eq!(z_index_from_style("z-index:auto;"), 0);
        assert_eq!(z_index_from_style("z-index:10.5;"), 0);
        assert_eq!(z_index_from_style("z-index:;"), 0);
    }
}

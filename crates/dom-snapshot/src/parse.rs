//! HTML parsing into the snapshot arena.
//!
//! Uses html5ever's built-in RcDom and converts to the arena format; the
//! conversion drops doctypes, comments and processing instructions, which
//! play no part in resolution.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::model::{DomNode, DomSnapshot, NodeId};

impl DomSnapshot {
    /// Parse a full page source into an immutable snapshot.
    pub fn parse(html: &str) -> DomSnapshot {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .expect("reading from an in-memory buffer cannot fail");

        let mut snapshot = DomSnapshot::default();
        convert_children(&dom.document, &mut snapshot, None);
        tracing::debug!(nodes = snapshot.len(), "parsed page snapshot");
        snapshot
    }
}

fn convert_children(handle: &Handle, snapshot: &mut DomSnapshot, parent: Option<NodeId>) {
    for child in handle.children.borrow().iter() {
        convert_node(child, snapshot, parent);
    }
}

fn convert_node(handle: &Handle, snapshot: &mut DomSnapshot, parent: Option<NodeId>) {
    match &handle.data {
        RcNodeData::Document => convert_children(handle, snapshot, parent),
        RcNodeData::Element { name, attrs, .. } => {
            let tag = name.local.to_string().to_ascii_lowercase();
            let attrs = attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();
            let id = snapshot.new_node(DomNode::Element { tag, attrs });
            attach(snapshot, parent, id);
            convert_children(handle, snapshot, Some(id));
        }
        RcNodeData::Text { contents } => {
            // Verbatim, whitespace included: label matching depends on the
            // trailing whitespace of label text nodes.
            let id = snapshot.new_node(DomNode::Text(contents.borrow().to_string()));
            attach(snapshot, parent, id);
        }
        RcNodeData::Doctype { .. }
        | RcNodeData::Comment { .. }
        | RcNodeData::ProcessingInstruction { .. } => {}
    }
}

fn attach(snapshot: &mut DomSnapshot, parent: Option<NodeId>, id: NodeId) {
    match parent {
        Some(parent) => snapshot.append_child(parent, id),
        None => snapshot.push_root(id),
    }
}

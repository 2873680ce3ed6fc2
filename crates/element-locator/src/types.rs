//! Core types for the resolution system.

use dom_snapshot::{DomSnapshot, NodeId, NodeRef};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use stackpilot_core_types::{HandleId, NodePath};

/// Search strategy enumeration.
///
/// Every strategy except [`SearchStrategy::XPath`] and
/// [`SearchStrategy::ScriptEvaluated`] is scoped to the topmost matching
/// container of a fresh snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// Container descendants matching a CSS selector.
    CssSelector,

    /// Evaluated live against the whole document, not the chosen container.
    /// This asymmetry is intentional and part of the strategy contract: the
    /// XPath strategy is reachable only through the boolean existence check,
    /// and `locate` with it yields an empty result.
    XPath,

    /// Container descendants under a `div` whose rendered text contains the
    /// term case-insensitively; with the label flag, delegates to
    /// label association instead.
    TextContains,

    /// Both a selector (secondary term) and case-insensitive text
    /// containment (primary term) must hold.
    Mixed,

    /// A caller-supplied script run against the live page, bypassing the
    /// snapshot; the result is kept only when array-shaped.
    ScriptEvaluated,
}

impl SearchStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            SearchStrategy::CssSelector => "css-selector",
            SearchStrategy::XPath => "xpath",
            SearchStrategy::TextContains => "text-contains",
            SearchStrategy::Mixed => "mixed",
            SearchStrategy::ScriptEvaluated => "script",
        }
    }
}

/// Live whole-document query flavor for existence checks.
///
/// The core itself only issues [`LiveBy::XPath`] queries; [`LiveBy::Css`]
/// is part of the port contract for drivers that count live CSS matches
/// without going through a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiveBy {
    Css,
    XPath,
}

/// How the action layer should deliver a click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickMode {
    /// Dispatch via injected script (default; most robust under overlays).
    #[default]
    Scripted,
    /// Native driver click.
    Direct,
    /// Pointer-device emulation (move then click).
    Pointer,
}

/// One search request. Built with the defaults the public operations
/// document and refined through the `with_` helpers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Primary term: a selector, a text fragment, or a script body
    /// depending on the strategy.
    pub term: String,

    pub strategy: SearchStrategy,

    /// Secondary selector term, used by the mixed strategy.
    pub optional_term: Option<String>,

    /// Search for the control associated with a label's text.
    pub label: bool,

    /// Container selector override; `None` uses the library-wide default.
    pub container: Option<String>,
}

impl SearchRequest {
    pub fn new(term: impl Into<String>, strategy: SearchStrategy) -> Self {
        Self {
            term: term.into(),
            strategy,
            optional_term: None,
            label: false,
            container: None,
        }
    }

    pub fn with_optional_term(mut self, term: impl Into<String>) -> Self {
        self.optional_term = Some(term.into());
        self
    }

    pub fn with_label(mut self, label: bool) -> Self {
        self.label = label;
        self
    }

    pub fn with_container(mut self, selector: impl Into<String>) -> Self {
        self.container = Some(selector.into());
        self
    }
}

/// Live reference into the browser's current document, derived from a
/// snapshot node's structural path. Owned by the caller for one
/// interaction; there is no staleness detection after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionableHandle {
    pub id: HandleId,
    pub path: NodePath,
}

/// Ordered element matches bound to the snapshot they index into.
#[derive(Debug, Clone)]
pub struct ElementSet {
    snapshot: DomSnapshot,
    matches: Vec<NodeId>,
}

impl ElementSet {
    pub fn new(snapshot: DomSnapshot, matches: Vec<NodeId>) -> Self {
        Self { snapshot, matches }
    }

    pub fn snapshot(&self) -> &DomSnapshot {
        &self.snapshot
    }

    pub fn node_ids(&self) -> &[NodeId] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        self.matches.iter().map(|id| self.snapshot.node(*id))
    }

    pub fn first(&self) -> Option<NodeRef<'_>> {
        self.matches.first().map(|id| self.snapshot.node(*id))
    }

    pub(crate) fn with_matches(mut self, matches: Vec<NodeId>) -> Self {
        self.matches = matches;
        self
    }
}

/// Outcome of a `locate` call: element matches for the snapshot-scoped
/// strategies, raw values for the script strategy.
#[derive(Debug, Clone)]
pub enum LocateResult {
    Elements(ElementSet),
    ScriptValues(Vec<Value>),
}

impl LocateResult {
    pub fn len(&self) -> usize {
        match self {
            LocateResult::Elements(set) => set.len(),
            LocateResult::ScriptValues(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn elements(&self) -> Option<&ElementSet> {
        match self {
            LocateResult::Elements(set) => Some(set),
            LocateResult::ScriptValues(_) => None,
        }
    }

    pub fn into_elements(self) -> Option<ElementSet> {
        match self {
            LocateResult::Elements(set) => Some(set),
            LocateResult::ScriptValues(_) => None,
        }
    }
}

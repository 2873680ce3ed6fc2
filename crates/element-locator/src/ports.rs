//! Browser boundary.
//!
//! Everything the core needs from the live browser session goes through
//! [`BrowserPort`]. Snapshot capture must reflect the full current render,
//! inline styles included, and is never cached by the core. The action
//! passthroughs carry no resolution logic; they exist so the external
//! action layer can consume handles without a second trait.

use async_trait::async_trait;
use dom_snapshot::DomSnapshot;
use serde_json::Value;
use stackpilot_core_types::{HandleId, NodePath};
use thiserror::Error;

use crate::types::{ClickMode, LiveBy};

/// Failure at the browser boundary.
#[derive(Debug, Error, Clone)]
pub enum PortError {
    /// Driver/transport problem (connection, protocol, serialization).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The page rejected a script evaluation.
    #[error("script evaluation failed: {0}")]
    Script(String),
}

impl PortError {
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport(reason.into())
    }

    pub fn script(reason: impl Into<String>) -> Self {
        Self::Script(reason.into())
    }
}

/// Live browser session boundary.
#[async_trait]
pub trait BrowserPort: Send + Sync {
    /// Capture an immutable parsed copy of the current page structure.
    async fn snapshot(&self) -> Result<DomSnapshot, PortError>;

    /// Resolve a structural path against the live document. `None` means
    /// the document no longer contains a node at that path.
    async fn resolve(&self, path: &NodePath) -> Result<Option<HandleId>, PortError>;

    /// Live displayedness of a resolved handle; a render property absent
    /// from the static snapshot.
    async fn is_displayed(&self, handle: &HandleId) -> Result<bool, PortError>;

    /// Run a caller-supplied script against the live page.
    async fn evaluate_script(&self, code: &str) -> Result<Value, PortError>;

    /// Count live whole-document matches for a selector. Used by the XPath
    /// existence check, which is deliberately not container-scoped.
    async fn query_live(&self, by: LiveBy, selector: &str) -> Result<usize, PortError>;

    // Action passthroughs (no resolution logic).

    async fn click(&self, handle: &HandleId, mode: ClickMode) -> Result<(), PortError>;

    async fn send_keys(&self, handle: &HandleId, keys: &str) -> Result<(), PortError>;

    async fn focus(&self, handle: &HandleId) -> Result<(), PortError>;

    async fn scroll_into_view(&self, handle: &HandleId) -> Result<(), PortError>;
}

//! Error taxonomy for the resolution core.
//!
//! All three classes are fatal to the current operation: a call yields
//! either a complete result or a single terminal failure, never both.

use std::time::Duration;

use dom_snapshot::SelectorError;
use stackpilot_core_types::NodePath;
use thiserror::Error;

use crate::ports::PortError;

#[derive(Debug, Error, Clone)]
pub enum ResolveError {
    /// Polling deadline exceeded with no matching container.
    #[error("no container matched {selector:?} within {waited:?}")]
    ContainerNotFound { selector: String, waited: Duration },

    /// Invalid strategy parameters or selector/script evaluation failure.
    #[error("locator failure: {0}")]
    Locator(String),

    /// Live document diverged from the snapshot before the handle resolved.
    #[error("stale node: live document no longer contains {path}")]
    StaleNode { path: NodePath },

    /// Transport failure surfaced by the browser port.
    #[error("browser port failure: {0}")]
    Port(String),
}

impl ResolveError {
    pub fn locator(reason: impl Into<String>) -> Self {
        Self::Locator(reason.into())
    }
}

impl From<SelectorError> for ResolveError {
    fn from(err: SelectorError) -> Self {
        ResolveError::Locator(err.to_string())
    }
}

impl From<PortError> for ResolveError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::Script(reason) => ResolveError::Locator(reason),
            PortError::Transport(reason) => ResolveError::Port(reason),
        }
    }
}

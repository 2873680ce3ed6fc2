//! Orchestrator: the `exists` and `locate` operations.

use std::sync::Arc;

use dom_snapshot::{DomSnapshot, NodeId, SelectorList};
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::ResolveError;
use crate::polling::{self, RetryPolicy};
use crate::ports::BrowserPort;
use crate::types::{
    ActionableHandle, ElementSet, LiveBy, LocateResult, SearchRequest, SearchStrategy,
};
use crate::{bridge, strategies, visibility};

/// Library-wide default content-region selector.
pub const DEFAULT_CONTAINER: &str = "body";

/// Deterministic element resolution over one browser session.
///
/// Operations never interleave: snapshot capture, container resolution,
/// locating and filtering for one call complete fully before the next
/// call begins.
pub struct ElementLocator<P> {
    port: Arc<P>,
    base_container: String,
    policy: RetryPolicy,
}

impl<P: BrowserPort> ElementLocator<P> {
    pub fn new(port: Arc<P>) -> Self {
        Self {
            port,
            base_container: DEFAULT_CONTAINER.to_string(),
            policy: RetryPolicy::default(),
        }
    }

    /// Override the library-wide container selector (e.g. with a selector
    /// for any open dialog or its widgets).
    pub fn with_base_container(mut self, selector: impl Into<String>) -> Self {
        self.base_container = selector.into();
        self
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn port(&self) -> &Arc<P> {
        &self.port
    }

    /// Locate matches for a request. Each call re-snapshots; results are
    /// complete or the call fails, never partial.
    pub async fn locate(&self, request: &SearchRequest) -> Result<LocateResult, ResolveError> {
        info!(
            strategy = request.strategy.name(),
            term = %request.term,
            label = request.label,
            "locate"
        );
        if request.strategy == SearchStrategy::ScriptEvaluated {
            let result = self.port.evaluate_script(&request.term).await?;
            let values = match result {
                Value::Array(items) => items,
                _ => Vec::new(),
            };
            return Ok(LocateResult::ScriptValues(values));
        }

        let (snapshot, container) = self.await_container(request).await?;
        let matches = strategies::run_in_container(&snapshot, container, request)?;
        debug!(matches = matches.len(), "locate complete");
        Ok(LocateResult::Elements(ElementSet::new(snapshot, matches)))
    }

    /// Whether at least `max(position, 1)` matches exist.
    ///
    /// The script strategy returns the truthiness of the script result;
    /// XPath counts live whole-document matches once the container gate
    /// holds both in the snapshot and live.
    pub async fn exists(
        &self,
        request: &SearchRequest,
        position: usize,
    ) -> Result<bool, ResolveError> {
        let count = match request.strategy {
            SearchStrategy::ScriptEvaluated => {
                let result = self.port.evaluate_script(&request.term).await?;
                return Ok(is_truthy(&result));
            }
            SearchStrategy::XPath => {
                let (snapshot, container) = self.await_container(request).await?;
                match bridge::to_handle(self.port.as_ref(), &snapshot, container).await {
                    Ok(_) => self.port.query_live(LiveBy::XPath, &request.term).await?,
                    // A container that vanished between snapshot and live
                    // resolution reads as absence, matching the negative
                    // answer an existence check is for.
                    Err(ResolveError::StaleNode { .. }) => return Ok(false),
                    Err(other) => return Err(other),
                }
            }
            SearchStrategy::CssSelector | SearchStrategy::TextContains | SearchStrategy::Mixed => {
                self.locate(request).await?.len()
            }
        };
        Ok(if position == 0 {
            count > 0
        } else {
            count >= position
        })
    }

    /// Reduce a match set to the currently rendered elements, re-ranked.
    pub async fn filter_displayed(&self, set: ElementSet) -> Result<ElementSet, ResolveError> {
        let kept =
            visibility::filter_displayed(self.port.as_ref(), set.snapshot(), set.node_ids())
                .await?;
        Ok(set.with_matches(kept))
    }

    /// Bridge one match to a live, actionable handle.
    pub async fn handle_for(
        &self,
        set: &ElementSet,
        node: NodeId,
    ) -> Result<ActionableHandle, ResolveError> {
        bridge::to_handle(self.port.as_ref(), set.snapshot(), node).await
    }

    async fn await_container(
        &self,
        request: &SearchRequest,
    ) -> Result<(DomSnapshot, NodeId), ResolveError> {
        let selector_text = request
            .container
            .as_deref()
            .unwrap_or(&self.base_container);
        let selector = SelectorList::parse(selector_text)?;
        polling::await_container(self.port.as_ref(), &selector, selector_text, self.policy).await
    }
}

/// Script-result truthiness: empty containers, zero, empty strings, null
/// and false all read as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

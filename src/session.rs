//! Session facade: one browser session, one locator, action proxies.

use std::sync::Arc;

use dom_snapshot::{structural_path, NodeId};
use element_locator::{
    ActionableHandle, BrowserPort, ClickMode, ElementLocator, ElementSet, LocateResult,
    ResolveError, SearchRequest,
};
use stackpilot_core_types::SessionId;
use tracing::{debug, info};

use crate::config::Config;

/// One automation session over a live browser.
///
/// Thin wrapper over [`ElementLocator`] that adds session identity,
/// optional match logging and the action proxies. Resolution semantics
/// live entirely in the locator.
pub struct Session<P> {
    id: SessionId,
    locator: ElementLocator<P>,
    log_dom: bool,
}

impl<P: BrowserPort> Session<P> {
    pub fn new(port: Arc<P>, config: &Config) -> Self {
        let id = SessionId::new();
        info!(session = %id, container = %config.base_container, "session start");
        Self {
            id,
            locator: ElementLocator::new(port)
                .with_base_container(config.base_container.clone())
                .with_policy(config.wait),
            log_dom: config.log_dom,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn locator(&self) -> &ElementLocator<P> {
        &self.locator
    }

    /// Locate matches for a request; see [`ElementLocator::locate`].
    pub async fn locate(&self, request: &SearchRequest) -> Result<LocateResult, ResolveError> {
        let result = self.locator.locate(request).await?;
        if self.log_dom {
            if let Some(set) = result.elements() {
                for node in set.iter() {
                    debug!(session = %self.id, path = %structural_path(node).as_xpath(), "match");
                }
            }
        }
        Ok(result)
    }

    /// Whether at least `max(position, 1)` matches exist.
    pub async fn exists(
        &self,
        request: &SearchRequest,
        position: usize,
    ) -> Result<bool, ResolveError> {
        self.locator.exists(request, position).await
    }

    /// Reduce a match set to the currently rendered elements, re-ranked.
    pub async fn filter_displayed(&self, set: ElementSet) -> Result<ElementSet, ResolveError> {
        self.locator.filter_displayed(set).await
    }

    /// Bridge one match to a live, actionable handle.
    pub async fn handle_for(
        &self,
        set: &ElementSet,
        node: NodeId,
    ) -> Result<ActionableHandle, ResolveError> {
        self.locator.handle_for(set, node).await
    }

    // Action proxies. Each scrolls first so the target is interactable,
    // then delegates to the port; no resolution logic lives here.

    pub async fn click(
        &self,
        handle: &ActionableHandle,
        mode: ClickMode,
    ) -> Result<(), ResolveError> {
        let port = self.locator.port();
        port.scroll_into_view(&handle.id).await?;
        port.click(&handle.id, mode).await?;
        Ok(())
    }

    /// Two direct clicks in quick succession; falls back to pointer
    /// emulation when the driver rejects the direct form.
    pub async fn double_click(&self, handle: &ActionableHandle) -> Result<(), ResolveError> {
        let port = self.locator.port();
        port.scroll_into_view(&handle.id).await?;
        let direct = async {
            port.click(&handle.id, ClickMode::Direct).await?;
            port.click(&handle.id, ClickMode::Direct).await
        };
        if direct.await.is_err() {
            port.click(&handle.id, ClickMode::Pointer).await?;
            port.click(&handle.id, ClickMode::Pointer).await?;
        }
        Ok(())
    }

    pub async fn send_keys(
        &self,
        handle: &ActionableHandle,
        keys: &str,
    ) -> Result<(), ResolveError> {
        let port = self.locator.port();
        port.scroll_into_view(&handle.id).await?;
        port.send_keys(&handle.id, keys).await?;
        Ok(())
    }

    pub async fn set_focus(&self, handle: &ActionableHandle) -> Result<(), ResolveError> {
        self.locator.port().focus(&handle.id).await?;
        Ok(())
    }

    pub async fn scroll_into_view(&self, handle: &ActionableHandle) -> Result<(), ResolveError> {
        self.locator.port().scroll_into_view(&handle.id).await?;
        Ok(())
    }
}

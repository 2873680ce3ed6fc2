//! Scripted in-memory browser port for resolution tests.

use std::collections::{HashMap, HashSet, VecDeque};

use async_trait::async_trait;
use dom_snapshot::DomSnapshot;
use element_locator::{BrowserPort, ClickMode, LiveBy, PortError};
use parking_lot::Mutex;
use serde_json::Value;
use stackpilot_core_types::{HandleId, NodePath};

/// Fake browser: serves a scripted sequence of page sources and answers
/// live queries from fixed tables. The last page in the sequence sticks.
#[derive(Default)]
pub struct FakeBrowser {
    pages: Mutex<VecDeque<String>>,
    current: Mutex<String>,
    snapshots_taken: Mutex<usize>,
    /// Structural paths (xpath form) that no longer resolve live.
    missing: Mutex<HashSet<String>>,
    /// Structural paths whose live element is hidden.
    hidden: Mutex<HashSet<String>>,
    handles: Mutex<HashMap<HandleId, String>>,
    scripts: Mutex<HashMap<String, Value>>,
    live_counts: Mutex<HashMap<String, usize>>,
    pub actions: Mutex<Vec<String>>,
}

impl FakeBrowser {
    pub fn with_page(html: &str) -> Self {
        let fake = Self::default();
        *fake.current.lock() = html.to_string();
        fake
    }

    /// The n-th snapshot call serves the n-th page; the last page sticks.
    pub fn with_page_sequence(pages: &[&str]) -> Self {
        let fake = Self::default();
        *fake.pages.lock() = pages.iter().map(|p| p.to_string()).collect();
        fake
    }

    pub fn snapshots_taken(&self) -> usize {
        *self.snapshots_taken.lock()
    }

    pub fn mark_missing(&self, xpath: &str) {
        self.missing.lock().insert(xpath.to_string());
    }

    pub fn mark_hidden(&self, xpath: &str) {
        self.hidden.lock().insert(xpath.to_string());
    }

    pub fn stub_script(&self, code: &str, result: Value) {
        self.scripts.lock().insert(code.to_string(), result);
    }

    pub fn stub_live_count(&self, selector: &str, count: usize) {
        self.live_counts.lock().insert(selector.to_string(), count);
    }
}

#[async_trait]
impl BrowserPort for FakeBrowser {
    async fn snapshot(&self) -> Result<DomSnapshot, PortError> {
        *self.snapshots_taken.lock() += 1;
        if let Some(next) = self.pages.lock().pop_front() {
            *self.current.lock() = next;
        }
        let html = self.current.lock().clone();
        Ok(DomSnapshot::parse(&html))
    }

    async fn resolve(&self, path: &NodePath) -> Result<Option<HandleId>, PortError> {
        let xpath = path.as_xpath();
        if self.missing.lock().contains(&xpath) {
            return Ok(None);
        }
        let id = HandleId::new();
        self.handles.lock().insert(id.clone(), xpath);
        Ok(Some(id))
    }

    async fn is_displayed(&self, handle: &HandleId) -> Result<bool, PortError> {
        let xpath = self
            .handles
            .lock()
            .get(handle)
            .cloned()
            .ok_or_else(|| PortError::transport("unknown handle"))?;
        Ok(!self.hidden.lock().contains(&xpath))
    }

    async fn evaluate_script(&self, code: &str) -> Result<Value, PortError> {
        Ok(self
            .scripts
            .lock()
            .get(code)
            .cloned()
            .unwrap_or(Value::Null))
    }

    async fn query_live(&self, _by: LiveBy, selector: &str) -> Result<usize, PortError> {
        Ok(self.live_counts.lock().get(selector).copied().unwrap_or(0))
    }

    async fn click(&self, handle: &HandleId, mode: ClickMode) -> Result<(), PortError> {
        self.actions
            .lock()
            .push(format!("click:{:?}:{}", mode, handle));
        Ok(())
    }

    async fn send_keys(&self, handle: &HandleId, keys: &str) -> Result<(), PortError> {
        self.actions
            .lock()
            .push(format!("send_keys:{}:{}", handle, keys));
        Ok(())
    }

    async fn focus(&self, handle: &HandleId) -> Result<(), PortError> {
        self.actions.lock().push(format!("focus:{}", handle));
        Ok(())
    }

    async fn scroll_into_view(&self, handle: &HandleId) -> Result<(), PortError> {
        self.actions.lock().push(format!("scroll:{}", handle));
        Ok(())
    }
}

//! Facade tests: configuration loading and session wiring.

use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use stackpilot::{
    BrowserPort, ClickMode, Config, DomSnapshot, HandleId, LiveBy, NodePath, PortError,
    SearchRequest, SearchStrategy, Session,
};

const PAGE: &str = r#"<html><body>
    <div class="dialog" id="back" style="z-index:1;">
        <span class="tsay">Back</span>
    </div>
    <div class="dialog" id="front" style="z-index:2;">
        <span class="tsay">Confirm</span>
        <span class="tsay">Cancel</span>
    </div>
</body></html>"#;

/// Minimal static-page port; records actions, never fails.
#[derive(Default)]
struct StaticPage {
    actions: Mutex<Vec<String>>,
}

#[async_trait]
impl BrowserPort for StaticPage {
    async fn snapshot(&self) -> Result<DomSnapshot, PortError> {
        Ok(DomSnapshot::parse(PAGE))
    }

    async fn resolve(&self, _path: &NodePath) -> Result<Option<HandleId>, PortError> {
        Ok(Some(HandleId::new()))
    }

    async fn is_displayed(&self, _handle: &HandleId) -> Result<bool, PortError> {
        Ok(true)
    }

    async fn evaluate_script(&self, _code: &str) -> Result<Value, PortError> {
        Ok(Value::Null)
    }

    async fn query_live(&self, _by: LiveBy, _selector: &str) -> Result<usize, PortError> {
        Ok(0)
    }

    async fn click(&self, _handle: &HandleId, mode: ClickMode) -> Result<(), PortError> {
        self.actions.lock().push(format!("click:{mode:?}"));
        Ok(())
    }

    async fn send_keys(&self, _handle: &HandleId, keys: &str) -> Result<(), PortError> {
        self.actions.lock().push(format!("send_keys:{keys}"));
        Ok(())
    }

    async fn focus(&self, _handle: &HandleId) -> Result<(), PortError> {
        self.actions.lock().push("focus".to_string());
        Ok(())
    }

    async fn scroll_into_view(&self, _handle: &HandleId) -> Result<(), PortError> {
        self.actions.lock().push("scroll".to_string());
        Ok(())
    }
}

#[test]
fn config_loads_from_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "base_container": ".tmodaldialog", "wait": {{ "deadline": "45s" }}, "log_dom": true }}"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.base_container, ".tmodaldialog");
    assert_eq!(config.wait.deadline, Duration::from_secs(45));
    assert!(config.log_dom);
}

#[test]
fn missing_config_file_is_an_error() {
    let err = Config::from_file("/nonexistent/stackpilot.json").unwrap_err();
    assert!(err.to_string().contains("stackpilot.json"));
}

#[tokio::test]
async fn session_resolves_in_the_topmost_dialog() {
    let config = Config {
        base_container: ".dialog".to_string(),
        ..Config::default()
    };
    let session = Session::new(Arc::new(StaticPage::default()), &config);

    let request = SearchRequest::new(".tsay", SearchStrategy::CssSelector);
    let set = session
        .locate(&request)
        .await
        .unwrap()
        .into_elements()
        .unwrap();
    let texts: Vec<String> = set.iter().map(|n| n.text()).collect();
    assert_eq!(texts, vec!["Confirm", "Cancel"]);

    assert!(session.exists(&request, 2).await.unwrap());
    assert!(!session.exists(&request, 3).await.unwrap());
}

#[tokio::test]
async fn click_scrolls_before_delivering() {
    let port = Arc::new(StaticPage::default());
    let session = Session::new(port.clone(), &Config::default());

    let request = SearchRequest::new(".tsay", SearchStrategy::CssSelector)
        .with_container(".dialog");
    let set = session
        .locate(&request)
        .await
        .unwrap()
        .into_elements()
        .unwrap();
    let first = set.node_ids()[0];
    let handle = session.handle_for(&set, first).await.unwrap();

    session.click(&handle, ClickMode::default()).await.unwrap();
    session.send_keys(&handle, "hello").await.unwrap();
    session.set_focus(&handle).await.unwrap();

    let actions = port.actions.lock().clone();
    assert_eq!(
        actions,
        vec![
            "scroll".to_string(),
            "click:Scripted".to_string(),
            "scroll".to_string(),
            "send_keys:hello".to_string(),
            "focus".to_string(),
        ]
    );
}

#[tokio::test]
async fn double_click_delivers_two_direct_clicks() {
    let port = Arc::new(StaticPage::default());
    let session = Session::new(port.clone(), &Config::default());

    let request = SearchRequest::new(".tsay", SearchStrategy::CssSelector)
        .with_container(".dialog");
    let set = session
        .locate(&request)
        .await
        .unwrap()
        .into_elements()
        .unwrap();
    let handle = session.handle_for(&set, set.node_ids()[0]).await.unwrap();

    session.double_click(&handle).await.unwrap();
    let actions = port.actions.lock().clone();
    assert_eq!(
        actions,
        vec![
            "scroll".to_string(),
            "click:Direct".to_string(),
            "click:Direct".to_string(),
        ]
    );
}

//! Stackpilot: deterministic UI-test element resolution for web
//! applications built around stacked, overlapping dialogs.
//!
//! The crate snapshots the live page, ranks competing dialog containers by
//! stacking order, resolves elements inside the winning container with one
//! of five search strategies, and bridges matches back to live handles for
//! interaction. The browser itself sits behind the [`BrowserPort`] trait,
//! so any driver that can serve page source, evaluate scripts and act on
//! elements can back a [`Session`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use stackpilot::{Config, SearchRequest, SearchStrategy, Session};
//! # use stackpilot::BrowserPort;
//! # async fn demo<P: BrowserPort>(port: Arc<P>) -> anyhow::Result<()> {
//! let session = Session::new(port, &Config::default());
//! let request = SearchRequest::new("Save", SearchStrategy::TextContains)
//!     .with_container(".dialog");
//! if session.exists(&request, 0).await? {
//!     let set = session.locate(&request).await?.into_elements().unwrap();
//!     let set = session.filter_displayed(set).await?;
//!     # let _ = set;
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod session;

pub use config::Config;
pub use session::Session;

pub use dom_snapshot::{structural_path, DomSnapshot, NodeId, NodeRef, SelectorList};
pub use element_locator::{
    ActionableHandle, BrowserPort, ClickMode, ElementLocator, ElementSet, LiveBy, LocateResult,
    PortError, ResolveError, RetryPolicy, SearchRequest, SearchStrategy, DEFAULT_CONTAINER,
};
pub use stackpilot_core_types::{HandleId, NodePath, PathStep, SessionId};

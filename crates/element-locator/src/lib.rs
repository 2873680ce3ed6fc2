//! Deterministic element resolution across stacked dialog containers.
//!
//! The core reconciles an immutable page snapshot with the live, mutating
//! browser document: it ranks competing UI layers by stacking order, runs one
//! of five search strategies inside the winning container, and bridges
//! snapshot nodes back to live, actionable handles. Callers reach the browser
//! only through the [`BrowserPort`] boundary.

pub mod bridge;
pub mod container;
pub mod errors;
pub mod label;
pub mod locator;
pub mod polling;
pub mod ports;
pub mod strategies;
pub mod types;
pub mod visibility;

pub use bridge::*;
pub use errors::*;
pub use locator::*;
pub use polling::*;
pub use ports::*;
pub use types::*;

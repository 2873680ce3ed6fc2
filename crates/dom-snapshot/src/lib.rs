//! Immutable DOM snapshots for element resolution.
//!
//! A [`DomSnapshot`] is a parsed copy of the page structure captured at one
//! instant. It is never mutated and never cached across calls: the live page
//! keeps changing underneath it, so every resolution pass starts from a fresh
//! capture. The crate also carries the two pieces of derived structure the
//! resolution core needs: a CSS selector subset tuned to dialog-shaped
//! applications and structural paths that bridge snapshot nodes back to the
//! live document.

pub mod errors;
pub mod model;
pub mod parse;
pub mod path;
pub mod select;

pub use errors::SelectorError;
pub use model::{z_index_from_style, DomNode, DomSnapshot, NodeId, NodeRef};
pub use path::structural_path;
pub use select::SelectorList;

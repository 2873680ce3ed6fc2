//! Selector parsing errors.

use thiserror::Error;

/// Rejection of a selector string the subset engine cannot express.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unsupported selector syntax {fragment:?} in {selector:?}")]
    Unsupported { selector: String, fragment: String },
}

impl SelectorError {
    pub fn unsupported(selector: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self::Unsupported {
            selector: selector.into(),
            fragment: fragment.into(),
        }
    }
}

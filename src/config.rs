//! Runtime configuration.
//!
//! Loaded once at session start from a JSON document or file; every field
//! has a default so an empty object is a valid configuration.

use std::path::Path;

use anyhow::Context;
use element_locator::RetryPolicy;
use serde::{Deserialize, Serialize};

/// Session-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Library-wide container selector used when a request carries none.
    pub base_container: String,

    /// Container polling policy (deadline and pacing interval).
    pub wait: RetryPolicy,

    /// Log the structural paths of every match at debug level.
    pub log_dom: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_container: "body".to_string(),
            wait: RetryPolicy::default(),
            log_dom: false,
        }
    }
}

impl Config {
    /// Parse a configuration from a JSON document.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("invalid configuration document")
    }

    /// Load a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading configuration file {}", path.display()))?;
        Self::from_json(&text)
    }
}

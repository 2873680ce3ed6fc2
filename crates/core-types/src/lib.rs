//! Shared primitives for the stackpilot resolution crates.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of one browser session. One session drives one linear
/// operation sequence; ids are only used for log correlation.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque reference to a live element held by the browser boundary.
///
/// Valid for one interaction; the live document may diverge from the
/// snapshot the handle was derived from at any time after resolution.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct HandleId(pub String);

impl HandleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for HandleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One step of a structural path: a tag name plus the 1-based position
/// among same-tag element siblings. `index` is `None` when the element
/// is the only sibling with that tag.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PathStep {
    pub tag: String,
    pub index: Option<usize>,
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}[{}]", self.tag, i),
            None => f.write_str(&self.tag),
        }
    }
}

/// Tag/position chain from the document root identifying one snapshot
/// node. Resolvable against the live document as long as the document
/// has not mutated since the snapshot was captured.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct NodePath(pub Vec<PathStep>);

impl NodePath {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the path as an absolute XPath expression.
    pub fn as_xpath(&self) -> String {
        let mut out = String::new();
        for step in &self.0 {
            out.push('/');
            out.push_str(&step.to_string());
        }
        out
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_xpath())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_renders_as_xpath() {
        let path = NodePath(vec![
            PathStep {
                tag: "html".into(),
                index: None,
            },
            PathStep {
                tag: "body".into(),
                index: None,
            },
            PathStep {
                tag: "div".into(),
                index: Some(2),
            },
        ]);
        assert_eq!(path.as_xpath(), "/html/body/div[2]");
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(HandleId::new(), HandleId::new());
        assert_ne!(SessionId::new(), SessionId::new());
    }
}

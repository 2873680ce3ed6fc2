//! CSS selector subset for dialog-shaped applications.
//!
//! Supports exactly what the framework's container and widget selectors use:
//! tag, `*`, `#id`, `.class`, `[attr]`, `[attr=value]` compounds, descendant
//! and child combinators, and comma-separated groups. Anything beyond that
//! (pseudo-classes, sibling combinators) is rejected at parse time rather
//! than silently matching nothing.

use crate::errors::SelectorError;
use crate::model::{DomSnapshot, NodeId, NodeRef};

/// Parsed comma-separated selector group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<ComplexSelector>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct ComplexSelector {
    parts: Vec<Part>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Part {
    /// Relation of this compound to the one on its left; the first part's
    /// combinator is the implicit descendant relation to the search scope.
    combinator: Combinator,
    compound: Compound,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Compound {
    /// Lowercased tag name; `None` matches any element (`*` or omitted tag).
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
}

impl SelectorList {
    pub fn parse(input: &str) -> Result<SelectorList, SelectorError> {
        let mut selectors = Vec::new();
        for group in split_groups(input) {
            let group = group.trim();
            if group.is_empty() {
                return Err(SelectorError::Empty);
            }
            selectors.push(parse_complex(input, group)?);
        }
        if selectors.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(SelectorList { selectors })
    }

    /// Whether the node matches any selector of the group. Ancestry checks
    /// run against the full document, as the matches of a scoped select are
    /// already confined to the scope's descendants.
    pub fn matches(&self, node: NodeRef<'_>) -> bool {
        node.is_element()
            && self
                .selectors
                .iter()
                .any(|selector| matches_chain(&selector.parts, node))
    }
}

impl DomSnapshot {
    /// All matching elements in document order.
    pub fn select(&self, selectors: &SelectorList) -> Vec<NodeId> {
        self.iter()
            .filter(|node| selectors.matches(*node))
            .map(|node| node.id)
            .collect()
    }
}

impl<'a> NodeRef<'a> {
    /// Matching strict descendants of this node, in document order.
    pub fn select(&self, selectors: &SelectorList) -> Vec<NodeId> {
        self.descendants()
            .filter(|node| selectors.matches(*node))
            .map(|node| node.id)
            .collect()
    }
}

fn matches_chain(parts: &[Part], node: NodeRef<'_>) -> bool {
    let (last, prefix) = match parts.split_last() {
        Some(split) => split,
        None => return false,
    };
    if !last.compound.matches(node) {
        return false;
    }
    if prefix.is_empty() {
        return true;
    }
    match last.combinator {
        Combinator::Child => node
            .parent()
            .is_some_and(|parent| matches_chain(prefix, parent)),
        Combinator::Descendant => node
            .ancestors()
            .any(|ancestor| matches_chain(prefix, ancestor)),
    }
}

impl Compound {
    fn matches(&self, node: NodeRef<'_>) -> bool {
        if !node.is_element() {
            return false;
        }
        if let Some(tag) = &self.tag {
            if node.tag() != Some(tag.as_str()) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if node.attr("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let class_attr = node.attr("class").unwrap_or("");
            let present: Vec<&str> = class_attr.split_whitespace().collect();
            if !self.classes.iter().all(|c| present.contains(&c.as_str())) {
                return false;
            }
        }
        for (name, expected) in &self.attrs {
            match (node.attr(name), expected) {
                (Some(actual), Some(expected)) if actual == expected.as_str() => {}
                (Some(_), None) => {}
                _ => return false,
            }
        }
        true
    }
}

/// Split on top-level commas, leaving bracketed attribute values intact.
fn split_groups(input: &str) -> Vec<&str> {
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (pos, ch) in input.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                groups.push(&input[start..pos]);
                start = pos + 1;
            }
            _ => {}
        }
    }
    groups.push(&input[start..]);
    groups
}

fn parse_complex(whole: &str, group: &str) -> Result<ComplexSelector, SelectorError> {
    let mut parts = Vec::new();
    let mut combinator = Combinator::Descendant;
    let mut pending_child = false;

    for token in tokenize(group) {
        if token == ">" {
            if parts.is_empty() || pending_child {
                return Err(SelectorError::unsupported(whole, ">"));
            }
            pending_child = true;
            continue;
        }
        if pending_child {
            combinator = Combinator::Child;
            pending_child = false;
        }
        parts.push(Part {
            combinator,
            compound: parse_compound(whole, token)?,
        });
        combinator = Combinator::Descendant;
    }

    if pending_child || parts.is_empty() {
        return Err(SelectorError::Empty);
    }
    Ok(ComplexSelector { parts })
}

/// Split a single complex selector into compound tokens and `>` markers.
fn tokenize(group: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;
    for (pos, ch) in group.char_indices() {
        match ch {
            '[' => {
                depth += 1;
                start.get_or_insert(pos);
            }
            ']' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    tokens.push(&group[s..pos]);
                }
            }
            '>' if depth == 0 => {
                if let Some(s) = start.take() {
                    tokens.push(&group[s..pos]);
                }
                tokens.push(">");
            }
            _ => {
                start.get_or_insert(pos);
            }
        }
    }
    if let Some(s) = start {
        tokens.push(&group[s..]);
    }
    tokens
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

fn parse_compound(whole: &str, token: &str) -> Result<Compound, SelectorError> {
    let mut compound = Compound::default();
    let mut rest = token;
    let mut saw_any = false;

    // Leading tag name or universal selector.
    if let Some(stripped) = rest.strip_prefix('*') {
        rest = stripped;
        saw_any = true;
    } else {
        let end = rest.find(|ch| !is_ident_char(ch)).unwrap_or(rest.len());
        if end > 0 {
            compound.tag = Some(rest[..end].to_ascii_lowercase());
            rest = &rest[end..];
            saw_any = true;
        }
    }

    while !rest.is_empty() {
        let ch = rest.chars().next().unwrap_or_default();
        match ch {
            '#' | '.' => {
                let body = &rest[1..];
                let end = body.find(|c| !is_ident_char(c)).unwrap_or(body.len());
                if end == 0 {
                    return Err(SelectorError::unsupported(whole, rest));
                }
                let name = body[..end].to_string();
                if ch == '#' {
                    compound.id = Some(name);
                } else {
                    compound.classes.push(name);
                }
                rest = &body[end..];
            }
            '[' => {
                let close = rest
                    .find(']')
                    .ok_or_else(|| SelectorError::unsupported(whole, rest))?;
                let inner = &rest[1..close];
                let (name, value) = match inner.split_once('=') {
                    Some((name, value)) => {
                        let value = value.trim_matches(|c| c == '"' || c == '\'');
                        (name.trim(), Some(value.to_string()))
                    }
                    None => (inner.trim(), None),
                };
                if name.is_empty() {
                    return Err(SelectorError::unsupported(whole, inner));
                }
                compound.attrs.push((name.to_ascii_lowercase(), value));
                rest = &rest[close + 1..];
            }
            _ => return Err(SelectorError::unsupported(whole, rest)),
        }
        saw_any = true;
    }

    if !saw_any {
        return Err(SelectorError::Empty);
    }
    Ok(compound)
}

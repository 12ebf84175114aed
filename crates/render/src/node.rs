//! The headless view node produced by realizing a component tree.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A realized view: what a platform backend would turn into real widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewNode {
    /// Widget kind, e.g. `"stack"` or `"label"`.
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Widget-specific configuration, already materialized.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    pub fn new(kind: impl Into<String>) -> Self {
        ViewNode {
            kind: kind.into(),
            title: None,
            properties: Map::new(),
            children: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<ViewNode>) -> Self {
        self.children = children;
        self
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(ViewNode::count).sum::<usize>()
    }

    /// Render an indented, human-readable outline of the subtree.
    ///
    /// ```text
    /// stack "Home" {orientation=vertical, spacing=10}
    ///   label {text="hello"}
    /// ```
    pub fn to_outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(0, &mut out);
        out
    }

    fn write_outline(&self, depth: usize, out: &mut String) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str(&self.kind);
        if let Some(title) = &self.title {
            let _ = write!(out, " {:?}", title);
        }
        if !self.properties.is_empty() {
            let props: Vec<String> = self
                .properties
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            let _ = write!(out, " {{{}}}", props.join(", "));
        }
        out.push('\n');
        for child in &self.children {
            child.write_outline(depth + 1, out);
        }
    }
}

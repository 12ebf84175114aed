//! Leaf widgets. Each is a single component whose builder reads its
//! content straight from the metadata; missing mandatory keys mean the
//! widget does not realize.

use composer_core::{Component, ComponentMeta, Meta};

use crate::node::ViewNode;

/// A text label. Requires `text`.
pub fn label(meta: Option<Meta>) -> Component<ViewNode> {
    Component::single(build_label, meta)
}

fn build_label(meta: Option<&dyn ComponentMeta>) -> Option<ViewNode> {
    let text = meta?.get_str("text")?;
    Some(ViewNode::new("label").with_property("text", text))
}

/// A colored tile with a caption. Requires `text`; `color` is an optional
/// hex string.
pub fn tile(meta: Option<Meta>) -> Component<ViewNode> {
    Component::single(build_tile, meta)
}

fn build_tile(meta: Option<&dyn ComponentMeta>) -> Option<ViewNode> {
    let meta = meta?;
    let mut node = ViewNode::new("tile").with_property("text", meta.get_str("text")?);
    if let Some(color) = meta.get_str("color") {
        node = node.with_property("color", color);
    }
    Some(node)
}

/// A button. Requires `title`.
pub fn button(meta: Option<Meta>) -> Component<ViewNode> {
    Component::single(build_button, meta)
}

fn build_button(meta: Option<&dyn ComponentMeta>) -> Option<ViewNode> {
    let title = meta?.get_str("title")?;
    Some(ViewNode::new("button").with_title(title))
}

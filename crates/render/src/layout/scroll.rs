use composer_core::{Component, ComponentMeta, Meta};

use crate::node::ViewNode;

/// A scrolling container around a single child.
///
/// The container is always produced; it is simply empty when the child
/// does not realize. A `title` in the metadata is carried over.
pub fn scroll(child: Component<ViewNode>, meta: Option<Meta>) -> Component<ViewNode> {
    Component::wrapper(build_scroll, child, meta)
}

fn build_scroll(child: &Component<ViewNode>, meta: Option<&dyn ComponentMeta>) -> Option<ViewNode> {
    let mut node = ViewNode::new("scroll");
    if let Some(title) = meta.and_then(|m| m.get_str("title")) {
        node = node.with_title(title);
    }
    Some(node.with_children(child.realize().into_iter().collect()))
}

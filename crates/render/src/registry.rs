use composer_core::JsonFactory;

use crate::layout::{scroll, stack, tab_bar};
use crate::node::ViewNode;
use crate::widgets::{button, label, tile};

/// Type tags registered by [`register_defaults`].
pub const DEFAULT_TYPES: [&str; 6] = ["button", "label", "scroll", "stack", "tabbar", "tile"];

/// Register the standard layouts and widgets under their type tags.
///
/// Existing registrations for the same tags are replaced, so hosts that
/// want to override a default should register after calling this.
pub fn register_defaults(factory: &mut JsonFactory<ViewNode>) {
    factory.register_cluster("stack", stack);
    factory.register_cluster("tabbar", tab_bar);
    factory.register_wrapper("scroll", scroll);
    factory.register_single("label", label);
    factory.register_single("tile", tile);
    factory.register_single("button", button);
}

/// A factory with [`register_defaults`] already applied.
pub fn default_factory() -> JsonFactory<ViewNode> {
    let mut factory = JsonFactory::new();
    register_defaults(&mut factory);
    factory
}

//! composer-render: a headless node model plus the standard layouts and
//! widgets for the composer engine.
//!
//! Components built here realize into [`ViewNode`] trees. A platform
//! backend would walk those trees to create real widgets; the CLI prints
//! them.

pub mod layout;
pub mod node;
pub mod registry;
pub mod widgets;

pub use layout::{
    scroll, stack, tab_bar, Orientation, StackConfig, TabBarConfig, TabConfig,
};
pub use node::ViewNode;
pub use registry::{default_factory, register_defaults, DEFAULT_TYPES};
pub use widgets::{button, label, tile};

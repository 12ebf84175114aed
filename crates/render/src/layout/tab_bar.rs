use composer_core::{reflective_meta, Component, ComponentMeta, FromComponentMeta, Meta};
use serde::Serialize;
use tracing::debug;

use crate::node::ViewNode;

/// Per-tab configuration, read from each child's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabConfig {
    pub title: String,
    pub icon_name: String,
}

reflective_meta!(TabConfig);

impl TabConfig {
    pub fn new(title: impl Into<String>, icon_name: impl Into<String>) -> Self {
        TabConfig {
            title: title.into(),
            icon_name: icon_name.into(),
        }
    }
}

impl FromComponentMeta for TabConfig {
    fn from_meta(meta: &dyn ComponentMeta) -> Option<Self> {
        let title = meta.get_str("title")?;
        let icon_name = meta.get_str("icon_name")?;
        Some(TabConfig { title, icon_name })
    }
}

/// Tab bar configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabBarConfig {
    pub selected_index: usize,
}

reflective_meta!(TabBarConfig);

impl FromComponentMeta for TabBarConfig {
    fn from_meta(meta: &dyn ComponentMeta) -> Option<Self> {
        let selected_index = usize::try_from(meta.get_u64("selected_index")?).ok()?;
        Some(TabBarConfig { selected_index })
    }
}

/// A tab bar cluster: one tab per child.
///
/// A child becomes a tab only if it realizes *and* its metadata
/// materializes a [`TabConfig`]. The tab bar's own metadata may carry a
/// [`TabBarConfig`]; an out-of-range `selected_index` is ignored.
pub fn tab_bar(children: Vec<Component<ViewNode>>, meta: Option<Meta>) -> Component<ViewNode> {
    Component::cluster(build_tab_bar, children, meta)
}

fn build_tab_bar(
    children: &[Component<ViewNode>],
    meta: Option<&dyn ComponentMeta>,
) -> Option<ViewNode> {
    let tabs: Vec<ViewNode> = children
        .iter()
        .filter_map(|child| {
            let view = child.realize()?;
            let config = match TabConfig::materialize(child.meta()) {
                Some(config) => config,
                None => {
                    debug!(kind = %view.kind, "tab child has no tab configuration, skipping");
                    return None;
                }
            };
            Some(
                view.with_title(config.title)
                    .with_property("icon_name", config.icon_name),
            )
        })
        .collect();

    let mut node = ViewNode::new("tabbar");
    if let Some(config) = TabBarConfig::materialize(meta) {
        if config.selected_index < tabs.len() {
            node = node.with_property("selected_index", config.selected_index);
        }
    }
    Some(node.with_children(tabs))
}

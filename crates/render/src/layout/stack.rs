use composer_core::{reflective_meta, Component, ComponentMeta, FromComponentMeta, Meta};
use serde::Serialize;

use super::Orientation;
use crate::node::ViewNode;

/// Stack configuration.
///
/// Every field has a default, so materialization from any metadata
/// succeeds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackConfig {
    /// Title of the stack, none by default.
    pub title: Option<String>,
    /// Space between children. Default 10.
    pub spacing: f64,
    /// Vertical by default: a vertical stack is a column, a horizontal
    /// stack is a row.
    pub orientation: Orientation,
    /// Whether children are stretched to the stack's width instead of
    /// keeping their own intrinsic width. Default false.
    pub preserve_parent_width: bool,
    /// Hex color string. Default white.
    pub background_color: String,
}

reflective_meta!(StackConfig);

impl StackConfig {
    pub const DEFAULT_SPACING: f64 = 10.0;
    pub const DEFAULT_BACKGROUND: &'static str = "#FFFFFF";
}

impl Default for StackConfig {
    fn default() -> Self {
        StackConfig {
            title: None,
            spacing: Self::DEFAULT_SPACING,
            orientation: Orientation::default(),
            preserve_parent_width: false,
            background_color: Self::DEFAULT_BACKGROUND.to_string(),
        }
    }
}

impl FromComponentMeta for StackConfig {
    fn from_meta(meta: &dyn ComponentMeta) -> Option<Self> {
        let defaults = StackConfig::default();
        let orientation = meta
            .get_str("orientation")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(defaults.orientation);
        Some(StackConfig {
            title: meta.get_str("title"),
            spacing: meta.get_f64("spacing").unwrap_or(defaults.spacing),
            orientation,
            preserve_parent_width: meta
                .get_bool("preserve_parent_width")
                .unwrap_or(defaults.preserve_parent_width),
            background_color: meta
                .get_str("background_color")
                .unwrap_or(defaults.background_color),
        })
    }
}

/// A stack cluster: lays out its realized children along one axis.
/// Children that do not realize are left out.
pub fn stack(children: Vec<Component<ViewNode>>, meta: Option<Meta>) -> Component<ViewNode> {
    Component::cluster(build_stack, children, meta)
}

fn build_stack(
    children: &[Component<ViewNode>],
    meta: Option<&dyn ComponentMeta>,
) -> Option<ViewNode> {
    let config = StackConfig::materialize(meta).unwrap_or_default();
    let views: Vec<ViewNode> = children.iter().filter_map(Component::realize).collect();

    let mut node = ViewNode::new("stack")
        .with_property("spacing", config.spacing)
        .with_property("orientation", config.orientation.as_str())
        .with_property("preserve_parent_width", config.preserve_parent_width)
        .with_property("background_color", config.background_color);
    if let Some(title) = config.title {
        node = node.with_title(title);
    }
    Some(node.with_children(views))
}

#[cfg(test)]
mod tests {
    use super::*;
    use composer_core::MapMeta;
    use serde_json::json;
    use std::rc::Rc;

    fn meta(value: serde_json::Value) -> Meta {
        MapMeta::from_value(&value).unwrap().into_shared()
    }

    #[test]
    fn defaults_apply_to_missing_keys() {
        let config = StackConfig::materialize(Some(meta(json!({})).as_ref())).unwrap();
        assert_eq!(config, StackConfig::default());
    }

    #[test]
    fn reads_every_key() {
        let m = meta(json!({
            "title": "Test",
            "spacing": 4,
            "orientation": "horizontal",
            "preserve_parent_width": true,
            "background_color": "#0000FF"
        }));
        let config = StackConfig::materialize(Some(m.as_ref())).unwrap();
        assert_eq!(config.title.as_deref(), Some("Test"));
        assert_eq!(config.spacing, 4.0);
        assert_eq!(config.orientation, Orientation::Horizontal);
        assert!(config.preserve_parent_width);
        assert_eq!(config.background_color, "#0000FF");
    }

    #[test]
    fn unknown_orientation_falls_back_to_vertical() {
        let m = meta(json!({"orientation": "diagonal"}));
        let config = StackConfig::materialize(Some(m.as_ref())).unwrap();
        assert_eq!(config.orientation, Orientation::Vertical);
    }

    #[test]
    fn typed_config_is_reflectively_readable() {
        let config = StackConfig {
            orientation: Orientation::Horizontal,
            ..StackConfig::default()
        };
        assert_eq!(config.get_str("orientation").as_deref(), Some("horizontal"));
        assert_eq!(config.lookup("title"), None);
        let shared: Meta = Rc::new(config.clone());
        assert_eq!(StackConfig::materialize(Some(shared.as_ref())), Some(config));
    }

    #[test]
    fn stack_realizes_children_in_order() {
        let leaf = |text: &'static str| {
            Component::single(move |_| Some(ViewNode::new("label").with_title(text)), None)
        };
        let hidden = Component::single(|_| None, None);
        let c = stack(vec![leaf("a"), hidden, leaf("b")], Some(meta(json!({"title": "T"}))));
        let node = c.realize().unwrap();
        assert_eq!(node.kind, "stack");
        assert_eq!(node.title.as_deref(), Some("T"));
        let titles: Vec<_> = node.children.iter().map(|n| n.title.clone().unwrap()).collect();
        assert_eq!(titles, vec!["a", "b"]);
        assert_eq!(node.property("spacing"), Some(&json!(10.0)));
    }
}

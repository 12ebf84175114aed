//! End-to-end compilation and realization of documents.
//!
//! Builds a small string-rendering host on top of the factory and checks
//! the documented behaviours: graceful dropping of unregistered types,
//! rule gating, and the hard failures for mandatory keys.

use std::cell::RefCell;
use std::rc::Rc;

use composer_core::{Component, ComponentKind, ComponentMeta, FactoryError, JsonFactory, Rule};
use serde_json::json;

/// Renders nodes as `type(child,child)` strings.
fn tagged_cluster(
    tag: &'static str,
) -> impl Fn(Vec<Component<String>>, Option<composer_core::Meta>) -> Component<String> {
    move |children, meta| {
        Component::cluster(
            move |children, _| {
                let parts: Vec<String> = children.iter().filter_map(Component::realize).collect();
                Some(format!("{}({})", tag, parts.join(",")))
            },
            children,
            meta,
        )
    }
}

fn label_factory(meta: Option<composer_core::Meta>) -> Component<String> {
    Component::single(
        |meta| {
            let text = meta
                .and_then(|m| m.get_str("text"))
                .unwrap_or_else(|| "label".to_string());
            Some(text)
        },
        meta,
    )
}

fn app_structure() -> serde_json::Value {
    json!({
        "structure": {
            "type": "tabbar",
            "meta": {"selected_index": 0},
            "children": [
                {
                    "type": "stack",
                    "meta": {"title": "first"},
                    "children": [{"type": "table_view"}]
                },
                {
                    "type": "stack",
                    "meta": {"title": "second"},
                    "children": [
                        {"type": "label", "meta": {"text": "hello"}},
                        {"type": "stack", "children": [{"type": "button"}]},
                        {"type": "label", "meta": {"text": "admin"}, "rule": "is_admin"}
                    ]
                }
            ]
        }
    })
}

#[test]
fn empty_registry_yields_nothing() {
    let factory: JsonFactory<String> = JsonFactory::new();
    let component = factory.make_component(&app_structure()).unwrap();
    assert!(component.is_none());
}

#[test]
fn only_registered_clusters_are_built() {
    let mut factory = JsonFactory::new();
    factory.register_cluster("tabbar", tagged_cluster("tabbar"));
    let root = factory.make_component(&app_structure()).unwrap().unwrap();
    assert_eq!(root.kind(), ComponentKind::Cluster);
    assert!(root.children().is_empty());
    assert_eq!(root.realize().as_deref(), Some("tabbar()"));
}

#[test]
fn nested_clusters_drop_unregistered_leaves() {
    let mut factory = JsonFactory::new();
    factory.register_cluster("tabbar", tagged_cluster("tabbar"));
    factory.register_cluster("stack", tagged_cluster("stack"));
    let root = factory.make_component(&app_structure()).unwrap().unwrap();

    assert_eq!(root.children().len(), 2);
    let first = &root.children()[0];
    let second = &root.children()[1];
    assert!(first.children().is_empty());
    // the nested stack survives, the labels and button do not
    assert_eq!(second.children().len(), 1);
    assert_eq!(
        root.realize().as_deref(),
        Some("tabbar(stack(),stack(stack()))")
    );
}

#[test]
fn registered_leaves_are_all_rendered_without_rules() {
    let mut factory = JsonFactory::new();
    factory.register_cluster("tabbar", tagged_cluster("tabbar"));
    factory.register_cluster("stack", tagged_cluster("stack"));
    factory.register_single("label", label_factory);
    factory.register_single("button", |meta| {
        Component::single(|_| Some("button".to_string()), meta)
    });
    factory.register_single("table_view", |meta| {
        Component::single(|_| Some("table".to_string()), meta)
    });

    let root = factory.make_component(&app_structure()).unwrap().unwrap();
    let second = &root.children()[1];
    assert_eq!(root.children()[0].children().len(), 1);
    assert_eq!(second.children().len(), 3);
    // "is_admin" is not registered, so the last label is not gated
    assert_eq!(second.children()[2].kind(), ComponentKind::Single);
    assert_eq!(
        root.realize().as_deref(),
        Some("tabbar(stack(table),stack(hello,stack(button),admin))")
    );
}

#[test]
fn end_to_end_label_dropped_under_stack() {
    let mut factory = JsonFactory::new();
    factory.register_cluster("tabbar", tagged_cluster("tabbar"));
    factory.register_cluster("stack", tagged_cluster("stack"));
    let doc = json!({
        "structure": {
            "type": "tabbar",
            "children": [{"type": "stack", "children": [{"type": "label"}]}]
        }
    });
    let root = factory.make_component(&doc).unwrap().unwrap();
    assert_eq!(root.kind(), ComponentKind::Cluster);
    assert_eq!(root.children().len(), 1);
    assert_eq!(root.children()[0].kind(), ComponentKind::Cluster);
    assert!(root.children()[0].children().is_empty());
}

#[test]
fn false_rule_hides_node_but_exposes_meta() {
    let mut factory = JsonFactory::new();
    factory.register_single("label", label_factory);
    factory.register_rule("is_admin", || false);
    let doc = json!({
        "structure": {"type": "label", "meta": {"text": "secret"}, "rule": "is_admin"}
    });
    let root = factory.make_component(&doc).unwrap().unwrap();
    assert_eq!(root.kind(), ComponentKind::Rule);
    assert!(root.realize().is_none());
    assert_eq!(
        root.meta().and_then(|m| m.get_str("text")).as_deref(),
        Some("secret")
    );
}

#[test]
fn gated_children_follow_their_rules() {
    let admin = Rc::new(RefCell::new(false));
    let mut factory = JsonFactory::new();
    factory.register_cluster("stack", tagged_cluster("stack"));
    factory.register_single("label", label_factory);
    let flag = Rc::clone(&admin);
    factory.register_rule("is_admin", move || *flag.borrow());
    factory.register_rule("beta", || true);

    let doc = json!({
        "structure": {
            "type": "stack",
            "children": [
                {"type": "label", "meta": {"text": "public"}},
                {"type": "label", "meta": {"text": "admin"}, "rule": "is_admin"},
                {"type": "label", "meta": {"text": "beta-admin"},
                 "rule": {"AND": ["beta", "is_admin"]}},
                {"type": "label", "meta": {"text": "guest"}, "rule": {"NOT": "is_admin"}}
            ]
        }
    });
    let root = factory.make_component(&doc).unwrap().unwrap();
    assert_eq!(root.realize().as_deref(), Some("stack(public,guest)"));

    // realization is re-evaluated on every call
    *admin.borrow_mut() = true;
    assert_eq!(root.realize().as_deref(), Some("stack(public,admin,beta-admin)"));
}

#[test]
fn gated_stack_counts_its_own_children() {
    let mut factory = JsonFactory::new();
    factory.register_cluster("stack", tagged_cluster("stack"));
    factory.register_single("label", label_factory);
    factory.register_rule("never", || false);
    let doc = json!({
        "structure": {
            "type": "stack",
            "rule": "never",
            "children": [
                {"type": "label", "meta": {"text": "a"}},
                {"type": "label", "meta": {"text": "b"}},
                {"type": "label", "meta": {"text": "c"}}
            ]
        }
    });
    let root = factory.make_component(&doc).unwrap().unwrap();
    assert_eq!(root.kind(), ComponentKind::Rule);
    assert_eq!(root.children().len(), 3);
    let stack = root.gated_component().unwrap();
    assert_eq!(stack.kind(), ComponentKind::Cluster);
    assert_eq!(stack.children().len(), 3);
    assert!(root.realize().is_none());
}

#[test]
fn short_operand_lists_leave_nodes_ungated() {
    let mut factory = JsonFactory::new();
    factory.register_single("label", label_factory);
    factory.register_rule("never", || false);
    let doc = json!({
        "structure": {"type": "label", "meta": {"text": "shown"}, "rule": {"AND": "never"}}
    });
    let root = factory.make_component(&doc).unwrap().unwrap();
    assert!(root.rule().is_none());
    assert_eq!(root.realize().as_deref(), Some("shown"));
}

#[test]
fn wrapper_documents() {
    let mut factory = JsonFactory::new();
    factory.register_single("label", label_factory);
    factory.register_wrapper("scroll", |child, meta| {
        Component::wrapper(
            |child, _| Some(format!("scroll[{}]", child.realize().unwrap_or_default())),
            child,
            meta,
        )
    });
    factory.register_rule("never", || false);

    let doc = json!({
        "structure": {
            "type": "scroll",
            "children": [{"type": "label", "meta": {"text": "body"}, "rule": "never"}]
        }
    });
    let root = factory.make_component(&doc).unwrap().unwrap();
    assert_eq!(root.kind(), ComponentKind::Wrapper);
    // the wrapper still renders a container around a hidden child
    assert_eq!(root.realize().as_deref(), Some("scroll[]"));
}

#[test]
fn typed_construction_matches_compiled_tree() {
    let built = Component::gated(Rule::not(Rule::constant(true)), label_factory(None));
    assert!(built.realize().is_none());
    assert!(built.meta().is_none());
}

#[test]
fn missing_mandatory_keys() {
    let mut factory: JsonFactory<String> = JsonFactory::new();
    factory.register_single("label", label_factory);

    let err = factory.make_component(&json!({"type": "label"})).unwrap_err();
    assert_eq!(err.missing_key(), Some("structure"));
    assert!(err.to_string().contains("structure"));

    let err = factory
        .make_component(&json!({"structure": {"meta": {}}}))
        .unwrap_err();
    assert!(matches!(err, FactoryError::MissingKey { ref key, .. } if key == "type"));
}

#[test]
fn compile_from_text() {
    let mut factory = JsonFactory::new();
    factory.register_single("label", label_factory);
    let root = factory
        .make_component_from_str(r#"{"structure": {"type": "label", "meta": {"text": "t"}}}"#)
        .unwrap()
        .unwrap();
    assert_eq!(root.realize().as_deref(), Some("t"));
}

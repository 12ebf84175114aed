//! The component algebra.
//!
//! A [`Component`] describes a node of a view hierarchy without building
//! it. Concrete nodes of the host's type `N` are produced on demand by
//! [`Component::realize`], which invokes the builders captured at
//! construction time. Nothing is cached: every call re-runs the builders.

use std::fmt;
use std::rc::Rc;

use crate::meta::{ComponentMeta, Meta};
use crate::rule::Rule;

/// Builds a leaf node from its metadata. `None` means "do not render".
pub type SingleBuilder<N> = Rc<dyn Fn(Option<&dyn ComponentMeta>) -> Option<N>>;

/// Builds a node that embeds exactly one child. The builder receives the
/// child *component* and decides itself whether and how to realize it.
pub type WrapperBuilder<N> = Rc<dyn Fn(&Component<N>, Option<&dyn ComponentMeta>) -> Option<N>>;

/// Builds a node that lays out zero or more children. Children that do not
/// realize are expected to be skipped by the builder.
pub type ClusterBuilder<N> = Rc<dyn Fn(&[Component<N>], Option<&dyn ComponentMeta>) -> Option<N>>;

/// The variant of a component, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Single,
    Wrapper,
    Cluster,
    Rule,
}

impl ComponentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Single => "single",
            ComponentKind::Wrapper => "wrapper",
            ComponentKind::Cluster => "cluster",
            ComponentKind::Rule => "rule",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of a declarative view hierarchy.
pub enum Component<N> {
    /// A leaf.
    Single {
        builder: SingleBuilder<N>,
        meta: Option<Meta>,
    },
    /// A node with exactly one child.
    Wrapper {
        builder: WrapperBuilder<N>,
        child: Box<Component<N>>,
        meta: Option<Meta>,
    },
    /// A node with any number of children.
    Cluster {
        builder: ClusterBuilder<N>,
        children: Vec<Component<N>>,
        meta: Option<Meta>,
    },
    /// A component shown only while `rule` evaluates to true.
    Rule {
        rule: Rule,
        component: Box<Component<N>>,
    },
}

impl<N> Component<N> {
    pub fn single(
        builder: impl Fn(Option<&dyn ComponentMeta>) -> Option<N> + 'static,
        meta: Option<Meta>,
    ) -> Self {
        Component::Single {
            builder: Rc::new(builder),
            meta,
        }
    }

    pub fn wrapper(
        builder: impl Fn(&Component<N>, Option<&dyn ComponentMeta>) -> Option<N> + 'static,
        child: Component<N>,
        meta: Option<Meta>,
    ) -> Self {
        Component::Wrapper {
            builder: Rc::new(builder),
            child: Box::new(child),
            meta,
        }
    }

    pub fn cluster(
        builder: impl Fn(&[Component<N>], Option<&dyn ComponentMeta>) -> Option<N> + 'static,
        children: Vec<Component<N>>,
        meta: Option<Meta>,
    ) -> Self {
        Component::Cluster {
            builder: Rc::new(builder),
            children,
            meta,
        }
    }

    /// Gate `component` behind `rule`.
    pub fn gated(rule: Rule, component: Component<N>) -> Self {
        Component::Rule {
            rule,
            component: Box::new(component),
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Single { .. } => ComponentKind::Single,
            Component::Wrapper { .. } => ComponentKind::Wrapper,
            Component::Cluster { .. } => ComponentKind::Cluster,
            Component::Rule { .. } => ComponentKind::Rule,
        }
    }

    /// The shared metadata handle. A gated component reports the metadata of
    /// the component it gates, whatever the rule evaluates to.
    pub fn meta_handle(&self) -> Option<&Meta> {
        match self {
            Component::Single { meta, .. }
            | Component::Wrapper { meta, .. }
            | Component::Cluster { meta, .. } => meta.as_ref(),
            Component::Rule { component, .. } => component.meta_handle(),
        }
    }

    /// The component's metadata, see [`Component::meta_handle`].
    pub fn meta(&self) -> Option<&dyn ComponentMeta> {
        self.meta_handle().map(|m| m.as_ref())
    }

    /// Direct descendants: the child of a wrapper or the children of a
    /// cluster. A rule component is transparent and reports the children of
    /// the component it gates.
    pub fn children(&self) -> &[Component<N>] {
        match self {
            Component::Single { .. } => &[],
            Component::Wrapper { child, .. } => std::slice::from_ref(child.as_ref()),
            Component::Cluster { children, .. } => children,
            Component::Rule { component, .. } => component.children(),
        }
    }

    /// The component behind the gate, if this is a rule component.
    pub fn gated_component(&self) -> Option<&Component<N>> {
        match self {
            Component::Rule { component, .. } => Some(component),
            _ => None,
        }
    }

    /// The gating rule, if this is a rule component.
    pub fn rule(&self) -> Option<&Rule> {
        match self {
            Component::Rule { rule, .. } => Some(rule),
            _ => None,
        }
    }

    /// Build the concrete node.
    ///
    /// Returns `None` when a builder declines to render or when a gating
    /// rule evaluates to false.
    pub fn realize(&self) -> Option<N> {
        match self {
            Component::Single { builder, meta } => builder(meta.as_deref()),
            Component::Wrapper {
                builder,
                child,
                meta,
            } => builder(child.as_ref(), meta.as_deref()),
            Component::Cluster {
                builder,
                children,
                meta,
            } => builder(children.as_slice(), meta.as_deref()),
            Component::Rule { rule, component } => {
                if rule.evaluate() {
                    component.realize()
                } else {
                    None
                }
            }
        }
    }
}

impl<N> Clone for Component<N> {
    fn clone(&self) -> Self {
        match self {
            Component::Single { builder, meta } => Component::Single {
                builder: Rc::clone(builder),
                meta: meta.clone(),
            },
            Component::Wrapper {
                builder,
                child,
                meta,
            } => Component::Wrapper {
                builder: Rc::clone(builder),
                child: child.clone(),
                meta: meta.clone(),
            },
            Component::Cluster {
                builder,
                children,
                meta,
            } => Component::Cluster {
                builder: Rc::clone(builder),
                children: children.clone(),
                meta: meta.clone(),
            },
            Component::Rule { rule, component } => Component::Rule {
                rule: rule.clone(),
                component: component.clone(),
            },
        }
    }
}

impl<N> fmt::Debug for Component<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Single { meta, .. } => {
                f.debug_struct("Single").field("meta", meta).finish()
            }
            Component::Wrapper { child, meta, .. } => f
                .debug_struct("Wrapper")
                .field("child", child)
                .field("meta", meta)
                .finish(),
            Component::Cluster { children, meta, .. } => f
                .debug_struct("Cluster")
                .field("children", children)
                .field("meta", meta)
                .finish(),
            Component::Rule { rule, component } => f
                .debug_struct("Rule")
                .field("rule", rule)
                .field("component", component)
                .finish(),
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

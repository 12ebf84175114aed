//! Compilation of JSON documents into component trees.
//!
//! A [`JsonFactory`] holds registries keyed by the `type` tag of a node.
//! Each entry is a component factory: given the node's metadata (and its
//! already-compiled children, for wrappers and clusters) it returns the
//! [`Component`] that will later build the concrete view. A fourth
//! registry maps rule names to host evaluators used by the `rule` key.
//!
//! Document shape:
//!
//! ```json
//! {
//!   "structure": {
//!     "type": "stack",
//!     "meta": { "title": "Home" },
//!     "children": [ { "type": "label", "rule": "is_admin" } ]
//!   }
//! }
//! ```
//!
//! Only `structure` and each node's `type` are mandatory; their absence is
//! a [`FactoryError`]. Everything else that cannot be resolved is dropped
//! from the tree without error.

pub mod rule_spec;

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, trace};

use crate::component::Component;
use crate::error::FactoryError;
use crate::meta::{MapMeta, Meta};
use crate::rule::{Rule, RuleEvaluator};

pub use rule_spec::LogicalOperator;

/// Document and node keys.
pub mod keys {
    pub const STRUCTURE: &str = "structure";
    pub const TYPE: &str = "type";
    pub const META: &str = "meta";
    pub const CHILDREN: &str = "children";
    pub const RULE: &str = "rule";
}

/// Produces a leaf component from a node's metadata.
pub type SingleFactory<N> = Box<dyn Fn(Option<Meta>) -> Component<N>>;

/// Produces a wrapper component from the node's first compiled child.
pub type WrapperFactory<N> = Box<dyn Fn(Component<N>, Option<Meta>) -> Component<N>>;

/// Produces a cluster component from all compiled children.
pub type ClusterFactory<N> = Box<dyn Fn(Vec<Component<N>>, Option<Meta>) -> Component<N>>;

/// Any of the four kinds of registrable builders.
pub enum FactoryBuilder<N> {
    Single(SingleFactory<N>),
    Wrapper(WrapperFactory<N>),
    Cluster(ClusterFactory<N>),
    Rule(RuleEvaluator),
}

impl<N> fmt::Debug for FactoryBuilder<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            FactoryBuilder::Single(_) => "Single",
            FactoryBuilder::Wrapper(_) => "Wrapper",
            FactoryBuilder::Cluster(_) => "Cluster",
            FactoryBuilder::Rule(_) => "Rule",
        };
        write!(f, "FactoryBuilder::{}(..)", kind)
    }
}

/// Type-keyed builder registry and JSON-to-component compiler.
///
/// Registration is not synchronized; register everything before compiling.
pub struct JsonFactory<N> {
    singles: HashMap<String, SingleFactory<N>>,
    wrappers: HashMap<String, WrapperFactory<N>>,
    clusters: HashMap<String, ClusterFactory<N>>,
    rules: HashMap<String, RuleEvaluator>,
}

impl<N> Default for JsonFactory<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> fmt::Debug for JsonFactory<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonFactory")
            .field("types", &self.registered_types())
            .field("rules", &self.registered_rules())
            .finish()
    }
}

impl<N> JsonFactory<N> {
    pub fn new() -> Self {
        JsonFactory {
            singles: HashMap::new(),
            wrappers: HashMap::new(),
            clusters: HashMap::new(),
            rules: HashMap::new(),
        }
    }

    // ── Registration ─────────────────────────────────────────────────

    /// Register a builder for `tag`. A previous builder of the same kind
    /// for the same tag is replaced.
    pub fn register(&mut self, tag: impl Into<String>, builder: FactoryBuilder<N>) {
        let tag = tag.into();
        let replaced = match builder {
            FactoryBuilder::Single(b) => self.singles.insert(tag.clone(), b).is_some(),
            FactoryBuilder::Wrapper(b) => self.wrappers.insert(tag.clone(), b).is_some(),
            FactoryBuilder::Cluster(b) => self.clusters.insert(tag.clone(), b).is_some(),
            FactoryBuilder::Rule(b) => self.rules.insert(tag.clone(), b).is_some(),
        };
        if replaced {
            debug!(tag = %tag, "replaced previously registered builder");
        }
    }

    pub fn register_single(
        &mut self,
        tag: impl Into<String>,
        factory: impl Fn(Option<Meta>) -> Component<N> + 'static,
    ) {
        self.register(tag, FactoryBuilder::Single(Box::new(factory)));
    }

    pub fn register_wrapper(
        &mut self,
        tag: impl Into<String>,
        factory: impl Fn(Component<N>, Option<Meta>) -> Component<N> + 'static,
    ) {
        self.register(tag, FactoryBuilder::Wrapper(Box::new(factory)));
    }

    pub fn register_cluster(
        &mut self,
        tag: impl Into<String>,
        factory: impl Fn(Vec<Component<N>>, Option<Meta>) -> Component<N> + 'static,
    ) {
        self.register(tag, FactoryBuilder::Cluster(Box::new(factory)));
    }

    pub fn register_rule(
        &mut self,
        name: impl Into<String>,
        evaluator: impl Fn() -> bool + 'static,
    ) {
        self.register(name, FactoryBuilder::Rule(Rc::new(evaluator)));
    }

    // ── Introspection ────────────────────────────────────────────────

    /// Total number of registrations across all four registries.
    pub fn len(&self) -> usize {
        self.singles.len() + self.wrappers.len() + self.clusters.len() + self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any component builder is registered for `tag`.
    pub fn contains_type(&self, tag: &str) -> bool {
        self.singles.contains_key(tag)
            || self.wrappers.contains_key(tag)
            || self.clusters.contains_key(tag)
    }

    pub fn contains_rule(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// All component type tags, sorted and deduplicated.
    pub fn registered_types(&self) -> Vec<&str> {
        let tags: BTreeSet<&str> = self
            .singles
            .keys()
            .chain(self.wrappers.keys())
            .chain(self.clusters.keys())
            .map(String::as_str)
            .collect();
        tags.into_iter().collect()
    }

    /// All rule names, sorted.
    pub fn registered_rules(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    // ── Compilation ──────────────────────────────────────────────────

    /// Compile a document. The document must carry a `structure` node.
    ///
    /// Returns `Ok(None)` when the root node cannot be resolved.
    pub fn make_component(&self, document: &Value) -> Result<Option<Component<N>>, FactoryError> {
        let structure = document
            .get(keys::STRUCTURE)
            .ok_or_else(|| FactoryError::missing(keys::STRUCTURE, document))?;
        self.make_node(structure)
    }

    /// Parse `text` as JSON and compile it with [`JsonFactory::make_component`].
    pub fn make_component_from_str(
        &self,
        text: &str,
    ) -> Result<Option<Component<N>>, FactoryError> {
        let document: Value = serde_json::from_str(text)?;
        self.make_component(&document)
    }

    /// Compile a single node and, recursively, its children.
    ///
    /// Children are compiled first; children that resolve to nothing are
    /// dropped. A missing `type` anywhere in the subtree is an error.
    pub fn make_node(&self, node: &Value) -> Result<Option<Component<N>>, FactoryError> {
        let component_type = node
            .get(keys::TYPE)
            .and_then(Value::as_str)
            .ok_or_else(|| FactoryError::missing(keys::TYPE, node))?;
        trace!(component_type, "compiling node");

        let meta = node
            .get(keys::META)
            .and_then(MapMeta::from_value)
            .map(MapMeta::into_shared);
        let children = self.make_children(node)?;

        let component = match self.resolve(component_type, children, meta) {
            Some(component) => component,
            None => return Ok(None),
        };

        match node.get(keys::RULE) {
            None => Ok(Some(component)),
            Some(spec) => match self.parse_rule(spec) {
                Some(rule) => Ok(Some(Component::gated(rule, component))),
                None => {
                    debug!(
                        component_type,
                        rule = %spec,
                        "rule could not be parsed, node is not gated"
                    );
                    Ok(Some(component))
                }
            },
        }
    }

    /// Parse a rule spec against the registered rule evaluators.
    pub fn parse_rule(&self, spec: &Value) -> Option<Rule> {
        rule_spec::parse_rule(spec, &self.rules)
    }

    fn make_children(&self, node: &Value) -> Result<Vec<Component<N>>, FactoryError> {
        let entries = match node.get(keys::CHILDREN).and_then(Value::as_array) {
            Some(entries) => entries,
            None => return Ok(Vec::new()),
        };
        let mut children = Vec::with_capacity(entries.len());
        for entry in entries {
            if !entry.is_object() {
                debug!(child = %entry, "skipping non-object child");
                continue;
            }
            if let Some(child) = self.make_node(entry)? {
                children.push(child);
            }
        }
        Ok(children)
    }

    /// Resolve a node's own component: single, then wrapper (only with at
    /// least one child), then cluster.
    fn resolve(
        &self,
        component_type: &str,
        children: Vec<Component<N>>,
        meta: Option<Meta>,
    ) -> Option<Component<N>> {
        if let Some(factory) = self.singles.get(component_type) {
            return Some(factory(meta));
        }
        if let Some(factory) = self.wrappers.get(component_type) {
            if children.len() > 1 {
                debug!(
                    component_type,
                    children = children.len(),
                    "wrapper takes only its first child"
                );
            }
            return match children.into_iter().next() {
                Some(child) => Some(factory(child, meta)),
                None => {
                    debug!(component_type, "wrapper has no child, dropping");
                    None
                }
            };
        }
        if let Some(factory) = self.clusters.get(component_type) {
            return Some(factory(children, meta));
        }
        debug!(component_type, "no builder registered for type, dropping");
        None
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

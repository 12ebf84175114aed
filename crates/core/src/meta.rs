//! Component metadata: opaque, keyed configuration attached to a node.
//!
//! The [`ComponentMeta`] trait abstracts keyed lookup so a component can be
//! configured from a JSON object, a hand-written struct, or several sources
//! layered together. Values cross the boundary as `serde_json::Value`.
//!
//! Implementations provided here:
//! - [`MapMeta`] -- dictionary-backed, forwards lookups to a JSON object map
//! - [`Reflect`] / [`reflective_meta!`] -- field lookup on any `Serialize` type
//! - [`ZipMeta`] -- ordered composition, first hit wins

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use serde_json::{Map, Value};

/// Shared handle to a metadata object, as stored inside a component.
pub type Meta = Rc<dyn ComponentMeta>;

/// Downcasting support for metadata trait objects.
///
/// Blanket-implemented for every `'static` type; implementors of
/// [`ComponentMeta`] never write this by hand.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Keyed access to a component's metadata.
///
/// Lookup never fails: a missing key and a key holding no value are both
/// reported as `None`.
pub trait ComponentMeta: AsAny + fmt::Debug {
    /// Return the value stored under `key`, if any.
    fn lookup(&self, key: &str) -> Option<Value>;

    /// Convenience accessor for string values.
    fn get_str(&self, key: &str) -> Option<String> {
        self.lookup(key).and_then(|v| v.as_str().map(str::to_owned))
    }

    /// Convenience accessor for boolean values.
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.lookup(key).and_then(|v| v.as_bool())
    }

    /// Convenience accessor for numeric values (integers are widened).
    fn get_f64(&self, key: &str) -> Option<f64> {
        self.lookup(key).and_then(|v| v.as_f64())
    }

    /// Convenience accessor for non-negative integer values.
    fn get_u64(&self, key: &str) -> Option<u64> {
        self.lookup(key).and_then(|v| v.as_u64())
    }
}

// ── Dictionary-backed meta ───────────────────────────────────────────

/// Metadata backed by a JSON object.
///
/// This is what the JSON factory attaches to every node that declares a
/// `meta` object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapMeta(Map<String, Value>);

impl MapMeta {
    pub fn new(map: Map<String, Value>) -> Self {
        MapMeta(map)
    }

    /// Build from a JSON value. Returns `None` unless the value is an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().cloned().map(MapMeta)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_shared(self) -> Meta {
        Rc::new(self)
    }
}

impl ComponentMeta for MapMeta {
    fn lookup(&self, key: &str) -> Option<Value> {
        match self.0.get(key) {
            Some(Value::Null) | None => None,
            Some(v) => Some(v.clone()),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for MapMeta {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        MapMeta(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// ── Reflective meta ──────────────────────────────────────────────────

/// Look up a named field of a serializable value.
///
/// The value is serialized to a JSON object and the field matching `key`
/// exactly is returned. `Option` fields serialize to `null` when empty, so
/// a present-but-empty field and an absent field both yield `None`. Values
/// that do not serialize to an object have no fields.
pub fn reflect_field<T: Serialize + ?Sized>(value: &T, key: &str) -> Option<Value> {
    match serde_json::to_value(value).ok()? {
        Value::Object(mut fields) => match fields.remove(key) {
            Some(Value::Null) | None => None,
            Some(v) => Some(v),
        },
        _ => None,
    }
}

/// Wraps any `Serialize` value so its fields can be looked up by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Reflect<T>(pub T);

impl<T: Serialize + fmt::Debug + 'static> ComponentMeta for Reflect<T> {
    fn lookup(&self, key: &str) -> Option<Value> {
        reflect_field(&self.0, key)
    }
}

/// Implements [`ComponentMeta`] for a `Serialize` type via [`reflect_field`].
///
/// ```
/// use composer_core::{reflective_meta, ComponentMeta};
///
/// #[derive(Debug, serde::Serialize)]
/// struct Banner {
///     text: String,
///     subtitle: Option<String>,
/// }
/// reflective_meta!(Banner);
///
/// let banner = Banner { text: "hi".into(), subtitle: None };
/// assert_eq!(banner.get_str("text").as_deref(), Some("hi"));
/// assert!(banner.lookup("subtitle").is_none());
/// ```
#[macro_export]
macro_rules! reflective_meta {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::ComponentMeta for $ty {
                fn lookup(&self, key: &str) -> ::core::option::Option<$crate::serde_json::Value> {
                    $crate::meta::reflect_field(self, key)
                }
            }
        )+
    };
}

// ── Zip meta ─────────────────────────────────────────────────────────

/// Aggregates several metas. Lookups consult them in construction order
/// and return the first hit; later metas are not consulted once a value
/// is found.
#[derive(Debug, Clone, Default)]
pub struct ZipMeta {
    metas: Vec<Meta>,
}

impl ZipMeta {
    pub fn new(metas: Vec<Meta>) -> Self {
        ZipMeta { metas }
    }

    /// Append a meta with the lowest precedence.
    pub fn push(&mut self, meta: Meta) {
        self.metas.push(meta);
    }

    pub fn len(&self) -> usize {
        self.metas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metas.is_empty()
    }
}

impl ComponentMeta for ZipMeta {
    fn lookup(&self, key: &str) -> Option<Value> {
        self.metas.iter().find_map(|meta| meta.lookup(key))
    }
}

// ── Materialization ──────────────────────────────────────────────────

/// A strongly-typed configuration that can be built from generic metadata.
pub trait FromComponentMeta: ComponentMeta + Clone + Sized + 'static {
    /// Build from arbitrary metadata. Returns `None` if the metadata does
    /// not describe a valid value of this type.
    fn from_meta(meta: &dyn ComponentMeta) -> Option<Self>;

    /// Convert optional metadata into this type.
    ///
    /// `None` stays `None`; metadata that already is a `Self` is returned
    /// as-is; anything else goes through [`FromComponentMeta::from_meta`].
    fn materialize(meta: Option<&dyn ComponentMeta>) -> Option<Self> {
        let meta = meta?;
        if let Some(this) = meta.as_any().downcast_ref::<Self>() {
            return Some(this.clone());
        }
        Self::from_meta(meta)
    }
}

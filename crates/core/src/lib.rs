//! composer-core: declarative view hierarchy engine.
//!
//! Materializes a view hierarchy from a JSON description by resolving each
//! node's `type` against a registry of builders, optionally gating nodes
//! behind boolean visibility rules.
//!
//! # Public API
//!
//! - [`Component`] -- the recursive node algebra; [`Component::realize`]
//!   builds the host's concrete node type on demand
//! - [`Rule`] -- boolean expression tree over host evaluators
//! - [`JsonFactory`] -- type-keyed builder registry and JSON compiler
//! - [`ComponentMeta`] -- keyed metadata, with [`MapMeta`], [`ZipMeta`],
//!   [`Reflect`] and the [`FromComponentMeta`] materialization convention
//! - [`FactoryError`] -- hard compilation failures

pub mod component;
pub mod error;
pub mod factory;
pub mod meta;
pub mod rule;

// ── Convenience re-exports ───────────────────────────────────────────

pub use component::{ClusterBuilder, Component, ComponentKind, SingleBuilder, WrapperBuilder};
pub use error::FactoryError;
pub use factory::{
    ClusterFactory, FactoryBuilder, JsonFactory, LogicalOperator, SingleFactory, WrapperFactory,
};
pub use meta::{
    reflect_field, AsAny, ComponentMeta, FromComponentMeta, MapMeta, Meta, Reflect, ZipMeta,
};
pub use rule::{Rule, RuleEvaluator};

#[doc(hidden)]
pub use serde_json;

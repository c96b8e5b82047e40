//! Query context, resolver registry, and resolution pipeline for itemquery.
//!
//! This crate provides:
//! - [`Game`] - The catalog, world, and player a query runs against
//! - [`QueryContext`] - Per-query environment with parent links
//! - [`ResolverRegistry`] - Case-insensitive, append-only resolver table
//! - [`QueryEngine`] - Parses, dispatches, filters, and narrows queries
//! - [`SpawnItemFields`] - A query plus the item settings to apply
//! - [`StateQueries`] - The built-in game state condition evaluator

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod args;
pub mod condition;
pub mod context;
pub mod fields;
pub mod game;
pub mod registry;
pub mod resolve;
pub mod sink;

pub use args::{QueryArgs, split_args};
pub use condition::{
    ConditionEvaluator, SEASON_QUERY_KEYS, StateQueries, StateQueryContext, is_immutably_false,
    is_immutably_true,
};
pub use context::{CustomField, QueryContext, QueryContextBuilder};
pub use fields::{SpawnItemFields, apply_item_fields};
pub use game::Game;
pub use registry::{ResolvedIter, ResolverCall, ResolverFn, ResolverRegistry};
pub use resolve::{EngineConfig, QueryEngine, ResolveOptions, ResolvedItem, SearchMode};
pub use sink::{ErrorLog, ErrorSink, ReportedError, TracingSink};

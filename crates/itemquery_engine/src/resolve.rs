//! Query resolution.
//!
//! [`QueryEngine::resolve`] turns a query string into items:
//!
//! 1. The query is split into a key and its arguments.
//! 2. The context is sealed with the query and checked for self-reference.
//! 3. A registered resolver produces candidates, or the whole query is
//!    treated as a literal item ID.
//! 4. Candidates are filtered for exclusions, duplicates, and the per-item
//!    condition, then narrowed by the search mode and item limit.
//!
//! Filtering is lazy, so resolvers over large catalogs only build as many
//! items as the caller keeps.

use std::collections::HashSet;
use std::fmt;
use std::iter;
use std::rc::Rc;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use itemquery_foundation::{Error, Item, Result, Salable, SemanticLimit};
use tracing::{debug, trace, warn};

use crate::condition::is_immutably_true;
use crate::context::QueryContext;
use crate::game::Game;
use crate::registry::{ResolvedIter, ResolverCall, ResolverRegistry};
use crate::sink::ErrorSink;

// =============================================================================
// Resolved Items
// =============================================================================

/// One item produced by a query, with optional shop overrides.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedItem {
    /// The produced item or other salable.
    pub item: Salable,
    /// Price to sell at instead of the computed one.
    pub override_base_price: Option<i32>,
    /// Stock to offer instead of the computed one.
    pub override_available_stock: Option<i32>,
    /// Item the buyer must trade instead of paying.
    pub override_trade_item_id: Option<String>,
    /// How many trade items the buyer must give.
    pub override_trade_item_amount: Option<i32>,
    /// Stack size to apply instead of the spawn fields' stack.
    pub override_stack_size: Option<i32>,
    /// An external item whose stack should track this entry's stock.
    pub sync_stack_with: Option<Item>,
}

impl ResolvedItem {
    /// Wraps a produced item with no overrides.
    #[must_use]
    pub fn new(item: impl Into<Salable>) -> Self {
        Self {
            item: item.into(),
            override_base_price: None,
            override_available_stock: None,
            override_trade_item_id: None,
            override_trade_item_amount: None,
            override_stack_size: None,
            sync_stack_with: None,
        }
    }

    /// Builder method to override the price.
    #[must_use]
    pub fn with_price(mut self, price: i32) -> Self {
        self.override_base_price = Some(price);
        self
    }

    /// Builder method to override the available stock.
    #[must_use]
    pub fn with_stock(mut self, stock: i32) -> Self {
        self.override_available_stock = Some(stock);
        self
    }

    /// Builder method to require a trade item.
    #[must_use]
    pub fn with_trade_item(mut self, item_id: impl Into<String>, amount: i32) -> Self {
        self.override_trade_item_id = Some(item_id.into());
        self.override_trade_item_amount = Some(amount);
        self
    }

    /// Builder method to override the stack size.
    #[must_use]
    pub fn with_stack(mut self, stack: i32) -> Self {
        self.override_stack_size = Some(stack);
        self
    }

    /// Builder method to sync stock with an external item.
    #[must_use]
    pub fn with_sync_stack(mut self, item: Item) -> Self {
        self.sync_stack_with = Some(item);
        self
    }

    /// Qualified ID of the produced item.
    #[must_use]
    pub fn qualified_id(&self) -> &str {
        self.item.qualified_id()
    }

    /// Returns true if the produced thing is an item rather than another salable.
    #[must_use]
    pub const fn is_item(&self) -> bool {
        self.item.is_item()
    }
}

impl fmt::Display for ResolvedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.item)?;
        if let Some(price) = self.override_base_price {
            write!(f, " price={price}")?;
        }
        if let Some(stock) = self.override_available_stock {
            write!(f, " stock={stock}")?;
        }
        if let Some(trade) = &self.override_trade_item_id {
            let amount = self.override_trade_item_amount.unwrap_or(1);
            write!(f, " trade={trade}x{amount}")?;
        }
        Ok(())
    }
}

// =============================================================================
// Options
// =============================================================================

/// Which of the resolved items to keep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SearchMode {
    /// Keep everything.
    #[default]
    All,
    /// Keep only items, dropping other salables.
    AllOfTypeItem,
    /// Keep the first item.
    FirstOfTypeItem,
    /// Keep one item chosen at random.
    RandomOfTypeItem,
}

/// Per-call resolution options.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResolveOptions<'a> {
    /// Which items to keep.
    pub search_mode: SearchMode,
    /// Maximum number of items to return.
    pub max_items: Option<usize>,
    /// Drop items whose qualified ID was already produced.
    pub avoid_repeat: bool,
    /// Drop items with these qualified IDs.
    pub avoid_ids: Option<&'a HashSet<String>>,
    /// Condition each item must pass, checked with the item as target.
    pub per_item_condition: Option<&'a str>,
}

impl<'a> ResolveOptions<'a> {
    /// Default options: everything, no limit, no filtering.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the search mode.
    #[must_use]
    pub fn with_search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    /// Builder method to limit the number of items.
    #[must_use]
    pub fn with_max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    /// Builder method to drop repeated items.
    #[must_use]
    pub fn with_avoid_repeat(mut self, avoid: bool) -> Self {
        self.avoid_repeat = avoid;
        self
    }

    /// Builder method to exclude item IDs.
    #[must_use]
    pub fn with_avoid_ids(mut self, ids: &'a HashSet<String>) -> Self {
        self.avoid_ids = Some(ids);
        self
    }

    /// Builder method to filter items by a condition.
    #[must_use]
    pub fn with_per_item_condition(mut self, condition: &'a str) -> Self {
        self.per_item_condition = Some(condition);
        self
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Engine-wide settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Deepest allowed nesting of queries.
    pub max_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { max_depth: 16 }
    }
}

/// Resolves item queries against a resolver registry.
#[derive(Clone, Debug)]
pub struct QueryEngine {
    registry: Arc<ResolverRegistry>,
    config: EngineConfig,
}

impl QueryEngine {
    /// Creates an engine over a registry.
    #[must_use]
    pub fn new(registry: ResolverRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            config: EngineConfig::default(),
        }
    }

    /// Builder method to set the engine config.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// The resolver registry.
    #[must_use]
    pub fn registry(&self) -> &ResolverRegistry {
        &self.registry
    }

    /// The engine config.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolves a query in a fresh root context for the game.
    pub fn resolve_in(
        &self,
        game: &Rc<Game>,
        query: &str,
        options: &ResolveOptions<'_>,
        errors: &mut dyn ErrorSink,
    ) -> Vec<ResolvedItem> {
        self.resolve(query, QueryContext::new(game), options, errors)
    }

    /// Resolves a query.
    ///
    /// Never fails: malformed queries, unknown item IDs, and resolver
    /// errors are reported to `errors` and yield an empty list.
    pub fn resolve(
        &self,
        query: &str,
        context: QueryContext,
        options: &ResolveOptions<'_>,
        errors: &mut dyn ErrorSink,
    ) -> Vec<ResolvedItem> {
        self.resolve_sealed(query, context, options, errors).0
    }

    /// Resolves a query and also returns the sealed context it ran in.
    pub(crate) fn resolve_sealed(
        &self,
        query: &str,
        context: QueryContext,
        options: &ResolveOptions<'_>,
        errors: &mut dyn ErrorSink,
    ) -> (Vec<ResolvedItem>, Rc<QueryContext>) {
        let query = query.trim();
        let context = context.seal(query);
        let results = self.run(query, &context, options, errors);
        (results, context)
    }

    fn run(
        &self,
        query: &str,
        context: &Rc<QueryContext>,
        options: &ResolveOptions<'_>,
        errors: &mut dyn ErrorSink,
    ) -> Vec<ResolvedItem> {
        if query.is_empty() {
            errors.report(query, "must specify an item ID or query");
            return Vec::new();
        }

        if let Err(err) = self.check_nesting(context) {
            warn!(query, depth = context.depth(), "{err}");
            errors.report(query, &err.to_string());
            return Vec::new();
        }

        let (key, args) = query
            .split_once(' ')
            .map_or((query, ""), |(key, args)| (key, args.trim()));

        let resolved = match self.registry.get(key) {
            Some(resolver) => {
                trace!(key, args, "dispatching item query");
                let call = ResolverCall {
                    key,
                    args,
                    context,
                    engine: self,
                    avoid_repeat: options.avoid_repeat,
                    avoid_ids: options.avoid_ids,
                };
                resolver(call, errors).map(|results| Self::filter(results, context, options))
            }
            None => Self::literal(query, context, options),
        };

        match resolved {
            Ok(results) => Self::narrow(results, context, options),
            Err(err) => {
                debug!(query, "item query failed: {err}");
                errors.report(query, &err.to_string());
                Vec::new()
            }
        }
    }

    fn check_nesting(&self, context: &QueryContext) -> Result<()> {
        if context.depth() > self.config.max_depth {
            return Err(Error::limit_exceeded(SemanticLimit::MaxQueryDepth {
                limit: self.config.max_depth,
            }));
        }

        let chain = context.query_chain();
        let mut seen = HashSet::with_capacity(chain.len());
        if chain.iter().all(|query| seen.insert(*query)) {
            return Ok(());
        }
        Err(Error::circular_reference(
            chain.iter().rev().map(ToString::to_string).collect(),
        ))
    }

    /// Literal IDs skip the repeat and condition filters; only the avoid
    /// set can exclude them.
    fn literal<'a>(
        query: &str,
        context: &QueryContext,
        options: &ResolveOptions<'_>,
    ) -> Result<ResolvedIter<'a>> {
        let item = context.catalog().create_item(query)?;
        if options
            .avoid_ids
            .is_some_and(|ids| ids.contains(&item.qualified_id))
        {
            return Ok(Box::new(iter::empty()));
        }
        Ok(Box::new(iter::once(ResolvedItem::new(item))))
    }

    fn filter<'a>(
        results: ResolvedIter<'a>,
        context: &'a QueryContext,
        options: &'a ResolveOptions<'_>,
    ) -> ResolvedIter<'a> {
        let avoid_ids = options.avoid_ids.filter(|ids| !ids.is_empty());
        let condition = options
            .per_item_condition
            .filter(|c| !is_immutably_true(Some(c)));
        if avoid_ids.is_none() && !options.avoid_repeat && condition.is_none() {
            return results;
        }

        let mut seen = HashSet::new();
        Box::new(results.filter(move |result| {
            let id = result.qualified_id();
            if avoid_ids.is_some_and(|ids| ids.contains(id)) {
                return false;
            }
            if options.avoid_repeat && !seen.insert(id.to_string()) {
                return false;
            }
            condition.is_none_or(|c| context.check_conditions(Some(c), result.item.as_item()))
        }))
    }

    fn narrow(
        results: ResolvedIter<'_>,
        context: &QueryContext,
        options: &ResolveOptions<'_>,
    ) -> Vec<ResolvedItem> {
        let max = options.max_items.unwrap_or(usize::MAX);
        match options.search_mode {
            SearchMode::All => results.take(max).collect(),
            SearchMode::AllOfTypeItem => results.filter(ResolvedItem::is_item).take(max).collect(),
            SearchMode::FirstOfTypeItem => results
                .filter(ResolvedItem::is_item)
                .take(max.min(1))
                .collect(),
            SearchMode::RandomOfTypeItem => {
                let mut items: Vec<_> = results.filter(ResolvedItem::is_item).collect();
                if items.is_empty() || max == 0 {
                    return Vec::new();
                }
                let index = context.random().borrow_mut().next_index(items.len());
                vec![items.swap_remove(index)]
            }
        }
    }
}

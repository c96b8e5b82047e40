//! Session state for the REPL and CLI.
//!
//! A session owns the loaded game data, the query engine, the options used
//! for ad-hoc queries, and the ledger of purchases made in built shops.

use std::rc::Rc;

use itemquery_engine::{
    ErrorLog, Game, QueryEngine, ReportedError, ResolveOptions, ResolvedItem, SearchMode,
};
use itemquery_foundation::{Error, ItemCatalog, Result};
use itemquery_shop::{ShopBuilder, ShopStock, StockLedger};
use itemquery_stdlib::default_engine;

use crate::data::GameData;

/// Items and errors from one query.
#[derive(Clone, Debug, Default)]
pub struct QueryOutcome {
    /// Resolved items in order.
    pub items: Vec<ResolvedItem>,
    /// Errors reported while resolving.
    pub errors: Vec<ReportedError>,
}

/// A shop's stock and errors from building it.
#[derive(Clone, Debug)]
pub struct ShopOutcome {
    /// The built stock.
    pub stock: ShopStock,
    /// Errors reported by the shop's entries.
    pub errors: Vec<ReportedError>,
}

/// Session state for an interactive or batch run.
pub struct Session {
    data: GameData,
    game: Rc<Game>,
    engine: QueryEngine,
    ledger: StockLedger,
    search_mode: SearchMode,
    max_items: Option<usize>,
    avoid_repeat: bool,
}

impl Session {
    /// Creates a session with no items, shops, or state.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in resolvers can't be registered.
    pub fn new() -> Result<Self> {
        let data = GameData::default();
        let game = Rc::new(Game::new(ItemCatalog::standard(), data.world.clone()));
        Self::with_parts(data, game)
    }

    /// Creates a session for loaded game data.
    ///
    /// # Errors
    ///
    /// Returns an error if the data's item catalog is malformed or the
    /// built-in resolvers can't be registered.
    pub fn from_data(data: GameData) -> Result<Self> {
        let game = Rc::new(data.game()?);
        Self::with_parts(data, game)
    }

    fn with_parts(data: GameData, game: Rc<Game>) -> Result<Self> {
        Ok(Self {
            data,
            game,
            engine: default_engine()?,
            ledger: StockLedger::new(),
            search_mode: SearchMode::All,
            max_items: None,
            avoid_repeat: false,
        })
    }

    /// Returns the loaded game data.
    #[must_use]
    pub const fn data(&self) -> &GameData {
        &self.data
    }

    /// Returns the game host queries run against.
    #[must_use]
    pub const fn game(&self) -> &Rc<Game> {
        &self.game
    }

    /// Returns the query engine.
    #[must_use]
    pub const fn engine(&self) -> &QueryEngine {
        &self.engine
    }

    /// Returns the purchase ledger.
    #[must_use]
    pub const fn ledger(&self) -> &StockLedger {
        &self.ledger
    }

    /// Returns the search mode used for queries.
    #[must_use]
    pub const fn search_mode(&self) -> SearchMode {
        self.search_mode
    }

    /// Sets the search mode used for queries.
    pub fn set_search_mode(&mut self, mode: SearchMode) {
        self.search_mode = mode;
    }

    /// Returns the item limit used for queries.
    #[must_use]
    pub const fn max_items(&self) -> Option<usize> {
        self.max_items
    }

    /// Sets the item limit used for queries.
    pub fn set_max_items(&mut self, max: Option<usize>) {
        self.max_items = max;
    }

    /// Returns whether queries skip repeated items.
    #[must_use]
    pub const fn avoid_repeat(&self) -> bool {
        self.avoid_repeat
    }

    /// Sets whether queries skip repeated items.
    pub fn set_avoid_repeat(&mut self, avoid: bool) {
        self.avoid_repeat = avoid;
    }

    /// Replaces the world seed and restarts every random stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the game can't be rebuilt.
    pub fn set_seed(&mut self, seed: u64) -> Result<()> {
        self.data.world.seed = seed;
        self.game = Rc::new(self.data.game()?);
        tracing::debug!(seed, "reseeded session");
        Ok(())
    }

    /// Forgets every recorded purchase.
    pub fn reset_ledger(&mut self) {
        self.ledger.clear();
    }

    /// Sorted resolver keys.
    #[must_use]
    pub fn resolver_keys(&self) -> Vec<&str> {
        self.engine.registry().keys()
    }

    /// Shop IDs in data order.
    #[must_use]
    pub fn shop_ids(&self) -> Vec<&str> {
        self.data.shops.iter().map(|shop| shop.id.as_str()).collect()
    }

    /// Resolves a query with the session's options.
    #[must_use]
    pub fn query(&self, query: &str) -> QueryOutcome {
        let mut options = ResolveOptions::new()
            .with_search_mode(self.search_mode)
            .with_avoid_repeat(self.avoid_repeat);
        if let Some(max) = self.max_items {
            options = options.with_max_items(max);
        }
        let mut log = ErrorLog::new();
        let items = self.engine.resolve_in(&self.game, query, &options, &mut log);
        QueryOutcome {
            items,
            errors: log.entries().to_vec(),
        }
    }

    /// Builds a shop's stock, reconciled with purchases in this session.
    ///
    /// # Errors
    ///
    /// Returns an error if no shop has the given ID.
    pub fn build_shop(&self, id: &str) -> Result<ShopOutcome> {
        let shop = self
            .data
            .shop(id)
            .ok_or_else(|| Error::invalid_argument(format!("no shop with ID '{id}'")))?;
        let mut log = ErrorLog::new();
        let stock = ShopBuilder::new(&self.engine, &self.game)
            .with_synced_stock(&self.ledger)
            .build(shop, &mut log);
        Ok(ShopOutcome {
            stock,
            errors: log.entries().to_vec(),
        })
    }

    /// Buys from a shop, recording the purchase in the session ledger.
    ///
    /// Returns the total price paid.
    ///
    /// # Errors
    ///
    /// Returns an error if the shop or entry doesn't exist or not enough
    /// stock remains.
    pub fn buy(&mut self, shop_id: &str, index: usize, count: i32) -> Result<i32> {
        let mut outcome = self.build_shop(shop_id)?;
        let player = self.game.player().name.clone();
        outcome.stock.purchase(index, count, &mut self.ledger, &player)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("shops", &self.shop_ids())
            .field("search_mode", &self.search_mode)
            .field("max_items", &self.max_items)
            .field("avoid_repeat", &self.avoid_repeat)
            .finish_non_exhaustive()
    }
}

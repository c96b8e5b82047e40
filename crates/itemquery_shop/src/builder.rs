//! Builds shop stock from shop data.
//!
//! Each entry's query is resolved in declared order. Resolved items are
//! priced and stocked in layers:
//!
//! 1. base price (result override, entry price, trade items at zero, or the
//!    item's own price)
//! 2. profit margin
//! 3. out-of-season surcharge
//! 4. shop price modifiers, then entry price modifiers
//!
//! Stock starts from the result override or the entry, then the entry's
//! stock modifiers run. Recipes and items synced with an external stack
//! are never tracked between openings.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use itemquery_engine::{
    ErrorSink, Game, QueryContext, QueryEngine, ResolveOptions, ResolvedItem, SEASON_QUERY_KEYS,
    is_immutably_false,
};
use itemquery_foundation::random::shared;
use itemquery_foundation::{GameRandom, Item, RngHandle, Salable, apply_modifiers_int};

use crate::data::{LimitedStockMode, ShopData, ShopItemData};
use crate::stock::{ShopStock, Stock, StockEntry, dedup_key};
use crate::sync::SyncedStock;

/// Custom field holding the ID of the shop a query runs for.
pub const SHOP_ID_FIELD: &str = "shop_id";

/// Price multiplier for out-of-season stock.
pub const OUT_OF_SEASON_MULTIPLIER: f32 = 1.5;

// =============================================================================
// ShopBuilder
// =============================================================================

/// Builds the stock for shops in one game.
pub struct ShopBuilder<'a> {
    engine: &'a QueryEngine,
    game: &'a Rc<Game>,
    random: Option<RngHandle>,
    synced: Option<&'a dyn SyncedStock>,
}

impl<'a> ShopBuilder<'a> {
    /// Creates a builder.
    #[must_use]
    pub fn new(engine: &'a QueryEngine, game: &'a Rc<Game>) -> Self {
        Self {
            engine,
            game,
            random: None,
            synced: None,
        }
    }

    /// Uses a fixed random stream instead of the shop's daily one.
    #[must_use]
    pub fn with_random(mut self, random: GameRandom) -> Self {
        self.random = Some(shared(random));
        self
    }

    /// Reconciles built stock with previously recorded purchases.
    #[must_use]
    pub fn with_synced_stock(mut self, synced: &'a dyn SyncedStock) -> Self {
        self.synced = Some(synced);
        self
    }

    /// Builds a shop's stock.
    ///
    /// Problems with individual entries are reported to `errors` and the
    /// entry is skipped; the rest of the shop is still built.
    pub fn build(&self, shop: &ShopData, errors: &mut dyn ErrorSink) -> ShopStock {
        let world = self.game.world();
        let random = self.random.clone().unwrap_or_else(|| {
            shared(GameRandom::day_seeded(world.seed, world.days_played, &shop.id))
        });
        let checks = QueryContext::builder(self.game)
            .random_handle(Rc::clone(&random))
            .build();
        let has_stock_list = shop
            .missing_stock_list_mail
            .as_deref()
            .is_some_and(|mail| checks.player().has_mail(mail));

        let mut stock = ShopStock::new(shop.id.clone());
        let mut tracker: HashSet<String> = HashSet::new();
        let mut seen_entry_ids: HashMap<&str, usize> = HashMap::new();

        for (index, entry) in shop.items.iter().enumerate() {
            let entry_id = entry.spawn.entry_id();
            if let Some(first) = seen_entry_ids.insert(entry_id, index) {
                tracing::warn!(
                    shop = %shop.id,
                    entry = entry_id,
                    first,
                    index,
                    "shop has multiple entries with the same ID"
                );
            }

            if entry.condition.as_deref().is_some_and(is_immutably_false) {
                continue;
            }
            let out_of_season = if checks.check_conditions(entry.condition.as_deref(), None) {
                false
            } else if has_stock_list
                && checks.check_conditions_ignoring(
                    entry.condition.as_deref(),
                    None,
                    &SEASON_QUERY_KEYS,
                )
            {
                true
            } else {
                continue;
            };

            let context = QueryContext::builder(self.game)
                .random_handle(Rc::clone(&random))
                .source_phrase(format!("shop '{}'", shop.id))
                .custom_field(SHOP_ID_FIELD, shop.id.clone())
                .build();
            let mut options = ResolveOptions::new().with_avoid_repeat(entry.avoid_repeat);
            if entry.avoid_repeat {
                options = options.with_avoid_ids(&tracker);
            }
            let results = self.engine.resolve_spawn(&entry.spawn, context, &options, errors);

            for (occurrence, result) in results.into_iter().enumerate() {
                let repeated = !tracker.insert(dedup_key(&result.item));
                if entry.avoid_repeat && repeated {
                    continue;
                }
                let (salable, terms) = self.price_entry(shop, entry, result, out_of_season, &checks);
                let sync_key = format!("{entry_id}#{occurrence}");
                stock.push(salable, StockEntry { sync_key, ..terms });
            }
        }

        if let Some(synced) = self.synced {
            let before = stock.len();
            stock.reconcile(synced, &checks.player().name);
            tracing::trace!(
                shop = %shop.id,
                dropped = before - stock.len(),
                "reconciled synchronized stock"
            );
        }
        tracing::debug!(shop = %shop.id, entries = stock.len(), "built shop stock");
        stock
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn price_entry(
        &self,
        shop: &ShopData,
        entry: &ShopItemData,
        result: ResolvedItem,
        out_of_season: bool,
        checks: &QueryContext,
    ) -> (Salable, StockEntry) {
        let ResolvedItem {
            item,
            override_base_price,
            override_available_stock,
            override_trade_item_id,
            override_trade_item_amount,
            sync_stack_with,
            ..
        } = result;
        let target = item.as_item();
        let random = checks.random();
        let mut check = |condition: &str| checks.check_conditions(Some(condition), target);

        let trade_item_id = override_trade_item_id.or_else(|| entry.trade_item_id.clone());
        let trade_item_amount = override_trade_item_amount.unwrap_or(entry.trade_item_amount);

        let (mut price, derived) = if let Some(price) = override_base_price {
            (price, false)
        } else if entry.price >= 0 {
            (entry.price, false)
        } else if trade_item_id.is_some() {
            (0, false)
        } else if entry.use_object_data_price {
            (catalog_price(&item), true)
        } else {
            (item.sale_price(), true)
        };

        let apply_margin = entry
            .apply_profit_margins
            .or(shop.apply_profit_margins)
            .unwrap_or(derived);
        if apply_margin {
            price = (price as f32 * self.game.world().profit_margin) as i32;
        }
        if out_of_season {
            price = (price as f32 * OUT_OF_SEASON_MULTIPLIER) as i32;
        }
        if !entry.ignore_shop_price_modifiers {
            price = apply_modifiers_int(
                price,
                &shop.price_modifiers,
                shop.price_modifier_mode,
                &mut check,
                random,
            );
        }
        price = apply_modifiers_int(
            price,
            &entry.price_modifiers,
            entry.price_modifier_mode,
            &mut check,
            random,
        );

        let mut available = apply_modifiers_int(
            override_available_stock.unwrap_or(entry.available_stock),
            &entry.available_stock_modifiers,
            entry.available_stock_modifier_mode,
            &mut check,
            random,
        );
        let mut limit_mode = entry.available_stock_limit;
        if item.is_recipe() {
            available = 1;
            limit_mode = LimitedStockMode::None;
        }
        if let Some(synced) = &sync_stack_with {
            available = synced.stack;
            limit_mode = LimitedStockMode::None;
        }

        let stock_entry = StockEntry {
            price,
            stock: Stock::from_raw(available),
            trade_item_id,
            trade_item_amount,
            limit_mode,
            sync_key: String::new(),
            sync_stack_with,
            actions_on_purchase: entry.actions_on_purchase.clone(),
            out_of_season,
        };
        (item, stock_entry)
    }
}

impl std::fmt::Debug for ShopBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopBuilder")
            .field("engine", self.engine)
            .field("fixed_random", &self.random.is_some())
            .field("synced", &self.synced.is_some())
            .finish_non_exhaustive()
    }
}

fn catalog_price(salable: &Salable) -> i32 {
    salable.as_item().map_or_else(|| salable.sale_price(), |item: &Item| item.price)
}

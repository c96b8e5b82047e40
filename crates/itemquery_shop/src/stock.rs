//! Built shop stock.

use std::fmt::{self, Write as _};

use itemquery_foundation::{Error, Item, ItemClass, Result, Salable};

use crate::data::LimitedStockMode;
use crate::sync::SyncedStock;

/// How many of an item a shop can sell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stock {
    /// No limit.
    Unlimited,
    /// A fixed number remain.
    Limited(i32),
}

impl Stock {
    /// Normalizes a raw stock value; negative means unlimited.
    #[must_use]
    pub const fn from_raw(stock: i32) -> Self {
        if stock < 0 {
            Self::Unlimited
        } else {
            Self::Limited(stock)
        }
    }

    /// Returns true if at least `count` can be bought.
    #[must_use]
    pub const fn allows(self, count: i32) -> bool {
        match self {
            Self::Unlimited => true,
            Self::Limited(remaining) => remaining >= count,
        }
    }

    /// Returns true if nothing remains.
    #[must_use]
    pub const fn is_sold_out(self) -> bool {
        matches!(self, Self::Limited(remaining) if remaining <= 0)
    }
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlimited => f.write_str("unlimited"),
            Self::Limited(remaining) => write!(f, "{remaining}"),
        }
    }
}

/// Sale terms for one item in a shop.
#[derive(Clone, Debug, PartialEq)]
pub struct StockEntry {
    /// Price per item.
    pub price: i32,
    /// How many remain.
    pub stock: Stock,
    /// Item the buyer must trade, if any.
    pub trade_item_id: Option<String>,
    /// How many trade items per purchase.
    pub trade_item_amount: i32,
    /// Who the stock is shared between.
    pub limit_mode: LimitedStockMode,
    /// Key identifying this entry in synchronized stock.
    pub sync_key: String,
    /// External item whose stack is this entry's stock.
    pub sync_stack_with: Option<Item>,
    /// Trigger actions run when the item is bought.
    pub actions_on_purchase: Vec<String>,
    /// Whether the entry is only present through the missing stock list.
    pub out_of_season: bool,
}

/// Identity used to detect repeated items in one shop.
///
/// Tools include their upgrade level and recipes are marked, so a recipe
/// never hides the item it teaches.
#[must_use]
pub fn dedup_key(salable: &Salable) -> String {
    let mut key = salable.qualified_id().to_string();
    if let Some(item) = salable.as_item() {
        if item.class == ItemClass::Tool {
            let _ = write!(key, "#lv{}", item.upgrade_level);
        }
        if item.is_recipe {
            key.push_str("#Recipe");
        }
    }
    key
}

/// The stock of one shop, in display order.
///
/// Entries are not keyed by item ID; the same item can appear more than
/// once when its entries don't avoid repeats.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShopStock {
    shop_id: String,
    entries: Vec<(Salable, StockEntry)>,
}

impl ShopStock {
    /// Creates empty stock for a shop.
    #[must_use]
    pub fn new(shop_id: impl Into<String>) -> Self {
        Self {
            shop_id: shop_id.into(),
            entries: Vec::new(),
        }
    }

    /// The shop this stock belongs to.
    #[must_use]
    pub fn shop_id(&self) -> &str {
        &self.shop_id
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the shop has nothing to sell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds an entry.
    pub fn push(&mut self, salable: Salable, entry: StockEntry) {
        self.entries.push((salable, entry));
    }

    /// Iterates over entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&Salable, &StockEntry)> {
        self.entries.iter().map(|(salable, entry)| (salable, entry))
    }

    /// Returns an entry by position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<(&Salable, &StockEntry)> {
        self.entries.get(index).map(|(salable, entry)| (salable, entry))
    }

    /// Returns the first entry for a qualified ID.
    #[must_use]
    pub fn find(&self, qualified_id: &str) -> Option<(&Salable, &StockEntry)> {
        self.iter().find(|(salable, _)| salable.qualified_id() == qualified_id)
    }

    /// Subtracts purchases recorded in synchronized stock and drops
    /// entries which sold out.
    ///
    /// Only limited entries with a tracked limit mode are affected.
    pub fn reconcile(&mut self, synced: &dyn SyncedStock, player: &str) {
        let shop_id = &self.shop_id;
        for (_, entry) in &mut self.entries {
            let Stock::Limited(remaining) = entry.stock else {
                continue;
            };
            if entry.limit_mode == LimitedStockMode::None {
                continue;
            }
            let bought = synced.purchased(shop_id, &entry.sync_key, entry.limit_mode, player);
            entry.stock = Stock::Limited(remaining - bought);
        }
        self.entries.retain(|(_, entry)| !entry.stock.is_sold_out());
    }

    /// Buys `count` of the entry at `index`, returning the total price.
    ///
    /// Limited stock is reduced and, if tracked, recorded in `synced`.
    /// Entries synced with an external item also reduce that item's stack.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry doesn't exist, `count` isn't
    /// positive, or not enough stock remains.
    pub fn purchase(
        &mut self,
        index: usize,
        count: i32,
        synced: &mut dyn SyncedStock,
        player: &str,
    ) -> Result<i32> {
        let Some((salable, entry)) = self.entries.get_mut(index) else {
            return Err(Error::invalid_argument(format!("no stock entry at {index}")));
        };
        if count <= 0 {
            return Err(Error::invalid_argument("purchase count must be positive"));
        }
        if !entry.stock.allows(count) {
            return Err(Error::invalid_argument(format!(
                "only {} of '{}' left",
                entry.stock,
                salable.display_name()
            )));
        }

        if let Stock::Limited(remaining) = entry.stock {
            entry.stock = Stock::Limited(remaining - count);
            if entry.limit_mode != LimitedStockMode::None {
                synced.record(&self.shop_id, &entry.sync_key, entry.limit_mode, player, count);
            }
        }
        if let Some(item) = &mut entry.sync_stack_with {
            item.stack = (item.stack - count).max(0);
        }
        Ok(entry.price.saturating_mul(count))
    }
}

impl fmt::Display for ShopStock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (salable, entry) in self.iter() {
            write!(f, "{salable}  {}g  stock={}", entry.price, entry.stock)?;
            if let Some(trade) = &entry.trade_item_id {
                write!(f, "  trade={trade}x{}", entry.trade_item_amount)?;
            }
            if entry.out_of_season {
                f.write_str("  (out of season)")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

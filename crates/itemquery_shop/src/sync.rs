//! Stock shared between shop openings and players.

use std::collections::HashMap;

use crate::data::LimitedStockMode;

/// Purchases counted against limited stock.
///
/// Shops rebuild their stock from data each time they open; a synced
/// stock store remembers what was already bought so the rebuilt stock can
/// be reduced to match.
pub trait SyncedStock {
    /// How many of an entry have been bought.
    fn purchased(&self, shop_id: &str, sync_key: &str, mode: LimitedStockMode, player: &str) -> i32;

    /// Records a purchase.
    fn record(&mut self, shop_id: &str, sync_key: &str, mode: LimitedStockMode, player: &str, count: i32);
}

/// In-memory purchase counts.
#[derive(Clone, Debug, Default)]
pub struct StockLedger {
    global: HashMap<(String, String), i32>,
    per_player: HashMap<(String, String, String), i32>,
}

impl StockLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no purchases are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.per_player.is_empty()
    }

    /// Forgets every purchase, as at the start of a new day.
    pub fn clear(&mut self) {
        self.global.clear();
        self.per_player.clear();
    }
}

impl SyncedStock for StockLedger {
    fn purchased(&self, shop_id: &str, sync_key: &str, mode: LimitedStockMode, player: &str) -> i32 {
        let count = match mode {
            LimitedStockMode::Global => self
                .global
                .get(&(shop_id.to_string(), sync_key.to_string())),
            LimitedStockMode::Player => self.per_player.get(&(
                shop_id.to_string(),
                sync_key.to_string(),
                player.to_string(),
            )),
            LimitedStockMode::None => None,
        };
        count.copied().unwrap_or(0)
    }

    fn record(&mut self, shop_id: &str, sync_key: &str, mode: LimitedStockMode, player: &str, count: i32) {
        let slot = match mode {
            LimitedStockMode::Global => self
                .global
                .entry((shop_id.to_string(), sync_key.to_string()))
                .or_default(),
            LimitedStockMode::Player => self
                .per_player
                .entry((shop_id.to_string(), sync_key.to_string(), player.to_string()))
                .or_default(),
            LimitedStockMode::None => return,
        };
        *slot += count;
    }
}

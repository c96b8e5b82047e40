//! Shop definitions as loaded from content data.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use itemquery_engine::SpawnItemFields;
use itemquery_foundation::{ModifierMode, QuantityModifier};

/// Who a limited stock is shared between.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LimitedStockMode {
    /// Purchases by any player count against the stock.
    #[default]
    Global,
    /// Each player has their own stock.
    Player,
    /// Stock isn't tracked between shop openings.
    None,
}

/// One entry in a shop's item list.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShopItemData {
    /// What to sell and how to shape it.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub spawn: SpawnItemFields,
    /// Condition for the entry to appear.
    pub condition: Option<String>,
    /// Item the buyer must trade, if any.
    pub trade_item_id: Option<String>,
    /// How many trade items the buyer must give.
    pub trade_item_amount: i32,
    /// Price, or `-1` to derive it from the item.
    pub price: i32,
    /// Whether to apply the world's profit margin. Unset means "only
    /// when the price is derived from the item".
    pub apply_profit_margins: Option<bool>,
    /// Stock per item, or `-1` for unlimited.
    pub available_stock: i32,
    /// Who the stock is shared between.
    pub available_stock_limit: LimitedStockMode,
    /// Skip items already in the shop's stock.
    pub avoid_repeat: bool,
    /// Use the catalog price instead of the item's sale price.
    pub use_object_data_price: bool,
    /// Skip the shop-wide price modifiers.
    pub ignore_shop_price_modifiers: bool,
    /// Modifiers applied to the price after the shop's.
    pub price_modifiers: Vec<QuantityModifier>,
    /// How price modifiers combine.
    pub price_modifier_mode: ModifierMode,
    /// Modifiers applied to the available stock.
    pub available_stock_modifiers: Vec<QuantityModifier>,
    /// How stock modifiers combine.
    pub available_stock_modifier_mode: ModifierMode,
    /// Trigger actions run when the item is bought.
    pub actions_on_purchase: Vec<String>,
}

impl Default for ShopItemData {
    fn default() -> Self {
        Self {
            spawn: SpawnItemFields::default(),
            condition: None,
            trade_item_id: None,
            trade_item_amount: 1,
            price: -1,
            apply_profit_margins: None,
            available_stock: -1,
            available_stock_limit: LimitedStockMode::Global,
            avoid_repeat: false,
            use_object_data_price: false,
            ignore_shop_price_modifiers: false,
            price_modifiers: Vec::new(),
            price_modifier_mode: ModifierMode::Stack,
            available_stock_modifiers: Vec::new(),
            available_stock_modifier_mode: ModifierMode::Stack,
            actions_on_purchase: Vec::new(),
        }
    }
}

impl ShopItemData {
    /// Creates an entry for a query.
    #[must_use]
    pub fn new(id: impl Into<String>, item_id: impl Into<String>) -> Self {
        Self {
            spawn: SpawnItemFields::new(item_id).with_id(id),
            ..Self::default()
        }
    }

    /// Builder method to set the price.
    #[must_use]
    pub fn with_price(mut self, price: i32) -> Self {
        self.price = price;
        self
    }

    /// Builder method to set the display condition.
    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Builder method to require a trade item.
    #[must_use]
    pub fn with_trade_item(mut self, item_id: impl Into<String>, amount: i32) -> Self {
        self.trade_item_id = Some(item_id.into());
        self.trade_item_amount = amount;
        self
    }

    /// Builder method to limit stock.
    #[must_use]
    pub fn with_stock(mut self, stock: i32, mode: LimitedStockMode) -> Self {
        self.available_stock = stock;
        self.available_stock_limit = mode;
        self
    }

    /// Builder method to skip repeated items.
    #[must_use]
    pub fn avoiding_repeats(mut self) -> Self {
        self.avoid_repeat = true;
        self
    }

    /// Builder method to add a price modifier.
    #[must_use]
    pub fn with_price_modifier(mut self, modifier: QuantityModifier) -> Self {
        self.price_modifiers.push(modifier);
        self
    }

    /// Builder method to add a stock modifier.
    #[must_use]
    pub fn with_stock_modifier(mut self, modifier: QuantityModifier) -> Self {
        self.available_stock_modifiers.push(modifier);
        self
    }

    /// Builder method to change the spawn fields.
    #[must_use]
    pub fn with_spawn(mut self, spawn: SpawnItemFields) -> Self {
        self.spawn = spawn;
        self
    }
}

/// A shop and everything it can sell.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShopData {
    /// Unique shop ID.
    pub id: String,
    /// Entries in display order.
    pub items: Vec<ShopItemData>,
    /// Default for entries that don't set `apply_profit_margins`.
    pub apply_profit_margins: Option<bool>,
    /// Modifiers applied to every entry's price.
    pub price_modifiers: Vec<QuantityModifier>,
    /// How shop price modifiers combine.
    pub price_modifier_mode: ModifierMode,
    /// Mail flag which lets out-of-season entries appear at a surcharge.
    pub missing_stock_list_mail: Option<String>,
}

impl ShopData {
    /// Creates an empty shop.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Builder method to add an entry.
    #[must_use]
    pub fn with_item(mut self, item: ShopItemData) -> Self {
        self.items.push(item);
        self
    }

    /// Builder method to add a shop-wide price modifier.
    #[must_use]
    pub fn with_price_modifier(mut self, modifier: QuantityModifier) -> Self {
        self.price_modifiers.push(modifier);
        self
    }

    /// Builder method to allow out-of-season stock for players with a mail flag.
    #[must_use]
    pub fn with_missing_stock_list(mut self, mail: impl Into<String>) -> Self {
        self.missing_stock_list_mail = Some(mail.into());
        self
    }
}

//! Shop stock building for itemquery.
//!
//! This crate provides:
//! - [`ShopData`] and [`ShopItemData`] - Shop definitions loaded from content
//! - [`ShopBuilder`] - Resolves a shop's entries into priced stock
//! - [`ShopStock`] - The built stock, with purchasing
//! - [`SyncedStock`] and [`StockLedger`] - Purchases remembered between openings

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builder;
pub mod data;
pub mod stock;
pub mod sync;

pub use builder::{OUT_OF_SEASON_MULTIPLIER, SHOP_ID_FIELD, ShopBuilder};
pub use data::{LimitedStockMode, ShopData, ShopItemData};
pub use stock::{ShopStock, Stock, StockEntry, dedup_key};
pub use sync::{StockLedger, SyncedStock};

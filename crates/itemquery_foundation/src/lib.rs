//! Core item types, catalog, modifiers, and randomness for itemquery.
//!
//! This crate provides:
//! - [`Item`] and [`Salable`] - Concrete items and other sellable things
//! - [`ItemCatalog`] - Item type registry and item factory
//! - [`QuantityModifier`] - Conditional number pipelines for price, stack, quality
//! - [`GameRandom`] - Seeded, reproducible random streams
//! - [`WorldState`], [`Player`], [`Location`] - Ambient game state
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod error;
pub mod id;
pub mod item;
pub mod modifier;
pub mod preserve;
pub mod random;
pub mod world;

pub use catalog::{
    FurnitureData, ItemCatalog, ItemData, ItemType, ItemTypeData, ToolData, ToolUpgrade,
    compare_furniture,
};
pub use error::{Error, ErrorContext, ErrorKind, Result, SemanticLimit};
pub use item::{Item, ItemClass, OtherSalable, Salable};
pub use modifier::{
    Modification, ModifierMode, QuantityModifier, apply_modifiers, apply_modifiers_int,
};
pub use preserve::PreserveType;
pub use random::{GameRandom, RngHandle};
pub use world::{DailyDish, Location, Player, Season, WorldState};

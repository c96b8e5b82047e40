//! Built-in item query resolvers for itemquery.
//!
//! Resolvers are organized by what they draw from:
//! - [`catalog`] - Enumerating catalog items (`ALL_ITEMS`, `RANDOM_ITEMS`)
//! - [`flavored`] - Artisan goods made from an ingredient (`FLAVORED_ITEM`)
//! - [`special`] - One-off collectibles with fallbacks (`LOST_BOOK_OR_ITEM`, `SECRET_NOTE_OR_ITEM`)
//! - [`tools`] - Blacksmith upgrades (`TOOL_UPGRADES`)
//! - [`daily`] - Items tied to today's world state (`DISH_OF_THE_DAY`, `SHOP_TOWN_KEY`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod daily;
pub mod flavored;
pub mod special;
pub mod tools;

use itemquery_engine::{QueryEngine, ResolverFn, ResolverRegistry};
use itemquery_foundation::Result;

/// Every built-in resolver with its query key.
pub const BUILTINS: [(&str, ResolverFn); 8] = [
    ("ALL_ITEMS", catalog::all_items),
    ("RANDOM_ITEMS", catalog::random_items),
    ("FLAVORED_ITEM", flavored::flavored_item),
    ("LOST_BOOK_OR_ITEM", special::lost_book_or_item),
    ("SECRET_NOTE_OR_ITEM", special::secret_note_or_item),
    ("TOOL_UPGRADES", tools::tool_upgrades),
    ("DISH_OF_THE_DAY", daily::dish_of_the_day),
    ("SHOP_TOWN_KEY", daily::shop_town_key),
];

/// Registers every built-in resolver.
///
/// # Errors
///
/// Returns an error if a built-in key is already registered.
pub fn register_builtins(registry: &mut ResolverRegistry) -> Result<()> {
    for (key, resolver) in BUILTINS {
        registry.register(key, resolver)?;
    }
    Ok(())
}

/// Creates a registry holding only the built-in resolvers.
///
/// # Errors
///
/// Returns an error if [`BUILTINS`] repeats a key.
pub fn default_registry() -> Result<ResolverRegistry> {
    let mut registry = ResolverRegistry::new();
    register_builtins(&mut registry)?;
    Ok(registry)
}

/// Creates an engine using the built-in resolvers.
///
/// # Errors
///
/// Returns an error if [`BUILTINS`] repeats a key.
pub fn default_engine() -> Result<QueryEngine> {
    default_registry().map(QueryEngine::new)
}

//! Game data bundles loaded from JSON.
//!
//! A bundle holds everything a session needs: item types and their items,
//! the world state, the acting player, the current location, and shops.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use itemquery_engine::Game;
use itemquery_foundation::{
    Error, ItemCatalog, ItemTypeData, Location, Player, Result, WorldState,
};
use itemquery_shop::ShopData;

/// Everything loaded from a data file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameData {
    /// Item types and their items.
    pub item_types: Vec<ItemTypeData>,
    /// World state.
    pub world: WorldState,
    /// The acting player.
    pub player: Player,
    /// The current location.
    pub location: Location,
    /// Shop definitions.
    pub shops: Vec<ShopData>,
}

impl GameData {
    /// Parses a bundle from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text isn't a valid bundle.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::data(format!("invalid game data: {e}")))
    }

    /// Serializes the bundle as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::data(e.to_string()))
    }

    /// Loads a bundle from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| Error::data(format!("failed to read '{}': {e}", path.display())))?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "loading game data");
        Self::from_json(&text)
    }

    /// Looks up a shop by ID (case-insensitive).
    #[must_use]
    pub fn shop(&self, id: &str) -> Option<&ShopData> {
        self.shops.iter().find(|shop| shop.id.eq_ignore_ascii_case(id))
    }

    /// Builds the item catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if an item type is malformed.
    pub fn catalog(&self) -> Result<ItemCatalog> {
        ItemCatalog::from_types(self.item_types.clone())
    }

    /// Builds the game host for this bundle.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog can't be built.
    pub fn game(&self) -> Result<Game> {
        Ok(Game::new(self.catalog()?, self.world.clone())
            .with_player(self.player.clone())
            .with_location(self.location.clone()))
    }
}

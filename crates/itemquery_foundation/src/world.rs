//! Ambient game state: the world, the acting player, and locations.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::id;

/// Number of lost books that can be found.
pub const TOTAL_LOST_BOOKS: u32 = 21;

/// Number of secret notes that can be found.
pub const TOTAL_SECRET_NOTES: u32 = 25;

/// A season of the year.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Season {
    /// Spring.
    #[default]
    Spring,
    /// Summer.
    Summer,
    /// Fall.
    Fall,
    /// Winter.
    Winter,
}

impl Season {
    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
            Self::Winter => "winter",
        }
    }
}

impl FromStr for Season {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "fall" => Ok(Self::Fall),
            "winter" => Ok(Self::Winter),
            _ => Err(Error::invalid_argument(format!("unknown season '{s}'"))),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Today's featured dish at the saloon.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DailyDish {
    /// Item ID of the dish.
    pub item_id: String,
    /// How many portions remain today.
    pub stack: i32,
}

/// World-wide state shared by every player.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldState {
    /// Seed for the save's random streams.
    pub seed: u64,
    /// Current season.
    pub season: Season,
    /// Day of the month, starting at 1.
    pub day_of_month: u32,
    /// Year, starting at 1.
    pub year: u32,
    /// Days elapsed since the save started, starting at 1.
    pub days_played: u32,
    /// Lost books found so far.
    pub lost_books_found: u32,
    /// Multiplier applied to shop prices that use profit margins.
    pub profit_margin: f32,
    /// Today's featured dish.
    pub dish_of_the_day: Option<DailyDish>,
}

impl Default for WorldState {
    fn default() -> Self {
        Self {
            seed: 0,
            season: Season::Spring,
            day_of_month: 1,
            year: 1,
            days_played: 1,
            lost_books_found: 0,
            profit_margin: 1.0,
            dish_of_the_day: None,
        }
    }
}

impl WorldState {
    /// Creates a world state with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Builder method to set the season.
    #[must_use]
    pub fn with_season(mut self, season: Season) -> Self {
        self.season = season;
        self
    }
}

/// The acting player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Player {
    /// Player name.
    pub name: String,
    /// Item IDs in the player's inventory.
    pub items: Vec<String>,
    /// Mail and event flags the player has received.
    pub mail: BTreeSet<String>,
    /// Secret notes the player has already read.
    pub secret_notes_seen: BTreeSet<u32>,
    /// Whether the player can find secret notes.
    pub has_magnifying_glass: bool,
    /// Whether the player owns the town key.
    pub has_town_key: bool,
}

impl Player {
    /// Creates a player with an empty inventory.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns true if the player has received the given mail flag.
    #[must_use]
    pub fn has_mail(&self, flag: &str) -> bool {
        self.mail.contains(flag)
    }

    /// Returns true if the player's inventory holds the given item.
    #[must_use]
    pub fn has_item(&self, item_id: &str) -> bool {
        self.items.iter().any(|held| id::ids_match(held, item_id))
    }
}

/// A location in the world.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Location {
    /// Location name.
    pub name: String,
    /// Whether the location is outdoors.
    pub outdoors: bool,
}

impl Location {
    /// Creates a location.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outdoors: false,
        }
    }
}

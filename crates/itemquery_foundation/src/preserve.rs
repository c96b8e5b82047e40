//! Preserve types for flavored items (wine, jelly, honey...).
//!
//! A flavored item is an output item whose name and price derive from the
//! ingredient it was made from.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The kind of artisan product a flavored item is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PreserveType {
    /// Fruit wine.
    Wine,
    /// Fruit jelly.
    Jelly,
    /// Pickled vegetables.
    Pickle,
    /// Vegetable juice.
    Juice,
    /// Fish roe.
    Roe,
    /// Aged roe.
    AgedRoe,
    /// Honey, optionally flavored by a flower.
    Honey,
    /// Targeted bait.
    Bait,
    /// Dried fruit.
    DriedFruit,
    /// Dried mushrooms.
    DriedMushroom,
    /// Smoked fish.
    SmokedFish,
}

impl PreserveType {
    /// All preserve types.
    pub const ALL: [Self; 11] = [
        Self::Wine,
        Self::Jelly,
        Self::Pickle,
        Self::Juice,
        Self::Roe,
        Self::AgedRoe,
        Self::Honey,
        Self::Bait,
        Self::DriedFruit,
        Self::DriedMushroom,
        Self::SmokedFish,
    ];

    /// The enum name as written in queries.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wine => "Wine",
            Self::Jelly => "Jelly",
            Self::Pickle => "Pickle",
            Self::Juice => "Juice",
            Self::Roe => "Roe",
            Self::AgedRoe => "AgedRoe",
            Self::Honey => "Honey",
            Self::Bait => "Bait",
            Self::DriedFruit => "DriedFruit",
            Self::DriedMushroom => "DriedMushroom",
            Self::SmokedFish => "SmokedFish",
        }
    }

    /// Qualified ID of the item produced by this preserve type.
    #[must_use]
    pub const fn output_id(self) -> &'static str {
        match self {
            Self::Wine => "(O)348",
            Self::Jelly => "(O)344",
            Self::Pickle => "(O)342",
            Self::Juice => "(O)350",
            Self::Roe => "(O)812",
            Self::AgedRoe => "(O)447",
            Self::Honey => "(O)340",
            Self::Bait => "(O)SpecificBait",
            Self::DriedFruit => "(O)DriedFruit",
            Self::DriedMushroom => "(O)DriedMushrooms",
            Self::SmokedFish => "(O)SmokedFish",
        }
    }

    /// Returns true if this preserve can exist without an ingredient.
    #[must_use]
    pub const fn allows_no_ingredient(self) -> bool {
        matches!(self, Self::Honey)
    }

    /// Display name for a product made from the given ingredient.
    #[must_use]
    pub fn display_name(self, ingredient: Option<&str>) -> String {
        let Some(ingredient) = ingredient else {
            return match self {
                Self::Honey => "Wild Honey".to_string(),
                _ => self.name().to_string(),
            };
        };
        match self {
            Self::Wine => format!("{ingredient} Wine"),
            Self::Jelly => format!("{ingredient} Jelly"),
            Self::Pickle => format!("Pickled {ingredient}"),
            Self::Juice => format!("{ingredient} Juice"),
            Self::Roe => format!("{ingredient} Roe"),
            Self::AgedRoe => format!("Aged {ingredient}"),
            Self::Honey => format!("{ingredient} Honey"),
            Self::Bait => format!("{ingredient} Bait"),
            Self::DriedFruit | Self::DriedMushroom => format!("Dried {ingredient}"),
            Self::SmokedFish => format!("Smoked {ingredient}"),
        }
    }

    /// Catalog price for a product made from an ingredient with the given price.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn price(self, base_price: i32, ingredient_price: Option<i32>) -> i32 {
        let Some(ingredient) = ingredient_price else {
            return base_price;
        };
        match self {
            Self::Wine => ingredient * 3,
            Self::Jelly | Self::Pickle => 50 + ingredient * 2,
            Self::Juice => (f64::from(ingredient) * 2.25) as i32,
            Self::Roe => 30 + ingredient / 2,
            Self::AgedRoe | Self::SmokedFish => ingredient * 2,
            Self::Honey => base_price + ingredient * 2,
            Self::Bait => base_price,
            Self::DriedFruit | Self::DriedMushroom => (f64::from(ingredient) * 7.5) as i32 + 25,
        }
    }
}

impl FromStr for PreserveType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preserve| preserve.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::invalid_argument(format!("unsupported flavor type '{s}'")))
    }
}

impl fmt::Display for PreserveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

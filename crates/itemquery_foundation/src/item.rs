//! Item instances and other salable things.
//!
//! An [`Item`] is a concrete instance created from catalog data. Shops can
//! also sell things that are not items (a key, a service); those are
//! represented by [`OtherSalable`]. [`Salable`] unifies both.

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::id;
use crate::preserve::PreserveType;

/// Normal quality.
pub const QUALITY_NORMAL: i32 = 0;
/// Silver quality.
pub const QUALITY_SILVER: i32 = 1;
/// Gold quality.
pub const QUALITY_GOLD: i32 = 2;
/// Iridium quality.
pub const QUALITY_IRIDIUM: i32 = 4;

/// Snaps an arbitrary number to the nearest valid quality level.
///
/// Quality `3` does not exist and rounds down to gold.
#[must_use]
pub fn normalize_quality(quality: i32) -> i32 {
    match quality {
        i32::MIN..=0 => QUALITY_NORMAL,
        1 => QUALITY_SILVER,
        2 | 3 => QUALITY_GOLD,
        _ => QUALITY_IRIDIUM,
    }
}

/// The runtime class of an item, which decides how it behaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemClass {
    /// A plain object.
    #[default]
    Object,
    /// A big craftable.
    BigCraftable,
    /// A piece of furniture.
    Furniture,
    /// An equippable ring; stored with object IDs.
    Ring,
    /// Equippable boots.
    Boots,
    /// A hat.
    Hat,
    /// A shirt or pants.
    Clothing,
    /// A tool with an upgrade level.
    Tool,
    /// A weapon.
    Weapon,
    /// A trinket.
    Trinket,
    /// Wallpaper or flooring.
    Decor,
}

impl ItemClass {
    /// Returns true for equip-only classes that have no recipe form.
    ///
    /// Recipes for these are represented as plain objects instead.
    #[must_use]
    pub const fn is_equip_only(self) -> bool {
        matches!(self, Self::Ring | Self::Boots)
    }

    /// Returns true if sale prices are derived by doubling the catalog price.
    #[must_use]
    pub const fn doubles_sale_price(self) -> bool {
        matches!(self, Self::Object | Self::BigCraftable | Self::Ring)
    }
}

/// A concrete item instance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    /// Qualified item ID, like `(O)128`.
    pub qualified_id: String,
    /// Runtime class.
    pub class: ItemClass,
    /// Internal name.
    pub name: String,
    /// Name shown to players.
    pub display_name: String,
    /// Number of items in this stack.
    pub stack: i32,
    /// Maximum stack size.
    pub max_stack: i32,
    /// Quality level.
    pub quality: i32,
    /// Price from the item's catalog data.
    pub price: i32,
    /// Object category.
    pub category: i32,
    /// Whether this is a learnable recipe rather than the item itself.
    pub is_recipe: bool,
    /// Tool upgrade level, or `-1` if not a tool.
    pub upgrade_level: i32,
    /// Preserve type for flavored items.
    pub preserve: Option<PreserveType>,
    /// Qualified ID of the ingredient a flavored item was made from.
    pub preserved_item_id: Option<String>,
    /// Free-form metadata, usually set by content packs.
    pub mod_data: BTreeMap<String, String>,
}

impl Item {
    /// Creates an item with default instance fields.
    #[must_use]
    pub fn new(qualified_id: impl Into<String>, class: ItemClass, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            qualified_id: qualified_id.into(),
            class,
            display_name: name.clone(),
            name,
            stack: 1,
            max_stack: 999,
            quality: QUALITY_NORMAL,
            price: 0,
            category: 0,
            is_recipe: false,
            upgrade_level: -1,
            preserve: None,
            preserved_item_id: None,
            mod_data: BTreeMap::new(),
        }
    }

    /// Returns the item type identifier, like `(O)`.
    #[must_use]
    pub fn type_id(&self) -> &str {
        id::split_qualified(&self.qualified_id).map_or("", |(type_id, _)| type_id)
    }

    /// Returns the unqualified item ID.
    #[must_use]
    pub fn local_id(&self) -> &str {
        id::unqualified(&self.qualified_id)
    }

    /// Returns the price a shop would sell one of this item for before
    /// any shop pricing rules.
    #[must_use]
    pub fn sale_price(&self) -> i32 {
        if self.class.doubles_sale_price() && !self.is_recipe {
            self.price.saturating_mul(2)
        } else {
            self.price
        }
    }

    /// Sets the stack size, clamped to at least one.
    pub fn set_stack(&mut self, stack: i32) {
        self.stack = stack.max(1);
    }

    /// Returns a copy of this item with a stack of one.
    #[must_use]
    pub fn one(&self) -> Self {
        let mut item = self.clone();
        item.stack = 1;
        item
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.display_name, self.qualified_id)?;
        if self.stack != 1 {
            write!(f, " x{}", self.stack)?;
        }
        if self.quality > QUALITY_NORMAL {
            write!(f, " q{}", self.quality)?;
        }
        if self.is_recipe {
            write!(f, " (recipe)")?;
        }
        if self.upgrade_level >= 0 && self.class == ItemClass::Tool {
            write!(f, " lv{}", self.upgrade_level)?;
        }
        Ok(())
    }
}

/// A sellable thing that is not an item instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OtherSalable {
    /// Identifier used for deduplication.
    pub id: String,
    /// Name shown to players.
    pub display_name: String,
    /// Default price.
    pub price: i32,
    /// Number offered per purchase.
    pub stack: i32,
}

impl OtherSalable {
    /// Creates a salable with a stack of one.
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, price: i32) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            price,
            stack: 1,
        }
    }
}

/// Anything a shop can sell.
#[derive(Clone, Debug, PartialEq)]
pub enum Salable {
    /// A concrete item.
    Item(Item),
    /// Something that is sold but isn't an item.
    Other(OtherSalable),
}

impl Salable {
    /// Returns the qualified ID (or the salable ID for non-items).
    #[must_use]
    pub fn qualified_id(&self) -> &str {
        match self {
            Self::Item(item) => &item.qualified_id,
            Self::Other(other) => &other.id,
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Item(item) => &item.display_name,
            Self::Other(other) => &other.display_name,
        }
    }

    /// Returns true if this is a concrete item.
    #[must_use]
    pub const fn is_item(&self) -> bool {
        matches!(self, Self::Item(_))
    }

    /// Returns the item, if this is one.
    #[must_use]
    pub const fn as_item(&self) -> Option<&Item> {
        match self {
            Self::Item(item) => Some(item),
            Self::Other(_) => None,
        }
    }

    /// Returns the item mutably, if this is one.
    pub fn as_item_mut(&mut self) -> Option<&mut Item> {
        match self {
            Self::Item(item) => Some(item),
            Self::Other(_) => None,
        }
    }

    /// Returns the stack size.
    #[must_use]
    pub const fn stack(&self) -> i32 {
        match self {
            Self::Item(item) => item.stack,
            Self::Other(other) => other.stack,
        }
    }

    /// Sets the stack size, clamped to at least one.
    pub fn set_stack(&mut self, stack: i32) {
        match self {
            Self::Item(item) => item.set_stack(stack),
            Self::Other(other) => other.stack = stack.max(1),
        }
    }

    /// Returns the default sale price.
    #[must_use]
    pub fn sale_price(&self) -> i32 {
        match self {
            Self::Item(item) => item.sale_price(),
            Self::Other(other) => other.price,
        }
    }

    /// Returns true if this is an item marked as a recipe.
    #[must_use]
    pub fn is_recipe(&self) -> bool {
        self.as_item().is_some_and(|item| item.is_recipe)
    }
}

impl From<Item> for Salable {
    fn from(item: Item) -> Self {
        Self::Item(item)
    }
}

impl From<OtherSalable> for Salable {
    fn from(other: OtherSalable) -> Self {
        Self::Other(other)
    }
}

impl fmt::Display for Salable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(item) => write!(f, "{item}"),
            Self::Other(other) => write!(f, "{} [{}]", other.display_name, other.id),
        }
    }
}

//! The item catalog: every item type and the data for its items.
//!
//! The catalog is the item factory. It turns a qualified or unqualified
//! item ID into a fresh [`Item`] instance, and enumerates items per type in
//! their declared order for resolvers that walk the whole catalog.

use std::cmp::Ordering;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::id;
use crate::item::{Item, ItemClass};
use crate::preserve::PreserveType;

/// Furniture types in display order. Unknown types sort after these.
pub const FURNITURE_TYPE_ORDER: [&str; 14] = [
    "chair", "bench", "couch", "armchair", "table", "long table", "dresser", "bookcase",
    "decor", "lamp", "painting", "window", "rug", "bed",
];

// =============================================================================
// Item Data
// =============================================================================

/// Catalog data for a single item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemData {
    /// Unqualified item ID.
    pub id: String,
    /// Internal name.
    pub name: String,
    /// Display name, defaulting to the internal name.
    pub display_name: Option<String>,
    /// Runtime class, defaulting to the item type's class.
    pub class: Option<ItemClass>,
    /// Catalog price.
    pub price: i32,
    /// Object category.
    pub category: i32,
    /// Whether random shop sales should skip this item.
    pub exclude_from_random_sale: bool,
    /// Maximum stack size.
    pub max_stack: i32,
    /// Furniture placement data.
    pub furniture: Option<FurnitureData>,
    /// Tool upgrade data.
    pub tool: Option<ToolData>,
}

impl Default for ItemData {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            display_name: None,
            class: None,
            price: 0,
            category: 0,
            exclude_from_random_sale: false,
            max_stack: 999,
            furniture: None,
            tool: None,
        }
    }
}

impl ItemData {
    /// Creates item data with the given ID, name, and price.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            ..Self::default()
        }
    }

    /// Builder method to set the class.
    #[must_use]
    pub fn with_class(mut self, class: ItemClass) -> Self {
        self.class = Some(class);
        self
    }

    /// Builder method to set the category.
    #[must_use]
    pub fn with_category(mut self, category: i32) -> Self {
        self.category = category;
        self
    }

    /// Builder method to exclude the item from random sales.
    #[must_use]
    pub fn excluded_from_random_sale(mut self) -> Self {
        self.exclude_from_random_sale = true;
        self
    }

    /// Builder method to attach furniture data.
    #[must_use]
    pub fn with_furniture(mut self, furniture_type: impl Into<String>) -> Self {
        self.furniture = Some(FurnitureData {
            furniture_type: furniture_type.into(),
        });
        self
    }

    /// Builder method to attach tool data.
    #[must_use]
    pub fn with_tool(mut self, tool: ToolData) -> Self {
        self.tool = Some(tool);
        self
    }

    /// Returns the numeric form of the ID, if it has one.
    #[must_use]
    pub fn numeric_id(&self) -> Option<i64> {
        self.id.parse().ok()
    }
}

/// Furniture placement data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FurnitureData {
    /// Furniture type, like `chair` or `rug`.
    pub furniture_type: String,
}

impl FurnitureData {
    /// Position of this furniture type in [`FURNITURE_TYPE_ORDER`].
    #[must_use]
    pub fn type_rank(&self) -> usize {
        FURNITURE_TYPE_ORDER
            .iter()
            .position(|t| t.eq_ignore_ascii_case(&self.furniture_type))
            .unwrap_or(FURNITURE_TYPE_ORDER.len())
    }
}

/// Tool data: the tool's upgrade level and how it can be obtained.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ToolData {
    /// Upgrade level of this tool.
    pub upgrade_level: i32,
    /// Ways to upgrade into this tool, checked in order.
    pub upgrade_from: Vec<ToolUpgrade>,
}

/// One way to upgrade into a tool.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ToolUpgrade {
    /// Price of the upgrade, or `-1` to use the tool's sale price.
    pub price: i32,
    /// Tool the player must own for this upgrade to be offered.
    pub require_tool_id: Option<String>,
    /// State query that must pass for this upgrade to be offered.
    pub condition: Option<String>,
    /// Item the blacksmith asks for in trade.
    pub trade_item_id: Option<String>,
    /// How many trade items are needed.
    pub trade_item_amount: i32,
}

impl Default for ToolUpgrade {
    fn default() -> Self {
        Self {
            price: -1,
            require_tool_id: None,
            condition: None,
            trade_item_id: None,
            trade_item_amount: 1,
        }
    }
}

// =============================================================================
// Item Types
// =============================================================================

/// Serialized form of an item type and its items.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemTypeData {
    /// Type identifier, like `(O)`.
    pub identifier: String,
    /// Class given to items that don't declare one.
    pub class: ItemClass,
    /// Items in catalog order.
    pub items: Vec<ItemData>,
}

/// A registered item type.
#[derive(Clone, Debug)]
pub struct ItemType {
    identifier: String,
    default_class: ItemClass,
    items: Vec<ItemData>,
    index: HashMap<String, usize>,
}

impl ItemType {
    fn new(identifier: String, default_class: ItemClass) -> Self {
        Self {
            identifier,
            default_class,
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Returns the type identifier, like `(O)`.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the class given to items that don't declare one.
    #[must_use]
    pub const fn default_class(&self) -> ItemClass {
        self.default_class
    }

    /// Returns all items in catalog order.
    #[must_use]
    pub fn items(&self) -> &[ItemData] {
        &self.items
    }

    /// Looks up an item by unqualified ID.
    #[must_use]
    pub fn get(&self, local_id: &str) -> Option<&ItemData> {
        self.index.get(local_id).map(|&i| &self.items[i])
    }

    /// Returns the qualified ID for an item of this type.
    #[must_use]
    pub fn qualify(&self, local_id: &str) -> String {
        id::qualify(&self.identifier, local_id)
    }

    /// Returns true if this type holds furniture.
    #[must_use]
    pub fn is_furniture(&self) -> bool {
        self.default_class == ItemClass::Furniture
    }

    fn insert(&mut self, data: ItemData) {
        if let Some(&existing) = self.index.get(&data.id) {
            self.items[existing] = data;
        } else {
            self.index.insert(data.id.clone(), self.items.len());
            self.items.push(data);
        }
    }
}

/// Returns the class conventionally used by a standard item type.
#[must_use]
pub fn standard_class(type_id: &str) -> ItemClass {
    match type_id {
        id::BIG_CRAFTABLE => ItemClass::BigCraftable,
        id::FURNITURE => ItemClass::Furniture,
        id::HAT => ItemClass::Hat,
        id::BOOTS => ItemClass::Boots,
        id::SHIRT | id::PANTS => ItemClass::Clothing,
        id::TOOL => ItemClass::Tool,
        id::WEAPON => ItemClass::Weapon,
        id::TRINKET => ItemClass::Trinket,
        id::WALLPAPER | id::FLOORING => ItemClass::Decor,
        _ => ItemClass::Object,
    }
}

/// Orders furniture for display: by furniture type, then numeric ID.
#[must_use]
pub fn compare_furniture(left: &ItemData, right: &ItemData) -> Ordering {
    let rank = |data: &ItemData| {
        data.furniture
            .as_ref()
            .map_or(FURNITURE_TYPE_ORDER.len(), FurnitureData::type_rank)
    };
    rank(left)
        .cmp(&rank(right))
        .then_with(|| match (left.numeric_id(), right.numeric_id()) {
            (Some(l), Some(r)) => l.cmp(&r),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => left.id.cmp(&right.id),
        })
}

// =============================================================================
// Item Catalog
// =============================================================================

/// The item catalog and item factory.
#[derive(Clone, Debug, Default)]
pub struct ItemCatalog {
    types: Vec<ItemType>,
}

impl ItemCatalog {
    /// Creates a catalog with no item types.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog with every standard item type registered and empty.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for type_id in id::STANDARD_TYPES {
            catalog.add_type(type_id, standard_class(type_id));
        }
        catalog
    }

    /// Builds a catalog from serialized item types.
    ///
    /// Standard types are always present; listed types extend or replace them.
    ///
    /// # Errors
    ///
    /// Returns an error if a type identifier isn't in `(TYPE)` form.
    pub fn from_types(types: Vec<ItemTypeData>) -> Result<Self> {
        let mut catalog = Self::standard();
        for data in types {
            if !id::is_qualified(&data.identifier) || !id::unqualified(&data.identifier).is_empty() {
                return Err(Error::data(format!(
                    "item type identifier '{}' must look like '(O)'",
                    data.identifier
                )));
            }
            let identifier = data.identifier.to_ascii_uppercase();
            if catalog.item_type(&identifier).is_none() {
                catalog.add_type(&identifier, data.class);
            }
            for item in data.items {
                catalog.insert(&identifier, item)?;
            }
        }
        Ok(catalog)
    }

    /// Registers an empty item type. Existing types are left unchanged.
    pub fn add_type(&mut self, identifier: &str, default_class: ItemClass) {
        if self.item_type(identifier).is_none() {
            self.types
                .push(ItemType::new(identifier.to_ascii_uppercase(), default_class));
        }
    }

    /// Adds or replaces an item in a type.
    ///
    /// # Errors
    ///
    /// Returns an error if the type isn't registered.
    pub fn insert(&mut self, type_id: &str, data: ItemData) -> Result<()> {
        let item_type = self
            .types
            .iter_mut()
            .find(|t| t.identifier.eq_ignore_ascii_case(type_id))
            .ok_or_else(|| Error::unknown_item_type(type_id))?;
        item_type.insert(data);
        Ok(())
    }

    /// Builder method to add an item, registering its type if needed.
    #[must_use]
    pub fn with_item(mut self, type_id: &str, data: ItemData) -> Self {
        self.add_type(type_id, standard_class(type_id));
        // The type was just registered, so insertion can't fail.
        let _ = self.insert(type_id, data);
        self
    }

    /// Returns all item types in lookup order.
    pub fn types(&self) -> impl Iterator<Item = &ItemType> {
        self.types.iter()
    }

    /// Looks up an item type by identifier (case-insensitive).
    #[must_use]
    pub fn item_type(&self, identifier: &str) -> Option<&ItemType> {
        self.types
            .iter()
            .find(|t| t.identifier.eq_ignore_ascii_case(identifier))
    }

    /// Looks up the type and data for an item ID.
    ///
    /// Unqualified IDs are matched against item types in lookup order.
    #[must_use]
    pub fn data(&self, item_id: &str) -> Option<(&ItemType, &ItemData)> {
        let item_id = item_id.trim();
        if let Some((type_id, local)) = id::split_qualified(item_id) {
            let item_type = self.item_type(type_id)?;
            return item_type.get(local).map(|data| (item_type, data));
        }
        self.types
            .iter()
            .find_map(|t| t.get(item_id).map(|data| (t, data)))
    }

    /// Returns the qualified form of an item ID, if the item exists.
    #[must_use]
    pub fn qualify(&self, item_id: &str) -> Option<String> {
        self.data(item_id).map(|(t, data)| t.qualify(&data.id))
    }

    /// Returns true if the item ID resolves to a known item.
    #[must_use]
    pub fn contains(&self, item_id: &str) -> bool {
        self.data(item_id).is_some()
    }

    /// Creates a new item instance with a stack of one.
    ///
    /// # Errors
    ///
    /// Returns an error if no item matches the ID.
    pub fn create_item(&self, item_id: &str) -> Result<Item> {
        let (item_type, data) = self
            .data(item_id)
            .ok_or_else(|| Error::unknown_item(item_id.trim()))?;
        Ok(Self::instantiate(item_type, data))
    }

    /// Creates an item instance from its type and data.
    #[must_use]
    pub fn instantiate(item_type: &ItemType, data: &ItemData) -> Item {
        let mut item = Item::new(
            item_type.qualify(&data.id),
            data.class.unwrap_or(item_type.default_class),
            data.name.clone(),
        );
        if let Some(display_name) = &data.display_name {
            item.display_name.clone_from(display_name);
        }
        item.price = data.price;
        item.category = data.category;
        item.max_stack = data.max_stack.max(1);
        if let Some(tool) = &data.tool {
            item.upgrade_level = tool.upgrade_level;
        }
        item
    }

    /// Creates a flavored item like wine or honey from an ingredient.
    ///
    /// Without an ingredient only honey is valid ("wild honey").
    ///
    /// # Errors
    ///
    /// Returns an error if the preserve type needs an ingredient and none
    /// was given.
    pub fn create_flavored(&self, preserve: PreserveType, ingredient: Option<&Item>) -> Result<Item> {
        if ingredient.is_none() && !preserve.allows_no_ingredient() {
            return Err(Error::invalid_argument(format!(
                "flavor type '{preserve}' requires an ingredient"
            )));
        }

        let mut item = self.create_item(preserve.output_id()).unwrap_or_else(|_| {
            Item::new(preserve.output_id(), ItemClass::Object, preserve.name())
        });
        item.name = match ingredient {
            Some(ingredient) => format!("{} {}", ingredient.name, preserve.name()),
            None => preserve.display_name(None),
        };
        item.display_name = preserve.display_name(ingredient.map(|i| i.display_name.as_str()));
        item.price = preserve.price(item.price, ingredient.map(|i| i.price));
        item.preserve = Some(preserve);
        item.preserved_item_id = ingredient.map(|i| i.qualified_id.clone());
        Ok(item)
    }
}

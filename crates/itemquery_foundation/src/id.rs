//! Item type identifiers and qualified item IDs.
//!
//! A qualified item ID is an item type identifier followed by the item's
//! unqualified ID, like `(O)128` or `(BC)13`. Item types are always
//! written as a short uppercase code in parentheses.

/// Object items (crops, artifacts, resources, rings).
pub const OBJECT: &str = "(O)";
/// Big craftables (machines, chests).
pub const BIG_CRAFTABLE: &str = "(BC)";
/// Furniture.
pub const FURNITURE: &str = "(F)";
/// Hats.
pub const HAT: &str = "(H)";
/// Boots.
pub const BOOTS: &str = "(B)";
/// Shirts.
pub const SHIRT: &str = "(S)";
/// Pants.
pub const PANTS: &str = "(P)";
/// Tools.
pub const TOOL: &str = "(T)";
/// Melee weapons and slingshots.
pub const WEAPON: &str = "(W)";
/// Trinkets.
pub const TRINKET: &str = "(TR)";
/// Wallpaper.
pub const WALLPAPER: &str = "(WP)";
/// Flooring.
pub const FLOORING: &str = "(FL)";

/// The standard item types, in lookup order for unqualified IDs.
pub const STANDARD_TYPES: [&str; 12] = [
    OBJECT,
    BIG_CRAFTABLE,
    FURNITURE,
    HAT,
    BOOTS,
    SHIRT,
    PANTS,
    TOOL,
    WEAPON,
    TRINKET,
    WALLPAPER,
    FLOORING,
];

/// Splits a qualified item ID into its type identifier and unqualified ID.
///
/// Returns `None` if the ID has no `(TYPE)` prefix.
#[must_use]
pub fn split_qualified(id: &str) -> Option<(&str, &str)> {
    if !id.starts_with('(') {
        return None;
    }
    let end = id.find(')')?;
    Some((&id[..=end], &id[end + 1..]))
}

/// Returns true if the ID carries a `(TYPE)` prefix.
#[must_use]
pub fn is_qualified(id: &str) -> bool {
    split_qualified(id).is_some()
}

/// Returns the unqualified part of an item ID.
///
/// Unqualified IDs are returned unchanged.
#[must_use]
pub fn unqualified(id: &str) -> &str {
    split_qualified(id).map_or(id, |(_, local)| local)
}

/// Builds a qualified item ID from a type identifier and local ID.
#[must_use]
pub fn qualify(type_id: &str, local_id: &str) -> String {
    format!("{type_id}{local_id}")
}

/// Returns true if two item IDs refer to the same item.
///
/// An unqualified ID matches any qualified ID with the same local part.
#[must_use]
pub fn ids_match(left: &str, right: &str) -> bool {
    match (split_qualified(left), split_qualified(right)) {
        (Some(_), Some(_)) => left.eq_ignore_ascii_case(right),
        _ => unqualified(left).eq_ignore_ascii_case(unqualified(right)),
    }
}

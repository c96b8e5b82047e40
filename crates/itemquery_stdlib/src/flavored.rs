//! `FLAVORED_ITEM`: artisan goods named after what they were made from.

use std::iter;

use itemquery_engine::{ErrorSink, QueryArgs, ResolvedItem, ResolvedIter, ResolverCall};
use itemquery_foundation::{PreserveType, Result};

/// Ingredient ID meaning "no ingredient", as in wild honey.
pub const NO_INGREDIENT: &str = "-1";

/// `FLAVORED_ITEM <type> [ingredientId] [ingredientPreservedId]`
///
/// Creates a flavored item such as `Blueberry Wine`. The ingredient may be
/// omitted or given as `-1` for types that don't need one. When the
/// ingredient is itself a preserved good, like roe for aged roe,
/// `ingredientPreservedId` names what it was made from.
///
/// # Errors
///
/// Returns an error for an unknown flavor type, an unknown ingredient, or
/// a missing ingredient the type requires.
pub fn flavored_item<'a>(call: ResolverCall<'a>, _errors: &mut dyn ErrorSink) -> Result<ResolvedIter<'a>> {
    let args = QueryArgs::parse(call.args, 3, &[])?;
    let preserve: PreserveType = args.required(0, "flavor type")?.parse()?;
    let catalog = call.context.catalog();

    let ingredient = match args.positional(1).filter(|id| *id != NO_INGREDIENT) {
        Some(ingredient_id) => {
            let mut ingredient = catalog.create_item(ingredient_id)?;
            if let Some(preserved_id) = args.positional(2) {
                ingredient.preserved_item_id = Some(catalog.create_item(preserved_id)?.qualified_id);
            }
            Some(ingredient)
        }
        None => None,
    };

    let item = catalog.create_flavored(preserve, ingredient.as_ref())?;
    Ok(Box::new(iter::once(ResolvedItem::new(item))))
}

//! Resolvers tied to today's world state.

use std::iter;

use itemquery_engine::{ErrorSink, QueryArgs, ResolvedItem, ResolvedIter, ResolverCall};
use itemquery_foundation::{OtherSalable, Result};

/// Salable ID of the town key.
pub const TOWN_KEY_ID: &str = "TownKey";

/// Price of the town key.
pub const TOWN_KEY_PRICE: i32 = 20_000;

/// `DISH_OF_THE_DAY`
///
/// Today's saloon dish while portions remain. The shop's stock for it
/// tracks the world's remaining portions.
///
/// # Errors
///
/// Returns an error for arguments, or if the dish isn't in the catalog.
pub fn dish_of_the_day<'a>(call: ResolverCall<'a>, _errors: &mut dyn ErrorSink) -> Result<ResolvedIter<'a>> {
    QueryArgs::parse(call.args, 0, &[])?;
    let Some(dish) = call.context.world().dish_of_the_day.as_ref().filter(|d| d.stack > 0) else {
        return Ok(Box::new(iter::empty()));
    };

    let item = call.context.catalog().create_item(&dish.item_id)?;
    let mut portions = item.clone();
    portions.set_stack(dish.stack);
    Ok(Box::new(iter::once(ResolvedItem::new(item).with_sync_stack(portions))))
}

/// `SHOP_TOWN_KEY`
///
/// The town key, until the player owns it.
///
/// # Errors
///
/// Returns an error for arguments.
pub fn shop_town_key<'a>(call: ResolverCall<'a>, _errors: &mut dyn ErrorSink) -> Result<ResolvedIter<'a>> {
    QueryArgs::parse(call.args, 0, &[])?;
    if call.context.player().has_town_key {
        return Ok(Box::new(iter::empty()));
    }
    let key = OtherSalable::new(TOWN_KEY_ID, "Town Key", TOWN_KEY_PRICE);
    Ok(Box::new(iter::once(
        ResolvedItem::new(key).with_price(TOWN_KEY_PRICE).with_stock(1),
    )))
}

//! `TOOL_UPGRADES`: upgrades the blacksmith can offer right now.

use itemquery_engine::{ErrorSink, QueryArgs, ResolvedItem, ResolvedIter, ResolverCall};
use itemquery_foundation::{ItemCatalog, Result, id};

/// `TOOL_UPGRADES [toolId]`
///
/// For each tool (or just `toolId`), the first upgrade rule whose condition
/// passes and whose required tool the player holds. Each produces the
/// upgraded tool with a stock of one, the rule's price if set, and the
/// rule's trade item if any.
///
/// # Errors
///
/// Returns an error for malformed arguments.
pub fn tool_upgrades<'a>(call: ResolverCall<'a>, _errors: &mut dyn ErrorSink) -> Result<ResolvedIter<'a>> {
    let args = QueryArgs::parse(call.args, 1, &[])?;
    let only = args.positional(0);
    let context = call.context;
    let Some(tools) = context.catalog().item_type(id::TOOL) else {
        return Ok(Box::new(std::iter::empty()));
    };

    Ok(Box::new(tools.items().iter().filter_map(move |data| {
        let qualified_id = tools.qualify(&data.id);
        if only.is_some_and(|wanted| !id::ids_match(&qualified_id, wanted)) {
            return None;
        }

        let tool_data = data.tool.as_ref()?;
        let item = ItemCatalog::instantiate(tools, data);
        let upgrade = tool_data.upgrade_from.iter().find(|upgrade| {
            context.check_conditions(upgrade.condition.as_deref(), Some(&item))
                && upgrade
                    .require_tool_id
                    .as_deref()
                    .is_none_or(|required| context.player().has_item(required))
        })?;

        let mut result = ResolvedItem::new(item).with_stock(1);
        if upgrade.price >= 0 {
            result = result.with_price(upgrade.price);
        }
        if let Some(trade_item) = &upgrade.trade_item_id {
            result = result.with_trade_item(trade_item.clone(), upgrade.trade_item_amount);
        }
        Some(result)
    })))
}

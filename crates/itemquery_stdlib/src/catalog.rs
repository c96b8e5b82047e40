//! Resolvers which enumerate the item catalog.

use itemquery_engine::{ErrorSink, QueryArgs, ResolvedItem, ResolvedIter, ResolverCall};
use itemquery_foundation::{Error, ItemCatalog, ItemData, ItemType, Result, compare_furniture};

/// Skip items excluded from random sales.
pub const FLAG_IS_RANDOM_SALE: &str = "@isRandomSale";

/// Skip items without a price.
pub const FLAG_REQUIRE_PRICE: &str = "@requirePrice";

const FLAGS: [&str; 2] = [FLAG_IS_RANDOM_SALE, FLAG_REQUIRE_PRICE];

#[derive(Clone, Copy, Debug, Default)]
struct SaleFilter {
    random_sale: bool,
    require_price: bool,
}

impl SaleFilter {
    fn from_args(args: &QueryArgs<'_>) -> Self {
        Self {
            random_sale: args.has_flag(FLAG_IS_RANDOM_SALE),
            require_price: args.has_flag(FLAG_REQUIRE_PRICE),
        }
    }

    fn allows(self, data: &ItemData) -> bool {
        !(self.random_sale && data.exclude_from_random_sale) && !(self.require_price && data.price <= 0)
    }
}

fn lookup_type<'a>(catalog: &'a ItemCatalog, identifier: &str) -> Result<&'a ItemType> {
    catalog
        .item_type(identifier)
        .ok_or_else(|| Error::unknown_item_type(identifier))
}

/// `ALL_ITEMS [type] [@isRandomSale] [@requirePrice]`
///
/// Every item in the catalog, or every item of one type. Types keep their
/// catalog order except furniture, which is sorted by furniture type and
/// then numeric ID.
///
/// # Errors
///
/// Returns an error for malformed arguments or an unknown type.
pub fn all_items<'a>(call: ResolverCall<'a>, _errors: &mut dyn ErrorSink) -> Result<ResolvedIter<'a>> {
    let args = QueryArgs::parse(call.args, 1, &FLAGS)?;
    let filter = SaleFilter::from_args(&args);
    let catalog = call.context.catalog();

    let types: Vec<&ItemType> = match args.positional(0) {
        Some(identifier) => vec![lookup_type(catalog, identifier)?],
        None => catalog.types().collect(),
    };

    Ok(Box::new(types.into_iter().flat_map(move |item_type| {
        let mut entries: Vec<&ItemData> = item_type.items().iter().collect();
        if item_type.is_furniture() {
            entries.sort_by(|a, b| compare_furniture(a, b));
        }
        entries
            .into_iter()
            .filter(move |data| filter.allows(data))
            .filter(move |data| !call.is_avoided(&item_type.qualify(&data.id)))
            .map(move |data| ResolvedItem::new(ItemCatalog::instantiate(item_type, data)))
    })))
}

/// `RANDOM_ITEMS <type> [minId] [maxId] [@isRandomSale] [@requirePrice]`
///
/// Items of one type in random order. When an ID range is given, only
/// items with a numeric ID inside it are included.
///
/// # Errors
///
/// Returns an error for malformed arguments or an unknown type.
pub fn random_items<'a>(call: ResolverCall<'a>, _errors: &mut dyn ErrorSink) -> Result<ResolvedIter<'a>> {
    let args = QueryArgs::parse(call.args, 3, &FLAGS)?;
    let filter = SaleFilter::from_args(&args);
    let item_type = lookup_type(call.context.catalog(), args.required(0, "type")?)?;
    let min = args.int_or(1, "minId", i32::MIN)?;
    let max = args.int_or(2, "maxId", i32::MAX)?;
    let ranged = min != i32::MIN || max != i32::MAX;

    let mut entries: Vec<&ItemData> = item_type
        .items()
        .iter()
        .filter(|data| filter.allows(data))
        .filter(|data| {
            !ranged
                || data
                    .numeric_id()
                    .is_some_and(|id| id >= i64::from(min) && id <= i64::from(max))
        })
        .collect();
    call.random().borrow_mut().shuffle(&mut entries);

    Ok(Box::new(
        entries
            .into_iter()
            .filter(move |data| !call.is_avoided(&item_type.qualify(&data.id)))
            .map(move |data| ResolvedItem::new(ItemCatalog::instantiate(item_type, data))),
    ))
}

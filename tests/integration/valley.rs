//! Integration tests against the valley bundle
//!
//! Tests loading, every sample shop, and purchases across rebuilds.

use itemquery_engine::SearchMode;
use itemquery_runtime::GameData;
use itemquery_shop::{LimitedStockMode, Stock};
use itemquery_stdlib::special::{LOST_BOOK_ID, SECRET_NOTE_ID};

use super::{VALLEY, session, valley};

fn stock_ids(session: &itemquery_runtime::Session, shop: &str) -> Vec<String> {
    let outcome = session.build_shop(shop).unwrap();
    assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
    outcome
        .stock
        .iter()
        .map(|(salable, _)| salable.qualified_id().to_string())
        .collect()
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn bundle_loads() {
    let data = valley();
    assert_eq!(data.world.seed, 12345);
    assert_eq!(data.player.name, "Farmer");
    assert_eq!(data.shops.len(), 4);
    assert!(data.shop("seedshop").is_some());

    let session = session();
    assert_eq!(session.shop_ids(), vec!["SeedShop", "Blacksmith", "Saloon", "Carpenter"]);
    assert_eq!(session.resolver_keys().len(), 8);
}

#[test]
fn bundle_survives_reserialization() {
    let data = valley();
    let again = GameData::from_json(&data.to_json().unwrap()).unwrap();
    assert_eq!(again, data);
}

#[test]
fn missing_bundle_is_a_data_error() {
    let missing = VALLEY.replace("valley.json", "no-such-valley.json");
    let err = GameData::load(&missing).unwrap_err();
    assert!(err.to_string().contains("no-such-valley.json"));
}

// =============================================================================
// Queries
// =============================================================================

#[test]
fn catalog_queries() {
    let session = session();
    assert_eq!(session.query("ALL_ITEMS (O) @requirePrice").items.len(), 16);
    assert_eq!(session.query("ALL_ITEMS (T)").items.len(), 3);

    let ring = session.query("(O)529");
    assert_eq!(ring.items[0].item.as_item().map(|i| i.class), Some(itemquery_foundation::ItemClass::Ring));
}

#[test]
fn session_options_narrow_results() {
    let mut session = session();
    session.set_search_mode(SearchMode::FirstOfTypeItem);
    let first = session.query("ALL_ITEMS (F)");
    assert_eq!(first.items.len(), 1);
    assert_eq!(first.items[0].qualified_id(), "(F)0");
}

// =============================================================================
// Shops
// =============================================================================

#[test]
fn seed_shop() {
    let session = session();
    let outcome = session.build_shop("SeedShop").unwrap();
    assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
    let stock = outcome.stock;
    assert_eq!(stock.len(), 6);

    assert_eq!(stock.find("(O)472").unwrap().1.price, 20);
    assert_eq!(stock.find("(O)473").unwrap().1.price, 60);

    let (_, melon) = stock.find("(O)479").unwrap();
    assert!(melon.out_of_season);
    assert_eq!(melon.price, 120);

    let (crop, terms) = stock.get(3).unwrap();
    assert!(["(O)188", "(O)190", "(O)254"].contains(&crop.qualified_id()));
    assert_eq!(terms.price, (crop.sale_price() as f32 * 1.25) as i32);
    assert_eq!(terms.stock, Stock::Limited(5));
    assert_eq!(terms.limit_mode, LimitedStockMode::Player);

    assert_eq!(stock.get(4).unwrap().0.qualified_id(), LOST_BOOK_ID);
    assert_eq!(stock.get(5).unwrap().0.qualified_id(), SECRET_NOTE_ID);
    assert_eq!(stock.get(5).unwrap().1.price, 250);
}

#[test]
fn seed_shop_is_stable_within_a_day() {
    let session = session();
    assert_eq!(stock_ids(&session, "SeedShop"), stock_ids(&session, "SeedShop"));
}

#[test]
fn blacksmith() {
    let session = session();
    let stock = session.build_shop("Blacksmith").unwrap().stock;
    let (axe, upgrade) = stock.get(0).unwrap();
    assert_eq!(axe.qualified_id(), "(T)CopperAxe");
    assert_eq!(upgrade.price, 2000);
    assert_eq!(upgrade.trade_item_id.as_deref(), Some("(O)334"));
    assert_eq!(upgrade.stock, Stock::Limited(1));
    assert_eq!(stock.get(1).unwrap().1.stock, Stock::Limited(20));
}

#[test]
fn saloon() {
    let session = session();
    let stock = session.build_shop("Saloon").unwrap().stock;
    assert_eq!(stock.len(), 3);

    let (bread, dish) = stock.get(0).unwrap();
    assert_eq!(bread.qualified_id(), "(O)216");
    assert_eq!(dish.stock, Stock::Limited(4));

    let (wine, terms) = stock.get(1).unwrap();
    assert_eq!(wine.display_name(), "Grape Wine");
    assert_eq!(terms.price, 600);

    let (key, terms) = stock.get(2).unwrap();
    assert_eq!(key.qualified_id(), "TownKey");
    assert_eq!(terms.price, 20_000);
}

#[test]
fn carpenter_sorts_furniture() {
    let session = session();
    assert_eq!(stock_ids(&session, "Carpenter"), vec!["(F)0", "(F)1120", "(F)1365"]);
}

// =============================================================================
// Purchases
// =============================================================================

#[test]
fn global_stock_carries_over() {
    let mut session = session();
    assert_eq!(session.buy("Blacksmith", 1, 3).unwrap(), 225);
    let stock = session.build_shop("Blacksmith").unwrap().stock;
    assert_eq!(stock.find("(O)334").unwrap().1.stock, Stock::Limited(17));
}

#[test]
fn untracked_stock_resets() {
    let mut session = session();
    session.buy("Carpenter", 0, 1).unwrap();
    assert_eq!(stock_ids(&session, "Carpenter").len(), 3);
    assert!(session.ledger().is_empty());
}

#[test]
fn sold_out_entries_disappear_until_reset() {
    let mut session = session();
    session.buy("SeedShop", 4, 1).unwrap();
    assert!(!stock_ids(&session, "SeedShop").contains(&LOST_BOOK_ID.to_string()));

    session.reset_ledger();
    assert!(stock_ids(&session, "SeedShop").contains(&LOST_BOOK_ID.to_string()));
}

#[test]
fn buying_more_than_stocked_fails() {
    let mut session = session();
    assert!(session.buy("Blacksmith", 0, 2).is_err());
    assert!(session.buy("Nowhere", 0, 1).is_err());
    assert!(session.ledger().is_empty());
}

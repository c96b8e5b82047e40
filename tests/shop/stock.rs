//! Integration tests for shop stock
//!
//! Tests stock limits, purchases, the ledger, and repeat avoidance.

use itemquery_engine::SpawnItemFields;
use itemquery_foundation::Player;
use itemquery_shop::{LimitedStockMode, ShopData, ShopItemData, Stock, StockLedger, SyncedStock};
use proptest::prelude::*;

use super::{build, farmer, game, game_with, ids, world};

fn seed_shop() -> ShopData {
    ShopData::new("SeedShop")
        .with_item(ShopItemData::new("Parsnip", "(O)472").with_stock(5, LimitedStockMode::Global))
        .with_item(ShopItemData::new("Bean", "(O)473").with_stock(3, LimitedStockMode::Player))
        .with_item(ShopItemData::new("Melon", "(O)479"))
}

// =============================================================================
// Limits and Purchases
// =============================================================================

#[test]
fn negative_stock_is_unlimited() {
    let stock = build(&game(), &seed_shop(), None);
    assert_eq!(stock.find("(O)479").unwrap().1.stock, Stock::Unlimited);
    assert_eq!(stock.find("(O)472").unwrap().1.stock, Stock::Limited(5));
}

#[test]
fn purchases_survive_a_rebuild() {
    let game = game();
    let mut ledger = StockLedger::new();
    let mut stock = build(&game, &seed_shop(), Some(&ledger));
    assert_eq!(stock.purchase(0, 2, &mut ledger, "Farmer").unwrap(), 80);

    let rebuilt = build(&game, &seed_shop(), Some(&ledger));
    assert_eq!(rebuilt.find("(O)472").unwrap().1.stock, Stock::Limited(3));
    assert_eq!(rebuilt.find("(O)473").unwrap().1.stock, Stock::Limited(3));
}

#[test]
fn sold_out_entries_are_dropped() {
    let game = game();
    let mut ledger = StockLedger::new();
    let mut stock = build(&game, &seed_shop(), Some(&ledger));
    stock.purchase(0, 5, &mut ledger, "Farmer").unwrap();

    let rebuilt = build(&game, &seed_shop(), Some(&ledger));
    assert_eq!(ids(&rebuilt), vec!["(O)473", "(O)479"]);
}

#[test]
fn player_limits_are_per_player() {
    let mut ledger = StockLedger::new();
    ledger.record("SeedShop", "Bean#0", LimitedStockMode::Player, "Abigail", 3);
    ledger.record("SeedShop", "Parsnip#0", LimitedStockMode::Global, "Abigail", 1);

    let farmer_view = build(&game(), &seed_shop(), Some(&ledger));
    assert_eq!(farmer_view.find("(O)473").unwrap().1.stock, Stock::Limited(3));
    assert_eq!(farmer_view.find("(O)472").unwrap().1.stock, Stock::Limited(4));

    let abigail = game_with(world(), Player::new("Abigail"));
    let abigail_view = build(&abigail, &seed_shop(), Some(&ledger));
    assert!(abigail_view.find("(O)473").is_none());
}

#[test]
fn invalid_purchases_are_rejected() {
    let mut ledger = StockLedger::new();
    let mut stock = build(&game(), &seed_shop(), None);
    assert!(stock.purchase(0, 6, &mut ledger, "Farmer").is_err());
    assert!(stock.purchase(0, 0, &mut ledger, "Farmer").is_err());
    assert!(stock.purchase(9, 1, &mut ledger, "Farmer").is_err());
    assert!(ledger.is_empty());
}

#[test]
fn unlimited_purchases_are_not_recorded() {
    let mut ledger = StockLedger::new();
    let mut stock = build(&game(), &seed_shop(), None);
    assert_eq!(stock.purchase(2, 10, &mut ledger, "Farmer").unwrap(), 800);
    assert!(ledger.is_empty());
}

#[test]
fn recipes_are_single_untracked_stock() {
    let entry = ShopItemData::new("Bread", "(O)216")
        .with_stock(10, LimitedStockMode::Global)
        .with_spawn(SpawnItemFields::new("(O)216").with_id("Bread").as_recipe());
    let shop = ShopData::new("Saloon").with_item(entry);
    let mut ledger = StockLedger::new();
    let mut stock = build(&game(), &shop, None);

    let (salable, terms) = stock.get(0).unwrap();
    assert!(salable.is_recipe());
    assert_eq!(terms.stock, Stock::Limited(1));
    assert_eq!(terms.limit_mode, LimitedStockMode::None);

    stock.purchase(0, 1, &mut ledger, "Farmer").unwrap();
    assert!(ledger.is_empty());
}

#[test]
fn dish_of_the_day_tracks_portions() {
    let shop = ShopData::new("Saloon").with_item(ShopItemData::new("Dish", "DISH_OF_THE_DAY"));
    let mut ledger = StockLedger::new();
    let mut stock = build(&game(), &shop, None);
    assert_eq!(stock.get(0).unwrap().1.stock, Stock::Limited(4));

    stock.purchase(0, 3, &mut ledger, "Farmer").unwrap();
    let (_, terms) = stock.get(0).unwrap();
    assert_eq!(terms.sync_stack_with.as_ref().map(|dish| dish.stack), Some(1));
    assert!(ledger.is_empty());
}

// =============================================================================
// Repeats and Determinism
// =============================================================================

#[test]
fn avoid_repeat_skips_items_stocked_earlier() {
    let shop = ShopData::new("SeedShop")
        .with_item(ShopItemData::new("Parsnip", "(O)472"))
        .with_item(ShopItemData::new("Random", "RANDOM_ITEMS (O) 472 479").avoiding_repeats());
    let stock = build(&game(), &shop, None);
    let stocked = ids(&stock);
    assert_eq!(stocked.iter().filter(|id| *id == "(O)472").count(), 1);
    assert_eq!(stocked.len(), 3);
}

#[test]
fn repeats_are_kept_without_avoid_repeat() {
    let shop = ShopData::new("SeedShop")
        .with_item(ShopItemData::new("First", "(O)472"))
        .with_item(ShopItemData::new("Second", "(O)472"));
    assert_eq!(ids(&build(&game(), &shop, None)), vec!["(O)472", "(O)472"]);
}

#[test]
fn multi_item_entries_sync_each_result() {
    let shop = ShopData::new("SeedShop").with_item(
        ShopItemData::new("Seeds", "RANDOM_ITEMS (O) 472 479").with_stock(1, LimitedStockMode::Global),
    );
    let game = game();
    let mut ledger = StockLedger::new();
    let mut stock = build(&game, &shop, Some(&ledger));
    let keys: Vec<String> = stock.iter().map(|(_, e)| e.sync_key.clone()).collect();
    assert_eq!(keys, vec!["Seeds#0", "Seeds#1", "Seeds#2"]);

    let bought = stock.get(1).unwrap().0.qualified_id().to_string();
    stock.purchase(1, 1, &mut ledger, "Farmer").unwrap();
    let rebuilt = build(&game, &shop, Some(&ledger));
    assert_eq!(rebuilt.len(), 2);
    assert!(rebuilt.find(&bought).is_none());
}

#[test]
fn a_different_day_reseeds_the_shop() {
    let shop = ShopData::new("SeedShop").with_item(ShopItemData::new("Seeds", "RANDOM_ITEMS (O)"));
    let mut later = world();
    later.days_played += 1;
    let today = ids(&build(&game(), &shop, None));
    let again = ids(&build(&game(), &shop, None));
    let tomorrow = ids(&build(&game_with(later, farmer()), &shop, None));
    assert_eq!(today, again);
    assert_eq!(today.len(), tomorrow.len());
}

mod proptests {
    use super::*;

    proptest! {
        #[test]
        fn stock_never_goes_negative(buys in prop::collection::vec(1i32..4, 0..6)) {
            let game = game();
            let mut ledger = StockLedger::new();
            for count in buys {
                let mut stock = build(&game, &seed_shop(), Some(&ledger));
                let before = stock.get(0).map(|(_, e)| e.stock);
                let result = stock.purchase(0, count, &mut ledger, "Farmer");
                if let Some(Stock::Limited(remaining)) = before {
                    prop_assert_eq!(result.is_ok(), remaining >= count);
                }
            }
            let rebuilt = build(&game, &seed_shop(), Some(&ledger));
            for (_, entry) in rebuilt.iter() {
                if let Stock::Limited(remaining) = entry.stock {
                    prop_assert!(remaining > 0);
                }
            }
        }
    }
}

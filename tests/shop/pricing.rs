//! Integration tests for shop pricing
//!
//! Tests base prices, profit margins, seasons, and modifier layering.

use itemquery_foundation::{Modification, ModifierMode, QuantityModifier};
use itemquery_shop::{OUT_OF_SEASON_MULTIPLIER, ShopData, ShopItemData};

use super::{STOCK_LIST_MAIL, build, farmer, game, game_with, ids, price_of, world};

// =============================================================================
// Base Prices
// =============================================================================

#[test]
fn derived_price_is_the_sale_price() {
    let shop = ShopData::new("SeedShop").with_item(ShopItemData::new("Seeds", "(O)472"));
    assert_eq!(price_of(&build(&game(), &shop, None), "(O)472"), 40);
}

#[test]
fn object_data_price_skips_the_doubling() {
    let mut entry = ShopItemData::new("Seeds", "(O)472");
    entry.use_object_data_price = true;
    let shop = ShopData::new("SeedShop").with_item(entry);
    assert_eq!(price_of(&build(&game(), &shop, None), "(O)472"), 20);
}

#[test]
fn explicit_price_wins_over_item_price() {
    let shop = ShopData::new("SeedShop").with_item(ShopItemData::new("Seeds", "(O)472").with_price(55));
    assert_eq!(price_of(&build(&game(), &shop, None), "(O)472"), 55);
}

#[test]
fn trade_entries_default_to_free() {
    let shop = ShopData::new("Desert")
        .with_item(ShopItemData::new("Melon", "(O)479").with_trade_item("(O)334", 3));
    let stock = build(&game(), &shop, None);
    let (_, entry) = stock.find("(O)479").unwrap();
    assert_eq!(entry.price, 0);
    assert_eq!(entry.trade_item_id.as_deref(), Some("(O)334"));
    assert_eq!(entry.trade_item_amount, 3);
}

#[test]
fn tool_upgrades_carry_their_own_terms() {
    let shop = ShopData::new("Blacksmith").with_item(ShopItemData::new("Upgrades", "TOOL_UPGRADES"));
    let stock = build(&game(), &shop, None);
    assert_eq!(ids(&stock), vec!["(T)CopperAxe"]);
    let (_, entry) = stock.get(0).unwrap();
    assert_eq!(entry.price, 2000);
    assert_eq!(entry.trade_item_id.as_deref(), Some("(O)334"));
    assert_eq!(entry.trade_item_amount, 5);
}

// =============================================================================
// Profit Margins
// =============================================================================

#[test]
fn profit_margin_scales_derived_prices_only() {
    let mut world = world();
    world.profit_margin = 0.5;
    let game = game_with(world, farmer());
    let shop = ShopData::new("SeedShop")
        .with_item(ShopItemData::new("Seeds", "(O)472"))
        .with_item(ShopItemData::new("Starter", "(O)473").with_price(100));
    let stock = build(&game, &shop, None);
    assert_eq!(price_of(&stock, "(O)472"), 20);
    assert_eq!(price_of(&stock, "(O)473"), 100);
}

#[test]
fn entry_margin_setting_overrides_the_shop() {
    let mut world = world();
    world.profit_margin = 0.5;
    let game = game_with(world, farmer());

    let mut fixed = ShopItemData::new("Starter", "(O)473").with_price(100);
    fixed.apply_profit_margins = Some(true);
    let mut derived = ShopItemData::new("Seeds", "(O)472");
    derived.apply_profit_margins = Some(false);
    let mut shop = ShopData::new("SeedShop").with_item(fixed).with_item(derived);
    shop.apply_profit_margins = Some(false);

    let stock = build(&game, &shop, None);
    assert_eq!(price_of(&stock, "(O)473"), 50);
    assert_eq!(price_of(&stock, "(O)472"), 40);
}

// =============================================================================
// Seasons
// =============================================================================

#[test]
fn out_of_season_stock_needs_the_stock_list() {
    let entry = ShopItemData::new("Melon", "(O)479").with_condition("SEASON summer");
    let shop = ShopData::new("SeedShop").with_item(entry.clone());
    assert!(build(&game(), &shop, None).is_empty());

    let shop = ShopData::new("SeedShop")
        .with_item(entry)
        .with_missing_stock_list(STOCK_LIST_MAIL);
    let stock = build(&game(), &shop, None);
    let (_, terms) = stock.find("(O)479").unwrap();
    assert!(terms.out_of_season);
    assert_eq!(terms.price, (80.0 * OUT_OF_SEASON_MULTIPLIER) as i32);
    assert!(stock.to_string().contains("out of season"));
}

#[test]
fn stock_list_only_ignores_season_queries() {
    let entry = ShopItemData::new("Melon", "(O)479")
        .with_condition("SEASON summer, PLAYER_HAS_MAIL Current ccVault");
    let shop = ShopData::new("SeedShop")
        .with_item(entry)
        .with_missing_stock_list(STOCK_LIST_MAIL);
    assert!(build(&game(), &shop, None).is_empty());
}

#[test]
fn stock_list_needs_the_mail() {
    let mut player = farmer();
    player.mail.clear();
    let game = game_with(world(), player);
    let shop = ShopData::new("SeedShop")
        .with_item(ShopItemData::new("Melon", "(O)479").with_condition("SEASON summer"))
        .with_missing_stock_list(STOCK_LIST_MAIL);
    assert!(build(&game, &shop, None).is_empty());
}

#[test]
fn in_season_entries_are_full_price() {
    let shop = ShopData::new("SeedShop")
        .with_item(ShopItemData::new("Parsnip", "(O)472").with_condition("SEASON spring"))
        .with_missing_stock_list(STOCK_LIST_MAIL);
    let stock = build(&game(), &shop, None);
    let (_, terms) = stock.find("(O)472").unwrap();
    assert!(!terms.out_of_season);
    assert_eq!(terms.price, 40);
}

// =============================================================================
// Modifiers
// =============================================================================

#[test]
fn shop_modifiers_apply_before_entry_modifiers() {
    let shop = ShopData::new("SeedShop")
        .with_price_modifier(QuantityModifier::new(Modification::Add, 20.0))
        .with_item(
            ShopItemData::new("Seeds", "(O)472")
                .with_price(100)
                .with_price_modifier(QuantityModifier::new(Modification::Multiply, 2.0)),
        );
    assert_eq!(price_of(&build(&game(), &shop, None), "(O)472"), 240);
}

#[test]
fn entries_can_ignore_shop_modifiers() {
    let mut entry = ShopItemData::new("Seeds", "(O)472").with_price(100);
    entry.ignore_shop_price_modifiers = true;
    let shop = ShopData::new("SeedShop")
        .with_price_modifier(QuantityModifier::new(Modification::Add, 20.0))
        .with_item(entry);
    assert_eq!(price_of(&build(&game(), &shop, None), "(O)472"), 100);
}

#[test]
fn modifier_conditions_see_the_item() {
    let shop = ShopData::new("SeedShop")
        .with_item(ShopItemData::new("Seeds", "RANDOM_ITEMS (O) 472 473"))
        .with_price_modifier(
            QuantityModifier::new(Modification::Set, 1.0).with_condition("ITEM_ID (O)473"),
        );
    let stock = build(&game(), &shop, None);
    assert_eq!(price_of(&stock, "(O)472"), 40);
    assert_eq!(price_of(&stock, "(O)473"), 1);
}

#[test]
fn minimum_mode_picks_the_cheapest_modifier() {
    let mut shop = ShopData::new("SeedShop")
        .with_price_modifier(QuantityModifier::new(Modification::Multiply, 3.0))
        .with_price_modifier(QuantityModifier::new(Modification::Subtract, 10.0))
        .with_item(ShopItemData::new("Seeds", "(O)472").with_price(100));
    shop.price_modifier_mode = ModifierMode::Minimum;
    assert_eq!(price_of(&build(&game(), &shop, None), "(O)472"), 90);
}

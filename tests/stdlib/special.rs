//! Integration tests for collectible and daily resolvers
//!
//! Tests lost books, secret notes, the dish of the day, and the town key.

use itemquery_foundation::world::{TOTAL_LOST_BOOKS, TOTAL_SECRET_NOTES};
use itemquery_foundation::{DailyDish, Player, Salable, WorldState};
use itemquery_stdlib::daily::{TOWN_KEY_ID, TOWN_KEY_PRICE};
use itemquery_stdlib::special::{LOST_BOOK_ID, SECRET_NOTE_ID, SECRET_NOTE_KEY};

use super::{farmer, game_with, ids, resolve};

// =============================================================================
// Lost Books
// =============================================================================

#[test]
fn lost_book_while_books_remain() {
    let game = game_with(WorldState::new(1), farmer());
    assert_eq!(ids(&game, "LOST_BOOK_OR_ITEM (O)24"), vec![LOST_BOOK_ID]);
}

#[test]
fn lost_book_falls_back_once_all_are_found() {
    let mut world = WorldState::new(1);
    world.lost_books_found = TOTAL_LOST_BOOKS;
    let game = game_with(world, farmer());
    assert_eq!(ids(&game, "LOST_BOOK_OR_ITEM (O)24"), vec!["(O)24"]);
    assert!(ids(&game, "LOST_BOOK_OR_ITEM").is_empty());
}

#[test]
fn fallback_can_be_a_query() {
    let mut world = WorldState::new(1);
    world.lost_books_found = TOTAL_LOST_BOOKS;
    let game = game_with(world, farmer());
    assert_eq!(ids(&game, "LOST_BOOK_OR_ITEM ALL_ITEMS (F)"), vec!["(F)1226", "(F)1220"]);
}

#[test]
fn fallback_errors_are_reported() {
    let mut world = WorldState::new(1);
    world.lost_books_found = TOTAL_LOST_BOOKS;
    let game = game_with(world, farmer());
    let (results, log) = resolve(&game, "LOST_BOOK_OR_ITEM (O)nothing");
    assert!(results.is_empty());
    assert_eq!(log.len(), 1);
    assert_eq!(log.entries()[0].query, "(O)nothing");
}

// =============================================================================
// Secret Notes
// =============================================================================

#[test]
fn secret_note_needs_the_magnifying_glass() {
    let game = game_with(WorldState::new(1), farmer());
    assert_eq!(ids(&game, "SECRET_NOTE_OR_ITEM (O)188"), vec!["(O)188"]);
}

#[test]
fn secret_note_is_unread() {
    let mut player = farmer();
    player.has_magnifying_glass = true;
    player.secret_notes_seen = (1..TOTAL_SECRET_NOTES).collect();
    let game = game_with(WorldState::new(1), player);

    let (results, log) = resolve(&game, "SECRET_NOTE_OR_ITEM (O)188");
    assert!(log.is_empty());
    let Salable::Item(note) = &results[0].item else {
        panic!("expected an item");
    };
    assert_eq!(note.qualified_id, SECRET_NOTE_ID);
    let last = TOTAL_SECRET_NOTES.to_string();
    assert_eq!(note.mod_data.get(SECRET_NOTE_KEY), Some(&last));
    assert!(note.display_name.ends_with(&format!("#{last}")));
}

#[test]
fn secret_note_falls_back_when_all_are_read() {
    let mut player = farmer();
    player.has_magnifying_glass = true;
    player.secret_notes_seen = (1..=TOTAL_SECRET_NOTES).collect();
    let game = game_with(WorldState::new(1), player);
    assert_eq!(ids(&game, "SECRET_NOTE_OR_ITEM (O)188"), vec!["(O)188"]);
}

// =============================================================================
// Daily Stock
// =============================================================================

#[test]
fn dish_of_the_day_syncs_portions() {
    let mut world = WorldState::new(1);
    world.dish_of_the_day = Some(DailyDish {
        item_id: "(O)190".to_string(),
        stack: 4,
    });
    let game = game_with(world, farmer());
    let (results, log) = resolve(&game, "DISH_OF_THE_DAY");
    assert!(log.is_empty());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].qualified_id(), "(O)190");
    assert_eq!(results[0].sync_stack_with.as_ref().map(|item| item.stack), Some(4));
}

#[test]
fn no_dish_when_sold_out() {
    let mut world = WorldState::new(1);
    world.dish_of_the_day = Some(DailyDish {
        item_id: "(O)190".to_string(),
        stack: 0,
    });
    let game = game_with(world, farmer());
    assert!(ids(&game, "DISH_OF_THE_DAY").is_empty());
}

#[test]
fn town_key_until_owned() {
    let game = game_with(WorldState::new(1), Player::new("Farmer"));
    let (results, _) = resolve(&game, "SHOP_TOWN_KEY");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].qualified_id(), TOWN_KEY_ID);
    assert_eq!(results[0].override_base_price, Some(TOWN_KEY_PRICE));
    assert_eq!(results[0].override_available_stock, Some(1));

    let mut owner = Player::new("Farmer");
    owner.has_town_key = true;
    let game = game_with(WorldState::new(1), owner);
    assert!(ids(&game, "SHOP_TOWN_KEY").is_empty());
}

#[test]
fn daily_resolvers_take_no_arguments() {
    let game = game_with(WorldState::new(1), farmer());
    let (_, log) = resolve(&game, "SHOP_TOWN_KEY extra");
    assert_eq!(log.len(), 1);
}

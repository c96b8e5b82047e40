//! One-off collectibles which fall back to another query once exhausted.
//!
//! These resolvers either produce their special item or resolve the
//! fallback query, never both.

use std::iter;

use itemquery_engine::{ErrorSink, ResolvedItem, ResolvedIter, ResolverCall};
use itemquery_foundation::world::{TOTAL_LOST_BOOKS, TOTAL_SECRET_NOTES};
use itemquery_foundation::{Item, ItemClass, Result};
use tracing::trace;

/// Qualified ID of a lost book.
pub const LOST_BOOK_ID: &str = "(O)102";

/// Qualified ID of a secret note.
pub const SECRET_NOTE_ID: &str = "(O)79";

/// Mod data key holding a secret note's number.
pub const SECRET_NOTE_KEY: &str = "secret_note";

fn special_item(call: &ResolverCall<'_>, qualified_id: &str, name: &str) -> Item {
    call.context
        .catalog()
        .create_item(qualified_id)
        .unwrap_or_else(|_| Item::new(qualified_id, ItemClass::Object, name))
}

fn fallback<'a>(call: &ResolverCall<'a>, errors: &mut dyn ErrorSink) -> ResolvedIter<'a> {
    if call.args.is_empty() {
        return Box::new(iter::empty());
    }
    Box::new(call.resolve_nested(call.args, errors).into_iter())
}

/// `LOST_BOOK_OR_ITEM [fallbackQuery]`
///
/// A lost book while any remain to be found; otherwise the fallback.
///
/// # Errors
///
/// Never fails; fallback errors are reported to the sink.
pub fn lost_book_or_item<'a>(call: ResolverCall<'a>, errors: &mut dyn ErrorSink) -> Result<ResolvedIter<'a>> {
    if call.context.world().lost_books_found < TOTAL_LOST_BOOKS {
        let book = special_item(&call, LOST_BOOK_ID, "Lost Book");
        return Ok(Box::new(iter::once(ResolvedItem::new(book))));
    }
    trace!(fallback = call.args, "all lost books found");
    Ok(fallback(&call, errors))
}

/// `SECRET_NOTE_OR_ITEM [fallbackQuery]`
///
/// A random unread secret note if the player can find them; otherwise the
/// fallback.
///
/// # Errors
///
/// Never fails; fallback errors are reported to the sink.
pub fn secret_note_or_item<'a>(
    call: ResolverCall<'a>,
    errors: &mut dyn ErrorSink,
) -> Result<ResolvedIter<'a>> {
    let player = call.context.player();
    if player.has_magnifying_glass {
        let unseen: Vec<u32> = (1..=TOTAL_SECRET_NOTES)
            .filter(|note| !player.secret_notes_seen.contains(note))
            .collect();
        let note = call.random().borrow_mut().choose(&unseen).copied();
        if let Some(note) = note {
            let mut item = special_item(&call, SECRET_NOTE_ID, "Secret Note");
            item.display_name = format!("{} #{note}", item.display_name);
            item.mod_data.insert(SECRET_NOTE_KEY.to_string(), note.to_string());
            return Ok(Box::new(iter::once(ResolvedItem::new(item))));
        }
    }
    Ok(fallback(&call, errors))
}

//! Integration tests for query resolution
//!
//! Tests literal IDs, dispatch, filtering, search modes, and truncation.

use std::collections::HashSet;

use itemquery_engine::{ErrorLog, ResolveOptions, SearchMode};
use proptest::prelude::*;

use super::{engine, game, resolve_ids};

// =============================================================================
// Literal IDs
// =============================================================================

#[test]
fn literal_ids_resolve_to_one_item() {
    let (ids, log) = resolve_ids("(O)188", &ResolveOptions::new());
    assert!(log.is_empty());
    assert_eq!(ids, vec!["(O)188"]);
}

#[test]
fn unqualified_and_padded_ids_are_qualified() {
    let (ids, log) = resolve_ids("  190 ", &ResolveOptions::new());
    assert!(log.is_empty());
    assert_eq!(ids, vec!["(O)190"]);

    let (ids, _) = resolve_ids("(H)0", &ResolveOptions::new());
    assert_eq!(ids, vec!["(H)0"]);
}

#[test]
fn literal_resolution_is_repeatable() {
    let engine = engine();
    let game = game();
    let mut log = ErrorLog::new();
    let first = engine.resolve_in(&game, "(O)24", &ResolveOptions::new(), &mut log);
    let second = engine.resolve_in(&game, "(O)24", &ResolveOptions::new(), &mut log);
    assert_eq!(first, second);
    assert!(log.is_empty());
}

#[test]
fn unknown_literal_reports_one_error() {
    let (ids, log) = resolve_ids("(O)999", &ResolveOptions::new());
    assert!(ids.is_empty());
    assert_eq!(log.len(), 1);
    assert_eq!(log.entries()[0].query, "(O)999");
    assert!(log.entries()[0].message.contains("(O)999"));
}

#[test]
fn literal_ids_skip_per_item_conditions() {
    let options = ResolveOptions::new().with_per_item_condition("FALSE");
    let (ids, log) = resolve_ids("(O)190", &options);
    assert!(log.is_empty(), "{:?}", log.entries());
    assert_eq!(ids, vec!["(O)190"]);

    let options = ResolveOptions::new().with_per_item_condition("ITEM_ID (O)24");
    let (ids, _) = resolve_ids("(O)188", &options);
    assert_eq!(ids, vec!["(O)188"]);
}

#[test]
fn avoid_ids_exclude_literal_ids() {
    let avoid: HashSet<String> = ["(O)188".to_string()].into();
    let options = ResolveOptions::new().with_avoid_ids(&avoid);
    let (ids, log) = resolve_ids("(O)188", &options);
    assert!(ids.is_empty());
    assert!(log.is_empty());
}

// =============================================================================
// Dispatch and Arguments
// =============================================================================

#[test]
fn keys_match_case_insensitively() {
    let (upper, _) = resolve_ids("EVERY_OBJECT", &ResolveOptions::new());
    let (lower, _) = resolve_ids("every_object", &ResolveOptions::new());
    assert_eq!(upper.len(), 4);
    assert_eq!(upper, lower);
}

#[test]
fn malformed_flag_reports_exactly_one_error() {
    let (ids, log) = resolve_ids("FLAGGED @quiet", &ResolveOptions::new());
    assert!(ids.is_empty());
    assert_eq!(log.len(), 1);
    assert!(log.entries()[0].message.contains("@quiet"));
    assert_eq!(log.entries()[0].query, "FLAGGED @quiet");
}

#[test]
fn known_flags_are_case_insensitive() {
    let (ids, log) = resolve_ids("FLAGGED name @LOUD", &ResolveOptions::new());
    assert!(log.is_empty(), "{:?}", log.entries());
    assert_eq!(ids, vec!["(O)24"]);
}

#[test]
fn arguments_after_flags_are_rejected() {
    let (ids, log) = resolve_ids("FLAGGED @loud name", &ResolveOptions::new());
    assert!(ids.is_empty());
    assert_eq!(log.len(), 1);
}

#[test]
fn runs_of_spaces_between_arguments_are_ignored() {
    let (ids, log) = resolve_ids("TWICE (O)24    (O)188", &ResolveOptions::new());
    assert!(log.is_empty());
    assert_eq!(ids, vec!["(O)24", "(O)24", "(O)188", "(O)188"]);
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn avoid_repeat_keeps_first_occurrences() {
    let options = ResolveOptions::new().with_avoid_repeat(true);
    let (ids, _) = resolve_ids("TWICE (O)188 (O)24 (O)188", &options);
    assert_eq!(ids, vec!["(O)188", "(O)24"]);
}

#[test]
fn avoid_ids_drop_listed_items() {
    let avoid: HashSet<String> = ["(O)24".to_string(), "(O)472".to_string()].into();
    let options = ResolveOptions::new().with_avoid_ids(&avoid);
    let (ids, _) = resolve_ids("EVERY_OBJECT", &options);
    assert_eq!(ids, vec!["(O)188", "(O)190"]);
}

#[test]
fn per_item_condition_sees_each_item() {
    let options = ResolveOptions::new().with_per_item_condition("ITEM_ID (O)190 (O)24");
    let (ids, _) = resolve_ids("EVERY_OBJECT", &options);
    assert_eq!(ids, vec!["(O)24", "(O)190"]);

    let options = ResolveOptions::new().with_per_item_condition("TRUE");
    let (ids, _) = resolve_ids("EVERY_OBJECT", &options);
    assert_eq!(ids.len(), 4);
}

// =============================================================================
// Search Modes
// =============================================================================

#[test]
fn all_keeps_non_items() {
    let (ids, _) = resolve_ids("MIXED", &ResolveOptions::new());
    assert_eq!(ids, vec!["Catalogue", "(O)24", "Wallpaper", "(O)190"]);
}

#[test]
fn all_of_type_item_drops_non_items() {
    let options = ResolveOptions::new().with_search_mode(SearchMode::AllOfTypeItem);
    let (ids, _) = resolve_ids("MIXED", &options);
    assert_eq!(ids, vec!["(O)24", "(O)190"]);
}

#[test]
fn first_of_type_item_skips_leading_non_items() {
    let options = ResolveOptions::new().with_search_mode(SearchMode::FirstOfTypeItem);
    let (ids, _) = resolve_ids("MIXED", &options);
    assert_eq!(ids, vec!["(O)24"]);
}

#[test]
fn random_of_type_item_picks_one_item() {
    let options = ResolveOptions::new().with_search_mode(SearchMode::RandomOfTypeItem);
    let (ids, _) = resolve_ids("MIXED", &options);
    assert_eq!(ids.len(), 1);
    assert!(ids[0] == "(O)24" || ids[0] == "(O)190");

    let options = options.with_max_items(0);
    let (ids, _) = resolve_ids("MIXED", &options);
    assert!(ids.is_empty());
}

#[test]
fn max_items_counts_non_items() {
    let options = ResolveOptions::new().with_max_items(2);
    let (ids, _) = resolve_ids("MIXED", &options);
    assert_eq!(ids, vec!["Catalogue", "(O)24"]);
}

// =============================================================================
// Property Tests
// =============================================================================

mod proptests {
    use super::*;

    proptest! {
        #[test]
        fn results_never_exceed_max_items(max in 0usize..8) {
            let options = ResolveOptions::new().with_max_items(max);
            let (ids, _) = resolve_ids("EVERY_OBJECT", &options);
            prop_assert_eq!(ids.len(), max.min(4));
        }

        #[test]
        fn avoid_repeat_yields_distinct_ids(picks in prop::collection::vec(0usize..4, 1..8)) {
            let pool = ["(O)24", "(O)188", "(O)190", "(O)472"];
            let query = format!(
                "TWICE {}",
                picks.iter().map(|&i| pool[i]).collect::<Vec<_>>().join(" ")
            );
            let options = ResolveOptions::new().with_avoid_repeat(true);
            let (ids, log) = resolve_ids(&query, &options);
            prop_assert!(log.is_empty());

            let distinct: HashSet<&String> = ids.iter().collect();
            prop_assert_eq!(distinct.len(), ids.len());
            let expected: HashSet<&str> = picks.iter().map(|&i| pool[i]).collect();
            prop_assert_eq!(ids.len(), expected.len());
        }
    }
}

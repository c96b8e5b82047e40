//! Game state queries.
//!
//! A condition is a comma-separated list of queries which must all pass.
//! Each query is a key followed by space-separated arguments, optionally
//! prefixed with `!` to negate it:
//!
//! ```text
//! SEASON spring summer, !PLAYER_HAS_MAIL ccVault, RANDOM 0.5
//! ```
//!
//! The evaluator is pluggable through [`ConditionEvaluator`]; [`StateQueries`]
//! is the built-in implementation.

use std::fmt;

use itemquery_foundation::{Item, Location, Player, RngHandle, WorldState};
use tracing::warn;

use crate::args::split_args;

/// Query keys that depend on the current season.
///
/// Shops ignore these when re-checking out-of-season stock.
pub const SEASON_QUERY_KEYS: [&str; 2] = ["SEASON", "SEASON_DAY"];

/// Returns true if a condition always passes without evaluation.
///
/// That is the case for no condition, a blank one, or exactly `TRUE`.
#[must_use]
pub fn is_immutably_true(condition: Option<&str>) -> bool {
    match condition.map(str::trim) {
        None | Some("") => true,
        Some(c) => c.eq_ignore_ascii_case("TRUE"),
    }
}

/// Returns true if a condition always fails without evaluation.
#[must_use]
pub fn is_immutably_false(condition: &str) -> bool {
    let condition = condition.trim();
    condition.eq_ignore_ascii_case("FALSE") || condition.eq_ignore_ascii_case("!TRUE")
}

/// Everything a condition can inspect.
#[derive(Clone, Copy, Debug)]
pub struct StateQueryContext<'a> {
    /// World state.
    pub world: &'a WorldState,
    /// Location the query runs in.
    pub location: &'a Location,
    /// Acting player.
    pub player: &'a Player,
    /// Item being checked, if any.
    pub target_item: Option<&'a Item>,
    /// Input item for crafting-style checks, if any.
    pub input_item: Option<&'a Item>,
    /// Random stream for `RANDOM` queries.
    pub random: &'a RngHandle,
    /// Query keys which should be treated as passing.
    pub ignore_keys: &'a [&'a str],
}

/// Evaluates game state query conditions.
pub trait ConditionEvaluator: fmt::Debug {
    /// Returns true if the condition passes.
    fn check(&self, condition: &str, context: &StateQueryContext<'_>) -> bool;
}

/// The built-in state query evaluator.
///
/// Unknown keys and malformed arguments log a warning and fail.
#[derive(Clone, Copy, Debug, Default)]
pub struct StateQueries;

impl ConditionEvaluator for StateQueries {
    fn check(&self, condition: &str, context: &StateQueryContext<'_>) -> bool {
        condition
            .split(',')
            .map(str::trim)
            .filter(|query| !query.is_empty())
            .all(|query| check_query(query, context))
    }
}

fn check_query(query: &str, context: &StateQueryContext<'_>) -> bool {
    let (negated, query) = match query.strip_prefix('!') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, query),
    };

    let tokens = split_args(query);
    let Some((&key, args)) = tokens.split_first() else {
        return true;
    };
    let key = key.to_ascii_uppercase();

    if context.ignore_keys.iter().any(|k| k.eq_ignore_ascii_case(&key)) {
        return true;
    }

    match evaluate(&key, args, context) {
        Ok(result) => result != negated,
        Err(message) => {
            warn!(query, "{message}");
            false
        }
    }
}

fn evaluate(key: &str, args: &[&str], context: &StateQueryContext<'_>) -> Result<bool, String> {
    let world = context.world;
    match key {
        "TRUE" => Ok(true),
        "FALSE" => Ok(false),
        "SEASON" => Ok(args.iter().any(|s| s.eq_ignore_ascii_case(world.season.name()))),
        "SEASON_DAY" => {
            if args.len() % 2 != 0 {
                return Err("SEASON_DAY expects <season> <day> pairs".to_string());
            }
            for pair in args.chunks(2) {
                let day = parse_int(pair[1])?;
                if pair[0].eq_ignore_ascii_case(world.season.name())
                    && day == i64::from(world.day_of_month)
                {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        "DAY_OF_MONTH" => {
            let day = world.day_of_month;
            for arg in args {
                let matched = if arg.eq_ignore_ascii_case("even") {
                    day % 2 == 0
                } else if arg.eq_ignore_ascii_case("odd") {
                    day % 2 == 1
                } else {
                    parse_int(arg)? == i64::from(day)
                };
                if matched {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        "YEAR" => in_range(args, i64::from(world.year)),
        "DAYS_PLAYED" => in_range(args, i64::from(world.days_played)),
        "PLAYER_HAS_MAIL" => {
            let flags = args.get(1..).filter(|_| is_player_target(args.first())).unwrap_or(args);
            Ok(flags.iter().any(|flag| context.player.has_mail(flag)))
        }
        "PLAYER_HAS_ITEM" => {
            let ids = args.get(1..).filter(|_| is_player_target(args.first())).unwrap_or(args);
            Ok(ids.iter().any(|id| context.player.has_item(id)))
        }
        "LOCATION_NAME" => {
            let names = args.get(1..).filter(|_| is_location_target(args.first())).unwrap_or(args);
            Ok(names.iter().any(|name| name.eq_ignore_ascii_case(&context.location.name)))
        }
        "ITEM_ID" | "ITEM_TYPE" | "ITEM_QUALITY" | "ITEM_PRICE" => {
            let (target, args) = match args.split_first() {
                Some((&first, rest)) if first.eq_ignore_ascii_case("Input") => {
                    (context.input_item, rest)
                }
                Some((&first, rest)) if first.eq_ignore_ascii_case("Target") => {
                    (context.target_item, rest)
                }
                _ => (context.target_item, args),
            };
            let Some(item) = target else {
                return Ok(false);
            };
            match key {
                "ITEM_ID" => Ok(args.iter().any(|id| {
                    itemquery_foundation::id::ids_match(&item.qualified_id, id)
                })),
                "ITEM_TYPE" => Ok(args.iter().any(|t| t.eq_ignore_ascii_case(item.type_id()))),
                "ITEM_QUALITY" => in_range(args, i64::from(item.quality)),
                _ => in_range(args, i64::from(item.sale_price())),
            }
        }
        "RANDOM" => {
            let raw = args.first().ok_or("RANDOM expects a chance")?;
            let chance: f64 = raw
                .parse()
                .map_err(|_| format!("can't parse RANDOM chance '{raw}'"))?;
            Ok(context.random.borrow_mut().chance(chance))
        }
        _ => Err(format!("unknown game state query '{key}'")),
    }
}

fn is_player_target(token: Option<&&str>) -> bool {
    token.is_some_and(|t| {
        ["Current", "Any", "All", "Host", "Target"]
            .iter()
            .any(|p| p.eq_ignore_ascii_case(t))
    })
}

fn is_location_target(token: Option<&&str>) -> bool {
    token.is_some_and(|t| t.eq_ignore_ascii_case("Here") || t.eq_ignore_ascii_case("Target"))
}

fn parse_int(raw: &str) -> Result<i64, String> {
    raw.parse()
        .map_err(|_| format!("can't parse '{raw}' as an integer"))
}

/// `<min> [max]`, both inclusive.
fn in_range(args: &[&str], value: i64) -> Result<bool, String> {
    let min = parse_int(args.first().ok_or("expected a minimum value")?)?;
    let max = args.get(1).map(|raw| parse_int(raw)).transpose()?.unwrap_or(i64::MAX);
    Ok(value >= min && value <= max)
}

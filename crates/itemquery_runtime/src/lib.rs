//! Game data loading, REPL, and CLI for itemquery.
//!
//! This crate provides:
//! - [`GameData`] - JSON bundles of items, world state, and shops
//! - [`Session`] - Loaded data plus query options and a purchase ledger
//! - [`Repl`] - Interactive query loop
//! - [`RuntimeConfig`] - Command line settings

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod data;
pub mod editor;
pub mod repl;
pub mod session;

pub use config::{DEFAULT_LOG_FILTER, LOG_ENV, RuntimeConfig};
pub use data::GameData;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::{COMMANDS, Outcome, Repl, format_query, format_shop};
pub use session::{QueryOutcome, Session, ShopOutcome};

//! itemquery - Data-driven item queries and shop stock
//!
//! This crate re-exports all layers of the itemquery system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: itemquery_runtime    - JSON data, REPL, CLI
//! Layer 3: itemquery_shop       - Shop stock building, pricing, synced stock
//! Layer 2: itemquery_stdlib     - Built-in resolvers
//! Layer 1: itemquery_engine     - Query context, registry, resolution
//! Layer 0: itemquery_foundation - Items, catalog, modifiers, randomness, errors
//! ```

pub use itemquery_engine as engine;
pub use itemquery_foundation as foundation;
pub use itemquery_runtime as runtime;
pub use itemquery_shop as shop;
pub use itemquery_stdlib as stdlib;

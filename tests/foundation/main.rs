//! Integration tests for Layer 0: Foundation
//!
//! Tests for the item catalog, flavored items, modifiers, randomness, and errors.

mod catalog;
mod modifiers;
mod random;

//! Quantity modifier pipelines.
//!
//! A pipeline is an ordered list of [`QuantityModifier`]s applied to a
//! number (a price, a stack size, a quality level). Each modifier may be
//! gated by a state query. How the surviving modifiers combine is decided
//! by [`ModifierMode`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::random::RngHandle;

/// The arithmetic a modifier performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Modification {
    /// `value + amount`
    #[default]
    Add,
    /// `value - amount`
    Subtract,
    /// `value * amount`
    Multiply,
    /// `value / amount`; dividing by zero leaves the value unchanged.
    Divide,
    /// `amount`
    Set,
}

impl Modification {
    /// Applies this modification.
    #[must_use]
    pub fn apply(self, value: f32, amount: f32) -> f32 {
        match self {
            Self::Add => value + amount,
            Self::Subtract => value - amount,
            Self::Multiply => value * amount,
            Self::Divide if amount == 0.0 => value,
            Self::Divide => value / amount,
            Self::Set => amount,
        }
    }
}

/// How the modifiers in a pipeline combine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ModifierMode {
    /// Apply every modifier in order, each to the previous result.
    #[default]
    Stack,
    /// Apply each modifier to the original value and keep the smallest.
    Minimum,
    /// Apply each modifier to the original value and keep the largest.
    Maximum,
}

/// A single conditional adjustment to a number.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuantityModifier {
    /// Identifier, unique within its pipeline.
    pub id: String,
    /// State query that must pass for the modifier to apply.
    pub condition: Option<String>,
    /// Arithmetic to perform.
    pub modification: Modification,
    /// Operand, unless `random_amount` is set.
    pub amount: f32,
    /// Operands to choose from at random each time the modifier applies.
    pub random_amount: Vec<f32>,
}

impl QuantityModifier {
    /// Creates an unconditional modifier.
    #[must_use]
    pub fn new(modification: Modification, amount: f32) -> Self {
        Self {
            modification,
            amount,
            ..Self::default()
        }
    }

    /// Builder method to set the ID.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Builder method to gate this modifier on a state query.
    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Builder method to pick the operand at random from a list.
    #[must_use]
    pub fn with_random_amount(mut self, amounts: Vec<f32>) -> Self {
        self.random_amount = amounts;
        self
    }

    fn operand(&self, rng: &RngHandle) -> f32 {
        if self.random_amount.is_empty() {
            return self.amount;
        }
        rng.borrow_mut()
            .choose(&self.random_amount)
            .copied()
            .unwrap_or(self.amount)
    }

    /// Applies this modifier to a value, ignoring its condition.
    #[must_use]
    pub fn apply(&self, value: f32, rng: &RngHandle) -> f32 {
        self.modification.apply(value, self.operand(rng))
    }
}

/// Applies a modifier pipeline to a value.
///
/// `check` evaluates a modifier's condition; modifiers without one always
/// apply. In `Minimum`/`Maximum` mode, if no modifier applies the value is
/// returned unchanged.
pub fn apply_modifiers(
    value: f32,
    modifiers: &[QuantityModifier],
    mode: ModifierMode,
    check: &mut dyn FnMut(&str) -> bool,
    rng: &RngHandle,
) -> f32 {
    let active = modifiers
        .iter()
        .filter(|m| m.condition.as_deref().is_none_or(|c| check(c)));

    match mode {
        ModifierMode::Stack => active.fold(value, |acc, m| m.apply(acc, rng)),
        ModifierMode::Minimum => active
            .map(|m| m.apply(value, rng))
            .reduce(f32::min)
            .unwrap_or(value),
        ModifierMode::Maximum => active
            .map(|m| m.apply(value, rng))
            .reduce(f32::max)
            .unwrap_or(value),
    }
}

/// Applies a modifier pipeline to an integer, truncating the result.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn apply_modifiers_int(
    value: i32,
    modifiers: &[QuantityModifier],
    mode: ModifierMode,
    check: &mut dyn FnMut(&str) -> bool,
    rng: &RngHandle,
) -> i32 {
    if modifiers.is_empty() {
        return value;
    }
    apply_modifiers(value as f32, modifiers, mode, check, rng) as i32
}

//! Integration tests for quantity modifiers
//!
//! Tests pipeline modes, conditions, division, and random amounts.

use itemquery_foundation::random::shared;
use itemquery_foundation::{
    GameRandom, Modification, ModifierMode, QuantityModifier, apply_modifiers_int,
};

fn rng() -> itemquery_foundation::RngHandle {
    shared(GameRandom::seeded(11))
}

fn pipeline() -> Vec<QuantityModifier> {
    vec![
        QuantityModifier::new(Modification::Multiply, 2.0).with_id("double"),
        QuantityModifier::new(Modification::Subtract, 30.0)
            .with_id("discount")
            .with_condition("SALE"),
        QuantityModifier::new(Modification::Add, 5.0).with_id("tip"),
    ]
}

#[test]
fn stack_mode_skips_failed_conditions() {
    let result = apply_modifiers_int(100, &pipeline(), ModifierMode::Stack, &mut |_| false, &rng());
    assert_eq!(result, 205);

    let result = apply_modifiers_int(100, &pipeline(), ModifierMode::Stack, &mut |_| true, &rng());
    assert_eq!(result, 175);
}

#[test]
fn minimum_and_maximum_compare_against_the_original() {
    let min = apply_modifiers_int(100, &pipeline(), ModifierMode::Minimum, &mut |_| true, &rng());
    let max = apply_modifiers_int(100, &pipeline(), ModifierMode::Maximum, &mut |_| true, &rng());
    assert_eq!(min, 70);
    assert_eq!(max, 200);
}

#[test]
fn nothing_applies_leaves_the_value() {
    let only_conditional = vec![
        QuantityModifier::new(Modification::Set, 1.0).with_condition("NEVER"),
    ];
    for mode in [ModifierMode::Stack, ModifierMode::Minimum, ModifierMode::Maximum] {
        assert_eq!(
            apply_modifiers_int(42, &only_conditional, mode, &mut |_| false, &rng()),
            42
        );
    }
}

#[test]
fn divide_by_zero_is_ignored() {
    let modifiers = vec![QuantityModifier::new(Modification::Divide, 0.0)];
    assert_eq!(
        apply_modifiers_int(42, &modifiers, ModifierMode::Stack, &mut |_| true, &rng()),
        42
    );
}

#[test]
fn random_amounts_come_from_the_list() {
    let modifiers =
        vec![QuantityModifier::new(Modification::Set, 0.0).with_random_amount(vec![3.0, 7.0])];
    let rng = rng();
    for _ in 0..20 {
        let value = apply_modifiers_int(1, &modifiers, ModifierMode::Stack, &mut |_| true, &rng);
        assert!(value == 3 || value == 7);
    }
}

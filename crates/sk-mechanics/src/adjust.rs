//! Stat changes from the elite and weak templates.
//!
//! Elite adds and weak subtracts: hit points by a level-dependent step,
//! AC and attack bonus by 2, and a flat 2 on damage.

use sk_core::Adjustment;

/// HP step for a creature of the given level.
fn hp_step(level: i32) -> i32 {
    match level {
        ..=1 => 10,
        2..=4 => 15,
        5..=19 => 20,
        _ => 30,
    }
}

/// Hit points after the template. Weak creatures keep at least 1 HP.
pub fn adjusted_hp(base_hp: i32, adjustment: Adjustment, level: i32) -> i32 {
    match adjustment {
        Adjustment::Normal => base_hp,
        Adjustment::Elite => base_hp.saturating_add(hp_step(level)),
        Adjustment::Weak => base_hp.saturating_sub(hp_step(level)).max(1),
    }
}

fn plus_minus_two(base: i32, adjustment: Adjustment) -> i32 {
    match adjustment {
        Adjustment::Normal => base,
        Adjustment::Elite => base.saturating_add(2),
        Adjustment::Weak => base.saturating_sub(2),
    }
}

/// Armor class after the template.
pub fn adjusted_ac(base_ac: i32, adjustment: Adjustment) -> i32 {
    plus_minus_two(base_ac, adjustment)
}

/// Attack bonus after the template.
pub fn adjusted_attack(base_attack: i32, adjustment: Adjustment) -> i32 {
    plus_minus_two(base_attack, adjustment)
}

/// Damage expression after the template, e.g. `"2d6+4 +2"`.
pub fn adjusted_damage(base_damage: &str, adjustment: Adjustment) -> String {
    match adjustment {
        Adjustment::Normal => base_damage.to_string(),
        Adjustment::Elite => format!("{base_damage} +2"),
        Adjustment::Weak => format!("{base_damage} -2"),
    }
}

use crate::config::BattleRules;
use crate::creature::Creature;
use crate::model::Move;
use crate::rng::RandomSource;
use crate::types::{type_effectiveness, Effectiveness};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageOutcome {
    pub damage: u32,
    pub critical: bool,
    pub effectiveness: f64,
    pub same_type_bonus: bool,
}

impl DamageOutcome {
    pub fn effectiveness_class(&self) -> Effectiveness {
        Effectiveness::from_multiplier(self.effectiveness)
    }
}

/// Rolls one hit of `move_def` from `attacker` into `defender`.
///
/// Draws exactly two values from `rng`: the critical roll, then the variance.
/// The result is always at least 1, even against an immune defender.
pub fn compute_damage(
    attacker: &Creature,
    defender: &Creature,
    move_def: &Move,
    rules: &BattleRules,
    rng: &mut impl RandomSource,
) -> DamageOutcome {
    let level = attacker.level() as f64;
    let power = move_def.power as f64;
    let atk = attacker.stats().attack as f64;
    let def = defender.stats().defense.max(1) as f64;

    let mut damage = (((2.0 * level / 5.0 + 2.0) * power * atk / def) / 50.0) + 2.0;

    let same_type_bonus = attacker.has_same_type_bonus(move_def.move_type);
    if same_type_bonus {
        damage *= rules.same_type_bonus;
    }

    let effectiveness = type_effectiveness(move_def.move_type, defender.types());
    damage *= effectiveness;

    let critical = rng.chance(rules.critical_chance);
    if critical {
        damage *= rules.critical_multiplier;
    }

    let variance = rules.variance_floor + rng.next_f64() * (1.0 - rules.variance_floor);
    damage *= variance;

    damage *= rules.mitigation;

    DamageOutcome {
        damage: (damage.floor() as u32).max(1),
        critical,
        effectiveness,
        same_type_bonus,
    }
}

//! Opponent move selection by difficulty tier.
//!
//! Only moves with power > 0 are ever considered. Easy picks uniformly,
//! medium takes the type-aware pick half the time, hard takes the
//! damage-maximizing pick most of the time and otherwise the type-aware one.

use crate::config::{BattleRules, Difficulty};
use crate::creature::Creature;
use crate::damage::compute_damage;
use crate::error::{BattleError, BattleResult};
use crate::rng::RandomSource;
use crate::types::type_effectiveness;

/// Anything that can pick a move index for `attacker` against `defender`.
pub trait BattleAI {
    fn choose_move(
        &mut self,
        attacker: &Creature,
        defender: &Creature,
        rules: &BattleRules,
        rng: &mut dyn RandomSource,
    ) -> BattleResult<usize>;
}

/// The difficulty-tiered bot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TieredAI {
    pub difficulty: Difficulty,
}

impl TieredAI {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }
}

impl BattleAI for TieredAI {
    fn choose_move(
        &mut self,
        attacker: &Creature,
        defender: &Creature,
        rules: &BattleRules,
        rng: &mut dyn RandomSource,
    ) -> BattleResult<usize> {
        select_move(self.difficulty, attacker, defender, rules, rng)
    }
}

/// Indices of moves the AI may use.
pub fn eligible_moves(attacker: &Creature) -> Vec<usize> {
    attacker
        .moves()
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_damaging())
        .map(|(idx, _)| idx)
        .collect()
}

pub fn select_move(
    difficulty: Difficulty,
    attacker: &Creature,
    defender: &Creature,
    rules: &BattleRules,
    mut rng: &mut dyn RandomSource,
) -> BattleResult<usize> {
    let candidates = eligible_moves(attacker);
    if candidates.is_empty() {
        return Err(BattleError::EmptyEligibleMoveSet {
            name: attacker.name().to_string(),
        });
    }
    let choice = match difficulty {
        Difficulty::Easy => random_move(&candidates, &mut rng),
        Difficulty::Medium => {
            if rng.chance(rules.smart_move_chance) {
                smart_move(attacker, defender, &candidates)
            } else {
                random_move(&candidates, &mut rng)
            }
        }
        Difficulty::Hard => {
            if rng.chance(rules.optimal_move_chance) {
                optimal_move(attacker, defender, &candidates, rules, &mut rng)
            } else {
                smart_move(attacker, defender, &candidates)
            }
        }
    };
    Ok(choice)
}

fn random_move(candidates: &[usize], rng: &mut impl RandomSource) -> usize {
    candidates[rng.index(candidates.len())]
}

/// Highest type multiplier against the defender; ties keep the earlier move.
pub fn smart_move(attacker: &Creature, defender: &Creature, candidates: &[usize]) -> usize {
    let mut best = candidates[0];
    let mut best_effectiveness = 0.0;
    for &idx in candidates {
        let effectiveness = type_effectiveness(attacker.moves()[idx].move_type, defender.types());
        if effectiveness > best_effectiveness {
            best_effectiveness = effectiveness;
            best = idx;
        }
    }
    best
}

/// Highest single sampled damage roll; each candidate gets one roll, so the
/// pick carries the formula's noise.
pub fn optimal_move(
    attacker: &Creature,
    defender: &Creature,
    candidates: &[usize],
    rules: &BattleRules,
    rng: &mut impl RandomSource,
) -> usize {
    let mut best = candidates[0];
    let mut best_damage = 0;
    for &idx in candidates {
        let outcome = compute_damage(attacker, defender, &attacker.moves()[idx], rules, rng);
        if outcome.damage > best_damage {
            best_damage = outcome.damage;
            best = idx;
        }
    }
    best
}

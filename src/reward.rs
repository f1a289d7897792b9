use crate::config::Difficulty;
use crate::model::Catalog;
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};

/// A creature granted to the champion.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub creature_id: u32,
    pub level: u32,
}

/// Inclusive level range of a reward at `difficulty`.
pub fn reward_levels(difficulty: Difficulty) -> (u32, u32) {
    match difficulty {
        Difficulty::Easy => (3, 5),
        Difficulty::Medium => (6, 8),
        Difficulty::Hard => (9, 12),
    }
}

/// Picks a reward-only entry and a level for it. `None` when the catalog has
/// no reward-only entries.
pub fn roll_reward(
    catalog: &Catalog,
    difficulty: Difficulty,
    rng: &mut impl RandomSource,
) -> Option<Reward> {
    let pool: Vec<_> = catalog.reward_pool().collect();
    if pool.is_empty() {
        return None;
    }
    let entry = pool[rng.index(pool.len())];
    let (low, high) = reward_levels(difficulty);
    let level = low + rng.index((high - low + 1) as usize) as u32;
    Some(Reward {
        creature_id: entry.id,
        level,
    })
}

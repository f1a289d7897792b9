use crate::model::{BaseStats, CatalogEntry, Move};
use crate::rng::RandomSource;
use crate::types::ElementType;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_IV: u8 = 31;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct IndividualValues {
    #[serde(rename = "hp")]
    pub health: u8,
    pub attack: u8,
    pub defense: u8,
    pub speed: u8,
}

impl IndividualValues {
    pub fn random(rng: &mut impl RandomSource) -> Self {
        Self {
            health: rng.roll_iv(),
            attack: rng.roll_iv(),
            defense: rng.roll_iv(),
            speed: rng.roll_iv(),
        }
    }

    fn clamped(self) -> Self {
        Self {
            health: self.health.min(MAX_IV),
            attack: self.attack.min(MAX_IV),
            defense: self.defense.min(MAX_IV),
            speed: self.speed.min(MAX_IV),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

impl Stats {
    pub fn derive(base: &BaseStats, ivs: &IndividualValues, level: u32) -> Self {
        Self {
            health: calc_health(base.health, ivs.health, level),
            attack: calc_stat(base.attack, ivs.attack, level),
            defense: calc_stat(base.defense, ivs.defense, level),
            speed: calc_stat(base.speed, ivs.speed, level),
        }
    }
}

pub fn calc_health(base: u32, iv: u8, level: u32) -> u32 {
    let level = level as u64;
    let base_value = base as u64 * 2 + iv as u64;
    saturate(base_value * level / 100 + level + 10)
}

pub fn calc_stat(base: u32, iv: u8, level: u32) -> u32 {
    let base_value = base as u64 * 2 + iv as u64;
    saturate(base_value * level as u64 / 100 + 5)
}

fn saturate(value: u64) -> u32 {
    value.min(u32::MAX as u64) as u32
}

/// Presentation hint for the health bar colour.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthBand {
    Healthy,
    Wounded,
    Critical,
}

/// What the persistence layer stores for an owned creature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureRecord {
    pub id: u32,
    pub level: u32,
    pub ivs: IndividualValues,
    pub current_health: u32,
}

/// A battle participant built from a catalog entry.
///
/// `fainted` is true exactly when `current_health` is zero, and
/// `current_health` never exceeds `max_health`.
#[derive(Clone, Debug, PartialEq)]
pub struct Creature {
    id: u32,
    name: String,
    types: Vec<ElementType>,
    base_stats: BaseStats,
    moves: Vec<Move>,
    sprite: String,
    level: u32,
    ivs: IndividualValues,
    stats: Stats,
    current_health: u32,
    max_health: u32,
    fainted: bool,
}

impl Creature {
    pub fn new(entry: &CatalogEntry, level: u32, rng: &mut impl RandomSource) -> Self {
        Self::with_ivs(entry, level, IndividualValues::random(rng))
    }

    pub fn with_ivs(entry: &CatalogEntry, level: u32, ivs: IndividualValues) -> Self {
        let ivs = ivs.clamped();
        let stats = Stats::derive(&entry.base_stats, &ivs, level);
        Self {
            id: entry.id,
            name: entry.name.clone(),
            types: entry.types.clone(),
            base_stats: entry.base_stats,
            moves: entry.moves.clone(),
            sprite: entry.sprite.clone(),
            level,
            ivs,
            stats,
            current_health: stats.health,
            max_health: stats.health,
            fainted: false,
        }
    }

    /// Rebuild from a stored record; `entry` must be the record's catalog entry.
    pub fn restore(record: &CreatureRecord, entry: &CatalogEntry) -> Self {
        let mut creature = Self::with_ivs(entry, record.level, record.ivs);
        creature.current_health = record.current_health.min(creature.max_health);
        creature.fainted = creature.current_health == 0;
        creature
    }

    pub fn export(&self) -> CreatureRecord {
        CreatureRecord {
            id: self.id,
            level: self.level,
            ivs: self.ivs,
            current_health: self.current_health,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn types(&self) -> &[ElementType] {
        &self.types
    }

    pub fn base_stats(&self) -> &BaseStats {
        &self.base_stats
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn sprite(&self) -> &str {
        &self.sprite
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn ivs(&self) -> &IndividualValues {
        &self.ivs
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn current_health(&self) -> u32 {
        self.current_health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn is_fainted(&self) -> bool {
        self.fainted
    }

    pub fn is_alive(&self) -> bool {
        !self.fainted && self.current_health > 0
    }

    /// Returns the health actually removed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.current_health);
        self.current_health -= actual;
        if self.current_health == 0 {
            self.fainted = true;
        }
        actual
    }

    /// Returns the health actually restored. A fainted creature stays
    /// fainted; only [`Creature::full_heal`] revives it.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if self.fainted {
            return 0;
        }
        let actual = amount.min(self.max_health - self.current_health);
        self.current_health += actual;
        actual
    }

    pub fn full_heal(&mut self) {
        self.current_health = self.max_health;
        self.fainted = self.max_health == 0;
    }

    /// Raises the level by one and keeps the same health fraction.
    pub fn level_up(&mut self) {
        self.level += 1;
        self.recalculate_stats();
    }

    fn recalculate_stats(&mut self) {
        let old_max = self.max_health as u64;
        self.stats = Stats::derive(&self.base_stats, &self.ivs, self.level);
        self.max_health = self.stats.health;
        self.current_health = if old_max == 0 {
            self.max_health
        } else {
            (self.max_health as u64 * self.current_health as u64 / old_max) as u32
        };
        self.fainted = self.current_health == 0;
    }

    /// Multiplies every derived stat (flooring) and refills health to the new maximum.
    pub fn scale_stats(&mut self, multiplier: f64) {
        let scale = |v: u32| (v as f64 * multiplier).floor().max(1.0) as u32;
        self.stats = Stats {
            health: scale(self.stats.health),
            attack: scale(self.stats.attack),
            defense: scale(self.stats.defense),
            speed: scale(self.stats.speed),
        };
        self.max_health = self.stats.health;
        self.current_health = self.stats.health;
        self.fainted = false;
    }

    pub fn has_same_type_bonus(&self, move_type: ElementType) -> bool {
        self.types.contains(&move_type)
    }

    pub fn health_fraction(&self) -> f64 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.current_health as f64 / self.max_health as f64
    }

    pub fn health_band(&self) -> HealthBand {
        let percent = self.health_fraction() * 100.0;
        if percent > 50.0 {
            HealthBand::Healthy
        } else if percent > 25.0 {
            HealthBand::Wounded
        } else {
            HealthBand::Critical
        }
    }

    pub fn total_base_stats(&self) -> u32 {
        self.base_stats.total()
    }

    /// Bracket-simulation strength: attack plus health.
    pub fn power_score(&self) -> u32 {
        self.stats.attack.saturating_add(self.stats.health)
    }
}

impl fmt::Display for Creature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Lv.{}) - HP: {}/{}, ATK: {}, DEF: {}, SPD: {}",
            self.name,
            self.level,
            self.current_health,
            self.max_health,
            self.stats.attack,
            self.stats.defense,
            self.stats.speed
        )
    }
}

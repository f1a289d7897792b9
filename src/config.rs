use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => anyhow::bail!("Unknown difficulty {other} (use easy, medium or hard)"),
        }
    }
}

/// Stat multipliers applied to synthesized tournament opponents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyScaling {
    pub easy: f64,
    pub medium: f64,
    pub hard: f64,
}

impl Default for DifficultyScaling {
    fn default() -> Self {
        Self {
            easy: 0.7,
            medium: 1.0,
            hard: 1.2,
        }
    }
}

impl DifficultyScaling {
    pub fn for_difficulty(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Balance constants for damage resolution, opponent AI and bot synthesis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BattleRules {
    pub critical_chance: f64,
    pub critical_multiplier: f64,
    pub same_type_bonus: f64,
    /// Lower bound of the damage roll; the upper bound is 1.0.
    pub variance_floor: f64,
    /// Flat multiplier applied to every hit after variance.
    pub mitigation: f64,
    pub bot_level: u32,
    pub bot_scaling: DifficultyScaling,
    /// Medium AI: probability of the type-aware pick.
    pub smart_move_chance: f64,
    /// Hard AI: probability of the damage-maximizing pick.
    pub optimal_move_chance: f64,
}

impl Default for BattleRules {
    fn default() -> Self {
        Self {
            critical_chance: 0.06,
            critical_multiplier: 1.5,
            same_type_bonus: 1.5,
            variance_floor: 0.85,
            mitigation: 0.7,
            bot_level: 5,
            bot_scaling: DifficultyScaling::default(),
            smart_move_chance: 0.5,
            optimal_move_chance: 0.8,
        }
    }
}

impl BattleRules {
    pub fn validate(&self) -> anyhow::Result<()> {
        let probabilities = [
            ("criticalChance", self.critical_chance),
            ("smartMoveChance", self.smart_move_chance),
            ("optimalMoveChance", self.optimal_move_chance),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                anyhow::bail!("{name} must be within [0, 1], got {p}");
            }
        }
        if !(0.0..=1.0).contains(&self.variance_floor) {
            anyhow::bail!("varianceFloor must be within [0, 1], got {}", self.variance_floor);
        }
        if self.mitigation < 0.0 {
            anyhow::bail!("mitigation must be non-negative");
        }
        if self.bot_level == 0 {
            anyhow::bail!("botLevel must be > 0");
        }
        Ok(())
    }
}

pub fn load_rules(path: &Path) -> anyhow::Result<BattleRules> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rules file at {}", path.display()))?;
    let rules: BattleRules = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    rules.validate()?;
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_rules_fall_back_to_defaults() {
        let rules: BattleRules =
            serde_json::from_str(r#"{"criticalChance": 0.0, "botScaling": {"hard": 2.0}}"#)
                .expect("valid rules json");
        assert_eq!(rules.critical_chance, 0.0);
        assert_eq!(rules.mitigation, 0.7);
        assert_eq!(rules.bot_scaling.hard, 2.0);
        assert_eq!(rules.bot_scaling.easy, 0.7);
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let rules = BattleRules {
            smart_move_chance: 1.5,
            ..BattleRules::default()
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn difficulty_parses_any_case() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("nightmare".parse::<Difficulty>().is_err());
    }
}

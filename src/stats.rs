use crate::config::Difficulty;
use crate::tournament::TournamentOutcome;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct DifficultyRecord {
    pub wins: u32,
    pub losses: u32,
}

impl DifficultyRecord {
    pub fn games(&self) -> u32 {
        self.wins + self.losses
    }
}

/// Tournament wins and losses per difficulty.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BattleStats {
    pub easy: DifficultyRecord,
    pub medium: DifficultyRecord,
    pub hard: DifficultyRecord,
}

impl BattleStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_difficulty(&self, difficulty: Difficulty) -> &DifficultyRecord {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    fn for_difficulty_mut(&mut self, difficulty: Difficulty) -> &mut DifficultyRecord {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }

    pub fn record(&mut self, outcome: &TournamentOutcome) {
        let entry = self.for_difficulty_mut(outcome.difficulty);
        if outcome.human_won {
            entry.wins += 1;
        } else {
            entry.losses += 1;
        }
    }

    pub fn total_wins(&self) -> u32 {
        Difficulty::ALL
            .iter()
            .map(|&d| self.for_difficulty(d).wins)
            .sum()
    }

    pub fn total_losses(&self) -> u32 {
        Difficulty::ALL
            .iter()
            .map(|&d| self.for_difficulty(d).losses)
            .sum()
    }

    /// Percentage of tournaments won, 0 before any were played.
    pub fn win_rate(&self) -> f64 {
        let total = self.total_wins() + self.total_losses();
        if total == 0 {
            return 0.0;
        }
        self.total_wins() as f64 / total as f64 * 100.0
    }
}

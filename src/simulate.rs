//! Bulk auto-played tournaments for balance statistics.

use crate::ai::TieredAI;
use crate::config::{BattleRules, Difficulty};
use crate::creature::Creature;
use crate::model::{Catalog, CatalogEntry};
use crate::reward::Reward;
use crate::stats::BattleStats;
use crate::tournament::{Tournament, TournamentOutcome};
use anyhow::Context;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Clone, Debug)]
pub struct SimulationOptions {
    pub level: u32,
    pub difficulty: Difficulty,
    /// Tier of the AI that plays the human's side.
    pub pilot: Difficulty,
    pub runs: usize,
    pub seed: u64,
    pub rules: BattleRules,
}

#[derive(Clone, Debug)]
pub struct RunResult {
    pub outcome: TournamentOutcome,
    pub reward: Option<Reward>,
    pub player_battles: usize,
}

#[derive(Clone, Debug, Default)]
pub struct SimulationSummary {
    pub runs: usize,
    pub stats: BattleStats,
    /// Champion name -> titles.
    pub champions: BTreeMap<String, usize>,
    pub rewards: Vec<Reward>,
    pub player_battles: usize,
}

impl SimulationSummary {
    pub fn human_wins(&self) -> u32 {
        self.stats.total_wins()
    }

    /// Champions by title count, most frequent first.
    pub fn ranked_champions(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .champions
            .iter()
            .map(|(name, &count)| (name.as_str(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

/// Plays one whole tournament, piloting the human's creature with the
/// tiered AI at `pilot` difficulty.
pub fn play_tournament(
    human: Creature,
    difficulty: Difficulty,
    pilot: Difficulty,
    catalog: &Catalog,
    rules: &BattleRules,
    seed: u64,
) -> anyhow::Result<RunResult> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut tournament = Tournament::new(
        human,
        difficulty,
        catalog,
        rules.clone(),
        SmallRng::seed_from_u64(rng.gen()),
    );
    let mut pilot_ai = TieredAI::new(pilot);
    let mut bot_ai = TieredAI::new(difficulty);
    let mut player_battles = 0;

    while !tournament.is_complete() {
        tournament.play_bot_matches()?;
        if tournament.is_complete() {
            break;
        }
        let mut battle = tournament.start_player_match(SmallRng::seed_from_u64(rng.gen()))?;
        battle.run_to_completion(&mut pilot_ai, &mut bot_ai)?;
        tournament.finish_player_match(battle)?;
        player_battles += 1;
    }

    let outcome = tournament
        .outcome()
        .context("tournament finished without a champion")?;
    let reward = tournament.claim_reward(catalog);
    Ok(RunResult {
        outcome,
        reward,
        player_battles,
    })
}

pub fn simulate_tournaments(
    entry: &CatalogEntry,
    catalog: &Catalog,
    opts: &SimulationOptions,
) -> anyhow::Result<SimulationSummary> {
    let results: Vec<RunResult> = (0..opts.runs)
        .into_par_iter()
        .map(|run| {
            let mut run_rng =
                SmallRng::seed_from_u64(opts.seed ^ ((run as u64) << 32) ^ (run as u64));
            let human = Creature::new(entry, opts.level, &mut run_rng);
            play_tournament(
                human,
                opts.difficulty,
                opts.pilot,
                catalog,
                &opts.rules,
                run_rng.gen(),
            )
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut summary = SimulationSummary {
        runs: opts.runs,
        ..SimulationSummary::default()
    };
    for result in results {
        summary.stats.record(&result.outcome);
        *summary
            .champions
            .entry(result.outcome.champion.clone())
            .or_insert(0) += 1;
        summary.rewards.extend(result.reward);
        summary.player_battles += result.player_battles;
    }
    Ok(summary)
}

pub fn write_csv(summary: &SimulationSummary, path: &Path) -> anyhow::Result<()> {
    let mut out = String::from("champion,titles,share");
    for (name, count) in summary.ranked_champions() {
        let share = count as f64 / summary.runs.max(1) as f64;
        out.push('\n');
        out.push_str(&format!("{name},{count},{share:.4}"));
    }
    std::fs::write(path, out)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

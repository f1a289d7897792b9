pub mod ai;
pub mod battle;
pub mod battle_logger;
pub mod config;
pub mod creature;
pub mod damage;
pub mod error;
pub mod model;
pub mod reward;
pub mod rng;
pub mod simulate;
pub mod stats;
pub mod tournament;
pub mod types;

pub use crate::battle::{Battle, Side};
pub use crate::config::{load_rules, BattleRules, Difficulty};
pub use crate::creature::Creature;
pub use crate::error::{BattleError, TournamentError};
pub use crate::model::Catalog;
pub use crate::tournament::Tournament;

use crate::simulate::{simulate_tournaments, SimulationOptions};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CliOptions {
    pub creature_id: u32,
    pub level: u32,
    pub difficulty: Difficulty,
    pub pilot: Difficulty,
    pub runs: usize,
    pub seed: u64,
    pub rules_path: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub output_path: PathBuf,
}

pub fn run(opts: CliOptions) -> anyhow::Result<()> {
    if opts.runs == 0 {
        anyhow::bail!("--runs must be > 0");
    }
    if opts.level == 0 {
        anyhow::bail!("--level must be > 0");
    }
    let rules = match &opts.rules_path {
        Some(path) => load_rules(path)?,
        None => BattleRules::default(),
    };
    let loaded;
    let catalog = match &opts.catalog_path {
        Some(path) => {
            loaded = Catalog::load(path)?;
            &loaded
        }
        None => Catalog::global(),
    };
    let entry = catalog
        .get(opts.creature_id)
        .ok_or_else(|| anyhow::anyhow!("Unknown creature id {}", opts.creature_id))?;

    let sim_options = SimulationOptions {
        level: opts.level,
        difficulty: opts.difficulty,
        pilot: opts.pilot,
        runs: opts.runs,
        seed: opts.seed,
        rules,
    };
    let summary = simulate_tournaments(entry, catalog, &sim_options)?;
    simulate::write_csv(&summary, &opts.output_path)?;

    println!(
        "{} (Lv.{}) won {}/{} {} tournaments ({:.1}%), {} player battles",
        entry.name,
        opts.level,
        summary.human_wins(),
        summary.runs,
        opts.difficulty,
        summary.stats.win_rate(),
        summary.player_battles
    );
    if let Some((name, count)) = summary.ranked_champions().first() {
        println!("Most frequent champion: {name} ({count})");
    }
    println!(
        "Wrote {} champions to {}",
        summary.champions.len(),
        opts.output_path.display()
    );
    Ok(())
}

use pokemon_btc_arena::{run, CliOptions, Difficulty};
use std::env;
use std::path::PathBuf;

fn usage() -> ! {
    eprintln!(
        "Usage: cargo run --release -- [--creature ID] [--level N] [--difficulty easy|medium|hard] \
[--pilot easy|medium|hard] [--runs N] [--seed SEED] [--rules rules.json] [--catalog catalog.json] [--output champions.csv]"
    );
    std::process::exit(1);
}

fn parse_args() -> anyhow::Result<CliOptions> {
    let mut creature_id = 25u32;
    let mut level = 5u32;
    let mut difficulty = Difficulty::Medium;
    let mut pilot = Difficulty::Hard;
    let mut runs = 1000usize;
    let mut seed = 0u64;
    let mut rules_path = None;
    let mut catalog_path = None;
    let mut output_path = PathBuf::from("champions.csv");

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--creature" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--creature requires a catalog id"))?;
                creature_id = val.parse()?;
            }
            "--level" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--level requires a number"))?;
                level = val.parse()?;
            }
            "--difficulty" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--difficulty requires easy, medium or hard"))?;
                difficulty = val.parse()?;
            }
            "--pilot" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--pilot requires easy, medium or hard"))?;
                pilot = val.parse()?;
            }
            "--runs" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--runs requires a number"))?;
                runs = val.parse()?;
            }
            "--seed" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--seed requires a number"))?;
                seed = val.parse()?;
            }
            "--rules" => {
                rules_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--rules requires a path (e.g. --rules rules.json)")
                })?);
            }
            "--catalog" => {
                catalog_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--catalog requires a path (e.g. --catalog catalog.json)")
                })?);
            }
            "--output" => {
                output_path = args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--output requires a path (e.g. --output champions.csv)")
                })?;
            }
            "--help" | "-h" => usage(),
            other => return Err(anyhow::anyhow!("Unknown argument {other}")),
        }
    }

    Ok(CliOptions {
        creature_id,
        level,
        difficulty,
        pilot,
        runs,
        seed,
        rules_path,
        catalog_path,
        output_path,
    })
}

fn main() -> anyhow::Result<()> {
    let opts = parse_args()?;
    run(opts)
}

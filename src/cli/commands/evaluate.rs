//! Evaluate command - play a saved greedy policy on naturally dealt hands

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    blackjack::Game,
    cli::{
        config::app_for,
        output::{format_number, format_percent, print_kv, print_section, print_subsection},
    },
    pipeline::{EvaluationReport, GreedyPlayer, RandomPlayer, evaluate},
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate saved tables")]
pub struct EvaluateArgs {
    /// Path to the saved tables
    pub tables: PathBuf,

    /// Table format (msgpack or json); guessed from the extension if absent
    #[arg(long)]
    pub format: Option<String>,

    /// Number of evaluation hands
    #[arg(long, short = 'g', default_value_t = 100_000)]
    pub games: usize,

    /// Random seed for the shoe
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also evaluate a uniformly random player for comparison
    #[arg(long, default_value_t = false)]
    pub baseline: bool,

    /// Export the reports to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let app = app_for(&args.tables, args.format.as_deref())?;
    let tables = app
        .load_tables(&args.tables)
        .with_context(|| format!("loading tables from {}", args.tables.display()))?;
    let store = tables.to_store()?;

    print_section("Loaded tables");
    print_kv("Algorithm", &tables.config.algorithm.to_string());
    print_kv("Selector", &tables.config.selector.to_string());
    print_kv("Episodes trained", &format_number(tables.metadata.episodes));
    if let Some(episode) = tables.metadata.converged_at {
        print_kv("Converged at", &format_number(episode));
    }

    let rules = tables.config.rules;
    let mut reports = Vec::new();

    let mut game = Game::with_seed(args.seed, rules);
    reports.push(evaluate(&mut GreedyPlayer::new(&store), &mut game, args.games)?);

    if args.baseline {
        let mut game = Game::with_seed(args.seed, rules);
        let mut random = RandomPlayer::new(args.seed.map(|s| s.wrapping_add(1)));
        reports.push(evaluate(&mut random, &mut game, args.games)?);
    }

    for report in &reports {
        print_report(report);
    }

    if let Some(path) = &args.export {
        let file =
            File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, &reports)?;
        println!("\nExported reports to {}", path.display());
    }
    Ok(())
}

fn print_report(report: &EvaluationReport) {
    print_subsection(&format!("{} player", report.player));
    print_kv("Hands", &format_number(report.games));
    print_kv("Win rate", &format_percent(report.win_rate()));
    print_kv("Draw rate", &format_percent(report.draw_rate()));
    print_kv("Loss rate", &format_percent(report.loss_rate()));
    print_kv(
        "Mean reward",
        &format!("{:.4} ± {:.4}", report.mean_reward, report.confidence_95),
    );
}

//! Sweep command - train over growing budgets and report greedy play

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        config::LearnerArgs,
        output::{format_number, format_percent, print_section},
    },
    export::{PolicyTable, SweepCsvWriter},
    pipeline::{DEFAULT_EVALUATION_GAMES, IterationSweep, StepOperator},
};

#[derive(Parser, Debug)]
#[command(about = "Sweep training budgets and record how the greedy policy plays")]
pub struct SweepArgs {
    #[command(flatten)]
    pub learner: LearnerArgs,

    /// First iteration budget
    #[arg(long, default_value_t = 1_000)]
    pub start: usize,

    /// Last iteration budget (inclusive)
    #[arg(long, default_value_t = 1_000_000)]
    pub stop: usize,

    /// Step applied between budgets
    #[arg(long, default_value_t = 10)]
    pub step: usize,

    /// How the step is applied: + or *
    #[arg(long, default_value = "*")]
    pub op: String,

    /// Evaluation hands per budget
    #[arg(long, short = 'g', default_value_t = DEFAULT_EVALUATION_GAMES)]
    pub games: usize,

    /// CSV file for the sweep rows
    #[arg(long, short = 'O', default_value = "results.csv")]
    pub output: PathBuf,

    /// Optional text file for the final policy tables
    #[arg(long)]
    pub policy_output: Option<PathBuf>,
}

pub fn execute(args: SweepArgs) -> Result<()> {
    let config = args.learner.to_config()?;
    let operator: StepOperator = args.op.parse()?;
    let sweep = IterationSweep::new(args.start, args.stop, args.step, operator)?
        .with_games(args.games);

    print_section(&format!(
        "Sweeping {} with {} ({} budgets)",
        config.algorithm,
        config.selector,
        sweep.budgets().len()
    ));

    let outcome = sweep.run(&config)?;

    println!(
        "{:>12} {:>12} {:>10} {:>10} {:>12}",
        "iterations", "episodes", "converged", "loss rate", "mean reward"
    );
    for row in &outcome.rows {
        println!(
            "{:>12} {:>12} {:>10} {:>10} {:>12.4}",
            format_number(row.iterations),
            format_number(row.episodes_run),
            row.converged,
            format_percent(row.loss_rate),
            row.mean_reward
        );
    }

    let mut writer = SweepCsvWriter::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    writer.write_all(&outcome.rows)?;
    println!("\nWrote {} rows to {}", outcome.rows.len(), args.output.display());

    if let Some(store) = &outcome.final_store {
        let table = PolicyTable::from_store(store);
        println!("\n{table}");
        if let Some(path) = &args.policy_output {
            fs::write(path, table.to_string())
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote policy tables to {}", path.display());
        }
    }
    Ok(())
}

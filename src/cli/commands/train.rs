//! Train command - learn a policy and optionally save the tables

use std::{fs::File, path::PathBuf, sync::PoisonError};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    app::App,
    cli::{
        config::{LearnerArgs, app_for},
        output::{format_number, format_percent, print_kv, print_section},
    },
    export::PolicyTable,
    learning::LearnerConfig,
    pipeline::{MetricsObserver, MetricsSummary, ProgressObserver, SharedObserver},
    ports::Observer,
};

#[derive(Parser, Debug)]
#[command(about = "Train a Blackjack policy", allow_negative_numbers = true)]
pub struct TrainArgs {
    #[command(flatten)]
    pub learner: LearnerArgs,

    /// Output file for the trained tables
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Table format (msgpack or json); guessed from the extension if absent
    #[arg(long)]
    pub format: Option<String>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,

    /// Print the learned hard and soft policy tables
    #[arg(long, default_value_t = false)]
    pub show_policy: bool,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile<'a> {
    config: &'a LearnerConfig,
    metrics: MetricsSummary,
    converged_at: Option<usize>,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.learner.to_config()?;
    let app = match &args.output {
        Some(path) => app_for(path, args.format.as_deref())?,
        None => App::new(),
    };

    print_section("Training");
    print_kv("Algorithm", &config.algorithm.to_string());
    print_kv("Selector", &config.selector.to_string());
    print_kv("Exploration", &config.exploration.to_string());
    print_kv("Episodes", &format_number(config.iterations));
    if let Some(seed) = config.seed {
        print_kv("Seed", &seed.to_string());
    }

    let (metrics, metrics_handle) = SharedObserver::new(MetricsObserver::new());
    let mut observers: Vec<Box<dyn Observer>> = vec![Box::new(metrics)];
    if !args.no_progress {
        observers.push(Box::new(ProgressObserver::new()));
    }

    let (agent, result) = app.train(config.clone(), observers)?;

    print_section("Results");
    print_kv("Episodes run", &format_number(result.episodes_run));
    match result.converged_at {
        Some(episode) => print_kv("Converged at", &format_number(episode)),
        None => print_kv("Converged", "no"),
    }
    print_kv("Win rate", &format_percent(result.win_rate()));
    print_kv("Loss rate", &format_percent(result.loss_rate()));
    print_kv("Mean reward", &format!("{:.4}", result.mean_reward()));

    if args.show_policy {
        println!("\n{}", PolicyTable::from_store(agent.store()));
    }

    if let Some(path) = &args.output {
        app.save_agent(&agent, &result, path)
            .with_context(|| format!("saving tables to {}", path.display()))?;
        println!("\nSaved tables to {}", path.display());
    }

    if let Some(path) = &args.summary {
        let metrics = metrics_handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .summary();
        let summary = TrainingSummaryFile {
            config: &config,
            metrics,
            converged_at: result.converged_at,
        };
        let file = File::create(path)
            .with_context(|| format!("creating summary file {}", path.display()))?;
        serde_json::to_writer_pretty(file, &summary)?;
        println!("Wrote summary to {}", path.display());
    }

    Ok(())
}

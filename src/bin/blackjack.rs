//! Blackjack CLI - tabular reinforcement learning for a simplified Blackjack
//!
//! This CLI provides a unified interface for:
//! - Training Monte-Carlo, SARSA and Q-learning agents
//! - Evaluating saved policies on naturally dealt hands
//! - Sweeping training budgets into a CSV report
//! - Showing policies as strategy charts and playing hands interactively

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "blackjack")]
#[command(version, about = "Tabular reinforcement learning for Blackjack", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a policy
    Train(Box<blackjack_rl::cli::commands::train::TrainArgs>),

    /// Evaluate saved tables
    Evaluate(blackjack_rl::cli::commands::evaluate::EvaluateArgs),

    /// Sweep training budgets and write a CSV report
    Sweep(Box<blackjack_rl::cli::commands::sweep::SweepArgs>),

    /// Show saved tables as strategy charts
    Show(blackjack_rl::cli::commands::show::ShowArgs),

    /// Play hands interactively
    Play(blackjack_rl::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => blackjack_rl::cli::commands::train::execute(*args),
        Commands::Evaluate(args) => blackjack_rl::cli::commands::evaluate::execute(args),
        Commands::Sweep(args) => blackjack_rl::cli::commands::sweep::execute(*args),
        Commands::Show(args) => blackjack_rl::cli::commands::show::execute(args),
        Commands::Play(args) => blackjack_rl::cli::commands::play::execute(args),
    }
}

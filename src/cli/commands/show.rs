//! Show command - print saved tables as strategy charts

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use crate::{
    blackjack::{Action, StateIndex},
    cli::{
        config::app_for,
        output::{format_number, print_kv, print_section, print_subsection},
    },
    export::PolicyTable,
};

#[derive(Parser, Debug)]
#[command(about = "Show the policy stored in saved tables")]
pub struct ShowArgs {
    /// Path to the saved tables
    pub tables: PathBuf,

    /// Table format (msgpack or json); guessed from the extension if absent
    #[arg(long)]
    pub format: Option<String>,

    /// Player total of a cell to inspect
    #[arg(long, requires = "dealer")]
    pub player: Option<u8>,

    /// Treat the inspected total as soft
    #[arg(long, default_value_t = false)]
    pub soft: bool,

    /// Dealer upcard (2-11) of a cell to inspect
    #[arg(long, requires = "player")]
    pub dealer: Option<u8>,
}

pub fn execute(args: ShowArgs) -> Result<()> {
    let app = app_for(&args.tables, args.format.as_deref())?;
    let tables = app
        .load_tables(&args.tables)
        .with_context(|| format!("loading tables from {}", args.tables.display()))?;
    let store = tables.to_store()?;

    print_section("Saved tables");
    print_kv("Algorithm", &tables.config.algorithm.to_string());
    print_kv("Selector", &tables.config.selector.to_string());
    print_kv("Episodes", &format_number(tables.metadata.episodes));
    print_kv("Mean reward", &format!("{:.4}", tables.metadata.mean_reward));

    let mut table = PolicyTable::from_store(&store);
    if let (Some(player), Some(dealer)) = (args.player, args.dealer) {
        if !(2..=21).contains(&player) || !(2..=11).contains(&dealer) {
            bail!("cell {player} vs {dealer} lies outside the table");
        }
        let state = StateIndex::from_totals(player, args.soft, dealer);
        print_subsection(&format!("Cell {state}"));
        for action in Action::ALL {
            println!(
                "  {:12} Q {:>8.4}  N {:>10}  P {:.3}",
                action.to_string(),
                store.value(state, action),
                store.visits(state, action),
                store.probability(state, action)
            );
        }
        table = table.with_highlight(state);
    }

    println!("\n{table}");
    Ok(())
}

//! Play command - interactive hands in the terminal with the trained
//! policy's recommendation

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    blackjack::{Action, CardSource, Game, Hand, TableRules},
    cli::config::app_for,
    export::PolicyTable,
    learning::ValueStore,
};

#[derive(Parser, Debug)]
#[command(about = "Play hands interactively (h: hit, s: stand, d: double, r: new hand, q: quit)")]
pub struct PlayArgs {
    /// Saved tables to take recommendations from
    pub tables: Option<PathBuf>,

    /// Table format (msgpack or json); guessed from the extension if absent
    #[arg(long)]
    pub format: Option<String>,

    /// Random seed for the shoe
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the policy table with the current cell marked
    #[arg(long, default_value_t = false)]
    pub show_table: bool,
}

/// Hands finished during a session and their summed reward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionStats {
    pub hands: usize,
    pub total_reward: f64,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let (store, rules) = match &args.tables {
        Some(path) => {
            let tables = app_for(path, args.format.as_deref())?
                .load_tables(path)
                .with_context(|| format!("loading tables from {}", path.display()))?;
            (tables.to_store()?, tables.config.rules)
        }
        None => (ValueStore::new(), TableRules::default()),
    };

    let mut game = Game::with_seed(args.seed, rules);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stats = run_session(
        &mut stdin.lock(),
        &mut stdout.lock(),
        &store,
        &mut game,
        args.show_table,
    )?;
    println!(
        "\n{} hands played, total reward {:+.1}",
        stats.hands, stats.total_reward
    );
    Ok(())
}

/// Drive hands from line commands until `q` or end of input.
///
/// The game's current deal is the first hand.
pub fn run_session<S, R, W>(
    input: &mut R,
    out: &mut W,
    store: &ValueStore,
    game: &mut Game<S>,
    show_table: bool,
) -> Result<SessionStats>
where
    S: CardSource,
    R: BufRead,
    W: Write,
{
    let mut stats = SessionStats::default();
    render(out, game, store, show_table)?;

    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let action = match line.trim().to_ascii_lowercase().as_str() {
            "q" => break,
            "r" => {
                game.reset();
                render(out, game, store, show_table)?;
                continue;
            }
            "h" => Action::Hit,
            "s" => Action::Stand,
            "d" => Action::DoubleDown,
            other => {
                writeln!(out, "unknown command '{other}' (h, s, d, r, q)")?;
                continue;
            }
        };

        if !game.is_running() {
            writeln!(out, "hand is over, press r for a new one")?;
            continue;
        }
        game.apply_player_action(action);
        if !game.is_player_turn() {
            game.play_out_dealer();
        }
        render(out, game, store, show_table)?;

        if !game.is_running() {
            let reward = game.reward();
            stats.hands += 1;
            stats.total_reward += reward;
            let verdict = if reward > 0.0 {
                format!("You win {reward:+.1}")
            } else if reward < 0.0 {
                format!("You lose {reward:+.1}")
            } else {
                "Push".to_string()
            };
            writeln!(out, "{verdict}. r: new hand, q: quit")?;
        }
    }
    Ok(stats)
}

fn describe(hand: &Hand) -> String {
    let cards: Vec<String> = hand.cards().iter().map(|c| c.to_string()).collect();
    let kind = if hand.has_usable_ace() { "soft" } else { "hard" };
    format!("{} ({kind} {})", cards.join(" "), hand.value())
}

fn render<S: CardSource, W: Write>(
    out: &mut W,
    game: &Game<S>,
    store: &ValueStore,
    show_table: bool,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Dealer: {}", describe(game.dealer_hand()))?;
    writeln!(out, "You:    {}", describe(game.player_hand()))?;
    if game.is_running() && game.is_player_turn() {
        let state = game.state();
        writeln!(out, "Policy suggests: {}", store.best_action(state))?;
        if show_table {
            writeln!(out, "{}", PolicyTable::from_store(store).with_highlight(state))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::blackjack::{Rank, StackedDeck};

    fn session(cards: &[Rank], commands: &str) -> (SessionStats, String) {
        let mut game = Game::new(
            StackedDeck::new(cards.iter().copied()),
            TableRules::default(),
        );
        let mut input = Cursor::new(commands.as_bytes().to_vec());
        let mut output = Vec::new();
        let stats = run_session(&mut input, &mut output, &ValueStore::new(), &mut game, false)
            .unwrap();
        (stats, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_stand_and_lose() {
        // player 10 + 6, dealer 7 up then 10
        let (stats, output) = session(&[Rank::Ten, Rank::Six, Rank::Seven, Rank::Ten], "s\nq\n");
        assert_eq!(stats.hands, 1);
        assert_eq!(stats.total_reward, -1.0);
        assert!(output.contains("Policy suggests: hit"));
        assert!(output.contains("You lose -1.0"));
    }

    #[test]
    fn test_commands_after_hand_ends_are_refused() {
        // player busts on the hit
        let (stats, output) = session(
            &[Rank::Ten, Rank::Six, Rank::Seven, Rank::King],
            "h\nh\nbogus\n",
        );
        assert_eq!(stats.hands, 1);
        assert!(output.contains("hand is over"));
        assert!(output.contains("unknown command 'bogus'"));
    }
}

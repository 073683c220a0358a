//! Batch evaluation of a fixed player over naturally dealt hands

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::{
    Error, Result,
    blackjack::{Action, CardSource, Game, StateIndex},
    learning::{ValueStore, random_action},
    ports::Player,
};

/// Plays the first action with maximal policy probability.
#[derive(Debug, Clone, Copy)]
pub struct GreedyPlayer<'a> {
    store: &'a ValueStore,
}

impl<'a> GreedyPlayer<'a> {
    pub fn new(store: &'a ValueStore) -> Self {
        Self { store }
    }
}

impl Player for GreedyPlayer<'_> {
    fn choose_action(&mut self, state: StateIndex) -> Action {
        self.store.best_action(state)
    }

    fn name(&self) -> &str {
        "greedy"
    }
}

/// Uniform baseline.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self { rng }
    }
}

impl Player for RandomPlayer {
    fn choose_action(&mut self, _state: StateIndex) -> Action {
        random_action(&mut self.rng)
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Outcome counts and reward statistics of an evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub player: String,
    pub games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub mean_reward: f64,
    /// Half-width of the 95% normal-approximation interval around the mean.
    pub confidence_95: f64,
}

impl EvaluationReport {
    pub fn win_rate(&self) -> f64 {
        self.share(self.wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.share(self.draws)
    }

    pub fn loss_rate(&self) -> f64 {
        self.share(self.losses)
    }

    fn share(&self, count: usize) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            count as f64 / self.games as f64
        }
    }
}

/// Play one naturally dealt hand to the end and return its reward.
pub fn play_hand<S: CardSource>(player: &mut dyn Player, game: &mut Game<S>) -> f64 {
    game.reset();
    while game.is_running() && game.is_player_turn() {
        let action = player.choose_action(game.state());
        game.apply_player_action(action);
    }
    game.play_out_dealer();
    game.reward()
}

/// Play `games` hands with `player` and summarise the rewards.
///
/// # Errors
///
/// Returns an error if the normal quantile cannot be built.
pub fn evaluate<S: CardSource>(
    player: &mut dyn Player,
    game: &mut Game<S>,
    games: usize,
) -> Result<EvaluationReport> {
    let (mut wins, mut draws, mut losses) = (0, 0, 0);
    let mut sum = 0.0;
    let mut sum_sq = 0.0;

    for _ in 0..games {
        let reward = play_hand(player, game);
        sum += reward;
        sum_sq += reward * reward;
        if reward > 0.0 {
            wins += 1;
        } else if reward < 0.0 {
            losses += 1;
        } else {
            draws += 1;
        }
    }

    let (mean_reward, confidence_95) = if games == 0 {
        (0.0, 0.0)
    } else {
        let n = games as f64;
        let mean = sum / n;
        let variance = if games > 1 {
            ((sum_sq - n * mean * mean) / (n - 1.0)).max(0.0)
        } else {
            0.0
        };
        let z = Normal::new(0.0, 1.0)
            .map_err(|e| Error::InvalidConfiguration {
                message: format!("standard normal: {e}"),
            })?
            .inverse_cdf(0.975);
        (mean, z * (variance / n).sqrt())
    };

    log::debug!(
        "{} played {games} hands, mean reward {mean_reward:.4} ± {confidence_95:.4}",
        player.name()
    );

    Ok(EvaluationReport {
        player: player.name().to_string(),
        games,
        wins,
        draws,
        losses,
        mean_reward,
        confidence_95,
    })
}

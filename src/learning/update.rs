//! Value-update rules
//!
//! | Rule        | When            | Target                        |
//! |-------------|-----------------|-------------------------------|
//! | Monte-Carlo | episode end     | episode return G              |
//! | SARSA       | every step      | r + γ Q(s', a'), a' played    |
//! | Q-learning  | every step      | r + γ Q(s', a'), a' greedy    |

use serde::{Deserialize, Serialize};

use super::{
    config::{Algorithm, LearnerConfig},
    value_store::ValueStore,
};
use crate::blackjack::{Action, StateIndex};

/// One decision of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub state: StateIndex,
    pub action: Action,
    pub reward: f64,
}

/// Observed outcome of applying `action` in `state`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub state: StateIndex,
    pub action: Action,
    pub reward: f64,
    pub next_state: StateIndex,
    /// The hand ended with this step.
    pub done: bool,
}

/// Fixed α or the incremental sample average α = 1/N(s,a).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepSize {
    Fixed(f64),
    SampleAverage,
}

impl StepSize {
    pub fn alpha(self, store: &ValueStore, state: StateIndex, action: Action) -> f64 {
        match self {
            StepSize::Fixed(alpha) => alpha,
            StepSize::SampleAverage => 1.0 / store.visits(state, action) as f64,
        }
    }
}

/// Update rule bound from the configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateRule {
    MonteCarlo { step_size: StepSize },
    Sarsa { step_size: StepSize, discount: f64 },
    QLearning { step_size: StepSize, discount: f64 },
}

impl UpdateRule {
    pub fn from_config(config: &LearnerConfig) -> Self {
        let step_size = if config.average_update {
            StepSize::SampleAverage
        } else {
            StepSize::Fixed(config.learning_rate)
        };
        let discount = config.discount_factor;
        match config.algorithm {
            Algorithm::MonteCarlo => UpdateRule::MonteCarlo { step_size },
            Algorithm::Sarsa => UpdateRule::Sarsa {
                step_size,
                discount,
            },
            Algorithm::QLearning => UpdateRule::QLearning {
                step_size,
                discount,
            },
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            UpdateRule::MonteCarlo { .. } => Algorithm::MonteCarlo,
            UpdateRule::Sarsa { .. } => Algorithm::Sarsa,
            UpdateRule::QLearning { .. } => Algorithm::QLearning,
        }
    }

    /// Online update after one step. `next_action` is the action whose value
    /// is bootstrapped from; it is ignored once the hand is over.
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ Q(s',a') - Q(s,a)]
    pub fn on_step(&self, store: &mut ValueStore, transition: &Transition, next_action: Action) {
        let (step_size, discount) = match *self {
            UpdateRule::MonteCarlo { .. } => return,
            UpdateRule::Sarsa {
                step_size,
                discount,
            }
            | UpdateRule::QLearning {
                step_size,
                discount,
            } => (step_size, discount),
        };

        let next_q = if transition.done {
            0.0
        } else {
            store.value(transition.next_state, next_action)
        };
        let target = transition.reward + discount * next_q;
        let alpha = step_size.alpha(store, transition.state, transition.action);
        store.update_toward(transition.state, transition.action, target, alpha);
    }

    /// End-of-episode update: every visited pair moves toward the return.
    ///
    /// Q(s,a) ← Q(s,a) + α[G - Q(s,a)]
    pub fn on_episode_end(&self, store: &mut ValueStore, trajectory: &[Step], episode_return: f64) {
        let UpdateRule::MonteCarlo { step_size } = *self else {
            return;
        };
        for step in trajectory {
            let alpha = step_size.alpha(store, step.state, step.action);
            store.update_toward(step.state, step.action, episode_return, alpha);
        }
    }
}

//! Tabular learning engine
//!
//! This module implements the value tables, exploration strategies and
//! update rules used to learn a Blackjack policy.
//!
//! ## Algorithms
//!
//! - **Monte-Carlo**: every pair visited in an episode moves toward the
//!   episode's final reward
//! - **SARSA**: on-policy TD(0), bootstraps from the action actually played
//! - **Q-learning**: off-policy TD(0), bootstraps from the greedy action while
//!   exploring uniformly at random
//!
//! After every episode the greedy policy of each visited state is derived
//! again from its action values.
//!
//! ## Usage Example
//!
//! ```no_run
//! use blackjack_rl::learning::{Agent, Algorithm, LearnerConfig, SelectorKind};
//!
//! let config = LearnerConfig::new(Algorithm::QLearning)
//!     .with_selector(SelectorKind::Ucb)
//!     .with_exploration(0.5)
//!     .with_seed(7);
//! let agent = Agent::new(config)?;
//! # Ok::<(), blackjack_rl::Error>(())
//! ```

pub mod agent;
pub mod config;
pub mod convergence;
pub mod selector;
pub mod serialization;
pub mod update;
pub mod value_store;

pub use agent::{Agent, EXPLORING_SOFT_PROBABILITY};
pub use config::{Algorithm, DEFAULT_CONVERGENCE_INTERVAL, LearnerConfig, SelectorKind, UcbRanking};
pub use convergence::ConvergenceMonitor;
pub use selector::{
    ActionSelector, EpsilonGreedy, Greedy, Ucb, UniformRandom, epsilon_greedy_action,
    greedy_action, random_action, ucb_action,
};
pub use serialization::{SavedTables, TrainingMetadata};
pub use update::{Step, StepSize, Transition, UpdateRule};
pub use value_store::{GRID_LEN, GRID_SHAPE, TIE_TOLERANCE, ValueStore};

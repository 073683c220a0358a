//! Tabular reinforcement learning for a simplified Blackjack
//!
//! This crate provides:
//! - A turn-based Blackjack environment on an infinite shoe
//! - Dense value, visit-count and policy tables over a fixed state grid
//! - Monte-Carlo, SARSA and Q-learning updates with ε-greedy or UCB exploration
//! - A training pipeline with a convergence heuristic, evaluation and
//!   iteration sweeps
//! - Persistence, strategy-chart rendering and a command-line interface

pub mod adapters;
pub mod app;
pub mod blackjack;
pub mod cli;
pub mod error;
pub mod export;
pub mod learning;
pub mod pipeline;
pub mod ports;

pub use blackjack::{Action, Game, StateIndex, TableRules};
pub use error::{Error, Result};
pub use learning::{Agent, Algorithm, LearnerConfig, SelectorKind, ValueStore};
pub use pipeline::{TrainingPipeline, TrainingResult, train};

//! Training and evaluation pipelines
//!
//! This module provides composable pipelines for:
//! - Training an agent over repeated episodes with early stopping
//! - Evaluating a fixed player on naturally dealt hands
//! - Sweeping the training budget and reporting how play improves
//! - Recording observations during training

pub mod evaluation;
pub mod observers;
pub mod sweep;
pub mod training;

pub use evaluation::{EvaluationReport, GreedyPlayer, RandomPlayer, evaluate, play_hand};
pub use observers::{MetricsObserver, MetricsSummary, ProgressObserver, SharedObserver};
pub use sweep::{
    DEFAULT_EVALUATION_GAMES, IterationSweep, StepOperator, SweepOutcome, SweepRow,
};
pub use training::{TrainingPipeline, TrainingResult, train};

pub use crate::ports::{Observer, Player};

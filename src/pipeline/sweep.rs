//! Iteration sweep: how well does the greedy policy play as the training
//! budget grows?

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{
    evaluation::{GreedyPlayer, evaluate},
    training::TrainingPipeline,
};
use crate::{
    Error, Result,
    blackjack::Game,
    learning::{Agent, LearnerConfig, ValueStore},
};

/// Hands played per evaluation unless configured otherwise.
pub const DEFAULT_EVALUATION_GAMES: usize = 100_000;

/// How the iteration budget grows between two sweep points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOperator {
    Add,
    Mul,
}

impl StepOperator {
    fn apply(self, value: usize, step: usize) -> usize {
        match self {
            StepOperator::Add => value.saturating_add(step),
            StepOperator::Mul => value.saturating_mul(step),
        }
    }
}

impl fmt::Display for StepOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOperator::Add => f.write_str("+"),
            StepOperator::Mul => f.write_str("*"),
        }
    }
}

impl FromStr for StepOperator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "+" | "add" => Ok(StepOperator::Add),
            "*" | "x" | "mul" => Ok(StepOperator::Mul),
            _ => Err(Error::ParseStepOperator {
                input: s.to_string(),
                expected: "+, add, *, x, mul".to_string(),
            }),
        }
    }
}

/// One evaluated sweep point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    pub iterations: usize,
    pub episodes_run: usize,
    pub converged: bool,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
    pub mean_reward: f64,
}

/// All rows plus the tables of the last trained agent.
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    pub rows: Vec<SweepRow>,
    pub final_store: Option<ValueStore>,
}

/// Trains a fresh agent for each budget in `start..=stop` and evaluates its
/// greedy policy on naturally dealt hands.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationSweep {
    start: usize,
    stop: usize,
    step: usize,
    operator: StepOperator,
    games: usize,
}

impl IterationSweep {
    /// # Errors
    ///
    /// Rejects a zero start and steps that would never grow the budget.
    pub fn new(start: usize, stop: usize, step: usize, operator: StepOperator) -> Result<Self> {
        if start == 0 {
            return Err(Error::InvalidParameter {
                name: "start",
                value: 0.0,
                expected: "at least 1",
            });
        }
        let min_step = match operator {
            StepOperator::Add => 1,
            StepOperator::Mul => 2,
        };
        if step < min_step {
            return Err(Error::InvalidParameter {
                name: "step",
                value: step as f64,
                expected: "at least 1 when adding, at least 2 when multiplying",
            });
        }
        if start > stop {
            log::warn!("sweep start {start} exceeds stop {stop}, nothing to run");
        }
        Ok(Self {
            start,
            stop,
            step,
            operator,
            games: DEFAULT_EVALUATION_GAMES,
        })
    }

    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    pub fn games(&self) -> usize {
        self.games
    }

    /// Iteration budgets visited by the sweep.
    pub fn budgets(&self) -> Vec<usize> {
        let mut budgets = Vec::new();
        let mut current = self.start;
        while current <= self.stop {
            budgets.push(current);
            let next = self.operator.apply(current, self.step);
            if next == current {
                break;
            }
            current = next;
        }
        budgets
    }

    /// Run the sweep. Convergence checks are always on so that larger
    /// budgets may stop early.
    pub fn run(&self, base: &LearnerConfig) -> Result<SweepOutcome> {
        let mut rows = Vec::new();
        let mut final_store = None;

        for iterations in self.budgets() {
            let config = base
                .clone()
                .with_iterations(iterations)
                .with_convergence_check(true);
            let mut pipeline = TrainingPipeline::new(&config);
            let mut agent = Agent::new(config.clone())?;
            let training = pipeline.run(&mut agent)?;

            let mut game = Game::with_seed(config.seed.map(|s| s.wrapping_add(2)), config.rules);
            let store = agent.into_store();
            let report = evaluate(&mut GreedyPlayer::new(&store), &mut game, self.games)?;

            log::info!(
                "{iterations} iterations: loss rate {:.4}, mean reward {:.4}",
                report.loss_rate(),
                report.mean_reward
            );
            rows.push(SweepRow {
                iterations,
                episodes_run: training.episodes_run,
                converged: training.converged(),
                win_rate: report.win_rate(),
                draw_rate: report.draw_rate(),
                loss_rate: report.loss_rate(),
                mean_reward: report.mean_reward,
            });
            final_store = Some(store);
        }

        Ok(SweepOutcome { rows, final_store })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::Algorithm;

    #[test]
    fn test_parse_step_operator() {
        assert_eq!("+".parse::<StepOperator>().unwrap(), StepOperator::Add);
        assert_eq!("x".parse::<StepOperator>().unwrap(), StepOperator::Mul);
        assert!(matches!(
            "/".parse::<StepOperator>(),
            Err(Error::ParseStepOperator { .. })
        ));
    }

    #[test]
    fn test_budgets_multiply() {
        let sweep = IterationSweep::new(1_000, 20_000, 2, StepOperator::Mul).unwrap();
        assert_eq!(sweep.budgets(), vec![1_000, 2_000, 4_000, 8_000, 16_000]);
    }

    #[test]
    fn test_budgets_add_include_stop() {
        let sweep = IterationSweep::new(100, 300, 100, StepOperator::Add).unwrap();
        assert_eq!(sweep.budgets(), vec![100, 200, 300]);
    }

    #[test]
    fn test_rejects_steps_that_never_grow() {
        assert!(IterationSweep::new(100, 300, 1, StepOperator::Mul).is_err());
        assert!(IterationSweep::new(100, 300, 0, StepOperator::Add).is_err());
        assert!(IterationSweep::new(0, 300, 10, StepOperator::Add).is_err());
    }

    #[test]
    fn test_run_produces_one_row_per_budget() {
        let sweep = IterationSweep::new(200, 400, 200, StepOperator::Add)
            .unwrap()
            .with_games(500);
        let base = LearnerConfig::new(Algorithm::MonteCarlo).with_seed(17);
        let outcome = sweep.run(&base).unwrap();

        assert_eq!(outcome.rows.len(), 2);
        assert_eq!(outcome.rows[0].iterations, 200);
        for row in &outcome.rows {
            assert!((row.win_rate + row.draw_rate + row.loss_rate - 1.0).abs() < 1e-9);
            assert!(row.episodes_run <= row.iterations);
        }
        assert!(outcome.final_store.is_some());
    }
}

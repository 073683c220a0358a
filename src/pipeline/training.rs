//! Training loop driving repeated episodes against the environment

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    blackjack::{CardSource, Game, InfiniteShoe},
    learning::{Agent, ConvergenceMonitor, LearnerConfig, Step, TrainingMetadata, Transition},
    ports::Observer,
};

/// Result of a training run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Episodes actually played
    pub episodes_run: usize,

    /// Episode at which the convergence check passed, if it did
    pub converged_at: Option<usize>,

    pub wins: usize,
    pub draws: usize,
    pub losses: usize,

    /// Sum of the final rewards of all episodes
    pub total_reward: f64,
}

impl TrainingResult {
    pub fn converged(&self) -> bool {
        self.converged_at.is_some()
    }

    /// Mean final reward per episode, 0 when nothing was played.
    pub fn mean_reward(&self) -> f64 {
        if self.episodes_run == 0 {
            0.0
        } else {
            self.total_reward / self.episodes_run as f64
        }
    }

    /// Share of episodes won, exploration included.
    pub fn win_rate(&self) -> f64 {
        rate(self.wins, self.episodes_run)
    }

    pub fn loss_rate(&self) -> f64 {
        rate(self.losses, self.episodes_run)
    }

    fn record(&mut self, reward: f64) {
        self.episodes_run += 1;
        self.total_reward += reward;
        if reward > 0.0 {
            self.wins += 1;
        } else if reward < 0.0 {
            self.losses += 1;
        } else {
            self.draws += 1;
        }
    }

    pub fn metadata(&self) -> TrainingMetadata {
        TrainingMetadata {
            episodes: self.episodes_run,
            converged_at: self.converged_at,
            mean_reward: self.mean_reward(),
        }
    }
}

fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Training pipeline for one agent.
///
/// Each episode deals a hand, forces an exploring start, lets the agent
/// play until its turn ends, plays the dealer out and hands the trajectory
/// back to the agent. When the configuration asks for it, a
/// [`ConvergenceMonitor`] is consulted before every `interval`-th episode and
/// training stops early once it passes.
pub struct TrainingPipeline<S: CardSource = InfiniteShoe> {
    game: Game<S>,
    episodes: usize,
    monitor: Option<ConvergenceMonitor>,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline<InfiniteShoe> {
    /// Pipeline on an infinite shoe seeded from `config.seed + 1`.
    pub fn new(config: &LearnerConfig) -> Self {
        let shoe = InfiniteShoe::from_seed(config.seed.map(|seed| seed.wrapping_add(1)));
        Self::with_source(config, shoe)
    }
}

impl<S: CardSource> TrainingPipeline<S> {
    /// Pipeline drawing from an arbitrary card source.
    pub fn with_source(config: &LearnerConfig, source: S) -> Self {
        let monitor = config
            .check_convergence
            .then(|| ConvergenceMonitor::new(config.convergence_interval));
        Self {
            game: Game::new(source, config.rules),
            episodes: config.iterations,
            monitor,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn episodes(&self) -> usize {
        self.episodes
    }

    pub fn game(&self) -> &Game<S> {
        &self.game
    }

    /// Train `agent` until the episode budget is spent or convergence.
    pub fn run(&mut self, agent: &mut Agent) -> Result<TrainingResult> {
        log::info!(
            "training {} with {} for {} episodes",
            agent.algorithm(),
            agent.selector().name(),
            self.episodes
        );
        for observer in &mut self.observers {
            observer.on_training_start(self.episodes)?;
        }

        let mut result = TrainingResult::default();
        for episode in 0..self.episodes {
            if let Some(monitor) = self.monitor.as_mut().filter(|m| m.is_due(episode)) {
                let converged = monitor.check(agent.store());
                log::debug!("convergence check at episode {episode}: {converged}");
                for observer in &mut self.observers {
                    observer.on_convergence_check(episode, converged)?;
                }
                if converged {
                    log::info!("values stable after {episode} episodes, stopping early");
                    result.converged_at = Some(episode);
                    break;
                }
            }

            let reward = self.play_episode(agent)?;
            result.record(reward);
            for observer in &mut self.observers {
                observer.on_episode_end(episode, reward)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end(result.episodes_run)?;
        }
        log::info!(
            "finished after {} episodes, mean reward {:.4}",
            result.episodes_run,
            result.mean_reward()
        );
        Ok(result)
    }

    /// Play and learn from a single episode, returning its final reward.
    pub fn play_episode(&mut self, agent: &mut Agent) -> Result<f64> {
        self.game.reset();
        let (total, soft) = agent.exploring_start();
        self.game.force_player_state(total, soft)?;

        let mut trajectory = Vec::new();
        let mut next = Some(agent.behaviour_action(self.game.state()));

        while let Some(action) = next {
            let state = self.game.state();
            agent.record_visit(state, action);
            self.game.apply_player_action(action);
            if !self.game.is_player_turn() {
                self.game.play_out_dealer();
            }

            let reward = self.game.reward();
            let transition = Transition {
                state,
                action,
                reward,
                next_state: self.game.state(),
                done: !self.game.is_running(),
            };
            next = agent.observe(&transition);
            trajectory.push(Step {
                state,
                action,
                reward,
            });
        }

        let episode_return = self.game.reward();
        agent.finish_episode(&trajectory, episode_return);
        Ok(episode_return)
    }
}

/// Train a fresh agent from `config` on a shoe derived from its seed.
pub fn train(config: LearnerConfig) -> Result<(Agent, TrainingResult)> {
    let mut pipeline = TrainingPipeline::new(&config);
    let mut agent = Agent::new(config)?;
    let result = pipeline.run(&mut agent)?;
    Ok((agent, result))
}

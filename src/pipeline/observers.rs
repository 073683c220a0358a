//! Observer implementations for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! training logic to specific output formats.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, ports::Observer};

/// Redraw the bar at most this often, in episodes.
const PROGRESS_STRIDE: usize = 1_000;

/// Progress bar observer - Shows training progress with W/D/L counts
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    draws: usize,
    losses: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }

    fn message(&self) -> String {
        format!("{} D:{} L:{}", self.wins, self.draws, self.losses)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} hands (W:{msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, reward: f64) -> Result<()> {
        if reward > 0.0 {
            self.wins += 1;
        } else if reward < 0.0 {
            self.losses += 1;
        } else {
            self.draws += 1;
        }

        if !episode.is_multiple_of(PROGRESS_STRIDE) {
            return Ok(());
        }
        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self, episodes_run: usize) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(episodes_run as u64);
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks outcome counts and convergence checks
#[derive(Debug, Default)]
pub struct MetricsObserver {
    wins: usize,
    draws: usize,
    losses: usize,
    total_reward: f64,
    checks: usize,
    converged_at: Option<usize>,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn episodes(&self) -> usize {
        self.wins + self.draws + self.losses
    }

    pub fn mean_reward(&self) -> f64 {
        match self.episodes() {
            0 => 0.0,
            n => self.total_reward / n as f64,
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        let episodes = self.episodes();
        let share = |count: usize| {
            if episodes == 0 {
                0.0
            } else {
                count as f64 / episodes as f64
            }
        };
        MetricsSummary {
            episodes,
            wins: self.wins,
            draws: self.draws,
            losses: self.losses,
            win_rate: share(self.wins),
            draw_rate: share(self.draws),
            loss_rate: share(self.losses),
            mean_reward: self.mean_reward(),
            convergence_checks: self.checks,
            converged_at: self.converged_at,
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub episodes: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
    pub mean_reward: f64,
    pub convergence_checks: usize,
    pub converged_at: Option<usize>,
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, _episode: usize, reward: f64) -> Result<()> {
        self.total_reward += reward;
        if reward > 0.0 {
            self.wins += 1;
        } else if reward < 0.0 {
            self.losses += 1;
        } else {
            self.draws += 1;
        }
        Ok(())
    }

    fn on_convergence_check(&mut self, episode: usize, converged: bool) -> Result<()> {
        self.checks += 1;
        if converged {
            self.converged_at = Some(episode);
        }
        Ok(())
    }
}

/// Forwards events to an observer the caller keeps a handle to, so its
/// state can be read once the pipeline is done with it.
pub struct SharedObserver<O> {
    inner: Arc<Mutex<O>>,
}

impl<O: Observer> SharedObserver<O> {
    /// Wrap `observer`, returning the forwarding observer and the handle.
    pub fn new(observer: O) -> (Self, Arc<Mutex<O>>) {
        let inner = Arc::new(Mutex::new(observer));
        (
            Self {
                inner: Arc::clone(&inner),
            },
            inner,
        )
    }

    fn lock(&self) -> MutexGuard<'_, O> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<O: Observer> Observer for SharedObserver<O> {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        self.lock().on_training_start(total_episodes)
    }

    fn on_episode_end(&mut self, episode: usize, reward: f64) -> Result<()> {
        self.lock().on_episode_end(episode, reward)
    }

    fn on_convergence_check(&mut self, episode: usize, converged: bool) -> Result<()> {
        self.lock().on_convergence_check(episode, converged)
    }

    fn on_training_end(&mut self, episodes_run: usize) -> Result<()> {
        self.lock().on_training_end(episodes_run)
    }
}

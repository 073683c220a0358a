//! Observer port - abstraction for training observation
//!
//! Observers receive training events without coupling the training loop to
//! any particular output (progress bars, metrics, logs).

use crate::Result;

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. For each episode:
///    - `on_convergence_check(...)` - When a convergence check is due
///    - `on_episode_end(episode, reward)`
/// 3. `on_training_end(episodes_run)` - Once at the end, also after an early stop
///
/// # Examples
///
/// ```no_run
/// use blackjack_rl::ports::Observer;
///
/// struct WinCounter {
///     wins: usize,
/// }
///
/// impl Observer for WinCounter {
///     fn on_episode_end(&mut self, _episode: usize, reward: f64) -> blackjack_rl::Result<()> {
///         if reward > 0.0 {
///             self.wins += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts with the configured episode budget.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each episode with its final reward.
    fn on_episode_end(&mut self, _episode: usize, _reward: f64) -> Result<()> {
        Ok(())
    }

    /// Called after each convergence check.
    fn on_convergence_check(&mut self, _episode: usize, _converged: bool) -> Result<()> {
        Ok(())
    }

    /// Called when training completes or stops early.
    fn on_training_end(&mut self, _episodes_run: usize) -> Result<()> {
        Ok(())
    }
}

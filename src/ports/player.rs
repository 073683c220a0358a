//! Player port - anything that decides hit, stand or double-down
//!
//! Drivers such as batch evaluation and interactive play only need an action
//! for a state; trained policies and baselines implement this port.

use crate::blackjack::{Action, StateIndex};

/// Decision maker for the player's side of a hand.
pub trait Player {
    /// Pick the action to play in `state`.
    fn choose_action(&mut self, state: StateIndex) -> Action;

    /// Name used in reports.
    fn name(&self) -> &str;
}

//! Actions and the discretised state key

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of player buckets: hard totals index directly, soft totals are
/// offset by [`SOFT_OFFSET`].
pub const PLAYER_BUCKETS: usize = 130;
/// Number of dealer buckets (upcard values 2..=11).
pub const DEALER_BUCKETS: usize = 12;
/// Number of player actions.
pub const ACTION_COUNT: usize = 3;
/// Offset added to the player total when the hand holds a usable ace.
pub const SOFT_OFFSET: usize = 100;

/// Player decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    Hit,
    Stand,
    DoubleDown,
}

impl Action {
    pub const ALL: [Action; ACTION_COUNT] = [Action::Hit, Action::Stand, Action::DoubleDown];

    pub fn index(self) -> usize {
        match self {
            Action::Hit => 0,
            Action::Stand => 1,
            Action::DoubleDown => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Action> {
        Self::ALL.get(index).copied()
    }

    /// Single-letter code used in policy tables.
    pub fn letter(self) -> char {
        match self {
            Action::Hit => 'H',
            Action::Stand => 'S',
            Action::DoubleDown => 'D',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::Hit => "hit",
            Action::Stand => "stand",
            Action::DoubleDown => "double-down",
        };
        f.write_str(label)
    }
}

/// `(player_index, dealer_index)` key into the value grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateIndex {
    pub player: usize,
    pub dealer: usize,
}

impl StateIndex {
    pub fn new(player: usize, dealer: usize) -> Self {
        Self { player, dealer }
    }

    /// Build the key from a player total, soft flag and dealer upcard value.
    pub fn from_totals(player_total: u8, soft: bool, dealer_upcard: u8) -> Self {
        let player = usize::from(player_total) + if soft { SOFT_OFFSET } else { 0 };
        Self {
            player,
            dealer: usize::from(dealer_upcard),
        }
    }

    pub fn is_soft(&self) -> bool {
        self.player >= SOFT_OFFSET
    }

    /// Player total with the soft offset removed.
    pub fn player_total(&self) -> usize {
        if self.is_soft() {
            self.player - SOFT_OFFSET
        } else {
            self.player
        }
    }

    pub fn in_bounds(&self) -> bool {
        self.player < PLAYER_BUCKETS && self.dealer < DEALER_BUCKETS
    }
}

impl fmt::Display for StateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_soft() { "soft" } else { "hard" };
        write!(f, "{kind} {} vs {}", self.player_total(), self.dealer)
    }
}

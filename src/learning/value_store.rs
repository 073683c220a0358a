//! Dense action-value, visit-count and policy grids
//!
//! All three grids share the fixed `130 × 12 × 3` shape and are stored
//! row-major at offset `((player * 12) + dealer) * 3 + action`.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    blackjack::{ACTION_COUNT, Action, DEALER_BUCKETS, PLAYER_BUCKETS, StateIndex},
};

/// Two values closer than this count as tied.
pub const TIE_TOLERANCE: f64 = 1e-4;

/// Cells per grid.
pub const GRID_LEN: usize = PLAYER_BUCKETS * DEALER_BUCKETS * ACTION_COUNT;

/// Grid shape as persisted: `[player, dealer, action]`.
pub const GRID_SHAPE: [usize; 3] = [PLAYER_BUCKETS, DEALER_BUCKETS, ACTION_COUNT];

/// Action values `Q`, visit counts `N` and greedy policy `P`.
///
/// `N` starts at 1 and never reaches 0; every `P` row is a probability
/// simplex, uniform over the actions tied for the best `Q` once the state
/// has been improved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueStore {
    q: Vec<f64>,
    n: Vec<u64>,
    p: Vec<f64>,
}

impl ValueStore {
    pub fn new() -> Self {
        Self {
            q: vec![0.0; GRID_LEN],
            n: vec![1; GRID_LEN],
            p: vec![1.0 / ACTION_COUNT as f64; GRID_LEN],
        }
    }

    /// Rebuild a store from dense grids, e.g. after loading from disk.
    pub fn from_grids(q: Vec<f64>, n: Vec<u64>, p: Vec<f64>) -> Result<Self> {
        for (name, len) in [("Q", q.len()), ("N", n.len()), ("P", p.len())] {
            if len != GRID_LEN {
                return Err(Error::InvalidGrid {
                    message: format!("{name} has {len} cells, expected {GRID_LEN}"),
                });
            }
        }
        if let Some(offset) = q.iter().position(|value| !value.is_finite()) {
            return Err(Error::InvalidGrid {
                message: format!("action value at offset {offset} is not finite"),
            });
        }
        if let Some(offset) = n.iter().position(|&count| count == 0) {
            return Err(Error::InvalidGrid {
                message: format!("visit count at offset {offset} is zero"),
            });
        }
        if let Some(row) = p.chunks_exact(ACTION_COUNT).position(|row| {
            let total: f64 = row.iter().sum();
            row.iter().any(|&prob| !prob.is_finite() || prob < 0.0) || (total - 1.0).abs() > 1e-6
        }) {
            return Err(Error::InvalidGrid {
                message: format!("policy row {row} is not a probability distribution"),
            });
        }
        Ok(Self { q, n, p })
    }

    fn row(state: StateIndex) -> usize {
        assert!(
            state.in_bounds(),
            "state {state:?} lies outside the {PLAYER_BUCKETS}x{DEALER_BUCKETS} grid"
        );
        (state.player * DEALER_BUCKETS + state.dealer) * ACTION_COUNT
    }

    fn offset(state: StateIndex, action: Action) -> usize {
        Self::row(state) + action.index()
    }

    pub fn value(&self, state: StateIndex, action: Action) -> f64 {
        self.q[Self::offset(state, action)]
    }

    pub fn set_value(&mut self, state: StateIndex, action: Action, value: f64) {
        self.q[Self::offset(state, action)] = value;
    }

    /// Move `Q(s,a)` a fraction `alpha` of the way toward `target`.
    pub fn update_toward(&mut self, state: StateIndex, action: Action, target: f64, alpha: f64) {
        let cell = &mut self.q[Self::offset(state, action)];
        *cell += alpha * (target - *cell);
    }

    pub fn action_values(&self, state: StateIndex) -> [f64; ACTION_COUNT] {
        let row = Self::row(state);
        let mut values = [0.0; ACTION_COUNT];
        values.copy_from_slice(&self.q[row..row + ACTION_COUNT]);
        values
    }

    pub fn visits(&self, state: StateIndex, action: Action) -> u64 {
        self.n[Self::offset(state, action)]
    }

    pub fn record_visit(&mut self, state: StateIndex, action: Action) {
        self.n[Self::offset(state, action)] += 1;
    }

    /// # Panics
    ///
    /// Panics on a count of zero.
    pub fn set_visits(&mut self, state: StateIndex, action: Action, count: u64) {
        assert!(count >= 1, "visit counts never drop below 1");
        self.n[Self::offset(state, action)] = count;
    }

    pub fn policy(&self, state: StateIndex) -> [f64; ACTION_COUNT] {
        let row = Self::row(state);
        let mut probs = [0.0; ACTION_COUNT];
        probs.copy_from_slice(&self.p[row..row + ACTION_COUNT]);
        probs
    }

    pub fn probability(&self, state: StateIndex, action: Action) -> f64 {
        self.p[Self::offset(state, action)]
    }

    /// Actions holding the largest policy probability.
    pub fn policy_maximizers(&self, state: StateIndex) -> Vec<Action> {
        maximizers(&self.policy(state))
    }

    /// Actions holding the largest action value.
    pub fn value_maximizers(&self, state: StateIndex) -> Vec<Action> {
        maximizers(&self.action_values(state))
    }

    /// Recompute `P(s)` greedily from the current `Q(s)`.
    pub fn improve_policy(&mut self, state: StateIndex) {
        let best = self.value_maximizers(state);
        let share = 1.0 / best.len() as f64;
        let row = Self::row(state);
        for action in Action::ALL {
            self.p[row + action.index()] = if best.contains(&action) { share } else { 0.0 };
        }
    }

    /// First action with the largest policy probability.
    pub fn best_action(&self, state: StateIndex) -> Action {
        let probs = self.policy(state);
        let mut best = Action::Hit;
        for action in Action::ALL {
            if probs[action.index()] > probs[best.index()] {
                best = action;
            }
        }
        best
    }

    pub fn q_grid(&self) -> &[f64] {
        &self.q
    }

    pub fn visit_grid(&self) -> &[u64] {
        &self.n
    }

    pub fn policy_grid(&self) -> &[f64] {
        &self.p
    }

    /// Every state key of the grid, reachable or not.
    pub fn states() -> impl Iterator<Item = StateIndex> {
        (0..PLAYER_BUCKETS)
            .flat_map(|player| (0..DEALER_BUCKETS).map(move |dealer| StateIndex::new(player, dealer)))
    }
}

impl Default for ValueStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Actions whose value lies within [`TIE_TOLERANCE`] of the row maximum.
pub fn maximizers(values: &[f64; ACTION_COUNT]) -> Vec<Action> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Action::ALL
        .into_iter()
        .filter(|action| (max - values[action.index()]).abs() < TIE_TOLERANCE)
        .collect()
}

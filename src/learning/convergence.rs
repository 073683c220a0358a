//! Heuristic early-stopping test over value snapshots

use super::{config::DEFAULT_CONVERGENCE_INTERVAL, value_store::ValueStore};

/// Largest change of a single `Q` cell between two checks.
pub const VALUE_TOLERANCE: f64 = 0.15;

/// Visit counts strictly inside this range are too noisy to trust.
pub const NOISY_VISITS: (u64, u64) = (2, 30);

/// Compares `Q` against the snapshot taken at the previous check.
///
/// A check passes only if every cell moved by at most [`VALUE_TOLERANCE`]
/// and no cell has a visit count strictly between 2 and 30. A failing check
/// refreshes the snapshot.
#[derive(Debug, Clone)]
pub struct ConvergenceMonitor {
    interval: usize,
    reference: Option<Vec<f64>>,
}

impl ConvergenceMonitor {
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
            reference: None,
        }
    }

    pub fn interval(&self) -> usize {
        self.interval
    }

    /// Checks run before episodes `0, interval, 2·interval, …`.
    pub fn is_due(&self, episode: usize) -> bool {
        episode.is_multiple_of(self.interval)
    }

    /// Take a snapshot of the current values.
    pub fn record(&mut self, store: &ValueStore) {
        self.reference = Some(store.q_grid().to_vec());
    }

    /// The snapshot, if one has been taken.
    pub fn reference(&self) -> Option<&[f64]> {
        self.reference.as_deref()
    }

    /// Evaluate the heuristic. The first check never passes.
    pub fn check(&mut self, store: &ValueStore) -> bool {
        let stable = match &self.reference {
            Some(reference) => Self::is_stable(store, reference),
            None => false,
        };
        if !stable {
            self.record(store);
        }
        stable
    }

    fn is_stable(store: &ValueStore, reference: &[f64]) -> bool {
        let (low, high) = NOISY_VISITS;
        store
            .q_grid()
            .iter()
            .zip(reference)
            .zip(store.visit_grid())
            .all(|((&q, &q_ref), &visits)| {
                (q - q_ref).abs() <= VALUE_TOLERANCE && !(visits > low && visits < high)
            })
    }
}

impl Default for ConvergenceMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERGENCE_INTERVAL)
    }
}

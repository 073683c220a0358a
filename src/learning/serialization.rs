//! Persisted form of the trained tables

use serde::{Deserialize, Serialize};

use super::{
    config::LearnerConfig,
    value_store::{GRID_SHAPE, ValueStore},
};
use crate::{Error, Result};

/// Summary of the run that produced a set of tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    pub episodes: usize,
    pub converged_at: Option<usize>,
    pub mean_reward: f64,
}

/// Dense `Q`, `N` and `P` grids with the configuration that trained them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTables {
    pub version: u32,
    pub shape: [usize; 3],
    pub config: LearnerConfig,
    pub metadata: TrainingMetadata,
    q: Vec<f64>,
    n: Vec<u64>,
    p: Vec<f64>,
}

impl SavedTables {
    pub const VERSION: u32 = 1;

    pub fn new(store: &ValueStore, config: LearnerConfig, metadata: TrainingMetadata) -> Self {
        Self {
            version: Self::VERSION,
            shape: GRID_SHAPE,
            config,
            metadata,
            q: store.q_grid().to_vec(),
            n: store.visit_grid().to_vec(),
            p: store.policy_grid().to_vec(),
        }
    }

    /// Rebuild the value store, checking version and shape.
    pub fn to_store(&self) -> Result<ValueStore> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        if self.shape != GRID_SHAPE {
            return Err(Error::InvalidGrid {
                message: format!("shape {:?} does not match {:?}", self.shape, GRID_SHAPE),
            });
        }
        ValueStore::from_grids(self.q.clone(), self.n.clone(), self.p.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blackjack::{Action, StateIndex};

    #[test]
    fn test_msgpack_roundtrip() -> Result<()> {
        let mut store = ValueStore::new();
        let state = StateIndex::new(118, 9);
        store.set_value(state, Action::Stand, 0.31);
        store.set_visits(state, Action::Stand, 44);
        store.improve_policy(state);

        let saved = SavedTables::new(&store, LearnerConfig::default(), TrainingMetadata::default());
        let bytes = rmp_serde::to_vec(&saved).map_err(|e| Error::SerializationContext {
            operation: "encode".to_string(),
            message: e.to_string(),
        })?;
        let loaded: SavedTables =
            rmp_serde::from_slice(&bytes).map_err(|e| Error::SerializationContext {
                operation: "decode".to_string(),
                message: e.to_string(),
            })?;

        assert_eq!(loaded.to_store()?, store);
        Ok(())
    }

    #[test]
    fn test_wrong_version_is_rejected() {
        let mut saved = SavedTables::new(
            &ValueStore::new(),
            LearnerConfig::default(),
            TrainingMetadata::default(),
        );
        saved.version = 7;
        assert!(matches!(
            saved.to_store(),
            Err(Error::UnsupportedVersion { found: 7, .. })
        ));
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        let mut saved = SavedTables::new(
            &ValueStore::new(),
            LearnerConfig::default(),
            TrainingMetadata::default(),
        );
        saved.shape = [10, 12, 3];
        assert!(matches!(saved.to_store(), Err(Error::InvalidGrid { .. })));
    }
}

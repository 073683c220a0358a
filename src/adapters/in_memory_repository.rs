//! In-memory table repository for testing.
//!
//! Stores encoded tables in a shared map keyed by path, avoiding any file
//! system I/O.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex},
};

use crate::{Result, error::Error, learning::SavedTables, ports::TableRepository};

/// In-memory repository for testing.
///
/// All clones share the same underlying storage.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored table sets.
    pub fn count(&self) -> usize {
        self.storage.lock().unwrap().len()
    }

    pub fn contains(&self, path: &Path) -> bool {
        let key = path.to_string_lossy().to_string();
        self.storage.lock().unwrap().contains_key(&key)
    }
}

impl TableRepository for InMemoryRepository {
    fn save(&self, tables: &SavedTables, path: &Path) -> Result<()> {
        let key = path.to_string_lossy().to_string();

        let bytes = rmp_serde::to_vec(tables).map_err(|e| Error::SerializationContext {
            operation: "serialize tables for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage.lock().unwrap().insert(key, bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedTables> {
        let key = path.to_string_lossy().to_string();
        let storage = self.storage.lock().unwrap();

        let bytes = storage.get(&key).ok_or_else(|| Error::Io {
            operation: format!("load tables from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize tables from in-memory storage".to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::{LearnerConfig, TrainingMetadata, ValueStore};

    fn tables() -> SavedTables {
        SavedTables::new(
            &ValueStore::new(),
            LearnerConfig::default(),
            TrainingMetadata::default(),
        )
    }

    #[test]
    fn test_in_memory_save_and_load() {
        let repo = InMemoryRepository::new();
        let path = Path::new("tables");
        assert!(!repo.contains(path));

        repo.save(&tables(), path).unwrap();
        assert!(repo.contains(path));
        assert_eq!(repo.load(path).unwrap(), tables());
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        assert!(InMemoryRepository::new().load(Path::new("missing")).is_err());
    }

    #[test]
    fn test_clone_shares_storage() {
        let repo1 = InMemoryRepository::new();
        let repo2 = repo1.clone();

        repo1.save(&tables(), Path::new("shared")).unwrap();
        assert_eq!(repo2.count(), 1);
        assert!(repo2.load(Path::new("shared")).is_ok());
    }
}

//! MessagePack implementation of the table repository.
//!
//! This adapter implements the TableRepository port using rmp_serde for
//! compact binary serialization.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use crate::{Result, error::Error, learning::SavedTables, ports::TableRepository};

/// MessagePack-based table repository.
///
/// # Examples
///
/// ```no_run
/// use blackjack_rl::adapters::MsgPackRepository;
/// use blackjack_rl::learning::{LearnerConfig, SavedTables, TrainingMetadata, ValueStore};
/// use blackjack_rl::ports::TableRepository;
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// let tables = SavedTables::new(
///     &ValueStore::new(),
///     LearnerConfig::default(),
///     TrainingMetadata::default(),
/// );
///
/// repo.save(&tables, Path::new("tables.msgpack"))?;
/// let loaded = repo.load(Path::new("tables.msgpack"))?;
/// # Ok::<(), blackjack_rl::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    pub fn new() -> Self {
        Self
    }
}

impl TableRepository for MsgPackRepository {
    fn save(&self, tables: &SavedTables, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, tables).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize tables to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedTables> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        rmp_serde::decode::from_read(BufReader::new(file)).map_err(|e| {
            Error::SerializationContext {
                operation: "deserialize tables from MessagePack".to_string(),
                message: e.to_string(),
            }
        })
    }
}

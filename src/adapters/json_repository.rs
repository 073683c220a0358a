//! JSON implementation of the table repository.
//!
//! Larger than MessagePack but readable by any tool that wants to plot the
//! grids.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use crate::{Result, error::Error, learning::SavedTables, ports::TableRepository};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRepository {
    pretty: bool,
}

impl JsonRepository {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl TableRepository for JsonRepository {
    fn save(&self, tables: &SavedTables, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let writer = BufWriter::new(file);
        if self.pretty {
            serde_json::to_writer_pretty(writer, tables)?;
        } else {
            serde_json::to_writer(writer, tables)?;
        }
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedTables> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

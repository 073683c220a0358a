//! Adapters implementing domain ports.
//!
//! Infrastructure implementations of the traits defined in the ports module.

pub mod in_memory_repository;
pub mod json_repository;
pub mod msgpack_repository;

use std::{fmt, path::Path, str::FromStr};

pub use in_memory_repository::InMemoryRepository;
pub use json_repository::JsonRepository;
pub use msgpack_repository::MsgPackRepository;

use crate::{Error, Result};

/// On-disk encoding of saved tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepositoryFormat {
    #[default]
    MsgPack,
    Json,
}

impl RepositoryFormat {
    /// Guess the format from a file extension; anything but `.json` is
    /// MessagePack.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => RepositoryFormat::Json,
            _ => RepositoryFormat::MsgPack,
        }
    }
}

impl fmt::Display for RepositoryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryFormat::MsgPack => f.write_str("msgpack"),
            RepositoryFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for RepositoryFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "msgpack" | "mp" => Ok(RepositoryFormat::MsgPack),
            "json" => Ok(RepositoryFormat::Json),
            _ => Err(Error::ParseFormat {
                input: s.to_string(),
                expected: "msgpack, json".to_string(),
            }),
        }
    }
}

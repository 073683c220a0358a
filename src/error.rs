//! Error types for the blackjack-rl crate

use thiserror::Error;

/// Main error type for the blackjack-rl crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("parameter '{name}' = {value} is out of range (expected {expected})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("invalid algorithm '{input}'. Expected one of: {expected}")]
    ParseAlgorithm { input: String, expected: String },

    #[error("invalid action selector '{input}'. Expected one of: {expected}")]
    ParseSelector { input: String, expected: String },

    #[error("invalid UCB ranking '{input}'. Expected one of: {expected}")]
    ParseUcbRanking { input: String, expected: String },

    #[error("invalid sweep step operator '{input}'. Expected one of: {expected}")]
    ParseStepOperator { input: String, expected: String },

    #[error("invalid repository format '{input}'. Expected one of: {expected}")]
    ParseFormat { input: String, expected: String },

    #[error("cannot force player total {total} (soft: {soft}): {reason}")]
    InvalidForcedState {
        total: u8,
        soft: bool,
        reason: &'static str,
    },

    #[error("invalid value grid: {message}")]
    InvalidGrid { message: String },

    #[error("unsupported table format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

//! Errors raised while building or reading split matrices
//!
//! Missing cells are not errors; they travel through the transforms as `None`.
//! Everything here is an input-shape problem the caller has to fix.

use thiserror::Error;

/// Errors that can occur while constructing or loading a [`crate::matrix::SplitMatrix`]
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("at least two checkpoints are required, found {found}")]
    TooFewCheckpoints { found: usize },

    #[error("checkpoint distances must be strictly increasing: {previous} km is followed by {next} km")]
    NonIncreasingCheckpoints { previous: f64, next: f64 },

    #[error("checkpoint distance must be a finite, non-negative number of km, got {0}")]
    InvalidCheckpointDistance(f64),

    #[error("invalid checkpoint header '{0}': expected a distance in km")]
    InvalidCheckpointHeader(String),

    #[error("missing competitor column '{0}' in split sheet header")]
    MissingCompetitorColumn(String),

    #[error("invalid time '{value}' for {competitor} at {km} km: expected HH:MM:SS")]
    InvalidTime {
        competitor: String,
        km: f64,
        value: String,
    },

    #[error("{competitor} passes {km} km before the previous checkpoint")]
    NonMonotonicRow { competitor: String, km: f64 },

    #[error("{competitor} has {found} split times but the race has {expected} checkpoints")]
    RaggedRow {
        competitor: String,
        expected: usize,
        found: usize,
    },

    #[error("competitor name must not be empty")]
    EmptyCompetitorName,

    #[error("duplicate competitor: {0}")]
    DuplicateCompetitor(String),

    #[error("unknown competitor: {0}")]
    UnknownCompetitor(String),

    #[error("failed to read split sheet: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for split matrix operations
pub type Result<T> = std::result::Result<T, SplitError>;

//! Structured error types for pprofutil
//!
//! Using thiserror for automatic Display implementation and error chaining.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Failed to read profile {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Location {location} refers to unknown function {function}")]
    UnknownFunction { location: u64, function: u64 },

    #[error("Sample {sample} refers to unknown location {location}")]
    UnknownLocation { sample: usize, location: u64 },

    #[error("Duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u64 },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write folded stacks: {0}")]
    WriteFailed(#[from] std::io::Error),
}

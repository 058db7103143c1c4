// src/errors.rs - Error kinds surfaced by the dedupe core and the name source
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DedupeError {
    /// A similarity threshold outside its valid range. Raised before any scanning.
    #[error("{name} must be between {min} and {max} (got {value})")]
    InvalidThreshold {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("The file '{}' does not exist", .path.display())]
    NameSourceNotFound { path: PathBuf },

    #[error("The file '{}' is not a valid JSON list of names: {source}", .path.display())]
    NameSourceInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("An error occurred while loading '{}': {source}", .path.display())]
    NameSourceIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type DedupeResult<T> = std::result::Result<T, DedupeError>;

//! Error types for fixture loading and validation runs.

use cxkeys_suite::{FormatError, ValidationError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or validating fixture sets.
#[derive(Debug, Error)]
pub enum Error {
    /// A fixture file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A fixture could not be decoded.
    #[error("invalid fixture {name}: {source}")]
    Format {
        name: String,
        #[source]
        source: FormatError,
    },

    /// A fixture failed validation.
    #[error("fixture {fixture}: {source}")]
    Validation {
        fixture: String,
        #[source]
        source: ValidationError,
    },

    /// The source produced no seed fixtures.
    #[error("no seed fixtures found")]
    NoFixtures,

    /// A blocking validation task panicked or was cancelled.
    #[error("validation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, Error>;

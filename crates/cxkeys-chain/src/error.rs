//! Error types for the chain side.

use cxkeys_core::{Address, CoreError};
use thiserror::Error;

use crate::keyspec::KeyField;

/// The genesis binding check refused a secret key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// The key's address is not the spec's genesis address. Fatal to the
    /// privileged operation; never retried.
    #[error("secret key derives {derived}, chain spec genesis address is {expected}")]
    GenesisMismatch { expected: Address, derived: Address },

    #[error("secret key cannot derive an address: {0}")]
    InvalidSecretKey(#[source] CoreError),
}

/// Errors reading chain specs, environment secrets, or signing as genesis.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("malformed chain spec: {0}")]
    Json(#[from] serde_json::Error),

    #[error("chain spec is missing field {0}")]
    MissingField(&'static str),

    #[error("chain spec genesis address is invalid: {0}")]
    InvalidGenesisAddress(#[source] CoreError),

    #[error("environment variable {name} is not set")]
    MissingEnv { name: &'static str },

    #[error("environment variable {name} does not hold a valid secret key: {source}")]
    InvalidEnvKey {
        name: &'static str,
        #[source]
        source: CoreError,
    },

    #[error("genesis binding failed: {0}")]
    Binding(#[from] BindingError),

    #[error("signing failed: {0}")]
    Signing(#[source] CoreError),
}

/// Errors reading or querying a key spec file.
#[derive(Debug, Error)]
pub enum KeySpecError {
    #[error("invalid field: {0}")]
    InvalidField(String),

    #[error("failed to read key spec: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed key spec: {0}")]
    Json(#[from] serde_json::Error),

    #[error("key spec seckey is invalid: {0}")]
    InvalidSecretKey(#[source] CoreError),

    #[error("key spec {0} does not match its seckey")]
    Inconsistent(KeyField),
}

/// Result type for chain operations.
pub type Result<T> = std::result::Result<T, ChainError>;

//! Error types for cxkeys core.

use thiserror::Error;

/// Core errors that can occur while deriving identities or handling signatures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid secret key")]
    InvalidSecretKey,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid address: {0}")]
    InvalidAddress(AddressError),

    #[error("invalid signature: {0}")]
    InvalidSignature(&'static str),

    #[error("public key could not be recovered from signature")]
    RecoveryFailure,

    #[error("recovered public key does not match the expected public key")]
    PublicKeyMismatch,

    #[error("address does not match the public key recovered from the signature")]
    AddressMismatch,

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("generation fault: {0}")]
    Generation(#[from] GenerationFault),

    #[error("decoding error: {0}")]
    DecodingError(String),
}

/// Reasons an address string or byte sequence is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("invalid base58 string")]
    InvalidBase58,

    #[error("invalid length {0}, expected 25")]
    InvalidLength(usize),

    #[error("unsupported version {0}")]
    InvalidVersion(u8),

    #[error("checksum mismatch")]
    InvalidChecksum,
}

impl From<AddressError> for CoreError {
    fn from(e: AddressError) -> Self {
        CoreError::InvalidAddress(e)
    }
}

/// The deterministic generator could not produce a usable keypair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationFault {
    #[error("seed is empty")]
    EmptySeed,

    #[error("no valid scalar after {attempts} hash rounds at key index {index}")]
    ScalarExhausted { index: usize, attempts: usize },

    #[error("derived key at index {index} is not a valid curve element")]
    InvalidKey { index: usize },
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

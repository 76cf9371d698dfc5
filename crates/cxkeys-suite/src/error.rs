//! Error types for the exchange format and the validation engine.

use cxkeys_core::{AddressFormat, CoreError, GenerationFault};
use std::fmt;
use thiserror::Error;

/// Errors decoding or encoding test vectors.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("seed is not valid base64: {0}")]
    Seed(#[from] base64::DecodeError),

    #[error("key {key_index}: invalid {field}: {source}")]
    KeyField {
        key_index: usize,
        field: &'static str,
        #[source]
        source: CoreError,
    },

    #[error("key {key_index}: invalid signature {signature_index}: {source}")]
    Signature {
        key_index: usize,
        signature_index: usize,
        #[source]
        source: CoreError,
    },

    #[error("invalid hash {hash_index}: {source}")]
    Hash {
        hash_index: usize,
        #[source]
        source: hex::FromHexError,
    },
}

/// The verification entry point a stored signature failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationEntryPoint {
    /// Verification against the derived public key.
    PublicKey,
    /// Verification against the derived primary address.
    Address,
    /// Self-contained validity check.
    SelfCheck,
    /// Public-key recovery.
    Recovery,
}

impl fmt::Display for VerificationEntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationEntryPoint::PublicKey => write!(f, "verify_by_pubkey"),
            VerificationEntryPoint::Address => write!(f, "verify_by_address"),
            VerificationEntryPoint::SelfCheck => write!(f, "verify_self"),
            VerificationEntryPoint::Recovery => write!(f, "recover_pubkey"),
        }
    }
}

/// The first invariant a seed vector violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("generation fault: {0}")]
    Generation(#[from] GenerationFault),

    #[error("key {key_index}: generated secret key does not match provided secret key")]
    SecretMismatch { key_index: usize },

    #[error("key {key_index}: secret key is not a valid scalar")]
    InvalidSecretKey { key_index: usize },

    #[error("key {key_index}: public key is not a valid curve point")]
    InvalidPublicKey { key_index: usize },

    #[error("key {key_index}: public key is null")]
    NullPublicKey { key_index: usize },

    #[error("key {key_index}: derived public key does not match provided public key")]
    PublicMismatch { key_index: usize },

    #[error("key {key_index}: {format} is null")]
    NullAddress { key_index: usize, format: AddressFormat },

    #[error("key {key_index}: derived {format} does not match provided {format}")]
    AddressMismatch { key_index: usize, format: AddressFormat },

    #[error("key {key_index}: {format} derived from public key and from secret key differ")]
    DerivationPathDivergence { key_index: usize, format: AddressFormat },

    #[error("key {key_index}: {count} signatures present but no input hashes were provided")]
    UnexpectedSignatures { key_index: usize, count: usize },

    #[error("key {key_index}: expected {expected} signatures, found {actual}")]
    SignatureCountMismatch {
        key_index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("key {key_index}: signature {signature_index} is null")]
    NullSignature { key_index: usize, signature_index: usize },

    #[error("key {key_index}: signature {signature_index} failed {entry_point}: {source}")]
    SignatureVerificationFailed {
        key_index: usize,
        signature_index: usize,
        entry_point: VerificationEntryPoint,
        #[source]
        source: CoreError,
    },

    #[error("key {key_index}: public key recovered from signature {signature_index} does not match derived public key")]
    RecoveredKeyMismatch { key_index: usize, signature_index: usize },

    #[error("key {key_index}: signing hash {signature_index} failed")]
    SigningFailed { key_index: usize, signature_index: usize },
}

impl ValidationError {
    /// The key index the failure was detected at, if it is tied to one.
    pub fn key_index(&self) -> Option<usize> {
        match self {
            ValidationError::Generation(_) => None,
            ValidationError::SecretMismatch { key_index }
            | ValidationError::InvalidSecretKey { key_index }
            | ValidationError::InvalidPublicKey { key_index }
            | ValidationError::NullPublicKey { key_index }
            | ValidationError::PublicMismatch { key_index }
            | ValidationError::NullAddress { key_index, .. }
            | ValidationError::AddressMismatch { key_index, .. }
            | ValidationError::DerivationPathDivergence { key_index, .. }
            | ValidationError::UnexpectedSignatures { key_index, .. }
            | ValidationError::SignatureCountMismatch { key_index, .. }
            | ValidationError::NullSignature { key_index, .. }
            | ValidationError::SignatureVerificationFailed { key_index, .. }
            | ValidationError::RecoveredKeyMismatch { key_index, .. }
            | ValidationError::SigningFailed { key_index, .. } => Some(*key_index),
        }
    }

    /// The signature index the failure was detected at, if any.
    pub fn signature_index(&self) -> Option<usize> {
        match self {
            ValidationError::NullSignature { signature_index, .. }
            | ValidationError::SignatureVerificationFailed { signature_index, .. }
            | ValidationError::RecoveredKeyMismatch { signature_index, .. }
            | ValidationError::SigningFailed { signature_index, .. } => Some(*signature_index),
            _ => None,
        }
    }
}

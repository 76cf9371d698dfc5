//! The genesis binding gate.
//!
//! Any operation that signs on behalf of the genesis identity must first
//! prove that the supplied secret reproduces the genesis address recorded in
//! the chain spec. [`GenesisSigner`] is the only way to sign as genesis, and
//! the only way to obtain one is [`GenesisSigner::authorize`], which runs
//! [`bind`].

use cxkeys_core::{address_from_secret, sign, sign_with_rng, Address, NonceSource, SecretKey, Sha256Hash, Signature};
use std::fmt;
use tracing::{info, warn};

use crate::binding::ChainSpec;
use crate::env::{secret_from_env, GENESIS_SK_ENV};
use crate::error::{BindingError, ChainError, Result};

/// Check that `candidate` derives the spec's genesis address.
///
/// A [`BindingError::GenesisMismatch`] is fatal: callers must abort the
/// privileged operation and must not sign or broadcast with that secret.
pub fn bind<S: ChainSpec + ?Sized>(candidate: &SecretKey, spec: &S) -> std::result::Result<(), BindingError> {
    let derived = address_from_secret(candidate).map_err(BindingError::InvalidSecretKey)?;
    let expected = spec.genesis_address();

    if derived != expected {
        warn!(expected = %expected, "genesis secret key does not match chain spec");
        return Err(BindingError::GenesisMismatch { expected, derived });
    }

    info!(genesis = %expected, spec_hash = %spec.spec_hash(), "genesis binding verified");
    Ok(())
}

/// A secret proven to be the genesis identity of one chain spec.
pub struct GenesisSigner {
    secret: SecretKey,
    address: Address,
    spec_hash: Sha256Hash,
}

impl GenesisSigner {
    /// Bind `secret` to `spec`, returning a signer only on success.
    pub fn authorize<S: ChainSpec + ?Sized>(secret: SecretKey, spec: &S) -> std::result::Result<Self, BindingError> {
        bind(&secret, spec)?;
        Ok(Self {
            secret,
            address: spec.genesis_address(),
            spec_hash: spec.spec_hash(),
        })
    }

    /// Read the genesis secret from `GENESIS_SK` and bind it to `spec`.
    pub fn from_env<S: ChainSpec + ?Sized>(spec: &S) -> Result<Self> {
        let secret = secret_from_env(GENESIS_SK_ENV)?;
        Ok(Self::authorize(secret, spec)?)
    }

    /// The genesis address this signer is bound to.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Hash of the spec the binding was checked against.
    pub fn spec_hash(&self) -> &Sha256Hash {
        &self.spec_hash
    }

    /// Sign a digest as the genesis identity.
    pub fn sign(&self, digest: &Sha256Hash) -> Result<Signature> {
        sign(digest, &self.secret).map_err(ChainError::Signing)
    }

    /// Sign a digest, drawing nonce entropy from `rng`.
    pub fn sign_with_rng<R: NonceSource>(&self, digest: &Sha256Hash, rng: &mut R) -> Result<Signature> {
        sign_with_rng(digest, &self.secret, rng).map_err(ChainError::Signing)
    }
}

impl fmt::Debug for GenesisSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenesisSigner")
            .field("address", &self.address)
            .field("spec_hash", &self.spec_hash)
            .finish_non_exhaustive()
    }
}

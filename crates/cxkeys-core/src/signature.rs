//! Recoverable secp256k1 signatures over 32-byte digests.
//!
//! Wire layout is 65 bytes: `r (32) || s (32) || recovery_id (1)`. Produced
//! signatures always carry a low `s`.
//!
//! Nonces follow RFC 6979 with additional entropy drawn from an injected
//! [`NonceSource`]: two signatures over the same digest differ, and a broken
//! entropy source still cannot make two distinct digests share a nonce.
//! Signature bytes are therefore never a correctness property; only
//! verification is.

use k256::ecdsa::signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey};
use rand::{CryptoRng, RngCore};
use std::fmt;

use crate::address::{Address, AddressCodec};
use crate::error::{CoreError, Result};
use crate::hash::Sha256Hash;
use crate::keys::{KeyPair, PublicKey, SecretKey};

/// Length of a recoverable signature in bytes.
pub const SIGNATURE_LEN: usize = 65;

/// A cryptographically secure source of nonce entropy.
pub trait NonceSource: RngCore + CryptoRng {}

impl<T: RngCore + CryptoRng> NonceSource for T {}

/// A 65-byte recoverable signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; SIGNATURE_LEN]);

impl Signature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a byte slice of exactly 65 bytes.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let arr: [u8; SIGNATURE_LEN] = slice
            .try_into()
            .map_err(|_| CoreError::DecodingError(format!("signature must be 65 bytes, got {}", slice.len())))?;
        Ok(Self(arr))
    }

    /// Parse from a hex string (structural check only).
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut arr = [0u8; SIGNATURE_LEN];
        hex::decode_to_slice(s, &mut arr).map_err(|e| CoreError::DecodingError(e.to_string()))?;
        Ok(Self(arr))
    }

    /// Get raw bytes.
    pub const fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The recovery id byte.
    pub fn recovery_byte(&self) -> u8 {
        self.0[64]
    }

    /// Whether every byte is zero.
    pub fn is_null(&self) -> bool {
        self.0 == [0u8; SIGNATURE_LEN]
    }

    /// The zero signature (invalid, used as placeholder).
    pub const ZERO: Self = Self([0u8; SIGNATURE_LEN]);

    fn from_parts(sig: &EcdsaSignature, id: RecoveryId) -> Self {
        let mut bytes = [0u8; SIGNATURE_LEN];
        bytes[..64].copy_from_slice(&sig.to_bytes());
        bytes[64] = id.to_byte();
        Self(bytes)
    }

    fn parts(&self) -> Result<(EcdsaSignature, RecoveryId)> {
        let id = RecoveryId::from_byte(self.0[64])
            .ok_or(CoreError::InvalidSignature("recovery id out of range"))?;
        let sig = EcdsaSignature::from_slice(&self.0[..64])
            .map_err(|_| CoreError::InvalidSignature("r or s out of range"))?;
        Ok((sig, id))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sig({}...)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; SIGNATURE_LEN]> for Signature {
    fn from(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }
}

/// Sign a digest using the operating system RNG for nonce entropy.
pub fn sign(digest: &Sha256Hash, secret: &SecretKey) -> Result<Signature> {
    sign_with_rng(digest, secret, &mut rand::rngs::OsRng)
}

/// Sign a digest, drawing nonce entropy from `rng`.
pub fn sign_with_rng<R: NonceSource>(
    digest: &Sha256Hash,
    secret: &SecretKey,
    rng: &mut R,
) -> Result<Signature> {
    let signing_key = secret.signing_key()?;
    let sig: EcdsaSignature = signing_key
        .sign_prehash_with_rng(rng, digest.as_bytes())
        .map_err(|e| CoreError::SigningFailed(e.to_string()))?;
    let sig = sig.normalize_s().unwrap_or(sig);

    let expected = signing_key.verifying_key();
    for byte in 0..=3u8 {
        let Some(id) = RecoveryId::from_byte(byte) else {
            continue;
        };
        match VerifyingKey::recover_from_prehash(digest.as_bytes(), &sig, id) {
            Ok(recovered) if &recovered == expected => return Ok(Signature::from_parts(&sig, id)),
            _ => continue,
        }
    }

    Err(CoreError::SigningFailed(
        "no recovery id reproduces the signing key".into(),
    ))
}

/// Recover the public key that produced `sig` over `digest`.
pub fn recover_pubkey(sig: &Signature, digest: &Sha256Hash) -> Result<PublicKey> {
    let (_, key) = recover_verifying_key(sig, digest)?;
    PublicKey::from_slice(key.to_encoded_point(true).as_bytes())
}

/// Verify `sig` over `digest` against a known public key.
pub fn verify_by_pubkey(sig: &Signature, digest: &Sha256Hash, public: &PublicKey) -> Result<()> {
    public.verify()?;
    let recovered = recover_pubkey(sig, digest)?;
    if recovered != *public {
        return Err(CoreError::PublicKeyMismatch);
    }

    let (ecdsa, _) = sig.parts()?;
    let key = VerifyingKey::from_sec1_bytes(public.as_bytes()).map_err(|_| CoreError::InvalidPublicKey)?;
    key.verify_prehash(digest.as_bytes(), &ecdsa)
        .map_err(|_| CoreError::InvalidSignature("signature does not verify for public key"))
}

/// Verify `sig` over `digest` against a primary address.
pub fn verify_by_address(sig: &Signature, digest: &Sha256Hash, address: &Address) -> Result<()> {
    let (ecdsa, key) = recover_verifying_key(sig, digest)?;
    let recovered = PublicKey::from_slice(key.to_encoded_point(true).as_bytes())?;
    address.verify(&recovered)?;

    key.verify_prehash(digest.as_bytes(), &ecdsa)
        .map_err(|_| CoreError::InvalidSignature("signature does not verify for address"))
}

/// Check a signature's internal validity without reference to a stored key.
///
/// The recovery byte must be below 4, `r` and `s` must lie in `[1, n)` with
/// `s` in the low half, a public key must be recoverable, and the signature
/// must verify against that key.
pub fn verify_self(sig: &Signature, digest: &Sha256Hash) -> Result<()> {
    if sig.is_null() {
        return Err(CoreError::InvalidSignature("null signature"));
    }
    let (ecdsa, _) = sig.parts()?;
    if ecdsa.normalize_s().is_some() {
        return Err(CoreError::InvalidSignature("s is not normalized"));
    }

    let (_, key) = recover_verifying_key(sig, digest)?;
    key.verify_prehash(digest.as_bytes(), &ecdsa)
        .map_err(|_| CoreError::InvalidSignature("signature does not verify"))
}

fn recover_verifying_key(sig: &Signature, digest: &Sha256Hash) -> Result<(EcdsaSignature, VerifyingKey)> {
    let (ecdsa, id) = sig.parts().map_err(|_| CoreError::RecoveryFailure)?;
    let key = VerifyingKey::recover_from_prehash(digest.as_bytes(), &ecdsa, id)
        .map_err(|_| CoreError::RecoveryFailure)?;
    Ok((ecdsa, key))
}

impl KeyPair {
    /// Sign a digest with this keypair's secret.
    pub fn sign(&self, digest: &Sha256Hash) -> Result<Signature> {
        sign(digest, &self.secret)
    }
}

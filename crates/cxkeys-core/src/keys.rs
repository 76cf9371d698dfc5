//! secp256k1 key material with strong types.
//!
//! Both key types are fixed-length byte containers. Curve validity is checked
//! when a key is used (derivation, signing, verification), so a corrupted
//! fixture value can be carried far enough to be reported precisely instead of
//! being rejected at parse time.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CoreError, Result};

/// Length of a secret key in bytes.
pub const SECRET_KEY_LEN: usize = 32;

/// Length of a compressed public key in bytes.
pub const PUBLIC_KEY_LEN: usize = 33;

/// A 32-byte secp256k1 secret scalar (big-endian).
///
/// The buffer is wiped on drop and never printed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; SECRET_KEY_LEN]);

impl SecretKey {
    /// Create from raw bytes. No curve check is performed.
    pub const fn from_bytes(bytes: [u8; SECRET_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a byte slice of exactly 32 bytes.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let arr: [u8; SECRET_KEY_LEN] = slice
            .try_into()
            .map_err(|_| CoreError::DecodingError(format!("secret key must be 32 bytes, got {}", slice.len())))?;
        Ok(Self(arr))
    }

    /// Parse from a hex string (structural check only).
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut arr = [0u8; SECRET_KEY_LEN];
        hex::decode_to_slice(s, &mut arr).map_err(|e| CoreError::DecodingError(e.to_string()))?;
        Ok(Self(arr))
    }

    /// Parse from hex and require a valid scalar.
    pub fn parse_valid_hex(s: &str) -> Result<Self> {
        let key = Self::from_hex(s).map_err(|_| CoreError::InvalidSecretKey)?;
        key.verify()?;
        Ok(key)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; SECRET_KEY_LEN] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Whether every byte is zero.
    pub fn is_null(&self) -> bool {
        self.0 == [0u8; SECRET_KEY_LEN]
    }

    /// Check that the scalar lies in `[1, n)`.
    pub fn verify(&self) -> Result<()> {
        self.to_k256().map(|_| ())
    }

    /// Derive the compressed public key.
    pub fn public_key(&self) -> Result<PublicKey> {
        let point = self.to_k256()?.public_key().to_encoded_point(true);
        PublicKey::from_slice(point.as_bytes())
    }

    pub(crate) fn to_k256(&self) -> Result<k256::SecretKey> {
        k256::SecretKey::from_bytes(&self.0.into()).map_err(|_| CoreError::InvalidSecretKey)
    }

    pub(crate) fn signing_key(&self) -> Result<k256::ecdsa::SigningKey> {
        k256::ecdsa::SigningKey::from_bytes(&self.0.into()).map_err(|_| CoreError::InvalidSecretKey)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// A 33-byte SEC1 compressed secp256k1 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    /// Create from raw bytes. No curve check is performed.
    pub const fn from_bytes(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a byte slice of exactly 33 bytes.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let arr: [u8; PUBLIC_KEY_LEN] = slice
            .try_into()
            .map_err(|_| CoreError::DecodingError(format!("public key must be 33 bytes, got {}", slice.len())))?;
        Ok(Self(arr))
    }

    /// Parse from a hex string (structural check only).
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut arr = [0u8; PUBLIC_KEY_LEN];
        hex::decode_to_slice(s, &mut arr).map_err(|e| CoreError::DecodingError(e.to_string()))?;
        Ok(Self(arr))
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Whether every byte is zero.
    pub fn is_null(&self) -> bool {
        self.0 == [0u8; PUBLIC_KEY_LEN]
    }

    /// Check that the bytes are a compressed point on the curve.
    pub fn verify(&self) -> Result<()> {
        self.to_k256().map(|_| ())
    }

    pub(crate) fn to_k256(&self) -> Result<k256::PublicKey> {
        if self.0[0] != 0x02 && self.0[0] != 0x03 {
            return Err(CoreError::InvalidPublicKey);
        }
        k256::PublicKey::from_sec1_bytes(&self.0).map_err(|_| CoreError::InvalidPublicKey)
    }

    /// Multiply this point by a secret scalar and return the compressed result.
    pub(crate) fn multiply(&self, secret: &SecretKey) -> Result<[u8; PUBLIC_KEY_LEN]> {
        let point = self.to_k256()?.to_projective() * *secret.to_k256()?.to_nonzero_scalar();
        let encoded = point.to_affine().to_encoded_point(true);
        encoded
            .as_bytes()
            .try_into()
            .map_err(|_| CoreError::InvalidPublicKey)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}...)", &self.to_hex()[..16])
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; PUBLIC_KEY_LEN]> for PublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A secret key together with its derived public key.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub secret: SecretKey,
    pub public: PublicKey,
}

impl KeyPair {
    /// Build a keypair by deriving the public key from the secret.
    pub fn from_secret(secret: SecretKey) -> Result<Self> {
        let public = secret.public_key()?;
        Ok(Self { secret, public })
    }

    /// Generate a random keypair from the OS RNG.
    pub fn generate() -> Self {
        let secret = k256::SecretKey::random(&mut rand::rngs::OsRng);
        let public = Self::public_of(&secret);
        Self {
            secret: SecretKey(secret.to_bytes().into()),
            public,
        }
    }

    fn public_of(secret: &k256::SecretKey) -> PublicKey {
        let mut bytes = [0u8; PUBLIC_KEY_LEN];
        bytes.copy_from_slice(secret.public_key().to_encoded_point(true).as_bytes());
        PublicKey(bytes)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair({:?})", self.public)
    }
}

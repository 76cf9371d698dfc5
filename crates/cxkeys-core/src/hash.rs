//! Hash primitives: SHA-256 digests and RIPEMD-160 key hashes.

use ripemd::Ripemd160;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

/// A 32-byte SHA-256 hash.
///
/// This is the digest unit that signatures bind to. The signature layer
/// treats it as opaque input and never hashes messages on a caller's behalf.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sha256Hash(pub [u8; 32]);

impl Sha256Hash {
    /// Compute the SHA-256 hash of data.
    pub fn hash(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    /// Compute SHA-256 over the concatenation of two byte strings.
    pub fn hash_concat(a: &[u8], b: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(a);
        hasher.update(b);
        Self(hasher.finalize().into())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut arr = [0u8; 32];
        hex::decode_to_slice(s, &mut arr)?;
        Ok(Self(arr))
    }

    /// Whether every byte is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// The zero hash (sentinel value).
    pub const ZERO: Self = Self([0u8; 32]);
}

impl fmt::Debug for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SHA256({}...)", &self.to_hex()[..8])
    }
}

impl fmt::Display for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Sha256Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Sha256Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Sha256Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Sha256Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A 20-byte RIPEMD-160 hash, the key portion of an address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ripemd160Hash(pub [u8; 20]);

impl Ripemd160Hash {
    /// Compute the RIPEMD-160 hash of data.
    pub fn hash(data: &[u8]) -> Self {
        Self(Ripemd160::digest(data).into())
    }

    /// Get raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The zero hash.
    pub const ZERO: Self = Self([0u8; 20]);
}

impl fmt::Debug for Ripemd160Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RIPEMD160({})", self.to_hex())
    }
}

impl From<[u8; 20]> for Ripemd160Hash {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            Sha256Hash::hash(b"").to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hash_concat_matches_contiguous_hash() {
        let joined = Sha256Hash::hash(b"helloworld");
        assert_eq!(Sha256Hash::hash_concat(b"hello", b"world"), joined);
    }

    #[test]
    fn test_from_hex_rejects_wrong_length() {
        assert!(Sha256Hash::from_hex("abcd").is_err());
        assert!(Sha256Hash::from_hex(&"00".repeat(33)).is_err());
        assert!(Sha256Hash::from_hex(&"zz".repeat(32)).is_err());
    }

    #[test]
    fn test_from_hex_accepts_uppercase() {
        let h = Sha256Hash::hash(b"case");
        let upper = h.to_hex().to_uppercase();
        assert_eq!(Sha256Hash::from_hex(&upper).unwrap(), h);
    }

    #[test]
    fn test_ripemd160_known_vector() {
        assert_eq!(
            Ripemd160Hash::hash(b"").to_hex(),
            "9c1185a5c5e9fc54612808977ee8f548b2258d31"
        );
    }

    #[test]
    fn test_serde_as_hex_string() {
        let h = Sha256Hash::from_bytes([0xab; 32]);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(32)));
        let back: Sha256Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);
    }
}

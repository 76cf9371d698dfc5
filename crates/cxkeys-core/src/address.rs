//! Address codecs.
//!
//! Two checksummed base58 encodings of a hashed public key are supported:
//!
//! - [`Address`]: the primary network format.
//!   `key = RIPEMD160(SHA256(SHA256(pubkey)))`, bytes `key || version || checksum`,
//!   `checksum = SHA256(key || version)[0..4]`.
//! - [`BitcoinAddress`]: the legacy-compatible format.
//!   `key = RIPEMD160(SHA256(pubkey))`, bytes `version || key || checksum`,
//!   `checksum = SHA256(SHA256(version || key))[0..4]`.
//!
//! Both implement [`AddressCodec`]; [`AddressFormat`] selects one at run time.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{AddressError, CoreError, Result};
use crate::hash::{Ripemd160Hash, Sha256Hash};
use crate::keys::{PublicKey, SecretKey};

/// Length of an encoded address in bytes.
pub const ADDRESS_BYTES_LEN: usize = 25;

/// The only address version currently accepted.
pub const ADDRESS_VERSION: u8 = 0;

/// A format tag selecting one of the address codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFormat {
    /// Primary network address.
    Primary,
    /// Legacy bitcoin-compatible address.
    Legacy,
}

impl AddressFormat {
    /// Both formats, in validation order.
    pub const ALL: [AddressFormat; 2] = [AddressFormat::Primary, AddressFormat::Legacy];

    /// Derive an address of this format from a public key.
    pub fn from_public_key(self, public: &PublicKey) -> Result<AnyAddress> {
        match self {
            AddressFormat::Primary => Address::from_public_key(public).map(AnyAddress::Primary),
            AddressFormat::Legacy => BitcoinAddress::from_public_key(public).map(AnyAddress::Legacy),
        }
    }

    /// Derive an address of this format directly from a secret key.
    pub fn from_secret_key(self, secret: &SecretKey) -> Result<AnyAddress> {
        match self {
            AddressFormat::Primary => Address::from_secret_key(secret).map(AnyAddress::Primary),
            AddressFormat::Legacy => BitcoinAddress::from_secret_key(secret).map(AnyAddress::Legacy),
        }
    }

    /// Decode a base58 string in this format.
    pub fn decode(self, s: &str) -> Result<AnyAddress> {
        match self {
            AddressFormat::Primary => Address::decode(s).map(AnyAddress::Primary),
            AddressFormat::Legacy => BitcoinAddress::decode(s).map(AnyAddress::Legacy),
        }
    }
}

impl fmt::Display for AddressFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFormat::Primary => write!(f, "address"),
            AddressFormat::Legacy => write!(f, "bitcoin_address"),
        }
    }
}

/// Shared encode/decode capability of the address formats.
pub trait AddressCodec: Sized + Copy + Eq + fmt::Debug {
    /// Format tag of this codec.
    const FORMAT: AddressFormat;

    /// Hash a compressed public key into the key portion of the address.
    fn hash_public_key(public: &[u8]) -> Ripemd160Hash;

    /// Build an address from its parts. The checksum is computed, not stored.
    fn from_parts(version: u8, key: Ripemd160Hash) -> Self;

    /// Address version byte.
    fn version(&self) -> u8;

    /// Hashed public key.
    fn key(&self) -> &Ripemd160Hash;

    /// Four-byte checksum over version and key.
    fn checksum(&self) -> [u8; 4];

    /// Serialize to the 25-byte layout.
    fn to_bytes(&self) -> [u8; ADDRESS_BYTES_LEN];

    /// Parse the 25-byte layout, checking length, version and checksum.
    fn from_bytes(bytes: &[u8]) -> Result<Self>;

    /// Derive from a public key, rejecting keys that are not on the curve.
    fn from_public_key(public: &PublicKey) -> Result<Self> {
        public.verify()?;
        Ok(Self::from_parts(ADDRESS_VERSION, Self::hash_public_key(public.as_bytes())))
    }

    /// Derive straight from a secret scalar, bypassing [`PublicKey`].
    fn from_secret_key(secret: &SecretKey) -> Result<Self> {
        let signing_key = secret.signing_key()?;
        let point = signing_key.verifying_key().to_encoded_point(true);
        Ok(Self::from_parts(ADDRESS_VERSION, Self::hash_public_key(point.as_bytes())))
    }

    /// Encode as base58.
    fn encode(&self) -> String {
        bs58::encode(self.to_bytes()).into_string()
    }

    /// Decode from base58.
    fn decode(s: &str) -> Result<Self> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|_| AddressError::InvalidBase58)?;
        Self::from_bytes(&bytes)
    }

    /// Whether this is the all-zero address.
    fn is_null(&self) -> bool {
        self.version() == 0 && *self.key() == Ripemd160Hash::ZERO
    }

    /// Check that this address was derived from `public`.
    fn verify(&self, public: &PublicKey) -> Result<()> {
        if self.version() != ADDRESS_VERSION {
            return Err(AddressError::InvalidVersion(self.version()).into());
        }
        if Self::from_public_key(public)?.key() != self.key() {
            return Err(CoreError::AddressMismatch);
        }
        Ok(())
    }
}

fn checked_parts(bytes: &[u8]) -> Result<&[u8; ADDRESS_BYTES_LEN]> {
    bytes
        .try_into()
        .map_err(|_| AddressError::InvalidLength(bytes.len()).into())
}

fn take_key(slice: &[u8]) -> Ripemd160Hash {
    let mut key = [0u8; 20];
    key.copy_from_slice(slice);
    Ripemd160Hash(key)
}

fn check_decoded<A: AddressCodec>(decoded: A, checksum: &[u8]) -> Result<A> {
    if decoded.version() != ADDRESS_VERSION {
        return Err(AddressError::InvalidVersion(decoded.version()).into());
    }
    if decoded.checksum() != checksum {
        return Err(AddressError::InvalidChecksum.into());
    }
    Ok(decoded)
}

// ─────────────────────────────────────────────────────────────────────────────
// Primary address
// ─────────────────────────────────────────────────────────────────────────────

/// The primary network address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    version: u8,
    key: Ripemd160Hash,
}

impl AddressCodec for Address {
    const FORMAT: AddressFormat = AddressFormat::Primary;

    fn hash_public_key(public: &[u8]) -> Ripemd160Hash {
        let once = Sha256Hash::hash(public);
        let twice = Sha256Hash::hash(once.as_bytes());
        Ripemd160Hash::hash(twice.as_bytes())
    }

    fn from_parts(version: u8, key: Ripemd160Hash) -> Self {
        Self { version, key }
    }

    fn version(&self) -> u8 {
        self.version
    }

    fn key(&self) -> &Ripemd160Hash {
        &self.key
    }

    fn checksum(&self) -> [u8; 4] {
        let digest = Sha256Hash::hash_concat(self.key.as_bytes(), &[self.version]);
        let mut out = [0u8; 4];
        out.copy_from_slice(&digest.as_bytes()[..4]);
        out
    }

    fn to_bytes(&self) -> [u8; ADDRESS_BYTES_LEN] {
        let mut out = [0u8; ADDRESS_BYTES_LEN];
        out[..20].copy_from_slice(self.key.as_bytes());
        out[20] = self.version;
        out[21..].copy_from_slice(&self.checksum());
        out
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes = checked_parts(bytes)?;
        let decoded = Self::from_parts(bytes[20], take_key(&bytes[..20]));
        check_decoded(decoded, &bytes[21..])
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.encode())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Address {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Legacy address
// ─────────────────────────────────────────────────────────────────────────────

/// The legacy bitcoin-compatible address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitcoinAddress {
    version: u8,
    key: Ripemd160Hash,
}

impl AddressCodec for BitcoinAddress {
    const FORMAT: AddressFormat = AddressFormat::Legacy;

    fn hash_public_key(public: &[u8]) -> Ripemd160Hash {
        Ripemd160Hash::hash(Sha256Hash::hash(public).as_bytes())
    }

    fn from_parts(version: u8, key: Ripemd160Hash) -> Self {
        Self { version, key }
    }

    fn version(&self) -> u8 {
        self.version
    }

    fn key(&self) -> &Ripemd160Hash {
        &self.key
    }

    fn checksum(&self) -> [u8; 4] {
        let once = Sha256Hash::hash_concat(&[self.version], self.key.as_bytes());
        let twice = Sha256Hash::hash(once.as_bytes());
        let mut out = [0u8; 4];
        out.copy_from_slice(&twice.as_bytes()[..4]);
        out
    }

    fn to_bytes(&self) -> [u8; ADDRESS_BYTES_LEN] {
        let mut out = [0u8; ADDRESS_BYTES_LEN];
        out[0] = self.version;
        out[1..21].copy_from_slice(self.key.as_bytes());
        out[21..].copy_from_slice(&self.checksum());
        out
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes = checked_parts(bytes)?;
        let decoded = Self::from_parts(bytes[0], take_key(&bytes[1..21]));
        check_decoded(decoded, &bytes[21..])
    }
}

impl fmt::Debug for BitcoinAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitcoinAddress({})", self.encode())
    }
}

impl fmt::Display for BitcoinAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for BitcoinAddress {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

macro_rules! serde_as_base58 {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.encode())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                <$ty>::decode(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

serde_as_base58!(Address);
serde_as_base58!(BitcoinAddress);

/// An address of either format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnyAddress {
    Primary(Address),
    Legacy(BitcoinAddress),
}

impl AnyAddress {
    /// The format tag of the wrapped address.
    pub fn format(&self) -> AddressFormat {
        match self {
            AnyAddress::Primary(_) => AddressFormat::Primary,
            AnyAddress::Legacy(_) => AddressFormat::Legacy,
        }
    }

    /// Encode as base58.
    pub fn encode(&self) -> String {
        match self {
            AnyAddress::Primary(a) => a.encode(),
            AnyAddress::Legacy(a) => a.encode(),
        }
    }

    /// Whether this is the all-zero address.
    pub fn is_null(&self) -> bool {
        match self {
            AnyAddress::Primary(a) => a.is_null(),
            AnyAddress::Legacy(a) => a.is_null(),
        }
    }
}

impl fmt::Display for AnyAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl From<Address> for AnyAddress {
    fn from(a: Address) -> Self {
        AnyAddress::Primary(a)
    }
}

impl From<BitcoinAddress> for AnyAddress {
    fn from(a: BitcoinAddress) -> Self {
        AnyAddress::Legacy(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_one() -> SecretKey {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        SecretKey::from_bytes(bytes)
    }

    #[test]
    fn test_legacy_address_of_scalar_one() {
        let addr = BitcoinAddress::from_secret_key(&scalar_one()).unwrap();
        assert_eq!(addr.encode(), "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
    }

    #[test]
    fn test_primary_address_of_scalar_one() {
        let addr = Address::from_secret_key(&scalar_one()).unwrap();
        assert_eq!(addr.encode(), "2bryAuwjChUPTg6CipqcnPhB4LwqvqjSebL");
    }

    #[test]
    fn test_secret_and_public_paths_agree() {
        let sk = scalar_one();
        let pk = sk.public_key().unwrap();
        for format in AddressFormat::ALL {
            assert_eq!(
                format.from_secret_key(&sk).unwrap(),
                format.from_public_key(&pk).unwrap(),
                "{format} derivation paths diverged"
            );
        }
    }

    #[test]
    fn test_decode_roundtrip() {
        let addr = Address::from_secret_key(&scalar_one()).unwrap();
        let decoded: Address = addr.encode().parse().unwrap();
        assert_eq!(decoded, addr);
        assert_eq!(decoded.key(), addr.key());

        let btc = BitcoinAddress::from_secret_key(&scalar_one()).unwrap();
        assert_eq!(BitcoinAddress::decode(&btc.encode()).unwrap(), btc);
    }

    #[test]
    fn test_decode_rejects_bad_checksum() {
        let addr = Address::from_secret_key(&scalar_one()).unwrap();
        let mut bytes = addr.to_bytes();
        bytes[24] ^= 0x01;
        assert_eq!(
            Address::from_bytes(&bytes),
            Err(CoreError::InvalidAddress(AddressError::InvalidChecksum))
        );
    }

    #[test]
    fn test_decode_rejects_bad_version() {
        let addr = Address::from_parts(1, Ripemd160Hash([7; 20]));
        assert_eq!(
            Address::from_bytes(&addr.to_bytes()),
            Err(CoreError::InvalidAddress(AddressError::InvalidVersion(1)))
        );
    }

    #[test]
    fn test_decode_rejects_bad_length_and_alphabet() {
        assert_eq!(
            Address::from_bytes(&[0u8; 24]),
            Err(CoreError::InvalidAddress(AddressError::InvalidLength(24)))
        );
        assert_eq!(
            Address::decode("0OIl"),
            Err(CoreError::InvalidAddress(AddressError::InvalidBase58))
        );
        assert!(Address::decode("").is_err());
    }

    #[test]
    fn test_formats_do_not_cross_decode() {
        let btc = BitcoinAddress::from_secret_key(&scalar_one()).unwrap();
        assert!(Address::decode(&btc.encode()).is_err());
    }

    #[test]
    fn test_verify_against_public_key() {
        let sk = scalar_one();
        let pk = sk.public_key().unwrap();
        let addr = Address::from_public_key(&pk).unwrap();
        assert!(addr.verify(&pk).is_ok());

        let mut other = [0u8; 32];
        other[31] = 2;
        let other_pk = SecretKey::from_bytes(other).public_key().unwrap();
        assert_eq!(addr.verify(&other_pk), Err(CoreError::AddressMismatch));
    }

    #[test]
    fn test_from_public_key_rejects_off_curve() {
        let mut bytes = [0x11; 33];
        bytes[0] = 0x05;
        assert!(Address::from_public_key(&PublicKey::from_bytes(bytes)).is_err());
        assert!(BitcoinAddress::from_public_key(&PublicKey::from_bytes([0u8; 33])).is_err());
    }

    #[test]
    fn test_null_address() {
        let addr = Address::from_parts(0, Ripemd160Hash::ZERO);
        assert!(addr.is_null());
        assert!(!Address::from_secret_key(&scalar_one()).unwrap().is_null());
    }

    #[test]
    fn test_serde_as_base58() {
        let addr = Address::from_secret_key(&scalar_one()).unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"2bryAuwjChUPTg6CipqcnPhB4LwqvqjSebL\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}

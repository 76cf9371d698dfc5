//! Key spec files: one keypair and its address as JSON strings.
//!
//! ```text
//! { "spec_era": ..., "key_type": ..., "pubkey": <hex>, "seckey": <hex>, "address": <base58> }
//! ```
//!
//! Key tooling reads a spec and prints exactly one named field.

use cxkeys_core::{address_from_public, public_from_secret, AddressCodec, SecretKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use zeroize::Zeroize;

use crate::error::KeySpecError;

/// Default file name of a key spec.
pub const DEFAULT_KEY_SPEC_FILE: &str = "skycoin.chain_keys.json";

/// A field of a [`KeySpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyField {
    SpecEra,
    KeyType,
    PubKey,
    SecKey,
    Address,
}

impl KeyField {
    /// Every field, in file order.
    pub const ALL: [KeyField; 5] = [
        KeyField::SpecEra,
        KeyField::KeyType,
        KeyField::PubKey,
        KeyField::SecKey,
        KeyField::Address,
    ];

    /// The field's JSON name.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyField::SpecEra => "spec_era",
            KeyField::KeyType => "key_type",
            KeyField::PubKey => "pubkey",
            KeyField::SecKey => "seckey",
            KeyField::Address => "address",
        }
    }
}

impl fmt::Display for KeyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyField {
    type Err = KeySpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| KeySpecError::InvalidField(s.to_string()))
    }
}

/// A keypair with its address, as stored in a key spec file.
///
/// The secret is wiped on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySpec {
    pub spec_era: String,
    pub key_type: String,
    pub pubkey: String,
    pub seckey: String,
    pub address: String,
}

impl KeySpec {
    /// Build a consistent spec from a secret key.
    pub fn from_secret(spec_era: &str, key_type: &str, secret: &SecretKey) -> Result<Self, KeySpecError> {
        let public = public_from_secret(secret).map_err(KeySpecError::InvalidSecretKey)?;
        let address = address_from_public(&public).map_err(KeySpecError::InvalidSecretKey)?;
        Ok(Self {
            spec_era: spec_era.to_string(),
            key_type: key_type.to_string(),
            pubkey: public.to_hex(),
            seckey: secret.to_hex(),
            address: address.encode(),
        })
    }

    /// Load a spec from a JSON file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, KeySpecError> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Write the spec as pretty-printed JSON.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), KeySpecError> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// The value of one field.
    pub fn select(&self, field: KeyField) -> &str {
        match field {
            KeyField::SpecEra => &self.spec_era,
            KeyField::KeyType => &self.key_type,
            KeyField::PubKey => &self.pubkey,
            KeyField::SecKey => &self.seckey,
            KeyField::Address => &self.address,
        }
    }

    /// The value of the field called `name`.
    pub fn select_by_name(&self, name: &str) -> Result<&str, KeySpecError> {
        Ok(self.select(name.parse()?))
    }

    /// Decode the secret key.
    pub fn secret_key(&self) -> Result<SecretKey, KeySpecError> {
        SecretKey::parse_valid_hex(&self.seckey).map_err(KeySpecError::InvalidSecretKey)
    }

    /// Check that `pubkey` and `address` derive from `seckey`.
    pub fn verify(&self) -> Result<(), KeySpecError> {
        let secret = self.secret_key()?;
        let public = public_from_secret(&secret).map_err(KeySpecError::InvalidSecretKey)?;
        if !public.to_hex().eq_ignore_ascii_case(&self.pubkey) {
            return Err(KeySpecError::Inconsistent(KeyField::PubKey));
        }

        let address = address_from_public(&public).map_err(KeySpecError::InvalidSecretKey)?;
        if address.encode() != self.address {
            return Err(KeySpecError::Inconsistent(KeyField::Address));
        }
        Ok(())
    }
}

impl Drop for KeySpec {
    fn drop(&mut self) {
        self.seckey.zeroize();
    }
}

impl fmt::Debug for KeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySpec")
            .field("spec_era", &self.spec_era)
            .field("key_type", &self.key_type)
            .field("pubkey", &self.pubkey)
            .field("seckey", &"<redacted>")
            .field("address", &self.address)
            .finish()
    }
}

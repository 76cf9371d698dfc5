//! What the key engine needs from a chain specification.
//!
//! A chain spec carries much more (genesis program state, block generation,
//! network settings) but the genesis gate reads exactly two values from it:
//! the genesis address and the hash identifying the spec.

use cxkeys_core::{Address, AddressCodec, Sha256Hash};
use serde_json::Value;

use crate::error::{ChainError, Result};

/// JSON key holding the genesis address.
pub const GENESIS_ADDRESS_FIELD: &str = "genesis_address";

/// JSON key holding the spec era.
pub const SPEC_ERA_FIELD: &str = "spec_era";

/// The minimal contract a chain specification fulfils for the genesis gate.
pub trait ChainSpec {
    /// The checksum-validated genesis address.
    fn genesis_address(&self) -> Address;

    /// Hash identifying this spec.
    fn spec_hash(&self) -> Sha256Hash;
}

/// The two values read from a chain spec, held by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainSpecBinding {
    pub genesis_address: Address,
    pub spec_hash: Sha256Hash,
}

impl ChainSpecBinding {
    /// Create from already validated parts.
    pub fn new(genesis_address: Address, spec_hash: Sha256Hash) -> Self {
        Self {
            genesis_address,
            spec_hash,
        }
    }

    /// Read the binding out of a chain spec JSON document.
    pub fn from_spec_json(bytes: &[u8]) -> Result<Self> {
        ChainSpecDocument::parse(bytes)?.binding()
    }
}

impl ChainSpec for ChainSpecBinding {
    fn genesis_address(&self) -> Address {
        self.genesis_address
    }

    fn spec_hash(&self) -> Sha256Hash {
        self.spec_hash
    }
}

/// A parsed chain spec document.
///
/// The spec hash is SHA-256 over the compact JSON rendering with object keys
/// sorted, so whitespace and key order in the source file do not change it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSpecDocument {
    value: Value,
}

impl ChainSpecDocument {
    /// Parse a JSON document.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        Ok(Self {
            value: serde_json::from_slice(bytes)?,
        })
    }

    /// The spec era, if the document declares one.
    pub fn spec_era(&self) -> Option<&str> {
        self.value.get(SPEC_ERA_FIELD).and_then(Value::as_str)
    }

    /// Decode and checksum-validate the genesis address.
    pub fn genesis_address(&self) -> Result<Address> {
        let raw = self
            .value
            .get(GENESIS_ADDRESS_FIELD)
            .and_then(Value::as_str)
            .ok_or(ChainError::MissingField(GENESIS_ADDRESS_FIELD))?;
        Address::decode(raw).map_err(ChainError::InvalidGenesisAddress)
    }

    /// Hash of the canonical rendering of the document.
    pub fn spec_hash(&self) -> Result<Sha256Hash> {
        Ok(Sha256Hash::hash(&serde_json::to_vec(&self.value)?))
    }

    /// Extract the binding.
    pub fn binding(&self) -> Result<ChainSpecBinding> {
        Ok(ChainSpecBinding::new(self.genesis_address()?, self.spec_hash()?))
    }

    /// The underlying JSON value.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS: &str = "28JagQLgcyxsFm9YwqH5iikL9E38XGuZzd8";

    fn spec_json() -> String {
        format!(
            r#"{{"spec_era":"cx_alpha","chain":{{"ticker":"CXA","port":6001}},"genesis_address":"{}"}}"#,
            GENESIS
        )
    }

    #[test]
    fn test_binding_from_spec_json() {
        let binding = ChainSpecBinding::from_spec_json(spec_json().as_bytes()).unwrap();
        assert_eq!(binding.genesis_address.encode(), GENESIS);
        assert!(!binding.spec_hash.is_zero());
    }

    #[test]
    fn test_spec_era() {
        let doc = ChainSpecDocument::parse(spec_json().as_bytes()).unwrap();
        assert_eq!(doc.spec_era(), Some("cx_alpha"));

        let doc = ChainSpecDocument::parse(format!(r#"{{"genesis_address":"{}"}}"#, GENESIS).as_bytes()).unwrap();
        assert_eq!(doc.spec_era(), None);
    }

    #[test]
    fn test_spec_hash_ignores_layout() {
        let compact = ChainSpecDocument::parse(spec_json().as_bytes()).unwrap();
        let reordered = format!(
            "{{\n  \"genesis_address\": \"{}\",\n  \"chain\": {{ \"port\": 6001, \"ticker\": \"CXA\" }},\n  \"spec_era\": \"cx_alpha\"\n}}",
            GENESIS
        );
        let pretty = ChainSpecDocument::parse(reordered.as_bytes()).unwrap();
        assert_eq!(compact.spec_hash().unwrap(), pretty.spec_hash().unwrap());
    }

    #[test]
    fn test_spec_hash_tracks_content() {
        let a = ChainSpecDocument::parse(spec_json().as_bytes()).unwrap();
        let b = ChainSpecDocument::parse(spec_json().replace("6001", "6002").as_bytes()).unwrap();
        assert_ne!(a.spec_hash().unwrap(), b.spec_hash().unwrap());
    }

    #[test]
    fn test_missing_genesis_address() {
        let err = ChainSpecBinding::from_spec_json(br#"{"spec_era":"cx_alpha"}"#).unwrap_err();
        assert!(matches!(err, ChainError::MissingField(GENESIS_ADDRESS_FIELD)));
    }

    #[test]
    fn test_bad_checksum_genesis_address() {
        let mut tampered = GENESIS.to_string();
        tampered.replace_range(5..6, if &GENESIS[5..6] == "x" { "y" } else { "x" });
        let json = format!(r#"{{"genesis_address":"{}"}}"#, tampered);

        let err = ChainSpecBinding::from_spec_json(json.as_bytes()).unwrap_err();
        assert!(matches!(err, ChainError::InvalidGenesisAddress(_)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ChainSpecBinding::from_spec_json(b"{not json"),
            Err(ChainError::Json(_))
        ));
    }
}

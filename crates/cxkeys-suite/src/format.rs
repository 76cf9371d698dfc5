//! Test-vector exchange format.
//!
//! Vectors exist in two shapes: JSON transfer structs that mirror the files
//! on disk field for field, and typed vectors holding decoded keys, addresses
//! and signatures. Conversion is lossless in both directions.
//!
//! ## Layout
//!
//! ```text
//! seed vector:  { "seed": <base64>,
//!                 "keys": [ { "address", "bitcoin_address",
//!                             "secret": <hex>, "public": <hex>,
//!                             "signatures": [<hex>] (omitted when empty) } ] }
//! input vector: { "hashes": [<hex>] }
//! ```
//!
//! Keys, publics and signatures are decoded structurally here. Whether they
//! are valid curve elements is the validation engine's question, so a
//! corrupted fixture reaches it and is reported with its index.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use cxkeys_core::{
    generate, Address, AddressCodec, BitcoinAddress, CoreError, PublicKey, SecretKey, Sha256Hash, Signature,
};
use serde::{Deserialize, Serialize};

use crate::error::FormatError;

// ─────────────────────────────────────────────────────────────────────────────
// JSON transfer structs
// ─────────────────────────────────────────────────────────────────────────────

/// The digests a seed vector's signatures were made over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputTestVectorJson {
    pub hashes: Vec<String>,
}

/// One generated key as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyTestVectorJson {
    pub address: String,
    pub bitcoin_address: String,
    pub secret: String,
    pub public: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signatures: Vec<String>,
}

/// A seed and its generated keys as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedTestVectorJson {
    pub seed: String,
    pub keys: Vec<KeyTestVectorJson>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Typed vectors
// ─────────────────────────────────────────────────────────────────────────────

/// Ordered list of digests. Signature `j` of every key covers `hashes[j]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputTestVector {
    pub hashes: Vec<Sha256Hash>,
}

impl InputTestVector {
    /// Create from a list of digests.
    pub fn new(hashes: Vec<Sha256Hash>) -> Self {
        Self { hashes }
    }

    /// Number of digests.
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Whether there are no digests.
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// Convert to the transfer struct.
    pub fn to_json(&self) -> InputTestVectorJson {
        InputTestVectorJson {
            hashes: self.hashes.iter().map(Sha256Hash::to_hex).collect(),
        }
    }

    /// Decode from the transfer struct.
    pub fn from_json(json: &InputTestVectorJson) -> Result<Self, FormatError> {
        let hashes = json
            .hashes
            .iter()
            .enumerate()
            .map(|(hash_index, h)| {
                Sha256Hash::from_hex(h).map_err(|source| FormatError::Hash { hash_index, source })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { hashes })
    }

    /// Parse a JSON document.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        Self::from_json(&serde_json::from_slice(bytes)?)
    }

    /// Render as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(&self.to_json())?)
    }
}

/// One generated key with every artifact derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyTestVector {
    pub address: Address,
    pub bitcoin_address: BitcoinAddress,
    pub secret: SecretKey,
    pub public: PublicKey,
    pub signatures: Vec<Signature>,
}

impl KeyTestVector {
    /// Convert to the transfer struct.
    pub fn to_json(&self) -> KeyTestVectorJson {
        KeyTestVectorJson {
            address: self.address.encode(),
            bitcoin_address: self.bitcoin_address.encode(),
            secret: self.secret.to_hex(),
            public: self.public.to_hex(),
            signatures: self.signatures.iter().map(Signature::to_hex).collect(),
        }
    }

    /// Decode from the transfer struct. `key_index` is used for error context.
    pub fn from_json(json: &KeyTestVectorJson, key_index: usize) -> Result<Self, FormatError> {
        let field = |field: &'static str| move |source: CoreError| FormatError::KeyField { key_index, field, source };

        let address = Address::decode(&json.address).map_err(field("address"))?;
        let bitcoin_address = BitcoinAddress::decode(&json.bitcoin_address).map_err(field("bitcoin_address"))?;
        let secret = SecretKey::from_hex(&json.secret).map_err(field("secret"))?;
        let public = PublicKey::from_hex(&json.public).map_err(field("public"))?;

        let signatures = json
            .signatures
            .iter()
            .enumerate()
            .map(|(signature_index, s)| {
                Signature::from_hex(s).map_err(|source| FormatError::Signature {
                    key_index,
                    signature_index,
                    source,
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            address,
            bitcoin_address,
            secret,
            public,
            signatures,
        })
    }
}

/// A seed and the keys generated from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedTestVector {
    pub seed: Vec<u8>,
    pub keys: Vec<KeyTestVector>,
}

impl SeedTestVector {
    /// Generate `n` keys from `seed`, signing every digest of `input` with each.
    pub fn generate(seed: &[u8], n: usize, input: Option<&InputTestVector>) -> Result<Self, CoreError> {
        let pairs = generate(seed, n)?;
        let mut keys = Vec::with_capacity(pairs.len());

        for pair in pairs {
            let signatures = match input {
                Some(input) => input
                    .hashes
                    .iter()
                    .map(|h| pair.sign(h))
                    .collect::<Result<Vec<_>, _>>()?,
                None => Vec::new(),
            };

            keys.push(KeyTestVector {
                address: Address::from_public_key(&pair.public)?,
                bitcoin_address: BitcoinAddress::from_public_key(&pair.public)?,
                public: pair.public,
                secret: pair.secret,
                signatures,
            });
        }

        Ok(Self {
            seed: seed.to_vec(),
            keys,
        })
    }

    /// Whether any key carries signatures.
    pub fn has_signatures(&self) -> bool {
        self.keys.iter().any(|k| !k.signatures.is_empty())
    }

    /// Convert to the transfer struct.
    pub fn to_json(&self) -> SeedTestVectorJson {
        SeedTestVectorJson {
            seed: STANDARD.encode(&self.seed),
            keys: self.keys.iter().map(KeyTestVector::to_json).collect(),
        }
    }

    /// Decode from the transfer struct.
    pub fn from_json(json: &SeedTestVectorJson) -> Result<Self, FormatError> {
        let seed = STANDARD.decode(&json.seed)?;
        let keys = json
            .keys
            .iter()
            .enumerate()
            .map(|(i, k)| KeyTestVector::from_json(k, i))
            .collect::<Result<_, _>>()?;
        Ok(Self { seed, keys })
    }

    /// Parse a JSON document.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        Self::from_json(&serde_json::from_slice(bytes)?)
    }

    /// Render as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(&self.to_json())?)
    }
}

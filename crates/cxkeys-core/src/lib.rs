//! # cxkeys Core
//!
//! Pure primitives for cxkeys: secp256k1 keys, address codecs, recoverable
//! signatures and deterministic keypair generation.
//!
//! This crate contains no I/O. Apart from signing, which consumes nonce
//! entropy, every operation is a pure computation over in-memory values.
//!
//! ## Key Types
//!
//! - [`SecretKey`] / [`PublicKey`] / [`KeyPair`] - secp256k1 key material
//! - [`Address`] - Primary network address
//! - [`BitcoinAddress`] - Legacy bitcoin-compatible address
//! - [`Signature`] - 65-byte recoverable signature
//! - [`Sha256Hash`] - The digest unit that signatures bind to
//!
//! ## Generation
//!
//! [`generate`] turns a seed into an ordered keypair sequence. See the
//! [`generator`] module for the algorithm.

pub mod address;
pub mod error;
pub mod generator;
pub mod hash;
pub mod identity;
pub mod keys;
pub mod signature;

pub use address::{Address, AddressCodec, AddressFormat, AnyAddress, BitcoinAddress};
pub use error::{AddressError, CoreError, GenerationFault, Result};
pub use generator::{generate, generate_with_next_seed, KeyGenerator};
pub use hash::{Ripemd160Hash, Sha256Hash};
pub use identity::{
    address_from_public, address_from_secret, legacy_address_from_public, legacy_address_from_secret,
    public_from_secret,
};
pub use keys::{KeyPair, PublicKey, SecretKey};
pub use signature::{
    recover_pubkey, sign, sign_with_rng, verify_by_address, verify_by_pubkey, verify_self, NonceSource, Signature,
};

//! # cxkeys
//!
//! A deterministic cryptographic identity engine.
//!
//! ## Overview
//!
//! Given a seed, cxkeys regenerates an ordered sequence of secp256k1
//! keypairs and derives every downstream artifact:
//!
//! - **Public keys**: SEC1 compressed points
//! - **Addresses**: a primary format and a legacy bitcoin-compatible format
//! - **Signatures**: 65-byte recoverable signatures over 32-byte digests
//!
//! Golden fixtures pin these derivations down. A [`Validator`] loads fixture
//! sets and checks that every derivation path still agrees with them. The
//! genesis binding gate in [`chain`] reuses the same derivation to authorize
//! genesis-signed operations.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cxkeys::{DirectorySource, Validator, ValidatorConfig};
//!
//! async fn example() {
//!     let source = DirectorySource::new("testdata/golden");
//!     let validator = Validator::new(source, ValidatorConfig::default());
//!
//!     let report = validator.run().await.unwrap();
//!     if let Some((fixture, error)) = report.first_failure() {
//!         eprintln!("{}: {}", fixture, error);
//!     }
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `cxkeys::core` - Keys, addresses, signatures and generation
//! - `cxkeys::suite` - Exchange format and validation engine
//! - `cxkeys::chain` - Genesis binding, chain spec binding, key specs

pub mod config;
pub mod error;
pub mod source;
pub mod validator;

// Re-export component crates
pub use cxkeys_chain as chain;
pub use cxkeys_core as core;
pub use cxkeys_suite as suite;

// Re-export main types for convenience
pub use config::ValidatorConfig;
pub use error::{Error, Result};
pub use source::{DirectorySource, Fixture, FixtureSource, MemorySource};
pub use validator::{FixtureReport, ValidationReport, Validator};

// Re-export commonly used component types
pub use cxkeys_chain::{bind, BindingError, ChainSpec, ChainSpecBinding, GenesisSigner};
pub use cxkeys_core::{
    generate, Address, AddressCodec, AddressFormat, BitcoinAddress, KeyPair, PublicKey, SecretKey, Sha256Hash,
    Signature,
};
pub use cxkeys_suite::{InputTestVector, SeedTestVector, ValidationError};

//! # cxkeys Chain
//!
//! The integration point between the key engine and a chain specification.
//!
//! ## Genesis binding
//!
//! A chain's genesis identity is fixed by the address its spec records.
//! [`bind`] checks that a secret key reproduces that address, and
//! [`GenesisSigner`] wraps a secret that passed the check. Nothing else in
//! this crate can sign as genesis.
//!
//! ```rust
//! use cxkeys_chain::{bind, BindingError, ChainSpecBinding};
//! use cxkeys_core::{address_from_secret, KeyPair, Sha256Hash};
//!
//! let genesis = KeyPair::generate();
//! let spec = ChainSpecBinding::new(address_from_secret(&genesis.secret).unwrap(), Sha256Hash::hash(b"spec"));
//!
//! assert!(bind(&genesis.secret, &spec).is_ok());
//! assert!(matches!(
//!     bind(&KeyPair::generate().secret, &spec),
//!     Err(BindingError::GenesisMismatch { .. })
//! ));
//! ```
//!
//! ## Key specs and environment secrets
//!
//! [`KeySpec`] reads the per-chain key file. Secret keys for privileged
//! operations come from `GENESIS_SK` and `CHAIN_SK`, see [`env`].

pub mod binding;
pub mod env;
pub mod error;
pub mod gate;
pub mod keyspec;

pub use binding::{ChainSpec, ChainSpecBinding, ChainSpecDocument};
pub use env::{secret_from_env, CHAIN_SK_ENV, GENESIS_SK_ENV};
pub use error::{BindingError, ChainError, KeySpecError, Result};
pub use gate::{bind, GenesisSigner};
pub use keyspec::{KeyField, KeySpec, DEFAULT_KEY_SPEC_FILE};

//! Secret keys supplied through the environment.

use cxkeys_core::SecretKey;
use std::env::{self, VarError};
use zeroize::Zeroizing;

use crate::error::{ChainError, Result};

/// Genesis secret key (hex). Required to inject genesis-signed transactions.
pub const GENESIS_SK_ENV: &str = "GENESIS_SK";

/// Chain secret key (hex) for registering the chain and publishing blocks.
pub const CHAIN_SK_ENV: &str = "CHAIN_SK";

/// Read a hex secret key from environment variable `name`.
///
/// The value must decode to a valid scalar.
pub fn secret_from_env(name: &'static str) -> Result<SecretKey> {
    let raw = match env::var(name) {
        Ok(v) => Zeroizing::new(v),
        Err(VarError::NotPresent) => return Err(ChainError::MissingEnv { name }),
        Err(VarError::NotUnicode(_)) => {
            return Err(ChainError::InvalidEnvKey {
                name,
                source: cxkeys_core::CoreError::DecodingError("value is not unicode".into()),
            })
        }
    };
    parse_secret(name, &raw)
}

/// Parse a hex secret key, naming `name` in any error.
pub fn parse_secret(name: &'static str, hex: &str) -> Result<SecretKey> {
    SecretKey::parse_valid_hex(hex.trim()).map_err(|source| ChainError::InvalidEnvKey { name, source })
}

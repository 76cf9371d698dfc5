//! Identity derivation: secret → public → addresses.
//!
//! These are the composed paths. The direct secret → address shortcuts live on
//! [`AddressCodec::from_secret_key`]; the validation engine checks that both
//! routes agree.

use crate::address::{Address, AddressCodec, BitcoinAddress};
use crate::error::Result;
use crate::keys::{PublicKey, SecretKey};

/// Derive the compressed public key of a secret.
pub fn public_from_secret(secret: &SecretKey) -> Result<PublicKey> {
    secret.public_key()
}

/// Derive the primary address of a public key.
pub fn address_from_public(public: &PublicKey) -> Result<Address> {
    Address::from_public_key(public)
}

/// Derive the legacy (bitcoin-compatible) address of a public key.
pub fn legacy_address_from_public(public: &PublicKey) -> Result<BitcoinAddress> {
    BitcoinAddress::from_public_key(public)
}

/// Primary address of a secret, via its public key.
pub fn address_from_secret(secret: &SecretKey) -> Result<Address> {
    address_from_public(&public_from_secret(secret)?)
}

/// Legacy address of a secret, via its public key.
pub fn legacy_address_from_secret(secret: &SecretKey) -> Result<BitcoinAddress> {
    legacy_address_from_public(&public_from_secret(secret)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::keys::KeyPair;
    use proptest::prelude::*;

    #[test]
    fn test_composed_and_direct_paths_agree() {
        for _ in 0..8 {
            let kp = KeyPair::generate();
            assert_eq!(
                address_from_secret(&kp.secret).unwrap(),
                Address::from_secret_key(&kp.secret).unwrap()
            );
            assert_eq!(
                legacy_address_from_secret(&kp.secret).unwrap(),
                BitcoinAddress::from_secret_key(&kp.secret).unwrap()
            );
        }
    }

    #[test]
    fn test_genesis_identity() {
        let sk = SecretKey::from_hex("12745ddbc90834e82c99db3fc6a87a2db90f2ce4b56441a58e8da4407f637ba1").unwrap();
        assert_eq!(
            public_from_secret(&sk).unwrap().to_hex(),
            "03d20b5fc309dc1fcdab0c6495152e0ebf97f782859abed9262469e25ccffe362b"
        );
        assert_eq!(
            address_from_secret(&sk).unwrap().to_string(),
            "28JagQLgcyxsFm9YwqH5iikL9E38XGuZzd8"
        );
        assert_eq!(
            legacy_address_from_secret(&sk).unwrap().to_string(),
            "1FAUQ9Pvibj1AqSAf3m7STVnWoeZexPKmV"
        );
    }

    #[test]
    fn test_invalid_inputs() {
        let zero = SecretKey::from_bytes([0u8; 32]);
        assert_eq!(address_from_secret(&zero), Err(CoreError::InvalidSecretKey));
        let bad = PublicKey::from_bytes([0x02; 33]);
        let mut off_curve = bad;
        off_curve.0[0] = 0x05;
        assert_eq!(address_from_public(&off_curve), Err(CoreError::InvalidPublicKey));
    }

    proptest! {
        #[test]
        fn test_composition_agreement(bytes in any::<[u8; 32]>()) {
            let sk = SecretKey::from_bytes(bytes);
            prop_assume!(sk.verify().is_ok());

            prop_assert_eq!(address_from_secret(&sk).unwrap(), Address::from_secret_key(&sk).unwrap());
            prop_assert_eq!(
                legacy_address_from_secret(&sk).unwrap(),
                BitcoinAddress::from_secret_key(&sk).unwrap()
            );
        }
    }
}

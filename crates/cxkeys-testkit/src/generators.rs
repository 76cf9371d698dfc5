//! Proptest generators for property-based testing.

use proptest::prelude::*;

use cxkeys_core::{KeyPair, SecretKey, Sha256Hash};

/// Generate a valid secret key.
pub fn secret_key() -> impl Strategy<Value = SecretKey> {
    any::<[u8; 32]>()
        .prop_map(SecretKey::from_bytes)
        .prop_filter("scalar must lie in [1, n)", |sk| sk.verify().is_ok())
}

/// Generate a keypair.
pub fn keypair() -> impl Strategy<Value = KeyPair> {
    secret_key().prop_filter_map("secret must derive a public key", |sk| KeyPair::from_secret(sk).ok())
}

/// Generate a digest.
pub fn digest() -> impl Strategy<Value = Sha256Hash> {
    any::<[u8; 32]>().prop_map(Sha256Hash::from_bytes)
}

/// Generate a non-empty seed of up to `max_len` bytes.
pub fn seed(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..=max_len)
}

/// Parameters for generating a seed vector.
#[derive(Debug, Clone)]
pub struct SeedParams {
    pub seed: Vec<u8>,
    pub keys: usize,
}

impl Arbitrary for SeedParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (seed(64), 1usize..=4)
            .prop_map(|(seed, keys)| SeedParams { seed, keys })
            .boxed()
    }
}

//! Deterministic keypair generation from a seed.
//!
//! The sequence produced for a given seed is a permanent compatibility
//! contract: fixtures generated years apart and by other implementations must
//! regenerate byte-for-byte.
//!
//! ## Algorithm
//!
//! ```text
//! deterministic_secret(x) = first valid scalar in SHA256(x), SHA256(SHA256(x)), ...
//! chain_hash(seed)        = SHA256(h || compress(a * B))
//!     where h = SHA256(seed)
//!           a = deterministic_secret(h)
//!           B = public(deterministic_secret(SHA256(h)))
//! step(seed)              = (next, deterministic_secret(SHA256(seed || next)))
//!     where next = chain_hash(seed)
//! ```
//!
//! Each step feeds `next` back in as the seed of the following step.

use zeroize::Zeroizing;

use crate::error::GenerationFault;
use crate::hash::Sha256Hash;
use crate::keys::{KeyPair, SecretKey};

/// Hash rounds tried before a scalar search is declared a fault.
pub const MAX_SCALAR_ATTEMPTS: usize = 256;

type GenResult<T> = std::result::Result<T, GenerationFault>;

/// Walks the keypair sequence of one seed.
pub struct KeyGenerator {
    seed: Zeroizing<Vec<u8>>,
    index: usize,
}

impl KeyGenerator {
    /// Start a generator at the first key of `seed`.
    pub fn new(seed: &[u8]) -> GenResult<Self> {
        if seed.is_empty() {
            return Err(GenerationFault::EmptySeed);
        }
        Ok(Self {
            seed: Zeroizing::new(seed.to_vec()),
            index: 0,
        })
    }

    /// Index of the key the next call to [`next_keypair`](Self::next_keypair) yields.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The seed the next step starts from.
    pub fn current_seed(&self) -> &[u8] {
        &self.seed
    }

    /// Produce the next keypair and advance the chain.
    pub fn next_keypair(&mut self) -> GenResult<KeyPair> {
        let index = self.index;
        let next = chain_hash(&self.seed, index)?;
        let mixed = Sha256Hash::hash_concat(&self.seed, next.as_bytes());
        let secret = deterministic_secret(mixed.as_bytes(), index)?;
        let pair = KeyPair::from_secret(secret).map_err(|_| GenerationFault::InvalidKey { index })?;

        self.seed = Zeroizing::new(next.as_bytes().to_vec());
        self.index += 1;
        Ok(pair)
    }
}

impl Iterator for KeyGenerator {
    type Item = GenResult<KeyPair>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_keypair())
    }
}

/// Generate the first `n` keypairs of `seed`.
pub fn generate(seed: &[u8], n: usize) -> GenResult<Vec<KeyPair>> {
    generate_with_next_seed(seed, n).map(|(keys, _)| keys)
}

/// Generate `n` keypairs and return the seed that continues the sequence.
///
/// `generate(next_seed, m)` yields keys `n..n + m` of the original seed.
pub fn generate_with_next_seed(seed: &[u8], n: usize) -> GenResult<(Vec<KeyPair>, Vec<u8>)> {
    let mut generator = KeyGenerator::new(seed)?;
    let mut keys = Vec::with_capacity(n);
    for _ in 0..n {
        keys.push(generator.next_keypair()?);
    }
    Ok((keys, generator.current_seed().to_vec()))
}

/// Hash `input` until the digest is a valid secp256k1 scalar.
pub fn deterministic_secret(input: &[u8], index: usize) -> GenResult<SecretKey> {
    search_scalar(Sha256Hash::hash(input), index, MAX_SCALAR_ATTEMPTS)
}

fn search_scalar(mut candidate: Sha256Hash, index: usize, max_attempts: usize) -> GenResult<SecretKey> {
    for _ in 0..max_attempts {
        let key = SecretKey::from_bytes(candidate.0);
        if key.verify().is_ok() {
            return Ok(key);
        }
        candidate = Sha256Hash::hash(candidate.as_bytes());
    }
    Err(GenerationFault::ScalarExhausted {
        index,
        attempts: max_attempts,
    })
}

/// Derive the seed of the following generation step.
pub fn chain_hash(seed: &[u8], index: usize) -> GenResult<Sha256Hash> {
    let h = Sha256Hash::hash(seed);
    let a = deterministic_secret(h.as_bytes(), index)?;
    let b = deterministic_secret(Sha256Hash::hash(h.as_bytes()).as_bytes(), index)?;

    let fault = |_| GenerationFault::InvalidKey { index };
    let shared = b.public_key().and_then(|pb| pb.multiply(&a)).map_err(fault)?;

    Ok(Sha256Hash::hash_concat(h.as_bytes(), &shared))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{Address, AddressCodec, BitcoinAddress};

    struct Expected {
        secret: &'static str,
        public: &'static str,
        address: &'static str,
        bitcoin_address: &'static str,
    }

    const SEED_VECTORS: [Expected; 3] = [
        Expected {
            secret: "001aa9e416aff5f3a3c7f9ae0811757cf54f393d50df861f5c33747954341aa7",
            public: "02e5be89fa161bf6b0bc64ec9ec7fe27311fbb78949c3ef9739d4c73a84920d6e1",
            address: "2EVNa4CK9SKosT4j1GEn8SuuUUEAXaHAMbM",
            bitcoin_address: "1CN7JTzTTpmh1dsHeUSosXmNL2GLTwt78g",
        },
        Expected {
            secret: "cc6c6e2581053dc6b405e460513ed2f0b59557ba60120d89c064287502cb3955",
            public: "031471a97c683c6fb83962219ac2a206c3a6cda1b5993a07da691ef1819dd97b5d",
            address: "68enNSvabNYLf97xhb19vmLrrG3yqXPmkV",
            bitcoin_address: "1DzErSq2UwMYvUZRCNfS6fTKN9YxM2G7x1",
        },
        Expected {
            secret: "d0bb70588b47bebea88a0c0f9dbe46171eb10d5f3c7ba902c23ec0c4746f1877",
            public: "028d943d7008faef7901919c8dee279070f1b52d8c65f8a4bcaf9e6270280a2405",
            address: "CHAJD8BMpnZ14iv34VWs23BzkBbBNcb5sH",
            bitcoin_address: "16S7kY8qRpAtf5iNeMrRcK7o4vjJYregDi",
        },
    ];

    #[test]
    fn test_known_sequence_for_seed() {
        let keys = generate(b"seed", 3).unwrap();
        for (kp, want) in keys.iter().zip(SEED_VECTORS.iter()) {
            assert_eq!(kp.secret.to_hex(), want.secret);
            assert_eq!(kp.public.to_hex(), want.public);
            assert_eq!(Address::from_public_key(&kp.public).unwrap().encode(), want.address);
            assert_eq!(
                BitcoinAddress::from_public_key(&kp.public).unwrap().encode(),
                want.bitcoin_address
            );
        }
    }

    #[test]
    fn test_known_next_seed() {
        let (_, next) = generate_with_next_seed(b"seed", 3).unwrap();
        assert_eq!(
            hex::encode(next),
            "11b03969b0d98e4b950b18e97182f2cc32d61ae10781be06629fd2098fbcba60"
        );
    }

    #[test]
    fn test_zero_seed_sequence() {
        let (keys, next) = generate_with_next_seed(&[0u8; 32], 2).unwrap();
        assert_eq!(
            keys[0].secret.to_hex(),
            "a26d6ee7ff5cb1ebf53b7c0a4a23051e569421c4721985bae07371a4697ed773"
        );
        assert_eq!(
            keys[1].public.to_hex(),
            "02cf03f0d451c4b0456edd60611260e9a95826b5e5de615db655df151b7006f60f"
        );
        assert!(keys.iter().all(|kp| !kp.secret.is_null()));
        assert_eq!(
            hex::encode(next),
            "91723b16095afac4166a7939ea489108ac22b24ee38b6eb7ba5c86911b55be93"
        );
    }

    #[test]
    fn test_deterministic() {
        let a = generate(b"repeatable", 5).unwrap();
        let b = generate(b"repeatable", 5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_prefix_stable() {
        let short = generate(b"prefix", 2).unwrap();
        let long = generate(b"prefix", 4).unwrap();
        assert_eq!(short[..], long[..2]);
    }

    #[test]
    fn test_resume_from_next_seed() {
        let all = generate(b"resume", 4).unwrap();
        let (head, next) = generate_with_next_seed(b"resume", 1).unwrap();
        let tail = generate(&next, 3).unwrap();

        assert_eq!(head[0], all[0]);
        assert_eq!(tail[..], all[1..]);
    }

    #[test]
    fn test_empty_seed_is_fault() {
        assert_eq!(generate(b"", 1), Err(GenerationFault::EmptySeed));
        assert!(KeyGenerator::new(b"").is_err());
    }

    #[test]
    fn test_zero_count() {
        let (keys, next) = generate_with_next_seed(b"seed", 0).unwrap();
        assert!(keys.is_empty());
        assert_eq!(next, b"seed");
    }

    #[test]
    fn test_iterator_matches_generate() {
        let iterated: Vec<KeyPair> = KeyGenerator::new(b"iter")
            .unwrap()
            .take(3)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(iterated, generate(b"iter", 3).unwrap());
    }

    #[test]
    fn test_deterministic_secret_is_valid_scalar() {
        for i in 0..32u8 {
            let sk = deterministic_secret(&[i], 0).unwrap();
            assert!(sk.verify().is_ok());
        }
    }

    #[test]
    fn test_scalar_search_rehashes_out_of_range_candidates() {
        // 0xff..ff is above the curve order.
        let over = Sha256Hash::from_bytes([0xff; 32]);
        assert_eq!(
            search_scalar(over, 7, 1),
            Err(GenerationFault::ScalarExhausted { index: 7, attempts: 1 })
        );

        let rehashed = search_scalar(over, 7, 2).unwrap();
        assert_eq!(rehashed.as_bytes(), Sha256Hash::hash(&[0xff; 32]).as_bytes());
        assert_eq!(
            search_scalar(Sha256Hash::ZERO, 0, 1),
            Err(GenerationFault::ScalarExhausted { index: 0, attempts: 1 })
        );
    }
}

//! Golden seed vectors and golden directory generation.
//!
//! Each vector pins the first key a seed produces. Any change to generation,
//! key derivation or address encoding breaks at least one of them.

use anyhow::{ensure, Context};
use cxkeys::config::{DEFAULT_INPUT_FILE, DEFAULT_SEED_PREFIX, GOLDEN_EXTENSION};
use cxkeys_core::{generate, AddressCodec, Address, BitcoinAddress, Sha256Hash};
use cxkeys_suite::{InputTestVector, SeedTestVector};
use rand::RngCore;
use std::path::{Path, PathBuf};

/// A golden seed with the expected identity of its first key.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Seed bytes.
    pub seed: &'static [u8],
    /// Number of keys to generate for fixtures.
    pub keys: usize,
    /// Whether fixtures carry signatures over the golden input.
    pub signed: bool,
    /// Expected first secret key (hex).
    pub secret: &'static str,
    /// Expected first public key (hex).
    pub public: &'static str,
    /// Expected first primary address.
    pub address: &'static str,
    /// Expected first legacy address.
    pub bitcoin_address: &'static str,
}

/// All golden vectors, in fixture order.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "ascii seed",
            seed: b"seed",
            keys: 3,
            signed: true,
            secret: "001aa9e416aff5f3a3c7f9ae0811757cf54f393d50df861f5c33747954341aa7",
            public: "02e5be89fa161bf6b0bc64ec9ec7fe27311fbb78949c3ef9739d4c73a84920d6e1",
            address: "2EVNa4CK9SKosT4j1GEn8SuuUUEAXaHAMbM",
            bitcoin_address: "1CN7JTzTTpmh1dsHeUSosXmNL2GLTwt78g",
        },
        GoldenVector {
            name: "32 zero bytes",
            seed: &[0u8; 32],
            keys: 2,
            signed: false,
            secret: "a26d6ee7ff5cb1ebf53b7c0a4a23051e569421c4721985bae07371a4697ed773",
            public: "026952bbc3e107cf524921ff771957a8ffd9ef6e655e188e67b20d1aa0d3226e6a",
            address: "irfz1AgPk7Mp8DzReVwBPKZVw9rurPdbBN",
            bitcoin_address: "1Px1Vxtnkf9pbthgoqVzSHzERDkECjN9wi",
        },
        GoldenVector {
            name: "genesis seed",
            seed: b"genesis",
            keys: 2,
            signed: true,
            secret: "12745ddbc90834e82c99db3fc6a87a2db90f2ce4b56441a58e8da4407f637ba1",
            public: "03d20b5fc309dc1fcdab0c6495152e0ebf97f782859abed9262469e25ccffe362b",
            address: "28JagQLgcyxsFm9YwqH5iikL9E38XGuZzd8",
            bitcoin_address: "1FAUQ9Pvibj1AqSAf3m7STVnWoeZexPKmV",
        },
    ]
}

/// Check a vector's first key against the current engine.
pub fn verify_vector(vector: &GoldenVector) -> anyhow::Result<()> {
    let pairs = generate(vector.seed, 1).with_context(|| format!("generating {}", vector.name))?;
    let first = &pairs[0];

    ensure!(first.secret.to_hex() == vector.secret, "{}: secret differs", vector.name);
    ensure!(first.public.to_hex() == vector.public, "{}: public differs", vector.name);
    ensure!(
        Address::from_public_key(&first.public)?.encode() == vector.address,
        "{}: address differs",
        vector.name
    );
    ensure!(
        BitcoinAddress::from_public_key(&first.public)?.encode() == vector.bitcoin_address,
        "{}: bitcoin address differs",
        vector.name
    );
    Ok(())
}

/// Check every golden vector.
pub fn verify_all_vectors() -> anyhow::Result<()> {
    all_vectors().iter().try_for_each(verify_vector)
}

/// The golden input: `SHA256("digest-0")`, `SHA256("digest-1")`, ...
pub fn input_vector(n: usize) -> InputTestVector {
    InputTestVector::new(
        (0..n)
            .map(|i| Sha256Hash::hash(format!("digest-{}", i).as_bytes()))
            .collect(),
    )
}

/// `n` random digests.
pub fn random_input_vector(n: usize) -> InputTestVector {
    let mut rng = rand::thread_rng();
    InputTestVector::new(
        (0..n)
            .map(|_| {
                let mut bytes = [0u8; 32];
                rng.fill_bytes(&mut bytes);
                Sha256Hash::from_bytes(bytes)
            })
            .collect(),
    )
}

/// Generate a seed vector for a golden vector definition.
pub fn generate_seed_vector(vector: &GoldenVector, input: &InputTestVector) -> anyhow::Result<SeedTestVector> {
    let input = vector.signed.then_some(input);
    SeedTestVector::generate(vector.seed, vector.keys, input).with_context(|| format!("generating {}", vector.name))
}

/// Write a golden directory: the input file plus one seed file per vector.
///
/// Returns the paths written, input file first.
pub fn write_golden_dir(
    dir: &Path,
    vectors: &[GoldenVector],
    input: &InputTestVector,
) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let input_path = dir.join(DEFAULT_INPUT_FILE);
    std::fs::write(&input_path, input.to_json_pretty()?)
        .with_context(|| format!("writing {}", input_path.display()))?;
    let mut written = vec![input_path];

    for (i, vector) in vectors.iter().enumerate() {
        let seed_vector = generate_seed_vector(vector, input)?;
        let path = dir.join(format!("{}{:04}.{}", DEFAULT_SEED_PREFIX, i, GOLDEN_EXTENSION));
        std::fs::write(&path, seed_vector.to_json_pretty()?).with_context(|| format!("writing {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}

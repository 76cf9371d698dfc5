//! Test fixtures and corruption helpers.
//!
//! A [`TestFixture`] holds a freshly generated, valid seed vector. The
//! corruption helpers each return a copy broken in exactly one way, so tests
//! can assert which invariant the validation engine reports and at which
//! index.

use cxkeys::{Fixture, MemorySource};
use cxkeys_chain::ChainSpecBinding;
use cxkeys_core::{Sha256Hash, Signature};
use cxkeys_suite::{InputTestVector, SeedTestVector};

use crate::vectors::input_vector;

/// A valid seed vector with its input digests.
#[derive(Debug, Clone)]
pub struct TestFixture {
    pub vector: SeedTestVector,
    pub input: InputTestVector,
}

impl TestFixture {
    /// Generate `keys` keys from `seed`, each signing `hashes` golden digests.
    pub fn new(seed: &[u8], keys: usize, hashes: usize) -> Self {
        let input = input_vector(hashes);
        let vector = match SeedTestVector::generate(seed, keys, (hashes > 0).then_some(&input)) {
            Ok(v) => v,
            Err(e) => panic!("fixture seed {:?} failed to generate: {}", seed, e),
        };
        Self { vector, input }
    }

    /// Generate unsigned keys from `seed`.
    pub fn unsigned(seed: &[u8], keys: usize) -> Self {
        Self::new(seed, keys, 0)
    }

    /// The input vector, or `None` when no digests were signed.
    pub fn input(&self) -> Option<&InputTestVector> {
        (!self.input.is_empty()).then_some(&self.input)
    }

    /// Wrap as a named fixture for a source.
    pub fn to_fixture(&self, name: &str) -> Fixture {
        Fixture::new(name, self.vector.clone(), self.input().cloned())
    }

    /// A chain spec whose genesis address is key `key_index`.
    pub fn chain_spec(&self, key_index: usize, spec_era: &str) -> ChainSpecBinding {
        ChainSpecBinding::new(self.vector.keys[key_index].address, Sha256Hash::hash(spec_era.as_bytes()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Corruption helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Flip the last hex character of the stored public key at `key_index`.
    pub fn with_public_hex_mutated(&self, key_index: usize) -> SeedTestVector {
        let mut json = self.vector.to_json();
        let public = &mut json.keys[key_index].public;
        let last = public.len() - 1;
        let replacement = if public.ends_with('0') { "1" } else { "0" };
        public.replace_range(last.., replacement);

        match SeedTestVector::from_json(&json) {
            Ok(v) => v,
            Err(e) => panic!("mutated public key failed to decode: {}", e),
        }
    }

    /// Replace the stored secret at `key_index` with another seed's key.
    pub fn with_foreign_secret(&self, key_index: usize) -> SeedTestVector {
        let other = TestFixture::unsigned(b"foreign", key_index + 1);
        let mut v = self.vector.clone();
        v.keys[key_index].secret = other.vector.keys[key_index].secret.clone();
        v
    }

    /// Swap the stored primary address of `key_index` with the next key's.
    pub fn with_swapped_address(&self, key_index: usize) -> SeedTestVector {
        let mut v = self.vector.clone();
        let next = (key_index + 1) % v.keys.len();
        v.keys[key_index].address = self.vector.keys[next].address;
        v
    }

    /// Null one stored signature.
    pub fn with_null_signature(&self, key_index: usize, signature_index: usize) -> SeedTestVector {
        let mut v = self.vector.clone();
        v.keys[key_index].signatures[signature_index] = Signature::ZERO;
        v
    }

    /// Drop the last stored signature of `key_index`.
    pub fn with_missing_signature(&self, key_index: usize) -> SeedTestVector {
        let mut v = self.vector.clone();
        v.keys[key_index].signatures.pop();
        v
    }

    /// Strip every signature.
    pub fn without_signatures(&self) -> SeedTestVector {
        let mut v = self.vector.clone();
        for key in &mut v.keys {
            key.signatures.clear();
        }
        v
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new(b"seed", 3, 3)
    }
}

/// Fixtures for several distinct seeds.
pub fn multi_seed_fixtures(count: usize, keys: usize, hashes: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| TestFixture::new(format!("seed-{}", i).as_bytes(), keys, hashes))
        .collect()
}

/// A memory source serving `fixtures` as `fixture-0`, `fixture-1`, ...
pub fn memory_source(fixtures: &[TestFixture]) -> MemorySource {
    fixtures
        .iter()
        .enumerate()
        .fold(MemorySource::new(), |source, (i, f)| {
            source.with_fixture(f.to_fixture(&format!("fixture-{}", i)))
        })
}

//! Validation of seed vectors against the current key engine.
//!
//! For every key the engine regenerates the keypair from the seed, rederives
//! every artifact, and checks it against what the vector stores. Checks run in
//! a fixed order per key and the first failure is returned verbatim.
//!
//! Three entry points share the per-key check:
//!
//! - [`validate`] walks keys in order and stops at the first failure
//! - [`validate_parallel`] checks keys on the rayon pool and still reports the
//!   lowest-indexed failure
//! - [`validate_all`] reports the first failure of every failing key
//!
//! Keypair regeneration is always sequential since each generation step feeds
//! the next.

use cxkeys_core::{
    generate, recover_pubkey, sign, verify_by_address, verify_by_pubkey, verify_self, AddressCodec, KeyPair,
    PublicKey, SecretKey, Sha256Hash, Signature,
};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{ValidationError, VerificationEntryPoint};
use crate::format::{InputTestVector, KeyTestVector, SeedTestVector};

/// Validate a seed vector, stopping at the first failure.
///
/// `input` must be provided when the vector carries signatures.
pub fn validate(seed_vector: &SeedTestVector, input: Option<&InputTestVector>) -> Result<(), ValidationError> {
    let pairs = regenerate(seed_vector)?;

    for (i, (pair, stored)) in pairs.iter().zip(&seed_vector.keys).enumerate() {
        check_key(i, pair, stored, input).map_err(log_failure)?;
    }

    debug!(keys = seed_vector.keys.len(), "seed vector valid");
    Ok(())
}

/// Validate a seed vector with keys checked in parallel.
///
/// Returns the same error [`validate`] would.
pub fn validate_parallel(
    seed_vector: &SeedTestVector,
    input: Option<&InputTestVector>,
) -> Result<(), ValidationError> {
    let pairs = regenerate(seed_vector)?;

    let failure = pairs
        .par_iter()
        .zip(seed_vector.keys.par_iter())
        .enumerate()
        .find_map_first(|(i, (pair, stored))| check_key(i, pair, stored, input).err());

    match failure {
        Some(e) => Err(log_failure(e)),
        None => {
            debug!(keys = seed_vector.keys.len(), "seed vector valid");
            Ok(())
        }
    }
}

/// Validate every key and collect the first failure of each, in key order.
///
/// An empty result means the vector is valid. A generation fault is the only
/// entry when keys cannot be regenerated at all.
pub fn validate_all(seed_vector: &SeedTestVector, input: Option<&InputTestVector>) -> Vec<ValidationError> {
    let pairs = match regenerate(seed_vector) {
        Ok(pairs) => pairs,
        Err(e) => return vec![e],
    };

    pairs
        .iter()
        .zip(&seed_vector.keys)
        .enumerate()
        .filter_map(|(i, (pair, stored))| check_key(i, pair, stored, input).err())
        .collect()
}

fn regenerate(seed_vector: &SeedTestVector) -> Result<Vec<KeyPair>, ValidationError> {
    debug!(keys = seed_vector.keys.len(), "regenerating keypairs");
    let pairs = generate(&seed_vector.seed, seed_vector.keys.len()).map_err(|e| {
        warn!("keypair generation failed: {}", e);
        ValidationError::Generation(e)
    })?;
    Ok(pairs)
}

fn log_failure(e: ValidationError) -> ValidationError {
    warn!("seed vector validation failed: {}", e);
    e
}

/// Run every check for one key, in order.
fn check_key(
    key_index: usize,
    pair: &KeyPair,
    stored: &KeyTestVector,
    input: Option<&InputTestVector>,
) -> Result<(), ValidationError> {
    // 1. Secret
    if stored.secret != pair.secret {
        return Err(ValidationError::SecretMismatch { key_index });
    }

    // 2. Public key
    let public = pair
        .secret
        .public_key()
        .map_err(|_| ValidationError::InvalidSecretKey { key_index })?;
    compare_public(key_index, &stored.public, &public)?;

    // 3. Primary address, then 4. legacy address
    check_address(key_index, &pair.secret, &public, &stored.address)?;
    check_address(key_index, &pair.secret, &public, &stored.bitcoin_address)?;

    // 5. Curve validity of both keys
    pair.secret
        .verify()
        .map_err(|_| ValidationError::InvalidSecretKey { key_index })?;
    public
        .verify()
        .map_err(|_| ValidationError::InvalidPublicKey { key_index })?;

    // 6. Signatures
    match input {
        None if !stored.signatures.is_empty() => Err(ValidationError::UnexpectedSignatures {
            key_index,
            count: stored.signatures.len(),
        }),
        None => Ok(()),
        Some(input) => check_signatures(key_index, &pair.secret, &public, stored, input),
    }
}

fn check_address<A: AddressCodec>(
    key_index: usize,
    secret: &SecretKey,
    public: &PublicKey,
    stored: &A,
) -> Result<(), ValidationError> {
    let derived = A::from_public_key(public).map_err(|_| ValidationError::InvalidPublicKey { key_index })?;
    let direct = A::from_secret_key(secret).map_err(|_| ValidationError::InvalidSecretKey { key_index })?;
    compare_address(key_index, stored, &derived, &direct)
}

fn compare_public(key_index: usize, stored: &PublicKey, derived: &PublicKey) -> Result<(), ValidationError> {
    if derived.is_null() {
        return Err(ValidationError::NullPublicKey { key_index });
    }
    if stored != derived {
        return Err(ValidationError::PublicMismatch { key_index });
    }
    Ok(())
}

/// `derived` comes from the public key, `direct` straight from the secret.
fn compare_address<A: AddressCodec>(
    key_index: usize,
    stored: &A,
    derived: &A,
    direct: &A,
) -> Result<(), ValidationError> {
    let format = A::FORMAT;
    if derived.is_null() {
        return Err(ValidationError::NullAddress { key_index, format });
    }
    if stored != derived {
        return Err(ValidationError::AddressMismatch { key_index, format });
    }
    if direct != derived {
        return Err(ValidationError::DerivationPathDivergence { key_index, format });
    }
    Ok(())
}

fn check_signatures(
    key_index: usize,
    secret: &SecretKey,
    public: &PublicKey,
    stored: &KeyTestVector,
    input: &InputTestVector,
) -> Result<(), ValidationError> {
    if stored.signatures.len() != input.hashes.len() {
        return Err(ValidationError::SignatureCountMismatch {
            key_index,
            expected: input.hashes.len(),
            actual: stored.signatures.len(),
        });
    }

    for (signature_index, (sig, hash)) in stored.signatures.iter().zip(&input.hashes).enumerate() {
        check_signature(key_index, signature_index, secret, public, stored, sig, hash)?;
    }
    Ok(())
}

fn check_signature(
    key_index: usize,
    signature_index: usize,
    secret: &SecretKey,
    public: &PublicKey,
    stored: &KeyTestVector,
    sig: &Signature,
    hash: &Sha256Hash,
) -> Result<(), ValidationError> {
    if sig.is_null() {
        return Err(ValidationError::NullSignature {
            key_index,
            signature_index,
        });
    }

    let failed = |entry_point| {
        move |source| ValidationError::SignatureVerificationFailed {
            key_index,
            signature_index,
            entry_point,
            source,
        }
    };

    verify_by_pubkey(sig, hash, public).map_err(failed(VerificationEntryPoint::PublicKey))?;
    verify_by_address(sig, hash, &stored.address).map_err(failed(VerificationEntryPoint::Address))?;
    verify_self(sig, hash).map_err(failed(VerificationEntryPoint::SelfCheck))?;

    let recovered = recover_pubkey(sig, hash).map_err(failed(VerificationEntryPoint::Recovery))?;
    compare_recovered(key_index, signature_index, &recovered, public)?;

    // Fresh signatures are never compared to stored ones; signing uses a random nonce.
    match sign(hash, secret) {
        Ok(fresh) if !fresh.is_null() => Ok(()),
        _ => Err(ValidationError::SigningFailed {
            key_index,
            signature_index,
        }),
    }
}

fn compare_recovered(
    key_index: usize,
    signature_index: usize,
    recovered: &PublicKey,
    derived: &PublicKey,
) -> Result<(), ValidationError> {
    if recovered != derived {
        return Err(ValidationError::RecoveredKeyMismatch {
            key_index,
            signature_index,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::KeyTestVectorJson;
    use cxkeys_core::{Address, AddressFormat, BitcoinAddress, CoreError, GenerationFault, Ripemd160Hash};

    fn input(n: u8) -> InputTestVector {
        InputTestVector::new((0..n).map(|i| Sha256Hash::hash(&[i])).collect())
    }

    fn signed_vector(seed: &[u8], keys: usize, hashes: u8) -> (SeedTestVector, InputTestVector) {
        let input = input(hashes);
        let v = SeedTestVector::generate(seed, keys, Some(&input)).unwrap();
        (v, input)
    }

    fn mutate_json(v: &SeedTestVector, f: impl FnOnce(&mut Vec<KeyTestVectorJson>)) -> SeedTestVector {
        let mut json = v.to_json();
        f(&mut json.keys);
        SeedTestVector::from_json(&json).unwrap()
    }

    #[test]
    fn test_valid_vector_with_signatures() {
        let (v, input) = signed_vector(b"valid", 3, 2);
        assert_eq!(validate(&v, Some(&input)), Ok(()));
        assert_eq!(validate_parallel(&v, Some(&input)), Ok(()));
        assert!(validate_all(&v, Some(&input)).is_empty());
    }

    #[test]
    fn test_valid_vector_without_signatures() {
        let v = SeedTestVector::generate(b"unsigned", 4, None).unwrap();
        assert_eq!(validate(&v, None), Ok(()));
    }

    #[test]
    fn test_one_key_no_signatures_one_hash_is_count_mismatch() {
        let v = SeedTestVector::generate(b"count", 1, None).unwrap();
        assert_eq!(
            validate(&v, Some(&input(1))),
            Err(ValidationError::SignatureCountMismatch {
                key_index: 0,
                expected: 1,
                actual: 0,
            })
        );
    }

    #[test]
    fn test_signatures_without_input_are_unexpected() {
        let (v, _) = signed_vector(b"unexpected", 2, 3);
        assert_eq!(
            validate(&v, None),
            Err(ValidationError::UnexpectedSignatures { key_index: 0, count: 3 })
        );
    }

    #[test]
    fn test_public_hex_mutation_reports_exact_index() {
        let v = SeedTestVector::generate(b"mutate", 4, None).unwrap();
        let corrupted = mutate_json(&v, |keys| {
            let flipped = if keys[2].public.ends_with('0') { "1" } else { "0" };
            let last = keys[2].public.len() - 1;
            keys[2].public.replace_range(last.., flipped);
        });

        assert_eq!(validate(&corrupted, None), Err(ValidationError::PublicMismatch { key_index: 2 }));
        assert_eq!(
            validate_all(&corrupted, None),
            vec![ValidationError::PublicMismatch { key_index: 2 }]
        );
    }

    #[test]
    fn test_secret_mismatch() {
        let v = SeedTestVector::generate(b"secret", 2, None).unwrap();
        let other = SeedTestVector::generate(b"other", 2, None).unwrap();
        let mut corrupted = v.clone();
        corrupted.keys[1].secret = other.keys[1].secret.clone();

        assert_eq!(validate(&corrupted, None), Err(ValidationError::SecretMismatch { key_index: 1 }));
    }

    #[test]
    fn test_address_mismatch_names_format() {
        let v = SeedTestVector::generate(b"address", 2, None).unwrap();
        let mut corrupted = v.clone();
        corrupted.keys[0].bitcoin_address = v.keys[1].bitcoin_address;

        assert_eq!(
            validate(&corrupted, None),
            Err(ValidationError::AddressMismatch {
                key_index: 0,
                format: AddressFormat::Legacy,
            })
        );

        let mut corrupted = v.clone();
        corrupted.keys[1].address = v.keys[0].address;
        assert_eq!(
            validate(&corrupted, None),
            Err(ValidationError::AddressMismatch {
                key_index: 1,
                format: AddressFormat::Primary,
            })
        );
    }

    #[test]
    fn test_null_signature() {
        let (mut v, input) = signed_vector(b"null-sig", 1, 2);
        v.keys[0].signatures[1] = Signature::ZERO;

        assert_eq!(
            validate(&v, Some(&input)),
            Err(ValidationError::NullSignature {
                key_index: 0,
                signature_index: 1,
            })
        );
    }

    #[test]
    fn test_signature_from_other_key_fails_pubkey_entry_point() {
        let (mut v, input) = signed_vector(b"swap", 2, 1);
        v.keys[0].signatures[0] = v.keys[1].signatures[0];

        match validate(&v, Some(&input)) {
            Err(ValidationError::SignatureVerificationFailed {
                key_index,
                signature_index,
                entry_point,
                source,
            }) => {
                assert_eq!((key_index, signature_index), (0, 0));
                assert_eq!(entry_point, VerificationEntryPoint::PublicKey);
                assert_eq!(source, CoreError::PublicKeyMismatch);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_signature_over_wrong_hash_fails() {
        let (v, input) = signed_vector(b"hash", 1, 2);
        let mut swapped = input.clone();
        swapped.hashes.swap(0, 1);

        let err = validate(&v, Some(&swapped)).unwrap_err();
        assert_eq!(err.key_index(), Some(0));
        assert_eq!(err.signature_index(), Some(0));
    }

    #[test]
    fn test_empty_seed_is_generation_fault() {
        let v = SeedTestVector {
            seed: Vec::new(),
            keys: Vec::new(),
        };
        assert_eq!(
            validate(&v, None),
            Err(ValidationError::Generation(GenerationFault::EmptySeed))
        );
        assert_eq!(
            validate_all(&v, None),
            vec![ValidationError::Generation(GenerationFault::EmptySeed)]
        );
    }

    #[test]
    fn test_parallel_reports_lowest_index() {
        let v = SeedTestVector::generate(b"parallel", 8, None).unwrap();
        let other = SeedTestVector::generate(b"elsewhere", 8, None).unwrap();
        let mut corrupted = v.clone();
        for i in [6, 3, 5] {
            corrupted.keys[i].public = other.keys[i].public;
        }

        let sequential = validate(&corrupted, None);
        assert_eq!(sequential, Err(ValidationError::PublicMismatch { key_index: 3 }));
        assert_eq!(validate_parallel(&corrupted, None), sequential);

        let all: Vec<_> = validate_all(&corrupted, None)
            .iter()
            .filter_map(ValidationError::key_index)
            .collect();
        assert_eq!(all, vec![3, 5, 6]);
    }

    #[test]
    fn test_stored_address_for_other_key_is_mismatch() {
        let v = SeedTestVector::generate(b"addr", 1, None).unwrap();
        let mut corrupted = v.clone();
        let other = KeyPair::generate();
        corrupted.keys[0].address = Address::from_public_key(&other.public).unwrap();

        assert!(matches!(
            validate(&corrupted, None),
            Err(ValidationError::AddressMismatch { key_index: 0, .. })
        ));
    }

    #[test]
    fn test_null_public_key() {
        let stored = SeedTestVector::generate(b"null-public", 1, None).unwrap().keys[0].public;
        assert_eq!(
            compare_public(4, &stored, &PublicKey::from_bytes([0u8; 33])),
            Err(ValidationError::NullPublicKey { key_index: 4 })
        );
        assert_eq!(compare_public(4, &stored, &stored), Ok(()));
    }

    #[test]
    fn test_null_address() {
        let null = Address::from_parts(0, Ripemd160Hash::ZERO);
        assert_eq!(
            compare_address(2, &null, &null, &null),
            Err(ValidationError::NullAddress {
                key_index: 2,
                format: AddressFormat::Primary,
            })
        );
    }

    #[test]
    fn test_derivation_path_divergence() {
        let v = SeedTestVector::generate(b"diverge", 2, None).unwrap();
        let (this, other) = (&v.keys[0], &v.keys[1]);

        assert_eq!(
            compare_address(0, &this.address, &this.address, &other.address),
            Err(ValidationError::DerivationPathDivergence {
                key_index: 0,
                format: AddressFormat::Primary,
            })
        );
        assert_eq!(
            compare_address(0, &this.bitcoin_address, &this.bitcoin_address, &other.bitcoin_address),
            Err(ValidationError::DerivationPathDivergence {
                key_index: 0,
                format: AddressFormat::Legacy,
            })
        );
        assert_eq!(
            compare_address::<BitcoinAddress>(0, &this.bitcoin_address, &this.bitcoin_address, &this.bitcoin_address),
            Ok(())
        );
    }

    #[test]
    fn test_recovered_key_mismatch() {
        let v = SeedTestVector::generate(b"recovered", 2, None).unwrap();
        assert_eq!(
            compare_recovered(1, 3, &v.keys[0].public, &v.keys[1].public),
            Err(ValidationError::RecoveredKeyMismatch {
                key_index: 1,
                signature_index: 3,
            })
        );
        assert_eq!(compare_recovered(1, 3, &v.keys[1].public, &v.keys[1].public), Ok(()));
    }
}

//! # cxkeys Testkit
//!
//! Testing utilities for cxkeys.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Seeds with the pinned identity of their first key
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Valid seed vectors plus helpers that corrupt them
//!
//! ## Golden Vectors
//!
//! ```rust
//! use cxkeys_testkit::vectors::{all_vectors, verify_vector};
//!
//! for vector in all_vectors() {
//!     verify_vector(&vector).unwrap();
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use cxkeys_testkit::generators::SeedParams;
//!
//! proptest! {
//!     #[test]
//!     fn generation_is_deterministic(params: SeedParams) {
//!         let a = cxkeys_core::generate(&params.seed, params.keys).unwrap();
//!         let b = cxkeys_core::generate(&params.seed, params.keys).unwrap();
//!         prop_assert_eq!(a, b);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use cxkeys_suite::{validate, ValidationError};
//! use cxkeys_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new(b"seed", 3, 2);
//! let corrupted = fixture.with_public_hex_mutated(2);
//! assert_eq!(
//!     validate(&corrupted, fixture.input()),
//!     Err(ValidationError::PublicMismatch { key_index: 2 })
//! );
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{memory_source, multi_seed_fixtures, TestFixture};
pub use generators::SeedParams;
pub use vectors::{all_vectors, generate_seed_vector, input_vector, verify_all_vectors, GoldenVector};

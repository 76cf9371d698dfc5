//! # cxkeys Suite
//!
//! The test-vector exchange format and the engine that validates vectors
//! against the current key engine.
//!
//! ## Exchange format
//!
//! A [`SeedTestVector`] records a seed and every artifact derived from its
//! keys. An [`InputTestVector`] lists the digests those keys signed. Both
//! read and write a stable JSON layout, see [`format`].
//!
//! ## Validation
//!
//! ```rust
//! use cxkeys_suite::{validate, InputTestVector, SeedTestVector};
//! use cxkeys_core::Sha256Hash;
//!
//! let input = InputTestVector::new(vec![Sha256Hash::hash(b"digest")]);
//! let vector = SeedTestVector::generate(b"seed", 2, Some(&input)).unwrap();
//! assert!(validate(&vector, Some(&input)).is_ok());
//! ```

pub mod error;
pub mod format;
pub mod validation;

pub use error::{FormatError, ValidationError, VerificationEntryPoint};
pub use format::{
    InputTestVector, InputTestVectorJson, KeyTestVector, KeyTestVectorJson, SeedTestVector, SeedTestVectorJson,
};
pub use validation::{validate, validate_all, validate_parallel};

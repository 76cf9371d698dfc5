//! Validation run configuration.

/// Default name of the input digest file in a golden directory.
pub const DEFAULT_INPUT_FILE: &str = "input-hashes.golden";

/// Default file name prefix of seed fixtures.
pub const DEFAULT_SEED_PREFIX: &str = "seed-";

/// File extension shared by every golden fixture.
pub const GOLDEN_EXTENSION: &str = "golden";

/// Configuration for a [`Validator`](crate::Validator).
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Check the keys of each fixture on the rayon pool.
    pub parallel: bool,
    /// Stop at the first failure. When false, every fixture is checked and
    /// every failing key reported.
    pub fail_fast: bool,
    /// Input digest file name, relative to the fixture directory.
    pub input_file: String,
    /// File name prefix selecting seed fixtures.
    pub seed_prefix: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            fail_fast: true,
            input_file: DEFAULT_INPUT_FILE.to_string(),
            seed_prefix: DEFAULT_SEED_PREFIX.to_string(),
        }
    }
}

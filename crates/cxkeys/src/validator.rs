//! Validating fixture sets.
//!
//! Fixtures are loaded through a [`FixtureSource`] and each one is validated
//! on the blocking pool, since regenerating and verifying keys is CPU-bound.

use cxkeys_suite::{validate, validate_all, validate_parallel, ValidationError};
use tracing::{debug, info, warn};

use crate::config::ValidatorConfig;
use crate::error::{Error, Result};
use crate::source::{Fixture, FixtureSource};

/// Outcome of validating one fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureReport {
    pub name: String,
    pub keys: usize,
    /// Failures in key order. In fail-fast mode there is at most one.
    pub errors: Vec<ValidationError>,
}

impl FixtureReport {
    /// Whether the fixture passed.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcome of a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Reports for the fixtures that were checked, in name order.
    pub fixtures: Vec<FixtureReport>,
}

impl ValidationReport {
    /// Whether every checked fixture passed.
    pub fn is_ok(&self) -> bool {
        self.fixtures.iter().all(FixtureReport::is_ok)
    }

    /// The first failure of the run, if any.
    pub fn first_failure(&self) -> Option<(&str, &ValidationError)> {
        self.fixtures
            .iter()
            .find_map(|f| f.errors.first().map(|e| (f.name.as_str(), e)))
    }
}

/// Runs validation over every fixture of a source.
pub struct Validator<S: FixtureSource> {
    source: S,
    config: ValidatorConfig,
}

impl<S: FixtureSource> Validator<S> {
    /// Create a validator.
    pub fn new(source: S, config: ValidatorConfig) -> Self {
        Self { source, config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate every fixture and report the outcome.
    ///
    /// In fail-fast mode the run stops after the first failing fixture. An
    /// empty source is an error.
    pub async fn run(&self) -> Result<ValidationReport> {
        let fixtures = self.source.load().await?;
        if fixtures.is_empty() {
            return Err(Error::NoFixtures);
        }
        info!(
            fixtures = fixtures.len(),
            parallel = self.config.parallel,
            fail_fast = self.config.fail_fast,
            "validating fixtures"
        );

        let mut report = ValidationReport::default();
        for fixture in fixtures {
            let config = self.config.clone();
            let result = tokio::task::spawn_blocking(move || check_fixture(&fixture, &config)).await?;

            if result.is_ok() {
                debug!(fixture = %result.name, keys = result.keys, "fixture valid");
            } else {
                warn!(fixture = %result.name, failures = result.errors.len(), "fixture invalid");
            }

            let stop = self.config.fail_fast && !result.is_ok();
            report.fixtures.push(result);
            if stop {
                break;
            }
        }

        info!(ok = report.is_ok(), checked = report.fixtures.len(), "validation finished");
        Ok(report)
    }

    /// Validate every fixture, returning the first failure as an error.
    pub async fn run_strict(&self) -> Result<()> {
        let report = self.run().await?;
        match report.first_failure() {
            Some((fixture, source)) => Err(Error::Validation {
                fixture: fixture.to_string(),
                source: source.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn check_fixture(fixture: &Fixture, config: &ValidatorConfig) -> FixtureReport {
    let input = fixture.input.as_deref();

    let errors = if !config.fail_fast {
        validate_all(&fixture.seed, input)
    } else if config.parallel {
        validate_parallel(&fixture.seed, input).err().into_iter().collect()
    } else {
        validate(&fixture.seed, input).err().into_iter().collect()
    };

    FixtureReport {
        name: fixture.name.clone(),
        keys: fixture.seed.keys.len(),
        errors,
    }
}

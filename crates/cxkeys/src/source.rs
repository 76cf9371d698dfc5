//! Fixture sources: where seed vectors and their input digests come from.
//!
//! A golden directory holds one input digest file and any number of seed
//! files:
//!
//! ```text
//! golden/
//!   input-hashes.golden
//!   seed-0000.golden
//!   seed-0001.golden
//! ```
//!
//! A seed fixture whose keys carry signatures is paired with the input
//! vector; one without signatures is validated with no input vector.

use async_trait::async_trait;
use cxkeys_suite::{InputTestVector, SeedTestVector};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::debug;

use crate::config::{ValidatorConfig, GOLDEN_EXTENSION};
use crate::error::{Error, Result};

/// One seed vector ready to validate.
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Name used in reports, usually the file name.
    pub name: String,
    pub seed: SeedTestVector,
    /// Digests the seed's signatures cover, if it has any.
    pub input: Option<Arc<InputTestVector>>,
}

impl Fixture {
    /// Create a fixture.
    pub fn new(name: impl Into<String>, seed: SeedTestVector, input: Option<InputTestVector>) -> Self {
        Self {
            name: name.into(),
            seed,
            input: input.map(Arc::new),
        }
    }
}

/// Async interface for loading fixture sets.
#[async_trait]
pub trait FixtureSource: Send + Sync {
    /// Load every seed fixture, in name order.
    async fn load(&self) -> Result<Vec<Fixture>>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Directory source
// ─────────────────────────────────────────────────────────────────────────────

/// Loads fixtures from a golden directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    input_file: String,
    seed_prefix: String,
}

impl DirectorySource {
    /// Read `dir` with the default file names.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_config(dir, &ValidatorConfig::default())
    }

    /// Read `dir` with the file names from `config`.
    pub fn with_config(dir: impl Into<PathBuf>, config: &ValidatorConfig) -> Self {
        Self {
            dir: dir.into(),
            input_file: config.input_file.clone(),
            seed_prefix: config.seed_prefix.clone(),
        }
    }

    /// The directory being read.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn is_seed_file(&self, name: &str) -> bool {
        name.starts_with(&self.seed_prefix)
            && Path::new(name).extension().and_then(|e| e.to_str()) == Some(GOLDEN_EXTENSION)
    }

    async fn load_input(&self) -> Result<Option<Arc<InputTestVector>>> {
        let path = self.dir.join(&self.input_file);
        match fs::read(&path).await {
            Ok(bytes) => {
                let input = InputTestVector::from_json_bytes(&bytes).map_err(|source| Error::Format {
                    name: self.input_file.clone(),
                    source,
                })?;
                debug!(hashes = input.len(), "loaded input vector");
                Ok(Some(Arc::new(input)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no input vector");
                Ok(None)
            }
            Err(source) => Err(Error::Io { path, source }),
        }
    }

    async fn seed_file_names(&self) -> Result<Vec<String>> {
        let io = |source| Error::Io {
            path: self.dir.clone(),
            source,
        };

        let mut entries = fs::read_dir(&self.dir).await.map_err(io)?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io)? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if self.is_seed_file(&name) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}

#[async_trait]
impl FixtureSource for DirectorySource {
    async fn load(&self) -> Result<Vec<Fixture>> {
        let input = self.load_input().await?;
        let names = self.seed_file_names().await?;

        let mut fixtures = Vec::with_capacity(names.len());
        for name in names {
            let path = self.dir.join(&name);
            let bytes = match fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(source) => return Err(Error::Io { path, source }),
            };
            let seed = SeedTestVector::from_json_bytes(&bytes).map_err(|source| Error::Format {
                name: name.clone(),
                source,
            })?;

            let input = if seed.has_signatures() { input.clone() } else { None };
            debug!(fixture = %name, keys = seed.keys.len(), signed = input.is_some(), "loaded fixture");
            fixtures.push(Fixture { name, seed, input });
        }

        Ok(fixtures)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory source
// ─────────────────────────────────────────────────────────────────────────────

/// Serves fixtures held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    fixtures: Vec<Fixture>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fixture.
    pub fn push(&mut self, fixture: Fixture) {
        self.fixtures.push(fixture);
    }

    /// Add a fixture, builder style.
    pub fn with_fixture(mut self, fixture: Fixture) -> Self {
        self.push(fixture);
        self
    }
}

#[async_trait]
impl FixtureSource for MemorySource {
    async fn load(&self) -> Result<Vec<Fixture>> {
        let mut fixtures = self.fixtures.clone();
        fixtures.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(fixtures)
    }
}

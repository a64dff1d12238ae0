//! Build Result
//!
//! Result types for build operations.

use std::path::PathBuf;

use crate::domain::value_objects::{ResolvedSeed, SeedDigest};

/// Outcome of a successful build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Linked artifact, as named by the manifest
    pub output: PathBuf,
    /// Directory the front-end wrote C sources and the manifest into
    pub scratch_dir: PathBuf,
    /// Compile steps replayed
    pub compiled: usize,
    /// Compile steps that received obfuscation flags
    pub obfuscated: usize,
    /// Backend key used, if any step was obfuscated
    pub seed: Option<SeedDigest>,
    /// Generated seed material, so a random build can be repeated with `--seed`
    pub generated_seed: Option<String>,
}

impl BuildReport {
    pub(crate) fn new(output: PathBuf, scratch_dir: PathBuf) -> Self {
        Self {
            output,
            scratch_dir,
            compiled: 0,
            obfuscated: 0,
            seed: None,
            generated_seed: None,
        }
    }

    pub(crate) fn with_seed(mut self, seed: Option<&ResolvedSeed>) -> Self {
        if let Some(seed) = seed {
            self.seed = Some(seed.digest.clone());
            self.generated_seed = seed.generated.then(|| seed.material.clone());
        }
        self
    }

    pub fn plain(&self) -> usize {
        self.compiled - self.obfuscated
    }
}

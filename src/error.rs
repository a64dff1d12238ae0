//! Error types for Denim
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::value_objects::{BuildStage, ObfuscationFeature};

/// Result type alias for Denim operations
pub type DenimResult<T> = Result<T, DenimError>;

/// Main error type for Denim operations
#[derive(Error, Debug)]
pub enum DenimError {
    /// An enabled obfuscation feature was given a value above its limit
    #[error("{feature} cannot exceed {max} (got {value})")]
    OutOfRange {
        feature: ObfuscationFeature,
        value: i64,
        max: i64,
    },

    /// Front-end or backend executable could not be found or started
    #[error("{tool} not found at '{}' - {hint}", .path.display())]
    ExternalToolMissing {
        tool: String,
        path: PathBuf,
        hint: String,
    },

    /// A project name that is not a single plain path component
    #[error("invalid project name '{name}': must be a single file name without '/', '.' or '..'")]
    InvalidProjectName { name: String },

    /// A scratch directory that does not sit strictly below the scratch root
    #[error("refusing to use scratch directory {} outside {}", .dir.display(), .root.display())]
    ScratchOutsideRoot { dir: PathBuf, root: PathBuf },

    /// The front-end did not leave a manifest in the scratch directory
    #[error("no build manifest found in {}", .dir.display())]
    ManifestNotFound { dir: PathBuf },

    /// The manifest exists but does not decode into the expected schema
    #[error("malformed build manifest {}: {message}", .path.display())]
    ManifestMalformed { path: PathBuf, message: String },

    /// A compile record did not have the `[source, command]` shape
    #[error("malformed compile step #{index}: {step:?}")]
    MalformedStep { index: usize, step: Vec<String> },

    /// An external compiler or linker invocation failed
    #[error("{stage} failed ({}){}", exit_label(.code), stderr_suffix(.stderr))]
    ExternalProcess {
        stage: BuildStage,
        code: Option<i32>,
        stderr: String,
    },

    /// The OS random source could not produce seed material
    #[error("failed to gather seed entropy: {0}")]
    Entropy(String),

    /// Invalid configuration file
    #[error("invalid config in {}: {message}", .file.display())]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DenimError {
    /// Stage the error originated from, when it came out of the pipeline.
    pub fn stage(&self) -> Option<&BuildStage> {
        match self {
            DenimError::ExternalProcess { stage, .. } => Some(stage),
            _ => None,
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(":\n{}", trimmed)
    }
}

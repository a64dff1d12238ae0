//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    random_count, BogusControlFlow, ControlFlowFlattening, InstructionSubstitution,
    ObfuscationParameters, MAX_PROBABILITY,
};
use crate::error::DenimResult;

use super::loader::{self, ConfigWarning};

/// Upper bound for a randomly chosen bogus-control-flow loop count
pub const RANDOM_BCF_LOOP_MAX: u32 = 4;
/// Upper bound for a randomly chosen substitution loop count
pub const RANDOM_SUB_LOOP_MAX: u32 = 2;
/// Upper bound for a randomly chosen flattening split count
pub const RANDOM_SPLIT_MAX: u32 = 4;

/// External tool locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// Front-end compiler, resolved through `PATH` when not absolute
    #[serde(default = "default_frontend")]
    pub frontend: PathBuf,

    /// Obfuscator-LLVM install root (contains `bin/clang`)
    #[serde(default)]
    pub backend_root: Option<PathBuf>,

    /// Directories prepended to the backend's `PATH` after its own `bin/`
    #[serde(default)]
    pub extra_path: Vec<PathBuf>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            frontend: default_frontend(),
            backend_root: None,
            extra_path: Vec::new(),
        }
    }
}

impl ToolchainConfig {
    /// Explicit backend root, or `<state_dir>/ollvm/build`
    pub fn backend_root_or_default(&self, state_dir: &Path) -> PathBuf {
        self.backend_root
            .clone()
            .unwrap_or_else(|| state_dir.join("ollvm").join("build"))
    }

    /// Configured extra paths, or the bundled MinGW `bin/` on Windows
    pub fn extra_path_or_default(&self, state_dir: &Path) -> Vec<PathBuf> {
        if !self.extra_path.is_empty() || !cfg!(windows) {
            return self.extra_path.clone();
        }
        vec![state_dir.join("mingw64").join("bin")]
    }
}

fn default_frontend() -> PathBuf {
    PathBuf::from("nim")
}

/// Build layout configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BuildConfig {
    /// Parent of per-project scratch directories
    #[serde(default)]
    pub scratch_root: Option<PathBuf>,

    /// Obfuscate every translation unit, not only project-owned ones
    #[serde(default)]
    pub obfuscate_all: bool,
}

impl BuildConfig {
    /// Explicit scratch root, or `<state_dir>/nimcache`
    pub fn scratch_root_or_default(&self, state_dir: &Path) -> PathBuf {
        self.scratch_root
            .clone()
            .unwrap_or_else(|| state_dir.join("nimcache"))
    }
}

/// Default obfuscation settings
///
/// Counts of `0` are replaced with a random count when parameters are built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObfuscationConfig {
    #[serde(default = "default_true")]
    pub bcf: bool,

    #[serde(default)]
    pub bcf_loop: i64,

    #[serde(default = "default_probability")]
    pub bcf_probability: i64,

    #[serde(default = "default_true")]
    pub sub: bool,

    #[serde(default)]
    pub sub_loop: i64,

    #[serde(default = "default_true")]
    pub flatten: bool,

    #[serde(default)]
    pub flatten_split: i64,

    /// Seed material; empty generates a fresh seed per build
    #[serde(default)]
    pub seed: String,
}

impl Default for ObfuscationConfig {
    fn default() -> Self {
        Self {
            bcf: true,
            bcf_loop: 0,
            bcf_probability: default_probability(),
            sub: true,
            sub_loop: 0,
            flatten: true,
            flatten_split: 0,
            seed: String::new(),
        }
    }
}

impl ObfuscationConfig {
    /// Build the parameters for one build, rolling random counts where `0`
    /// was requested.
    ///
    /// Explicit values pass through untouched, so out-of-range input is
    /// still reported by `ObfuscationParameters::validate`.
    pub fn to_parameters(&self) -> DenimResult<ObfuscationParameters> {
        let bogus_control_flow = BogusControlFlow {
            enabled: self.bcf,
            loop_count: resolve_count(self.bcf, self.bcf_loop, RANDOM_BCF_LOOP_MAX)?,
            probability_percent: self.bcf_probability,
        };
        let instruction_substitution = InstructionSubstitution {
            enabled: self.sub,
            loop_count: resolve_count(self.sub, self.sub_loop, RANDOM_SUB_LOOP_MAX)?,
        };
        let control_flow_flattening = ControlFlowFlattening {
            enabled: self.flatten,
            split_count: resolve_count(self.flatten, self.flatten_split, RANDOM_SPLIT_MAX)?,
        };

        Ok(ObfuscationParameters::new(
            bogus_control_flow,
            instruction_substitution,
            control_flow_flattening,
            self.seed.clone(),
        ))
    }
}

fn resolve_count(enabled: bool, value: i64, random_max: u32) -> DenimResult<i64> {
    if enabled && value == 0 {
        random_count(random_max)
    } else {
        Ok(value)
    }
}

fn default_probability() -> i64 {
    MAX_PROBABILITY
}

fn default_true() -> bool {
    true
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub toolchain: ToolchainConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub obfuscation: ObfuscationConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load `<state_dir>/config.toml` if present, then apply `DENIM_*` overrides
    pub fn load_user(state_dir: &Path) -> DenimResult<(Self, Vec<ConfigWarning>)> {
        loader::load_user(state_dir)
    }
}

//! Configuration module for Denim
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (DENIM_*)
//! 3. User config (~/.denim/config.toml)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    apply_env, parse_with_warnings, ConfigWarning, CONFIG_FILE_NAME, ENV_BACKEND_ROOT,
    ENV_EXTRA_PATH, ENV_FRONTEND, ENV_SCRATCH_ROOT, ENV_SEED,
};
pub use types::{
    BuildConfig, ColorMode, Config, ObfuscationConfig, OutputConfig, ToolchainConfig,
    RANDOM_BCF_LOOP_MAX, RANDOM_SPLIT_MAX, RANDOM_SUB_LOOP_MAX,
};

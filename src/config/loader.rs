//! Configuration loading

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DenimError, DenimResult};

use super::types::Config;

/// File name of the user config under `~/.denim`
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const ENV_FRONTEND: &str = "DENIM_FRONTEND";
pub const ENV_BACKEND_ROOT: &str = "DENIM_BACKEND_ROOT";
pub const ENV_SCRATCH_ROOT: &str = "DENIM_SCRATCH_ROOT";
pub const ENV_EXTRA_PATH: &str = "DENIM_EXTRA_PATH";
pub const ENV_SEED: &str = "DENIM_SEED";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> DenimResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

/// Parse TOML `content` that was read from `path`.
pub fn parse_with_warnings(content: &str, path: &Path) -> DenimResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| DenimError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load the user config (if any) and apply environment overrides
pub fn load_user(state_dir: &Path) -> DenimResult<(Config, Vec<ConfigWarning>)> {
    let path = state_dir.join(CONFIG_FILE_NAME);
    let (config, warnings) = if path.is_file() {
        tracing::debug!(config = %path.display(), "loading user config");
        load_with_warnings(&path)?
    } else {
        (Config::default(), Vec::new())
    };
    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (DENIM_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_env(config, |key| std::env::var_os(key))
}

/// Apply overrides from `lookup`; empty values are ignored.
pub fn apply_env<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<OsString>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(frontend) = get(ENV_FRONTEND) {
        config.toolchain.frontend = PathBuf::from(frontend);
    }

    if let Some(root) = get(ENV_BACKEND_ROOT) {
        config.toolchain.backend_root = Some(PathBuf::from(root));
    }

    if let Some(root) = get(ENV_SCRATCH_ROOT) {
        config.build.scratch_root = Some(PathBuf::from(root));
    }

    // Platform path-list syntax (`:` on Unix, `;` on Windows)
    if let Some(extra) = get(ENV_EXTRA_PATH) {
        config.toolchain.extra_path = std::env::split_paths(&extra)
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
    }

    if let Some(seed) = get(ENV_SEED) {
        config.obfuscation.seed = seed.to_string_lossy().into_owned();
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "toolchain",
        "frontend",
        "backend_root",
        "extra_path",
        "build",
        "scratch_root",
        "obfuscate_all",
        "obfuscation",
        "bcf",
        "bcf_loop",
        "bcf_probability",
        "sub",
        "sub_loop",
        "flatten",
        "flatten_split",
        "seed",
        "output",
        "color",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}

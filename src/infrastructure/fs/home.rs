//! Home directory resolution with test isolation support.
//!
//! `dirs::home_dir()` ignores `HOME` on Windows, so integration tests point
//! the tool at a throwaway home through `DENIM_TEST_HOME` instead.
//!
//! Everything denim keeps under `~/.denim` (config, front-end cache, default
//! backend install) is resolved from here.

use std::path::PathBuf;

/// Environment variable overriding the home directory (tests only).
pub const DENIM_TEST_HOME_VAR: &str = "DENIM_TEST_HOME";

/// Name of the per-user state directory under home
pub const DENIM_DIR: &str = ".denim";

/// Home directory for denim-internal paths.
///
/// Returns `None` if `DENIM_TEST_HOME` is unset and the platform cannot
/// resolve a home directory.
pub fn denim_home_dir() -> Option<PathBuf> {
    home_dir_from(std::env::var_os(DENIM_TEST_HOME_VAR).map(PathBuf::from))
}

/// `~/.denim`
pub fn denim_state_dir() -> Option<PathBuf> {
    denim_home_dir().map(|home| home.join(DENIM_DIR))
}

fn home_dir_from(test_home: Option<PathBuf>) -> Option<PathBuf> {
    test_home
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(dirs::home_dir)
}

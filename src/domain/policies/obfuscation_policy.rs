//! Obfuscation Policy
//!
//! Decides which translation units go through the obfuscating passes.

use std::path::Path;

/// File-name prefix the front-end gives to project-owned translation units
pub const MARKED_UNIT_PREFIX: &str = "@";

/// Which translation units are obfuscated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObfuscationPolicy {
    /// Only units whose file name carries the marker prefix
    #[default]
    MarkedUnitsOnly,
    /// Every unit, including the runtime and standard library
    AllUnits,
}

impl ObfuscationPolicy {
    pub fn from_obfuscate_all(all: bool) -> Self {
        if all {
            Self::AllUnits
        } else {
            Self::MarkedUnitsOnly
        }
    }

    /// A unit is obfuscated when it is marked or the policy covers all units.
    pub fn should_obfuscate(&self, source: &Path) -> bool {
        is_marked_unit(source) || *self == Self::AllUnits
    }
}

/// Whether the file name (not the directory) starts with the marker prefix
pub fn is_marked_unit(source: &Path) -> bool {
    source
        .file_name()
        .map(|name| name.to_string_lossy().starts_with(MARKED_UNIT_PREFIX))
        .unwrap_or(false)
}

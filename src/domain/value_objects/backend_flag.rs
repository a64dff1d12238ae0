//! Backend Flag Value Object
//!
//! One obfuscation option as the backend expects it: the pass-through
//! introducer followed by `-feature` or `-feature=value`.

use std::fmt;

/// A single obfuscation flag destined for the backend's pass manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendFlag(String);

impl BackendFlag {
    /// Argument that forwards the next argument to the LLVM pass manager
    pub const INTRODUCER: &'static str = "-mllvm";

    /// A bare switch such as `-bcf`
    pub fn switch(name: &str) -> Self {
        Self(format!("-{}", name))
    }

    /// A valued option such as `-bcf_loop=3`
    pub fn value(name: &str, value: impl fmt::Display) -> Self {
        Self(format!("-{}={}", name, value))
    }

    /// The option text without the introducer
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `(introducer, option)` pair placed on the command line
    pub fn to_args(&self) -> [String; 2] {
        [Self::INTRODUCER.to_string(), self.0.clone()]
    }
}

impl fmt::Display for BackendFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", Self::INTRODUCER, self.0)
    }
}

/// Flatten a flag sequence into command-line arguments.
pub fn flags_to_args(flags: &[BackendFlag]) -> Vec<String> {
    flags.iter().flat_map(|flag| flag.to_args()).collect()
}

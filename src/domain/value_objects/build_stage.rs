//! Pipeline phase and stage identifiers

use std::fmt;

/// Phase of the build state machine
///
/// `Failed` is terminal and reachable from every phase before `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildPhase {
    FrontEndCompiling,
    ManifestParsing,
    ReplayingCompileSteps,
    Linking,
    Done,
    Failed,
}

impl BuildPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildPhase::FrontEndCompiling => "front-end",
            BuildPhase::ManifestParsing => "manifest",
            BuildPhase::ReplayingCompileSteps => "compile",
            BuildPhase::Linking => "link",
            BuildPhase::Done => "done",
            BuildPhase::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BuildPhase::Done | BuildPhase::Failed)
    }
}

impl fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The external invocation an error or output belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStage {
    /// The single front-end run over all sources
    FrontEnd,
    /// One backend compile of a translation unit
    Compile { source: String },
    /// The final backend link
    Link,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStage::FrontEnd => f.write_str("front-end compile"),
            BuildStage::Compile { source } => write!(f, "compile of {}", source),
            BuildStage::Link => f.write_str("link"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_done_and_failed_are_terminal() {
        assert!(BuildPhase::Done.is_terminal());
        assert!(BuildPhase::Failed.is_terminal());
        assert!(!BuildPhase::Linking.is_terminal());
    }

    #[test]
    fn compile_stage_names_the_unit() {
        let stage = BuildStage::Compile {
            source: "@mhello.nim.c".to_string(),
        };
        assert_eq!(stage.to_string(), "compile of @mhello.nim.c");
    }
}

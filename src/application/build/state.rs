//! Build state machine states

use crate::domain::entities::BuildManifest;
use crate::domain::value_objects::BuildPhase;

use super::result::BuildReport;

/// Where a build currently is
///
/// `Failed` has no variant: a transition that fails returns the error and
/// the driver stops.
#[derive(Debug)]
pub(crate) enum BuildState {
    FrontEndCompiling,
    ManifestParsing,
    ReplayingCompileSteps {
        manifest: BuildManifest,
        next: usize,
        obfuscated: usize,
    },
    Linking {
        manifest: BuildManifest,
        obfuscated: usize,
    },
    Done(BuildReport),
}

impl BuildState {
    pub(crate) fn phase(&self) -> BuildPhase {
        match self {
            BuildState::FrontEndCompiling => BuildPhase::FrontEndCompiling,
            BuildState::ManifestParsing => BuildPhase::ManifestParsing,
            BuildState::ReplayingCompileSteps { .. } => BuildPhase::ReplayingCompileSteps,
            BuildState::Linking { .. } => BuildPhase::Linking,
            BuildState::Done(_) => BuildPhase::Done,
        }
    }
}

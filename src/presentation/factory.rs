//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::Path;

use crate::application::BuildUseCase;
use crate::config::Config;
use crate::error::DenimResult;
use crate::infrastructure::{locate_toolchain, FsManifestRepository, SystemProcessRunner};

/// Type alias for the concrete BuildUseCase with all dependencies
pub type ConcreteBuildUseCase = BuildUseCase<SystemProcessRunner, FsManifestRepository>;

/// Create a build use case for `config`
///
/// `state_dir` is the `~/.denim` directory default locations hang off.
pub fn create_build_use_case(config: &Config, state_dir: &Path) -> DenimResult<ConcreteBuildUseCase> {
    let toolchain = locate_toolchain(&config.toolchain, state_dir)?;
    let scratch_root = config.build.scratch_root_or_default(state_dir);

    Ok(BuildUseCase::new(
        SystemProcessRunner::new(),
        FsManifestRepository::new(),
        toolchain,
        scratch_root,
    ))
}

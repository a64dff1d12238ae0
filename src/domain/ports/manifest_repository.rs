//! Manifest Repository port
//!
//! Owns the scratch directory the front-end writes into and reads the
//! manifest back out of it.

use std::path::Path;

use crate::domain::entities::BuildManifest;
use crate::error::DenimResult;

pub trait ManifestRepository {
    /// Make `scratch_dir` ready for a fresh front-end run (stale output removed)
    ///
    /// Must refuse any `scratch_dir` that is not strictly below `scratch_root`.
    fn prepare_scratch(&self, scratch_root: &Path, scratch_dir: &Path) -> DenimResult<()>;

    /// Find and decode the manifest in `scratch_dir`
    ///
    /// `compiler` is the bare backend compiler name to strip from recorded
    /// commands.
    fn load(&self, scratch_dir: &Path, compiler: &str) -> DenimResult<BuildManifest>;
}

impl<M: ManifestRepository + ?Sized> ManifestRepository for &M {
    fn prepare_scratch(&self, scratch_root: &Path, scratch_dir: &Path) -> DenimResult<()> {
        (**self).prepare_scratch(scratch_root, scratch_dir)
    }

    fn load(&self, scratch_dir: &Path, compiler: &str) -> DenimResult<BuildManifest> {
        (**self).load(scratch_dir, compiler)
    }
}

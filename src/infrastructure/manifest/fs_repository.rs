//! File-system manifest repository
//!
//! The front-end writes exactly one `*.json` manifest into the scratch
//! directory. Entries are scanned non-recursively in file-name order and the
//! first regular JSON file wins.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::domain::entities::BuildManifest;
use crate::domain::ports::ManifestRepository;
use crate::error::{DenimError, DenimResult};

/// Extension of the manifest file
pub const MANIFEST_EXTENSION: &str = "json";

/// Manifest repository backed by the local file system
#[derive(Debug, Default, Clone, Copy)]
pub struct FsManifestRepository;

impl FsManifestRepository {
    pub fn new() -> Self {
        Self
    }
}

impl ManifestRepository for FsManifestRepository {
    fn prepare_scratch(&self, scratch_root: &Path, scratch_dir: &Path) -> DenimResult<()> {
        if !is_strictly_below(scratch_root, scratch_dir) {
            return Err(DenimError::ScratchOutsideRoot {
                dir: scratch_dir.to_path_buf(),
                root: scratch_root.to_path_buf(),
            });
        }
        if scratch_dir.exists() {
            tracing::debug!(dir = %scratch_dir.display(), "removing stale scratch directory");
            fs::remove_dir_all(scratch_dir)?;
        }
        fs::create_dir_all(scratch_root)?;
        Ok(())
    }

    fn load(&self, scratch_dir: &Path, compiler: &str) -> DenimResult<BuildManifest> {
        let path = find_manifest(scratch_dir)?;
        tracing::debug!(manifest = %path.display(), "loading build manifest");
        let content = fs::read_to_string(&path)?;
        BuildManifest::from_json(&content, &path, compiler)
    }
}

/// `dir` is `root` followed by one or more plain components.
fn is_strictly_below(root: &Path, dir: &Path) -> bool {
    match dir.strip_prefix(root) {
        Ok(rest) => {
            let mut components = rest.components().peekable();
            components.peek().is_some()
                && components.all(|c| matches!(c, Component::Normal(_)))
        }
        Err(_) => false,
    }
}

/// Locate the manifest file in `dir`.
pub fn find_manifest(dir: &Path) -> DenimResult<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DenimError::ManifestNotFound {
                dir: dir.to_path_buf(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_manifest_extension(path))
        .collect();
    candidates.sort();

    candidates
        .into_iter()
        .next()
        .ok_or_else(|| DenimError::ManifestNotFound {
            dir: dir.to_path_buf(),
        })
}

fn has_manifest_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case(MANIFEST_EXTENSION))
        .unwrap_or(false)
}

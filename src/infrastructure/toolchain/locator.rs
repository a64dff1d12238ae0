//! Toolchain Locator
//!
//! Resolves the front-end and backend from configuration. Nothing is
//! installed or downloaded here; a missing backend is reported with a hint.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::ToolchainConfig;
use crate::domain::entities::{FrontEndCompiler, ObfuscatingBackend, Toolchain};
use crate::error::{DenimError, DenimResult};

/// Build the toolchain described by `config`.
///
/// Only computes paths; call [`check_backend_installed`] to verify the
/// backend is present.
pub fn locate_toolchain(config: &ToolchainConfig, state_dir: &Path) -> DenimResult<Toolchain> {
    let root = config.backend_root_or_default(state_dir);
    let extra = config.extra_path_or_default(state_dir);
    let backend = ObfuscatingBackend::under_root(root);
    let path_env = backend_path_env(&backend.bin_dir(), &extra, std::env::var_os("PATH"))?;

    Ok(Toolchain {
        frontend: FrontEndCompiler::new(config.frontend.clone()),
        backend: backend.with_path_env(Some(path_env)),
    })
}

/// `PATH` for backend invocations: its `bin/`, then `extra`, then `inherited`
pub fn backend_path_env(
    bin_dir: &Path,
    extra: &[PathBuf],
    inherited: Option<OsString>,
) -> DenimResult<OsString> {
    let mut entries: Vec<PathBuf> = Vec::with_capacity(extra.len() + 1);
    entries.push(bin_dir.to_path_buf());
    entries.extend(extra.iter().cloned());
    if let Some(inherited) = inherited {
        entries.extend(std::env::split_paths(&inherited));
    }

    std::env::join_paths(entries).map_err(|e| {
        DenimError::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
    })
}

/// Fail with `ExternalToolMissing` unless the backend root and compiler exist
pub fn check_backend_installed(backend: &ObfuscatingBackend) -> DenimResult<()> {
    if !backend.root.is_dir() {
        return Err(backend.missing_error(&backend.root));
    }
    if !backend.executable.is_file() {
        return Err(backend.missing_error(&backend.executable));
    }
    tracing::debug!(backend = %backend.executable.display(), "backend located");
    Ok(())
}

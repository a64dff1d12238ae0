//! Manifest repository implementations

mod fs_repository;

pub use fs_repository::{find_manifest, FsManifestRepository, MANIFEST_EXTENSION};

//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `process/` - Spawning external tools
//! - `manifest/` - Reading the front-end's manifest from the scratch directory
//! - `toolchain/` - Locating the front-end and backend
//! - `events/` - Event sinks
//! - `fs/` - Home directory resolution

pub mod events;
pub mod fs;
pub mod manifest;
pub mod process;
pub mod toolchain;

// Re-export for convenience
pub use events::JsonEventSink;
pub use manifest::FsManifestRepository;
pub use process::SystemProcessRunner;
pub use toolchain::{check_backend_installed, locate_toolchain};

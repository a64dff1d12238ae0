//! Denim - obfuscated native build driver
//!
//! Denim runs the Nim compiler to lower a project to C plus a JSON build
//! manifest, then replays every compile step through Obfuscator-LLVM with a
//! bounded, validated set of obfuscation passes and links the result.
//!
//! ## Layers
//!
//! - `domain` - Build requests, manifests, obfuscation parameters, ports
//! - `application` - The build state machine (`BuildUseCase`)
//! - `infrastructure` - Processes, scratch directory, toolchain lookup, event sinks
//! - `presentation` - CLI definition and use case wiring
//! - `config` - Layered configuration

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{BuildReport, BuildUseCase};
pub use config::Config;
pub use domain::entities::{BuildManifest, BuildRequest};
pub use domain::policies::ObfuscationPolicy;
pub use domain::value_objects::{derive_seed, ObfuscationParameters};
pub use error::{DenimError, DenimResult};

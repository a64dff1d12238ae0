//! Build Module
//!
//! Orchestrates an obfuscated native build.
//!
//! ## Structure
//!
//! - `preflight` - Toolchain checks (`preflight`, `tool_version`)
//! - `result` - Result types (`BuildReport`)
//! - `state` - The build state machine's states
//! - `use_case` - Core use case logic (`BuildUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use denim::application::build::BuildUseCase;
//!
//! let use_case = BuildUseCase::new(runner, manifests, toolchain, scratch_root);
//! let report = use_case.execute(&request, &params)?;
//! ```

mod preflight;
mod result;
mod state;
mod use_case;

pub use preflight::{preflight, tool_version, ToolVersions};
pub use result::BuildReport;
pub use use_case::BuildUseCase;

//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, policies, ports)
//! - Does NOT spawn processes or touch the scratch directory itself
//!
//! ## Use Cases
//!
//! - `BuildUseCase` - Front-end, manifest, per-unit compile, link

pub mod build;

pub use build::{preflight, tool_version, BuildReport, BuildUseCase, ToolVersions};

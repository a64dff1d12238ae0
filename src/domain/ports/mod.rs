//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod build_events;
pub mod manifest_repository;
pub mod process_runner;

pub use build_events::{BuildEvent, BuildEventSink, NoopEventSink};
pub use manifest_repository::ManifestRepository;
pub use process_runner::{Invocation, ProcessError, ProcessResult, ProcessRunner};

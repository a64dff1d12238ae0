//! Event Sink Implementations
//!
//! - JsonEventSink: NDJSON output for CI/automation
//!
//! The human-readable console sink lives with the binary's `ui` module.

mod json;

pub use json::JsonEventSink;

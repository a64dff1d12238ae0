//! Build Event Port
//!
//! Observable interface for the build pipeline. Enables console progress,
//! NDJSON event streams, and surfacing captured tool output in verbose mode.

use std::path::PathBuf;

use crate::domain::value_objects::{BuildPhase, BuildStage};

/// Event emitted during a build
#[derive(Debug, Clone)]
pub enum BuildEvent {
    /// Build accepted, before any process is spawned
    Started {
        name: String,
        files: Vec<PathBuf>,
        scratch_dir: PathBuf,
    },

    /// The state machine moved to a new phase
    PhaseEntered(BuildPhase),

    /// Manifest decoded
    ManifestLoaded {
        compile_steps: usize,
        link_inputs: usize,
        skipped_resources: usize,
    },

    /// One translation unit compiled
    UnitCompiled {
        index: usize,
        total: usize,
        source: String,
        obfuscated: bool,
    },

    /// Captured output of an external invocation (success or failure)
    ProcessOutput {
        stage: BuildStage,
        stdout: String,
        stderr: String,
    },

    /// Final link succeeded
    Linked { output: PathBuf },

    /// Build aborted
    Failed { phase: BuildPhase, message: String },

    /// Build finished
    Completed {
        output: PathBuf,
        compiled: usize,
        obfuscated: usize,
    },
}

/// Trait for receiving build events
///
/// Implementations:
/// - `ConsoleEventSink` (binary): human progress
/// - `JsonEventSink`: NDJSON event stream
/// - `NoopEventSink`: silent operation
pub trait BuildEventSink: Send + Sync {
    /// Handle a build event
    fn on_event(&self, event: BuildEvent);

    /// Whether this sink wants `ProcessOutput` events
    ///
    /// Capturing and forwarding tool output is skipped when no sink cares.
    fn wants_process_output(&self) -> bool {
        false
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl BuildEventSink for NoopEventSink {
    fn on_event(&self, _event: BuildEvent) {}
}

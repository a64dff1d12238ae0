//! JSON Event Sink
//!
//! Outputs build events as NDJSON for CI/automation consumption.

use crate::domain::ports::{BuildEvent, BuildEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
    include_process_output: bool,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            include_process_output: false,
        }
    }

    /// Also emit captured tool output (`-v`)
    pub fn with_process_output(mut self, include: bool) -> Self {
        self.include_process_output = include;
        self
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl BuildEventSink for JsonEventSink {
    fn on_event(&self, event: BuildEvent) {
        let json = match event {
            BuildEvent::Started {
                name,
                files,
                scratch_dir,
            } => {
                serde_json::json!({
                    "event": "start",
                    "command": "compile",
                    "name": name,
                    "files": files.iter().map(|f| f.display().to_string()).collect::<Vec<_>>(),
                    "scratch_dir": scratch_dir.display().to_string(),
                })
            }

            BuildEvent::PhaseEntered(phase) => {
                serde_json::json!({
                    "event": "phase",
                    "command": "compile",
                    "phase": phase.as_str(),
                })
            }

            BuildEvent::ManifestLoaded {
                compile_steps,
                link_inputs,
                skipped_resources,
            } => {
                serde_json::json!({
                    "event": "manifest",
                    "command": "compile",
                    "compile_steps": compile_steps,
                    "link_inputs": link_inputs,
                    "skipped_resources": skipped_resources,
                })
            }

            BuildEvent::UnitCompiled {
                index,
                total,
                source,
                obfuscated,
            } => {
                serde_json::json!({
                    "event": "item_compiled",
                    "command": "compile",
                    "index": index,
                    "total": total,
                    "source": source,
                    "obfuscated": obfuscated,
                })
            }

            BuildEvent::ProcessOutput {
                stage,
                stdout,
                stderr,
            } => {
                serde_json::json!({
                    "event": "process_output",
                    "command": "compile",
                    "stage": stage.to_string(),
                    "stdout": stdout,
                    "stderr": stderr,
                })
            }

            BuildEvent::Linked { output } => {
                serde_json::json!({
                    "event": "linked",
                    "command": "compile",
                    "output": output.display().to_string(),
                })
            }

            BuildEvent::Failed { phase, message } => {
                serde_json::json!({
                    "event": "failed",
                    "command": "compile",
                    "phase": phase.as_str(),
                    "message": message,
                })
            }

            BuildEvent::Completed {
                output,
                compiled,
                obfuscated,
            } => {
                serde_json::json!({
                    "event": "complete",
                    "command": "compile",
                    "status": "success",
                    "output": output.display().to_string(),
                    "compiled": compiled,
                    "obfuscated": obfuscated,
                })
            }
        };

        self.write_event(json);
    }

    fn wants_process_output(&self) -> bool {
        self.include_process_output
    }
}

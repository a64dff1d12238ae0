//! System Process Runner
//!
//! Runs invocations with `std::process::Command`, capturing stdout and
//! stderr. Blocks until the child exits.

use std::process::{Command, Stdio};

use crate::domain::ports::{Invocation, ProcessError, ProcessResult, ProcessRunner};

/// Process runner that spawns real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessResult, ProcessError> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(cwd) = &invocation.cwd {
            cmd.current_dir(cwd);
        }
        for (key, value) in &invocation.env {
            cmd.env(key, value);
        }

        tracing::debug!(command = %invocation.command_line(), "spawning");

        let output = cmd.output().map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ProcessError::NotFound {
                    program: invocation.program.clone(),
                }
            } else {
                ProcessError::Io {
                    program: invocation.program.clone(),
                    source,
                }
            }
        })?;

        tracing::debug!(
            program = %invocation.program.display(),
            success = output.status.success(),
            code = ?output.status.code(),
            "process exited"
        );

        Ok(ProcessResult {
            success: output.status.success(),
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

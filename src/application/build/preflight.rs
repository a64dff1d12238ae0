//! Toolchain preflight
//!
//! Asks both tools for `--version` before anything is written. A tool that
//! cannot be started, or that exits non-zero, is reported as missing.

use crate::domain::entities::Toolchain;
use crate::domain::ports::{Invocation, ProcessError, ProcessRunner};
use crate::error::{DenimError, DenimResult};

/// First lines of each tool's `--version` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolVersions {
    pub frontend: String,
    pub backend: String,
}

/// Verify both tools answer `--version`
pub fn preflight<R: ProcessRunner>(runner: &R, toolchain: &Toolchain) -> DenimResult<ToolVersions> {
    let frontend = tool_version(runner, &toolchain.frontend.version_invocation(), || {
        toolchain.frontend.missing_error()
    })?;
    let backend = tool_version(runner, &toolchain.backend.version_invocation(), || {
        toolchain.backend.missing_error(&toolchain.backend.executable)
    })?;

    tracing::debug!(frontend = %frontend, backend = %backend, "toolchain ready");
    Ok(ToolVersions { frontend, backend })
}

/// Run a `--version` invocation and return the first line of its stdout
pub fn tool_version<R, F>(runner: &R, invocation: &Invocation, missing: F) -> DenimResult<String>
where
    R: ProcessRunner,
    F: FnOnce() -> DenimError,
{
    match runner.run(invocation) {
        Ok(result) if result.success => Ok(first_line(&result.stdout_lossy())),
        Ok(result) => {
            tracing::warn!(
                program = %invocation.program.display(),
                code = ?result.code,
                "version query failed"
            );
            Err(missing())
        }
        Err(ProcessError::NotFound { .. }) => Err(missing()),
        Err(ProcessError::Io { source, .. }) => Err(DenimError::Io(source)),
    }
}

fn first_line(stdout: &str) -> String {
    stdout.lines().next().unwrap_or("").trim().to_string()
}

//! Build Use Case
//!
//! Drives one obfuscated build:
//! 1. Validate obfuscation parameters
//! 2. Preflight the toolchain
//! 3. Run the front-end into a fresh scratch directory
//! 4. Parse the manifest it left behind
//! 5. Replay each compile step through the backend, obfuscating where the
//!    policy says so
//! 6. Link
//!
//! Steps 3-6 are the states of `BuildState`. Each state has one transition;
//! the first error ends the build and nothing after it runs.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::entities::{BuildManifest, BuildRequest, Toolchain};
use crate::domain::ports::{
    BuildEvent, BuildEventSink, Invocation, ManifestRepository, NoopEventSink, ProcessError,
    ProcessResult, ProcessRunner,
};
use crate::domain::value_objects::{BuildPhase, BuildStage, ObfuscationParameters};
use crate::error::{DenimError, DenimResult};

use super::preflight::preflight;
use super::result::BuildReport;
use super::state::BuildState;

/// Build use case - orchestrates front-end, per-unit compile and link
///
/// Parameterized by its ports so tests can record invocations instead of
/// spawning compilers.
pub struct BuildUseCase<R, M>
where
    R: ProcessRunner,
    M: ManifestRepository,
{
    runner: R,
    manifests: M,
    toolchain: Toolchain,
    scratch_root: PathBuf,
}

/// Borrowed inputs shared by every transition of one build
struct BuildContext<'a> {
    request: &'a BuildRequest,
    params: &'a ObfuscationParameters,
    scratch_dir: PathBuf,
    sink: &'a dyn BuildEventSink,
}

impl<R, M> BuildUseCase<R, M>
where
    R: ProcessRunner,
    M: ManifestRepository,
{
    pub fn new(runner: R, manifests: M, toolchain: Toolchain, scratch_root: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            manifests,
            toolchain,
            scratch_root: scratch_root.into(),
        }
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// Scratch directory for `request` (namespaced by project name)
    pub fn scratch_dir(&self, request: &BuildRequest) -> PathBuf {
        self.scratch_root.join(request.name())
    }

    /// Execute the build silently
    pub fn execute(
        &self,
        request: &BuildRequest,
        params: &ObfuscationParameters,
    ) -> DenimResult<BuildReport> {
        self.execute_with_events(request, params, Arc::new(NoopEventSink))
    }

    /// Execute the build, reporting progress to `event_sink`
    pub fn execute_with_events(
        &self,
        request: &BuildRequest,
        params: &ObfuscationParameters,
        event_sink: Arc<dyn BuildEventSink>,
    ) -> DenimResult<BuildReport> {
        params.validate()?;
        preflight(&self.runner, &self.toolchain)?;

        let ctx = BuildContext {
            request,
            params,
            scratch_dir: self.scratch_dir(request),
            sink: event_sink.as_ref(),
        };

        tracing::info!(
            name = request.name(),
            files = request.files().len(),
            scratch = %ctx.scratch_dir.display(),
            "starting build"
        );
        ctx.sink.on_event(BuildEvent::Started {
            name: request.name().to_string(),
            files: request.files().to_vec(),
            scratch_dir: ctx.scratch_dir.clone(),
        });

        let mut state = BuildState::FrontEndCompiling;
        let mut current: Option<BuildPhase> = None;

        loop {
            let phase = state.phase();
            if current != Some(phase) {
                tracing::debug!(phase = %phase, "entering phase");
                ctx.sink.on_event(BuildEvent::PhaseEntered(phase));
                current = Some(phase);
            }

            state = match state {
                BuildState::Done(report) => {
                    tracing::info!(
                        output = %report.output.display(),
                        compiled = report.compiled,
                        obfuscated = report.obfuscated,
                        "build complete"
                    );
                    ctx.sink.on_event(BuildEvent::Completed {
                        output: report.output.clone(),
                        compiled: report.compiled,
                        obfuscated: report.obfuscated,
                    });
                    return Ok(report);
                }
                other => match self.advance(other, &ctx) {
                    Ok(next) => next,
                    Err(err) => {
                        tracing::warn!(phase = %phase, error = %err, "build failed");
                        ctx.sink.on_event(BuildEvent::Failed {
                            phase,
                            message: err.to_string(),
                        });
                        return Err(err);
                    }
                },
            };
        }
    }

    fn advance(&self, state: BuildState, ctx: &BuildContext<'_>) -> DenimResult<BuildState> {
        match state {
            BuildState::FrontEndCompiling => self.compile_front_end(ctx),
            BuildState::ManifestParsing => self.parse_manifest(ctx),
            BuildState::ReplayingCompileSteps {
                manifest,
                next,
                obfuscated,
            } => self.replay_compile_step(ctx, manifest, next, obfuscated),
            BuildState::Linking {
                manifest,
                obfuscated,
            } => self.link(ctx, manifest, obfuscated),
            BuildState::Done(report) => Ok(BuildState::Done(report)),
        }
    }

    fn compile_front_end(&self, ctx: &BuildContext<'_>) -> DenimResult<BuildState> {
        self.manifests
            .prepare_scratch(&self.scratch_root, &ctx.scratch_dir)?;

        let invocation = self.toolchain.frontend.compile_invocation(
            ctx.request,
            &self.toolchain.backend,
            &ctx.scratch_dir,
        );
        self.run_stage(ctx, BuildStage::FrontEnd, &invocation)?;
        Ok(BuildState::ManifestParsing)
    }

    fn parse_manifest(&self, ctx: &BuildContext<'_>) -> DenimResult<BuildState> {
        let manifest = self
            .manifests
            .load(&ctx.scratch_dir, self.toolchain.backend.compiler_name())?;

        tracing::debug!(
            steps = manifest.compile_steps.len(),
            inputs = manifest.link.inputs.len(),
            "manifest loaded"
        );
        ctx.sink.on_event(BuildEvent::ManifestLoaded {
            compile_steps: manifest.compile_steps.len(),
            link_inputs: manifest.link.inputs.len(),
            skipped_resources: manifest.link.skipped_resources.len(),
        });

        Ok(BuildState::ReplayingCompileSteps {
            manifest,
            next: 0,
            obfuscated: 0,
        })
    }

    fn replay_compile_step(
        &self,
        ctx: &BuildContext<'_>,
        manifest: BuildManifest,
        next: usize,
        obfuscated: usize,
    ) -> DenimResult<BuildState> {
        let total = manifest.compile_steps.len();
        if next >= total {
            return Ok(BuildState::Linking {
                manifest,
                obfuscated,
            });
        }
        let step = &manifest.compile_steps[next];

        let obfuscate = ctx.request.policy().should_obfuscate(&step.source);
        let backend = &self.toolchain.backend;
        let invocation = if obfuscate {
            backend.obfuscated_compile_invocation(&ctx.scratch_dir, &step.arguments, ctx.params)?
        } else {
            backend.compile_invocation(&ctx.scratch_dir, &step.arguments)
        };

        let unit = step.unit_name();
        self.run_stage(
            ctx,
            BuildStage::Compile {
                source: unit.clone(),
            },
            &invocation,
        )?;

        ctx.sink.on_event(BuildEvent::UnitCompiled {
            index: next,
            total,
            source: unit,
            obfuscated: obfuscate,
        });

        Ok(BuildState::ReplayingCompileSteps {
            manifest,
            next: next + 1,
            obfuscated: obfuscated + usize::from(obfuscate),
        })
    }

    fn link(
        &self,
        ctx: &BuildContext<'_>,
        manifest: BuildManifest,
        obfuscated: usize,
    ) -> DenimResult<BuildState> {
        let invocation = self
            .toolchain
            .backend
            .compile_invocation(&ctx.scratch_dir, &manifest.link.arguments());
        self.run_stage(ctx, BuildStage::Link, &invocation)?;

        let output = manifest.link.output;
        ctx.sink.on_event(BuildEvent::Linked {
            output: output.clone(),
        });

        let mut report = BuildReport::new(output, ctx.scratch_dir.clone());
        report.compiled = manifest.compile_steps.len();
        report.obfuscated = obfuscated;
        let seed = (obfuscated > 0).then(|| ctx.params.resolved_seed()).flatten();
        Ok(BuildState::Done(report.with_seed(seed)))
    }

    /// Run one external invocation, failing the build on non-zero exit
    fn run_stage(
        &self,
        ctx: &BuildContext<'_>,
        stage: BuildStage,
        invocation: &Invocation,
    ) -> DenimResult<ProcessResult> {
        tracing::debug!(stage = %stage, command = %invocation.command_line(), "invoking");

        let result = self
            .runner
            .run(invocation)
            .map_err(|err| self.spawn_error(&stage, err))?;

        if ctx.sink.wants_process_output() {
            ctx.sink.on_event(BuildEvent::ProcessOutput {
                stage: stage.clone(),
                stdout: result.stdout_lossy(),
                stderr: result.stderr_lossy(),
            });
        }

        if !result.success {
            return Err(DenimError::ExternalProcess {
                stage,
                code: result.code,
                stderr: result.stderr_lossy(),
            });
        }
        Ok(result)
    }

    fn spawn_error(&self, stage: &BuildStage, err: ProcessError) -> DenimError {
        match err {
            ProcessError::NotFound { program } => match stage {
                BuildStage::FrontEnd => self.toolchain.frontend.missing_error(),
                _ => self.toolchain.backend.missing_error(&program),
            },
            ProcessError::Io { source, .. } => DenimError::Io(source),
        }
    }
}

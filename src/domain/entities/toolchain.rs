//! Toolchain Entities
//!
//! Describe how the front-end and the obfuscating backend are invoked.
//! Building an `Invocation` is pure; locating executables on disk is left
//! to the infrastructure layer.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::domain::entities::BuildRequest;
use crate::domain::ports::Invocation;
use crate::domain::value_objects::{flags_to_args, ObfuscationParameters};
use crate::error::{DenimError, DenimResult};

/// Name of the backend compiler executable, without platform suffix
pub const BACKEND_COMPILER: &str = "clang";

/// Tool names used in `ExternalToolMissing` errors
pub const FRONTEND_TOOL: &str = "nim";
pub const BACKEND_TOOL: &str = "obfuscator-llvm";

/// The high-level-language compiler that emits C and a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontEndCompiler {
    pub executable: PathBuf,
}

impl FrontEndCompiler {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn version_invocation(&self) -> Invocation {
        Invocation::new(&self.executable).arg("--version")
    }

    /// Error for a front-end that cannot be started
    pub fn missing_error(&self) -> DenimError {
        DenimError::ExternalToolMissing {
            tool: FRONTEND_TOOL.to_string(),
            path: self.executable.clone(),
            hint: "install Nim and put it on PATH, or set DENIM_FRONTEND".to_string(),
        }
    }

    /// `compile --genScript --compileOnly --cc:clang --clang.exe=<backend>
    /// --nimcache:<scratch> [--out:<output>] <files...>`
    pub fn compile_invocation(
        &self,
        request: &BuildRequest,
        backend: &ObfuscatingBackend,
        scratch_dir: &Path,
    ) -> Invocation {
        let mut invocation = Invocation::new(&self.executable)
            .current_dir(request.work_dir())
            .args([
                "compile".to_string(),
                "--genScript".to_string(),
                "--compileOnly".to_string(),
                format!("--cc:{}", BACKEND_COMPILER),
                format!("--{}.exe={}", BACKEND_COMPILER, backend.executable.display()),
                format!("--nimcache:{}", scratch_dir.display()),
            ]);

        if let Some(output) = request.output() {
            invocation = invocation.arg(format!("--out:{}", output.display()));
        }

        invocation.args(request.files().iter().map(|f| f.display().to_string()))
    }
}

/// The obfuscating C compiler/linker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObfuscatingBackend {
    /// Installation root (contains `bin/`)
    pub root: PathBuf,
    pub executable: PathBuf,
    /// `PATH` value the backend runs with, if it needs one
    pub path_env: Option<OsString>,
}

impl ObfuscatingBackend {
    /// A backend installed under `root`, executable at `root/bin/clang[.exe]`
    pub fn under_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let executable = root
            .join("bin")
            .join(format!("{}{}", BACKEND_COMPILER, std::env::consts::EXE_SUFFIX));
        Self {
            root,
            executable,
            path_env: None,
        }
    }

    pub fn with_path_env(mut self, path_env: Option<OsString>) -> Self {
        self.path_env = path_env;
        self
    }

    /// Error for a backend missing at `path` (its root or executable)
    pub fn missing_error(&self, path: &Path) -> DenimError {
        DenimError::ExternalToolMissing {
            tool: BACKEND_TOOL.to_string(),
            path: path.to_path_buf(),
            hint: "install Obfuscator-LLVM there or set DENIM_BACKEND_ROOT".to_string(),
        }
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.root.join("bin")
    }

    /// Bare compiler name recorded commands may start with
    pub fn compiler_name(&self) -> &str {
        BACKEND_COMPILER
    }

    pub fn version_invocation(&self) -> Invocation {
        self.base_invocation().arg("--version")
    }

    /// Plain compile or link in `cwd`
    pub fn compile_invocation(&self, cwd: &Path, args: &[String]) -> Invocation {
        self.base_invocation()
            .current_dir(cwd)
            .args(args.iter().cloned())
    }

    /// Compile with the obfuscation flags placed ahead of `args`
    pub fn obfuscated_compile_invocation(
        &self,
        cwd: &Path,
        args: &[String],
        params: &ObfuscationParameters,
    ) -> DenimResult<Invocation> {
        let flags = params.build_flags()?;
        Ok(self
            .base_invocation()
            .current_dir(cwd)
            .args(flags_to_args(&flags))
            .args(args.iter().cloned()))
    }

    fn base_invocation(&self) -> Invocation {
        let invocation = Invocation::new(&self.executable);
        match &self.path_env {
            Some(path) => invocation.env("PATH", path.clone()),
            None => invocation,
        }
    }
}

/// The pair of external tools a build runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub frontend: FrontEndCompiler,
    pub backend: ObfuscatingBackend,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::policies::ObfuscationPolicy;
    use crate::domain::value_objects::{
        BogusControlFlow, ControlFlowFlattening, InstructionSubstitution,
    };

    fn backend() -> ObfuscatingBackend {
        ObfuscatingBackend {
            root: PathBuf::from("/opt/ollvm"),
            executable: PathBuf::from("/opt/ollvm/bin/clang"),
            path_env: Some(OsString::from("/opt/ollvm/bin")),
        }
    }

    #[test]
    fn under_root_points_into_bin() {
        let b = ObfuscatingBackend::under_root("/opt/ollvm");
        assert!(b.executable.starts_with("/opt/ollvm/bin"));
        assert_eq!(b.bin_dir(), PathBuf::from("/opt/ollvm/bin"));
    }

    #[test]
    fn front_end_invocation_shape() {
        let fe = FrontEndCompiler::new("nim");
        let req = BuildRequest::new(vec![PathBuf::from("hello.nim")])
            .with_output(Some(PathBuf::from("hello.exe")))
            .with_policy(ObfuscationPolicy::AllUnits)
            .with_work_dir("/work");
        let inv = fe.compile_invocation(&req, &backend(), Path::new("/cache/hello"));
        assert_eq!(inv.program, PathBuf::from("nim"));
        assert_eq!(inv.cwd, Some(PathBuf::from("/work")));
        assert_eq!(
            inv.args,
            vec![
                "compile",
                "--genScript",
                "--compileOnly",
                "--cc:clang",
                "--clang.exe=/opt/ollvm/bin/clang",
                "--nimcache:/cache/hello",
                "--out:hello.exe",
                "hello.nim",
            ]
        );
    }

    #[test]
    fn front_end_invocation_without_output() {
        let fe = FrontEndCompiler::new("nim");
        let req = BuildRequest::new(vec![PathBuf::from("a.nim"), PathBuf::from("b.nim")]);
        let inv = fe.compile_invocation(&req, &backend(), Path::new("/cache/a"));
        assert!(!inv.args.iter().any(|a| a.starts_with("--out:")));
        assert_eq!(&inv.args[inv.args.len() - 2..], &["a.nim", "b.nim"]);
    }

    #[test]
    fn plain_compile_carries_path_and_cwd() {
        let args = vec!["-c".to_string(), "a.c".to_string()];
        let inv = backend().compile_invocation(Path::new("/cache/a"), &args);
        assert_eq!(inv.args, args);
        assert_eq!(inv.cwd, Some(PathBuf::from("/cache/a")));
        assert_eq!(inv.env[0].0, "PATH");
    }

    #[test]
    fn obfuscated_compile_prepends_flags() {
        let params = ObfuscationParameters::new(
            BogusControlFlow {
                enabled: false,
                loop_count: 1,
                probability_percent: 1,
            },
            InstructionSubstitution {
                enabled: true,
                loop_count: 2,
            },
            ControlFlowFlattening {
                enabled: false,
                split_count: 1,
            },
            "abc",
        );
        let args = vec!["-c".to_string(), "a.c".to_string()];
        let inv = backend()
            .obfuscated_compile_invocation(Path::new("/cache/a"), &args, &params)
            .unwrap();
        insta::assert_snapshot!(
            inv.args.join(" "),
            @"-mllvm -sub -mllvm -sub_loop=2 -mllvm -aesSeed=ba7816bf8f01cfea414140de5dae2223 -c a.c"
        );
    }
}

//! Isolated test environment for running the denim binary.
//!
//! The home directory, the project and the fake backend install all live
//! in temp directories; `DENIM_*` variables from the caller are cleared.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use super::fixtures::{FAKE_CLANG, FAKE_NIM, HELLO_NIM};

const INHERITED_VARS: &[&str] = &[
    "DENIM_SEED",
    "DENIM_SCRATCH_ROOT",
    "DENIM_EXTRA_PATH",
    "DENIM_LOG",
    "DENIM_FAKE_FAIL",
    "DENIM_FAKE_NO_MANIFEST",
];

/// Result of running the denim CLI
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub struct TestEnv {
    pub home_dir: TempDir,
    pub project_root: TempDir,
    pub tools_dir: TempDir,
    denim_bin: PathBuf,
}

impl TestEnv {
    /// Home, a project containing `hello.nim`, and an installed fake toolchain
    pub fn new() -> Self {
        let env = Self {
            home_dir: TempDir::new().expect("Failed to create temp home"),
            project_root: TempDir::new().expect("Failed to create temp project"),
            tools_dir: TempDir::new().expect("Failed to create temp tools dir"),
            denim_bin: PathBuf::from(env!("CARGO_BIN_EXE_denim")),
        };
        env.write_project_file("hello.nim", HELLO_NIM);
        write_script(&env.nim_path(), FAKE_NIM);
        write_script(&env.backend_root().join("bin").join("clang"), FAKE_CLANG);
        env
    }

    pub fn nim_path(&self) -> PathBuf {
        self.tools_dir.path().join("nim")
    }

    pub fn backend_root(&self) -> PathBuf {
        self.tools_dir.path().join("ollvm")
    }

    pub fn log_path(&self) -> PathBuf {
        self.tools_dir.path().join("calls.log")
    }

    /// `~/.denim/nimcache/<name>`
    pub fn scratch_dir(&self, name: &str) -> PathBuf {
        self.home_dir.path().join(".denim").join("nimcache").join(name)
    }

    pub fn write_project_file(&self, relative: &str, content: &str) {
        fs::write(self.project_root.path().join(relative), content).expect("Failed to write file");
    }

    pub fn write_home_config(&self, content: &str) {
        let dir = self.home_dir.path().join(".denim");
        fs::create_dir_all(&dir).expect("Failed to create state dir");
        fs::write(dir.join("config.toml"), content).expect("Failed to write config");
    }

    /// Every logged tool invocation, oldest first
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.log_path())
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn backend_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with("clang "))
            .collect()
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.denim_bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("DENIM_TEST_HOME", self.home_dir.path())
            .env("DENIM_FRONTEND", self.nim_path())
            .env("DENIM_BACKEND_ROOT", self.backend_root())
            .env("DENIM_FAKE_LOG", self.log_path())
            .env("NO_COLOR", "1");
        for var in INHERITED_VARS {
            cmd.env_remove(var);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute denim");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

fn write_script(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create script dir");
    }
    fs::write(path, content).expect("Failed to write script");
    let mut perms = fs::metadata(path).expect("Failed to stat script").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).expect("Failed to chmod script");
}

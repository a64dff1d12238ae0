//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! Global flags (--json, --color, --verbose) are inherited by all subcommands.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::config::ObfuscationConfig;
use crate::domain::entities::BuildRequest;
use crate::domain::policies::ObfuscationPolicy;
use crate::error::DenimResult;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Denim - obfuscated native builds with Nim and Obfuscator-LLVM
#[derive(Parser, Debug)]
#[command(name = "denim")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI (NDJSON events on stdout)
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v shows tool output, -vv debug logs)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile Nim sources into an obfuscated binary
    Compile(CompileArgs),

    /// Show denim, Nim and Obfuscator-LLVM versions
    Version,
}

/// Arguments of `denim compile`
///
/// Counts left at `0` are chosen at random for each build.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CompileArgs {
    /// Nim source files
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Output binary path
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Project name (names the scratch directory; defaults to the first file's stem)
    #[arg(long)]
    pub name: Option<String>,

    /// Obfuscate every translation unit, including the standard library
    #[arg(long)]
    pub obfuscate_all: bool,

    /// Disable bogus control flow
    #[arg(long)]
    pub no_bcf: bool,

    /// Bogus control flow passes (max 5)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub bcf_loop: Option<i64>,

    /// Chance a basic block is obfuscated by bogus control flow (max 100)
    #[arg(long, value_name = "PERCENT", allow_negative_numbers = true)]
    pub bcf_probability: Option<i64>,

    /// Disable instruction substitution
    #[arg(long)]
    pub no_sub: bool,

    /// Instruction substitution passes (max 4)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub sub_loop: Option<i64>,

    /// Disable control flow flattening
    #[arg(long)]
    pub no_flatten: bool,

    /// Flattening splits per basic block (max 5)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub flatten_split: Option<i64>,

    /// Seed material for the substitution key (random when empty)
    #[arg(long)]
    pub seed: Option<String>,
}

impl CompileArgs {
    /// Overlay command-line obfuscation settings on configured defaults
    pub fn apply_to(&self, obfuscation: &mut ObfuscationConfig) {
        if self.no_bcf {
            obfuscation.bcf = false;
        }
        if self.no_sub {
            obfuscation.sub = false;
        }
        if self.no_flatten {
            obfuscation.flatten = false;
        }
        if let Some(n) = self.bcf_loop {
            obfuscation.bcf_loop = n;
        }
        if let Some(p) = self.bcf_probability {
            obfuscation.bcf_probability = p;
        }
        if let Some(n) = self.sub_loop {
            obfuscation.sub_loop = n;
        }
        if let Some(n) = self.flatten_split {
            obfuscation.flatten_split = n;
        }
        if let Some(seed) = &self.seed {
            obfuscation.seed = seed.clone();
        }
    }

    /// Build request for these arguments, run from `work_dir`
    ///
    /// Fails when `--name` is not a single plain path component.
    pub fn to_request(&self, obfuscate_all_default: bool, work_dir: &Path) -> DenimResult<BuildRequest> {
        let policy = ObfuscationPolicy::from_obfuscate_all(self.obfuscate_all || obfuscate_all_default);
        let request = BuildRequest::new(self.files.clone())
            .with_output(self.output.clone())
            .with_policy(policy)
            .with_work_dir(work_dir);
        match &self.name {
            Some(name) => request.with_name(name.clone()),
            None => Ok(request),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile_args(argv: &[&str]) -> CompileArgs {
        let mut full = vec!["denim", "compile"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Commands::Compile(args) => args,
            other => panic!("Expected Compile command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_compile_defaults() {
        let args = compile_args(&["hello.nim"]);
        assert_eq!(args.files, vec![PathBuf::from("hello.nim")]);
        assert_eq!(args.output, None);
        assert!(!args.obfuscate_all);
        assert!(!args.no_bcf && !args.no_sub && !args.no_flatten);
        assert_eq!(args.bcf_loop, None);
        assert_eq!(args.seed, None);
    }

    #[test]
    fn test_cli_parse_compile_requires_files() {
        assert!(Cli::try_parse_from(["denim", "compile"]).is_err());
    }

    #[test]
    fn test_cli_parse_compile_all_flags() {
        let args = compile_args(&[
            "a.nim",
            "b.nim",
            "-o",
            "out.exe",
            "--name",
            "proj",
            "--obfuscate-all",
            "--no-bcf",
            "--bcf-loop",
            "3",
            "--bcf-probability",
            "40",
            "--no-sub",
            "--sub-loop",
            "2",
            "--no-flatten",
            "--flatten-split",
            "4",
            "--seed",
            "s3cret",
        ]);
        assert_eq!(args.files.len(), 2);
        assert_eq!(args.output, Some(PathBuf::from("out.exe")));
        assert_eq!(args.name.as_deref(), Some("proj"));
        assert!(args.obfuscate_all);
        assert!(args.no_bcf && args.no_sub && args.no_flatten);
        assert_eq!(args.bcf_loop, Some(3));
        assert_eq!(args.bcf_probability, Some(40));
        assert_eq!(args.sub_loop, Some(2));
        assert_eq!(args.flatten_split, Some(4));
        assert_eq!(args.seed.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_cli_parse_negative_counts() {
        let args = compile_args(&["a.nim", "--bcf-loop", "-3"]);
        assert_eq!(args.bcf_loop, Some(-3));
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["denim", "compile", "a.nim", "--json", "-vv", "--color", "never"])
            .unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.color, Some(ColorWhen::Never));
    }

    #[test]
    fn test_cli_parse_version() {
        let cli = Cli::try_parse_from(["denim", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_apply_to_overrides_only_given_values() {
        let mut obfuscation = ObfuscationConfig {
            sub_loop: 3,
            seed: "from-config".to_string(),
            ..ObfuscationConfig::default()
        };
        compile_args(&["a.nim", "--no-flatten", "--bcf-loop", "2"]).apply_to(&mut obfuscation);

        assert!(obfuscation.bcf);
        assert!(!obfuscation.flatten);
        assert_eq!(obfuscation.bcf_loop, 2);
        assert_eq!(obfuscation.sub_loop, 3);
        assert_eq!(obfuscation.seed, "from-config");
    }

    #[test]
    fn test_to_request_uses_name_and_policy() {
        let args = compile_args(&["src/hello.nim", "--name", "proj"]);
        let request = args.to_request(false, Path::new("/work")).unwrap();
        assert_eq!(request.name(), "proj");
        assert_eq!(request.policy(), ObfuscationPolicy::MarkedUnitsOnly);
        assert_eq!(request.work_dir(), Path::new("/work"));

        let request = compile_args(&["src/hello.nim"])
            .to_request(true, Path::new("/work"))
            .unwrap();
        assert_eq!(request.name(), "hello");
        assert_eq!(request.policy(), ObfuscationPolicy::AllUnits);
    }

    #[test]
    fn test_to_request_rejects_path_like_names() {
        for name in ["..", "", "/abs", "a/b"] {
            let args = compile_args(&["hello.nim", "--name", name]);
            let err = args.to_request(false, Path::new("/work")).unwrap_err();
            assert!(
                matches!(err, crate::error::DenimError::InvalidProjectName { .. }),
                "{name:?} gave {err:?}"
            );
        }
    }
}

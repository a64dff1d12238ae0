//! Build Manifest Entity
//!
//! Typed view of the JSON manifest the front-end writes next to the
//! generated C sources. Parsing is the validation boundary: everything past
//! `BuildManifest::from_json` can rely on well-formed steps.
//!
//! ## Schema
//!
//! ```json
//! {
//!   "compile": [["/cache/@mhello.nim.c", "clang -c -w ... -o @mhello.nim.c.o"]],
//!   "link": ["@mhello.nim.c.o", "icon.res"],
//!   "outputFile": "hello.exe"
//! }
//! ```
//!
//! Capitalized keys (`Compile`, `Link`, `OutputFile`) are accepted too. Unknown
//! keys are ignored; wrong types are fatal.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{DenimError, DenimResult};

/// Link inputs with this suffix are compiled resources the backend will not link
pub const RESOURCE_SUFFIX: &str = ".res";

/// Flag that keeps debug info in the final link
pub const DEBUG_INFO_FLAG: &str = "-g";

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default, alias = "Compile")]
    compile: Vec<Vec<String>>,

    #[serde(default, alias = "Link")]
    link: Vec<String>,

    #[serde(default, rename = "outputFile", alias = "OutputFile")]
    output_file: String,
}

/// One translation unit to replay through the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileStep {
    /// Generated C source the step compiles
    pub source: PathBuf,
    /// Backend arguments, compiler token already removed
    pub arguments: Vec<String>,
}

impl CompileStep {
    /// File name of the source, as used for marker detection and reporting
    pub fn unit_name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.source.display().to_string())
    }
}

/// The final link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStep {
    pub output: PathBuf,
    /// Link inputs in manifest order, resources removed
    pub inputs: Vec<String>,
    /// Resource entries that were dropped from `inputs`
    pub skipped_resources: Vec<String>,
}

impl LinkStep {
    /// `-o <output> <inputs...> -g`
    pub fn arguments(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.inputs.len() + 3);
        args.push("-o".to_string());
        args.push(self.output.display().to_string());
        args.extend(self.inputs.iter().cloned());
        args.push(DEBUG_INFO_FLAG.to_string());
        args
    }
}

/// Parsed front-end manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildManifest {
    pub compile_steps: Vec<CompileStep>,
    pub link: LinkStep,
}

impl BuildManifest {
    /// Decode `content` (read from `path`), stripping a leading `compiler`
    /// token from each compile command.
    pub fn from_json(content: &str, path: &Path, compiler: &str) -> DenimResult<Self> {
        let raw: RawManifest =
            serde_json::from_str(content).map_err(|e| DenimError::ManifestMalformed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let compile_steps = raw
            .compile
            .into_iter()
            .enumerate()
            .map(|(index, record)| parse_step(index, record, compiler))
            .collect::<DenimResult<Vec<_>>>()?;

        if raw.output_file.trim().is_empty() {
            return Err(DenimError::ManifestMalformed {
                path: path.to_path_buf(),
                message: "missing output file".to_string(),
            });
        }

        let (skipped_resources, inputs): (Vec<String>, Vec<String>) = raw
            .link
            .into_iter()
            .partition(|input| is_resource(input));

        Ok(Self {
            compile_steps,
            link: LinkStep {
                output: PathBuf::from(raw.output_file),
                inputs,
                skipped_resources,
            },
        })
    }
}

fn parse_step(index: usize, record: Vec<String>, compiler: &str) -> DenimResult<CompileStep> {
    let [source, command]: [String; 2] = record
        .try_into()
        .map_err(|step| DenimError::MalformedStep { index, step })?;

    let tokens: Vec<String> = command.split_whitespace().map(str::to_string).collect();
    let arguments = strip_compiler_token(tokens, compiler);
    if arguments.is_empty() {
        return Err(DenimError::MalformedStep {
            index,
            step: vec![source, command],
        });
    }

    Ok(CompileStep {
        source: PathBuf::from(source),
        arguments,
    })
}

/// Drop the first token when it names the backend compiler.
///
/// The orchestrator supplies the backend path itself, so a recorded
/// `clang`, `clang.exe` or `/path/to/clang[.exe]` in front of the arguments
/// must not be passed through as an input.
pub fn strip_compiler_token(mut tokens: Vec<String>, compiler: &str) -> Vec<String> {
    if tokens.first().is_some_and(|t| names_compiler(t, compiler)) {
        tokens.remove(0);
    }
    tokens
}

fn names_compiler(token: &str, compiler: &str) -> bool {
    let file_name = token.rsplit(['/', '\\']).next().unwrap_or(token);
    let bare = file_name
        .strip_suffix(".exe")
        .or_else(|| file_name.strip_suffix(".EXE"))
        .unwrap_or(file_name);
    bare == compiler
}

/// Whether a link input is a compiled resource file
pub fn is_resource(input: &str) -> bool {
    input.ends_with(RESOURCE_SUFFIX)
}

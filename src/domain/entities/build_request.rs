//! Build Request Entity
//!
//! What the caller asked to build. Immutable for the duration of one build.

use std::path::{Component, Path, PathBuf};

use crate::domain::policies::ObfuscationPolicy;
use crate::error::{DenimError, DenimResult};

/// Name used when no usable file stem is available
pub const FALLBACK_PROJECT_NAME: &str = "project";

/// Input to the build orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    name: String,
    files: Vec<PathBuf>,
    output: Option<PathBuf>,
    policy: ObfuscationPolicy,
    work_dir: PathBuf,
}

impl BuildRequest {
    /// Create a request for `files`, named after the first file's stem.
    pub fn new(files: Vec<PathBuf>) -> Self {
        let name = files
            .first()
            .map(|f| default_project_name(f))
            .unwrap_or_else(|| FALLBACK_PROJECT_NAME.to_string());
        Self {
            name,
            files,
            output: None,
            policy: ObfuscationPolicy::default(),
            work_dir: PathBuf::from("."),
        }
    }

    /// Override the project name (also names the scratch directory)
    ///
    /// The name must be a single plain path component.
    pub fn with_name(mut self, name: impl Into<String>) -> DenimResult<Self> {
        let name = name.into();
        validate_project_name(&name)?;
        self.name = name;
        Ok(self)
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn with_policy(mut self, policy: ObfuscationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Directory the front-end runs in
    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    pub fn policy(&self) -> ObfuscationPolicy {
        self.policy
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }
}

/// Check that `name` is exactly one normal path component.
pub fn validate_project_name(name: &str) -> DenimResult<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(()),
        _ => Err(DenimError::InvalidProjectName {
            name: name.to_string(),
        }),
    }
}

fn default_project_name(file: &Path) -> String {
    file.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| validate_project_name(s).is_ok())
        .unwrap_or_else(|| FALLBACK_PROJECT_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_defaults_to_first_file_stem() {
        let req = BuildRequest::new(vec![PathBuf::from("src/hello.nim"), PathBuf::from("b.nim")]);
        assert_eq!(req.name(), "hello");
        assert_eq!(req.policy(), ObfuscationPolicy::MarkedUnitsOnly);
        assert!(req.output().is_none());
    }

    #[test]
    fn name_falls_back_without_files() {
        let req = BuildRequest::new(vec![]);
        assert_eq!(req.name(), "project");
    }

    #[test]
    fn builder_overrides() {
        let req = BuildRequest::new(vec![PathBuf::from("a.nim")])
            .with_name("implant")
            .unwrap()
            .with_output(Some(PathBuf::from("out/implant.exe")))
            .with_policy(ObfuscationPolicy::AllUnits)
            .with_work_dir("/tmp/work");
        assert_eq!(req.name(), "implant");
        assert_eq!(req.output(), Some(Path::new("out/implant.exe")));
        assert_eq!(req.policy(), ObfuscationPolicy::AllUnits);
        assert_eq!(req.work_dir(), Path::new("/tmp/work"));
    }

    #[test]
    fn with_name_rejects_names_that_leave_the_scratch_root() {
        for bad in ["..", ".", "", "/abs", "a/b", "../sibling", "name/"] {
            let err = BuildRequest::new(vec![PathBuf::from("a.nim")])
                .with_name(bad)
                .unwrap_err();
            assert!(
                matches!(err, DenimError::InvalidProjectName { ref name } if name == bad),
                "{bad:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn with_name_accepts_plain_names() {
        for good in ["implant", "my-app.v2", "..hidden"] {
            let req = BuildRequest::new(vec![PathBuf::from("a.nim")])
                .with_name(good)
                .unwrap();
            assert_eq!(req.name(), good);
        }
    }

    #[test]
    fn dot_stem_falls_back_to_safe_name() {
        let req = BuildRequest::new(vec![PathBuf::from("..nim")]);
        assert_eq!(req.name(), FALLBACK_PROJECT_NAME);

        let req = BuildRequest::new(vec![PathBuf::from("src/..")]);
        assert_eq!(req.name(), FALLBACK_PROJECT_NAME);
    }
}

use denim::DenimError;

use crate::ui::terminal::detect_capabilities;
use crate::ui::theme::{colors, paint, Icons};

/// Render an error for the terminal, with a fix hint where one is known
pub fn format_error(err: &anyhow::Error) -> String {
    let caps = detect_capabilities();
    format_error_with(err, caps.supports_color && !caps.is_ci, caps.supports_unicode)
}

fn format_error_with(err: &anyhow::Error, color: bool, unicode: bool) -> String {
    let icons = Icons::new(unicode);
    let header = paint(icons.error, colors::ERROR, color);

    let Some(denim) = err.downcast_ref::<DenimError>() else {
        return format!("{} {}\n", header, err);
    };

    let mut out = match denim {
        DenimError::ExternalProcess { stage, code, stderr } => {
            let status = match code {
                Some(code) => format!("exit code {}", code),
                None => "terminated by signal".to_string(),
            };
            let mut text = format!("{} {} failed ({})\n", header, stage, status);
            for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
                text.push_str(&format!("  {}\n", paint(line, colors::DIM, color)));
            }
            text
        }
        other => format!("{} {}\n", header, other),
    };

    if let Some(fix) = fix_hint(denim) {
        out.push_str(&format!("\n{} {}\n", paint("FIX:", colors::INFO, color), fix));
    }
    out
}

fn fix_hint(err: &DenimError) -> Option<String> {
    match err {
        DenimError::ExternalToolMissing { hint, .. } => Some(hint.clone()),
        DenimError::OutOfRange { max, .. } => Some(format!("pass a value between 0 and {}", max)),
        DenimError::ManifestNotFound { .. } => {
            Some("check that your Nim version supports --genScript".to_string())
        }
        DenimError::Config { file, .. } => Some(format!("edit or remove {}", file.display())),
        DenimError::InvalidProjectName { .. } => {
            Some("pass a plain name to --name, such as --name implant".to_string())
        }
        _ => None,
    }
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let mut event = serde_json::json!({
            "event": "error",
            "message": err.to_string(),
        });
        if let Some(stage) = err.downcast_ref::<DenimError>().and_then(DenimError::stage) {
            event["stage"] = serde_json::Value::String(stage.to_string());
        }
        let _ = crate::ui::json::emit(event);
        return;
    }

    eprint!("{}", format_error(err));
}

#[cfg(test)]
mod tests {
    use super::*;
    use denim::domain::value_objects::{BuildStage, ObfuscationFeature};
    use std::path::PathBuf;

    #[test]
    fn generic_error_gets_plain_header() {
        let err = anyhow::anyhow!("Generic error message");
        let rendered = format_error_with(&err, false, false);
        assert_eq!(rendered, "[FAIL] Generic error message\n");
    }

    #[test]
    fn missing_tool_shows_hint() {
        let err = anyhow::Error::from(DenimError::ExternalToolMissing {
            tool: "nim".to_string(),
            path: PathBuf::from("nim"),
            hint: "install Nim and put it on PATH, or set DENIM_FRONTEND".to_string(),
        });
        let rendered = format_error_with(&err, false, false);
        assert!(rendered.contains("nim not found"));
        assert!(rendered.contains("FIX: install Nim and put it on PATH"));
    }

    #[test]
    fn process_failure_indents_stderr() {
        let err = anyhow::Error::from(DenimError::ExternalProcess {
            stage: BuildStage::Compile {
                source: "@mhello.nim.c".to_string(),
            },
            code: Some(1),
            stderr: "hello.c:1: error: boom\n\n".to_string(),
        });
        let rendered = format_error_with(&err, false, false);
        assert!(rendered.starts_with("[FAIL] compile of @mhello.nim.c failed (exit code 1)\n"));
        assert!(rendered.contains("  hello.c:1: error: boom\n"));
        assert!(!rendered.contains("FIX:"));
    }

    #[test]
    fn out_of_range_names_the_limit() {
        let err = anyhow::Error::from(DenimError::OutOfRange {
            feature: ObfuscationFeature::BogusControlFlowLoop,
            value: 9,
            max: 5,
        });
        let rendered = format_error_with(&err, false, true);
        assert!(rendered.contains("between 0 and 5"));
    }

    #[test]
    fn manifest_not_found_points_at_gen_script() {
        let err = anyhow::Error::from(DenimError::ManifestNotFound {
            dir: PathBuf::from("/cache/hello"),
        });
        let rendered = format_error_with(&err, false, false);
        assert!(rendered.contains("--genScript"));
    }
}

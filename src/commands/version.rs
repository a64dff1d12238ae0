use anyhow::{Context, Result};

use denim::application::tool_version;
use denim::config::Config;
use denim::infrastructure::fs::denim_state_dir;
use denim::infrastructure::{check_backend_installed, locate_toolchain, SystemProcessRunner};
use denim::presentation::ColorWhen;

use crate::ui::context::UiContext;
use crate::ui::output::print_config_warnings;
use crate::ui::theme::{colors, paint, Icons};

/// Show denim's version and what the configured tools report.
///
/// A missing tool is shown, not treated as an error.
pub fn cmd_version(json: bool, verbose: u8, color: Option<ColorWhen>) -> Result<()> {
    let state_dir = denim_state_dir().context("could not determine the home directory")?;
    let (config, warnings) = Config::load_user(&state_dir)?;
    let ui = UiContext::new(json, verbose, color, &config);
    print_config_warnings(&warnings, &ui);

    let toolchain = locate_toolchain(&config.toolchain, &state_dir)?;
    let runner = SystemProcessRunner::new();

    let frontend = tool_version(&runner, &toolchain.frontend.version_invocation(), || {
        toolchain.frontend.missing_error()
    });
    let backend = check_backend_installed(&toolchain.backend).and_then(|_| {
        tool_version(&runner, &toolchain.backend.version_invocation(), || {
            toolchain.backend.missing_error(&toolchain.backend.executable)
        })
    });

    if json {
        crate::ui::json::emit(serde_json::json!({
            "event": "version",
            "denim": env!("CARGO_PKG_VERSION"),
            "frontend": {
                "path": toolchain.frontend.executable.display().to_string(),
                "version": frontend.as_ref().ok(),
                "error": frontend.as_ref().err().map(|e| e.to_string()),
            },
            "backend": {
                "path": toolchain.backend.executable.display().to_string(),
                "version": backend.as_ref().ok(),
                "error": backend.as_ref().err().map(|e| e.to_string()),
            },
        }))?;
        return Ok(());
    }

    let icons = Icons::new(ui.unicode);
    println!("denim {}", env!("CARGO_PKG_VERSION"));
    for (label, result) in [("front-end", &frontend), ("backend", &backend)] {
        match result {
            Ok(version) => println!(
                "  {} {:<10} {}",
                paint(icons.success, colors::SUCCESS, ui.color),
                label,
                version
            ),
            Err(err) => println!(
                "  {} {:<10} {}",
                paint(icons.warning, colors::WARNING, ui.color),
                label,
                err
            ),
        }
    }
    Ok(())
}

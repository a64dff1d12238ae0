//! Compile command handler
//!
//! Loads configuration, overlays command-line obfuscation settings and runs
//! the build use case with a console or NDJSON event sink.

use std::sync::Arc;

use anyhow::{Context, Result};

use denim::application::BuildReport;
use denim::config::Config;
use denim::domain::ports::BuildEventSink;
use denim::infrastructure::fs::denim_state_dir;
use denim::infrastructure::JsonEventSink;
use denim::presentation::{create_build_use_case, ColorWhen, CompileArgs};

use crate::ui::console::ConsoleEventSink;
use crate::ui::context::UiContext;
use crate::ui::output::print_config_warnings;
use crate::ui::theme::{colors, paint};

/// Execute the compile command
pub fn cmd_compile(
    args: &CompileArgs,
    json: bool,
    verbose: u8,
    color: Option<ColorWhen>,
) -> Result<()> {
    let state_dir = denim_state_dir().context("could not determine the home directory")?;
    let (mut config, warnings) = Config::load_user(&state_dir)?;
    let ui = UiContext::new(json, verbose, color, &config);
    print_config_warnings(&warnings, &ui);

    args.apply_to(&mut config.obfuscation);
    let params = config.obfuscation.to_parameters()?;
    tracing::debug!(?params, "obfuscation parameters");

    let work_dir = std::env::current_dir().context("could not read the current directory")?;
    let request = args.to_request(config.build.obfuscate_all, &work_dir)?;

    let use_case = create_build_use_case(&config, &state_dir)?;
    let sink: Arc<dyn BuildEventSink> = if json {
        Arc::new(JsonEventSink::stdout().with_process_output(verbose > 0))
    } else {
        Arc::new(ConsoleEventSink::stdout(ui))
    };

    let report = use_case.execute_with_events(&request, &params, sink)?;

    if json {
        emit_seed_event(&report)?;
    } else {
        print_seed(&report, &ui);
    }
    Ok(())
}

fn emit_seed_event(report: &BuildReport) -> Result<()> {
    let Some(seed) = &report.seed else {
        return Ok(());
    };
    crate::ui::json::emit(serde_json::json!({
        "event": "seed",
        "command": "compile",
        "key": seed.as_str(),
        "generated": report.generated_seed,
    }))?;
    Ok(())
}

fn print_seed(report: &BuildReport, ui: &UiContext) {
    if let Some(material) = &report.generated_seed {
        println!(
            "  {} rebuild identically with --seed {}",
            paint("seed:", colors::DIM, ui.color),
            material
        );
    }
    if ui.verbose > 0 {
        if let Some(seed) = &report.seed {
            println!("  {} {}", paint("key:", colors::DIM, ui.color), seed.as_str());
        }
    }
}

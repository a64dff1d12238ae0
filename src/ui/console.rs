//! Console Event Sink
//!
//! Human-readable build progress. Captured compiler output is echoed only
//! in verbose mode.

use std::io::{self, Write};
use std::sync::Mutex;

use denim::domain::ports::{BuildEvent, BuildEventSink};
use denim::domain::value_objects::BuildPhase;

use crate::ui::context::UiContext;
use crate::ui::theme::{colors, paint, Icons};

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    ui: UiContext,
    icons: Icons,
}

impl ConsoleEventSink {
    pub fn stdout(ui: UiContext) -> Self {
        Self::with_writer(ui, io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(ui: UiContext, writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            icons: Icons::new(ui.unicode),
            ui,
        }
    }

    fn line(&self, text: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", text);
            let _ = writer.flush();
        }
    }

    fn step(&self, text: &str) {
        self.line(format!("  {} {}", paint(self.icons.arrow, colors::DIM, self.ui.color), text));
    }

    fn echo(&self, text: &str) {
        for l in text.lines().filter(|l| !l.trim().is_empty()) {
            self.line(format!("      {}", paint(l, colors::DIM, self.ui.color)));
        }
    }
}

impl BuildEventSink for ConsoleEventSink {
    fn on_event(&self, event: BuildEvent) {
        match event {
            BuildEvent::Started {
                name,
                files,
                scratch_dir,
            } => {
                let noun = if files.len() == 1 { "file" } else { "files" };
                self.line(format!(
                    "{} Building {} ({} {})",
                    paint(self.icons.progress, colors::INFO, self.ui.color),
                    name,
                    files.len(),
                    noun
                ));
                if self.ui.verbose > 0 {
                    self.step(&format!("scratch: {}", scratch_dir.display()));
                }
            }

            BuildEvent::PhaseEntered(phase) => match phase {
                BuildPhase::FrontEndCompiling => self.step("Generating C with the Nim front-end"),
                BuildPhase::Linking => self.step("Linking"),
                _ => {}
            },

            BuildEvent::ManifestLoaded {
                compile_steps,
                skipped_resources,
                ..
            } => {
                let mut text = format!("Compiling {} translation units", compile_steps);
                if skipped_resources > 0 {
                    text.push_str(&format!(" ({} resource files left out of the link)", skipped_resources));
                }
                self.step(&text);
            }

            BuildEvent::UnitCompiled {
                index,
                total,
                source,
                obfuscated,
            } => {
                let marker = if obfuscated {
                    paint(self.icons.obfuscated, colors::WARNING, self.ui.color)
                } else {
                    " ".repeat(self.icons.obfuscated.chars().count())
                };
                let counter = paint(&format!("[{}/{}]", index + 1, total), colors::DIM, self.ui.color);
                self.line(format!("    {} {} {}", counter, marker, source));
            }

            BuildEvent::ProcessOutput { stdout, stderr, .. } => {
                if self.ui.verbose > 0 {
                    self.echo(&stdout);
                    self.echo(&stderr);
                }
            }

            BuildEvent::Linked { .. } => {}

            BuildEvent::Failed { phase, .. } => {
                self.line(format!(
                    "{} Build failed during {}",
                    paint(self.icons.error, colors::ERROR, self.ui.color),
                    phase
                ));
            }

            BuildEvent::Completed {
                output,
                compiled,
                obfuscated,
            } => {
                self.line(format!(
                    "{} Built {} ({} units, {} obfuscated)",
                    paint(self.icons.success, colors::SUCCESS, self.ui.color),
                    output.display(),
                    compiled,
                    obfuscated
                ));
            }
        }
    }

    fn wants_process_output(&self) -> bool {
        self.ui.verbose > 0
    }
}

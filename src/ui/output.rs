use denim::config::ConfigWarning;

use crate::ui::context::UiContext;
use crate::ui::theme::{colors, paint, Icons};

/// Unknown config keys, with a suggestion when one is close
pub fn render_config_warnings(warnings: &[ConfigWarning], ui: &UiContext) -> String {
    let icon = paint(Icons::new(ui.unicode).warning, colors::WARNING, ui.color);
    let mut out = String::new();
    for w in warnings {
        let location = match w.line {
            Some(line) => format!("{}:{}", w.file.display(), line),
            None => w.file.display().to_string(),
        };
        out.push_str(&format!("{} Unknown config key '{}' in {}\n", icon, w.key, location));
        if let Some(suggestion) = &w.suggestion {
            out.push_str(&format!("   Did you mean '{}'?\n", suggestion));
        }
    }
    out
}

pub fn print_config_warnings(warnings: &[ConfigWarning], ui: &UiContext) {
    if ui.json || warnings.is_empty() {
        return;
    }
    eprint!("{}", render_config_warnings(warnings, ui));
}

use crossterm::style::Color;

/// Design tokens for the denim CLI.
pub mod colors {
    use super::Color;

    pub const SUCCESS: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const WARNING: Color = Color::Yellow;
    pub const INFO: Color = Color::Cyan;
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const PROGRESS: &str = "●";
    pub const OBFUSCATED: &str = "◆";
    pub const ARROW: &str = "↳";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const PROGRESS: &str = "[..]";
    pub const OBFUSCATED: &str = "[OBF]";
    pub const ARROW: &str = "->";
}

/// Icon set matching the terminal's unicode support
#[derive(Debug, Clone, Copy)]
pub struct Icons {
    pub success: &'static str,
    pub error: &'static str,
    pub warning: &'static str,
    pub progress: &'static str,
    pub obfuscated: &'static str,
    pub arrow: &'static str,
}

impl Icons {
    pub fn new(unicode: bool) -> Self {
        if unicode {
            Self {
                success: icons::SUCCESS,
                error: icons::ERROR,
                warning: icons::WARNING,
                progress: icons::PROGRESS,
                obfuscated: icons::OBFUSCATED,
                arrow: icons::ARROW,
            }
        } else {
            Self {
                success: icons_ascii::SUCCESS,
                error: icons_ascii::ERROR,
                warning: icons_ascii::WARNING,
                progress: icons_ascii::PROGRESS,
                obfuscated: icons_ascii::OBFUSCATED,
                arrow: icons_ascii::ARROW,
            }
        }
    }
}

/// Apply `color` to `text` when color output is enabled
pub fn paint(text: &str, color: Color, enabled: bool) -> String {
    use crossterm::style::Stylize;

    if enabled {
        text.with(color).to_string()
    } else {
        text.to_string()
    }
}

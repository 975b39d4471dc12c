use crossterm::style::Color;

/// Design tokens for the `lazy` CLI.
///
/// Only the semantic colors below are used; icons come from `icons` or
/// `icons_ascii` depending on terminal support.
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
    pub const ARROW: &str = "↳";
    pub const DEPLOY: &str = "📦";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const ARROW: &str = "->";
    pub const DEPLOY: &str = "[DEPLOY]";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Arrow,
    Deploy,
}

impl Icon {
    pub fn glyph(self, unicode: bool) -> &'static str {
        match (self, unicode) {
            (Icon::Success, true) => icons::SUCCESS,
            (Icon::Error, true) => icons::ERROR,
            (Icon::Warning, true) => icons::WARNING,
            (Icon::Arrow, true) => icons::ARROW,
            (Icon::Deploy, true) => icons::DEPLOY,
            (Icon::Success, false) => icons_ascii::SUCCESS,
            (Icon::Error, false) => icons_ascii::ERROR,
            (Icon::Warning, false) => icons_ascii::WARNING,
            (Icon::Arrow, false) => icons_ascii::ARROW,
            (Icon::Deploy, false) => icons_ascii::DEPLOY,
        }
    }
}

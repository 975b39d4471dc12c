use std::fmt::Write as _;

use lazydeploy::config::ConfigWarning;

use crate::ui::context::UiContext;
use crate::ui::text::ColoredText;
use crate::ui::theme::Icon;

pub fn print_config_warnings(warnings: &[ConfigWarning], ui: UiContext) {
    for w in warnings {
        eprint!("{}", format_config_warning(w, ui));
    }
}

fn format_config_warning(w: &ConfigWarning, ui: UiContext) -> String {
    let icon = ColoredText::warning(Icon::Warning.glyph(ui.unicode)).render(ui.color);
    let mut out = match w.line {
        Some(line) => format!(
            "{} Unknown config key '{}' in {}:{}\n",
            icon,
            w.key,
            w.file.display(),
            line
        ),
        None => format!(
            "{} Unknown config key '{}' in {}\n",
            icon,
            w.key,
            w.file.display()
        ),
    };

    if let Some(suggestion) = &w.suggestion {
        let _ = writeln!(out, "   Did you mean '{}'?", suggestion);
    }
    out
}

pub fn format_error(err: &anyhow::Error, ui: UiContext) -> String {
    let icon = ColoredText::error(Icon::Error.glyph(ui.unicode)).render(ui.color);
    let mut out = format!("{} {}\n", icon, ColoredText::error(err.to_string()).bold().render(ui.color));

    for cause in err.chain().skip(1) {
        let _ = writeln!(
            out,
            "  {} {}",
            Icon::Arrow.glyph(ui.unicode),
            ColoredText::dim(cause.to_string()).render(ui.color)
        );
    }
    out
}

pub fn print_error(err: &anyhow::Error, ui: UiContext) {
    eprint!("{}", format_error(err, ui));
}

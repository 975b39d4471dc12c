//! Console rendering of deploy events.

use std::io::Write;
use std::sync::Mutex;

use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use lazydeploy::domain::ports::{CopyIssue, DeployEvent, DeployEventSink};

use crate::ui::context::UiContext;
use crate::ui::progress::ProgressBar;
use crate::ui::text::ColoredText;
use crate::ui::theme::Icon;

struct ConsoleState {
    out: Box<dyn Write + Send>,
    bar: Option<ProgressBar>,
    /// A status line is drawn without a trailing newline
    live: bool,
}

/// Prints deploy progress to stdout.
///
/// On an interactive terminal the staging bar and the deploy status line
/// are redrawn in place; otherwise every update is its own line.
pub struct ConsoleEventSink {
    ui: UiContext,
    state: Mutex<ConsoleState>,
}

impl ConsoleEventSink {
    pub fn new(ui: UiContext) -> Self {
        Self::with_writer(ui, Box::new(std::io::stdout()))
    }

    pub fn with_writer(ui: UiContext, out: Box<dyn Write + Send>) -> Self {
        Self {
            ui,
            state: Mutex::new(ConsoleState {
                out,
                bar: None,
                live: false,
            }),
        }
    }

    fn icon(&self, icon: Icon) -> &'static str {
        icon.glyph(self.ui.unicode)
    }

    fn draw_live(&self, state: &mut ConsoleState, text: &str) {
        let max = usize::from(self.ui.caps.width.saturating_sub(1)).max(10);
        let text: String = text.chars().take(max).collect();
        let _ = write!(state.out, "\r");
        let _ = queue!(state.out, Clear(ClearType::CurrentLine));
        let _ = write!(state.out, "{}", text);
        let _ = state.out.flush();
        state.live = true;
    }

    fn end_live(&self, state: &mut ConsoleState) {
        if state.live {
            let _ = writeln!(state.out);
            state.live = false;
        }
    }

    fn line(&self, state: &mut ConsoleState, text: &str) {
        self.end_live(state);
        let _ = writeln!(state.out, "{}", text);
        let _ = state.out.flush();
    }

    fn copy_issues(&self, state: &mut ConsoleState, issues: &[CopyIssue]) {
        if issues.is_empty() {
            return;
        }
        let header = format!("{} Unable to copy:", self.icon(Icon::Warning));
        self.line(state, &ColoredText::warning(header).render(self.ui.color));
        for issue in issues {
            self.line(state, &format!("  {}: {}", issue.path, issue.error));
        }
    }

    fn render(&self, state: &mut ConsoleState, event: DeployEvent) {
        let color = self.ui.color;
        match event {
            DeployEvent::SeedRegistered { revision } => {
                let text = format!(
                    "{} Registered seed commit {}",
                    self.icon(Icon::Success),
                    revision
                );
                self.line(state, &ColoredText::success(text).render(color));
            }
            DeployEvent::TrackingCleared => {
                let text = format!("{} Cleared file tracking", self.icon(Icon::Success));
                self.line(state, &ColoredText::success(text).render(color));
            }
            DeployEvent::ChangesResolved {
                changed,
                candidates,
            } => {
                if self.ui.verbose > 0 {
                    let text = format!("{} changed files, {} to deploy", changed, candidates);
                    self.line(state, &ColoredText::dim(text).render(color));
                }
            }
            DeployEvent::NoChanges => self.line(state, "No files changed."),
            DeployEvent::StagingStarted { unit_count } => {
                let mut bar = ProgressBar::with_message(unit_count as u64, "Preparing files");
                bar.set_width((self.ui.caps.width / 3).clamp(10, 40));
                if self.ui.animation {
                    self.draw_live(state, &bar.render(self.ui.unicode));
                }
                state.bar = Some(bar);
            }
            DeployEvent::UnitStaged { index, .. } => {
                if let Some(mut bar) = state.bar.take() {
                    bar.set(index as u64 + 1);
                    if self.ui.animation {
                        self.draw_live(state, &bar.render(self.ui.unicode));
                    }
                    state.bar = Some(bar);
                }
            }
            DeployEvent::StagingFinished { issues } => {
                if let Some(bar) = state.bar.take() {
                    if !self.ui.animation {
                        self.line(state, &bar.render(self.ui.unicode));
                    }
                }
                self.end_live(state);
                self.copy_issues(state, &issues);
            }
            DeployEvent::DeployStarted { command } => {
                let text = format!("{} {}", self.icon(Icon::Deploy), command);
                self.line(state, &ColoredText::dim(text).render(color));
            }
            DeployEvent::DeployProgress { line } => {
                if self.ui.animation {
                    self.draw_live(state, &line);
                } else {
                    self.line(state, &line);
                }
            }
            DeployEvent::DeployJob { line } => {
                self.line(state, &ColoredText::info(line).render(color));
            }
            DeployEvent::DeployFailed { errors } => {
                let text = format!("{} Deploy failed", self.icon(Icon::Error));
                self.line(state, &ColoredText::error(text).bold().render(color));
                for error in errors {
                    self.line(state, &ColoredText::error(error).render(color));
                }
            }
            DeployEvent::Deployed {
                revision,
                unit_count,
            } => {
                let noun = if unit_count == 1 { "unit" } else { "units" };
                let text = format!(
                    "{} Deployed {} {} at {}",
                    self.icon(Icon::Success),
                    unit_count,
                    noun,
                    revision
                );
                self.line(state, &ColoredText::success(text).render(color));
            }
        }
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        self.render(&mut state, event);
    }
}

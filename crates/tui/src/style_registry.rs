//! Named presentation rules of the widget.
//!
//! The styles are built once per process on first use; every later call to
//! [`install`] hands back the same table.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use ao_protocol::{NoticeKind, ProcessingMode};
use ratatui::style::{Color, Modifier, Style};

use ao_core::view::OutputStyle;

static STYLES: OnceLock<Styles> = OnceLock::new();
static BUILDS: AtomicUsize = AtomicUsize::new(0);

/// The widget's style table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Styles {
    pub frame: Style,
    pub title: Style,
    pub badge: Style,
    pub badge_hovered: Style,
    pub user: Style,
    pub turn_header: Style,
    pub narrative: Style,
    pub agent_header: Style,
    pub label: Style,
    pub instructions: Style,
    pub step: Style,
    pub prose: Style,
    pub code: Style,
    pub terminal: Style,
    pub summary: Style,
    pub failure: Style,
    pub loading: Style,
    pub placeholder: Style,
    pub input: Style,
    pub input_disabled: Style,
    pub send_ready: Style,
    pub send_idle: Style,
    pub toggle: Style,
    pub disclaimer: Style,
}

impl Styles {
    fn build() -> Self {
        BUILDS.fetch_add(1, Ordering::SeqCst);
        let dim = Style::default().fg(Color::DarkGray);
        Self {
            frame: Style::default().fg(Color::Gray),
            title: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            badge: Style::default().fg(Color::Cyan),
            badge_hovered: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user: Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD),
            turn_header: Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            narrative: Style::default().fg(Color::White),
            agent_header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            label: dim.add_modifier(Modifier::ITALIC),
            instructions: Style::default().fg(Color::Gray),
            step: dim,
            prose: Style::default(),
            code: Style::default().fg(Color::LightYellow).bg(Color::Black),
            terminal: Style::default().fg(Color::LightGreen).bg(Color::Black),
            summary: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            failure: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            loading: Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
            placeholder: dim,
            input: Style::default().fg(Color::White),
            input_disabled: dim,
            send_ready: Style::default().fg(Color::Black).bg(Color::Cyan),
            send_idle: dim,
            toggle: Style::default().fg(Color::Gray),
            disclaimer: dim.add_modifier(Modifier::ITALIC),
        }
    }

    /// Accent of whatever currently shows progress.
    pub fn accent(&self, mode: ProcessingMode) -> Style {
        match mode {
            ProcessingMode::Init => Style::default().fg(Color::Cyan),
            ProcessingMode::Processing => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            ProcessingMode::Done => Style::default().fg(Color::Green),
        }
    }

    pub fn output(&self, style: OutputStyle) -> Style {
        match style {
            OutputStyle::Prose => self.prose,
            OutputStyle::Code => self.code,
            OutputStyle::Terminal => self.terminal,
        }
    }

    pub fn notice(&self, kind: NoticeKind) -> Style {
        match kind {
            NoticeKind::Plan | NoticeKind::Processing => self.narrative,
            NoticeKind::Step => self.step,
            NoticeKind::Answer => self.summary,
            NoticeKind::Error => self.failure,
        }
    }
}

/// Ensure the style table exists and return it.
pub fn install() -> &'static Styles {
    STYLES.get_or_init(Styles::build)
}

/// How many times the table has been built. Stays at 1 after any number of
/// [`install`] calls.
pub fn build_count() -> usize {
    BUILDS.load(Ordering::SeqCst)
}

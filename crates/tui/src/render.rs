//! Rendering of the whole overlay.
//!
//! [`render_overlay`] draws whatever instance is mounted: nothing, the
//! collapsed badge in the bottom-right corner, or the expanded panel. It
//! returns the [`OverlayLayout`] it drew so mouse events can be hit-tested
//! against the same rectangles.

use ao_core::view::OverlayView;
use ao_protocol::{OverlayConfig, ProcessingMode, VisibilityMode};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::scroll_keeper::ScrollKeeper;
use crate::style_registry::{self, Styles};
use crate::widgets::{message_list, InputGate};

const BADGE_WIDTH: u16 = 7;
const BADGE_HEIGHT: u16 = 3;
const PANEL_MAX_WIDTH: u16 = 80;
const SEND_WIDTH: u16 = 5;
const MAX_INPUT_LINES: usize = 4;

/// Host text behind the collapsed badge.
pub const HOST_HINT: &str = "Enter or click the badge to open the assistant. q quits.";

/// Rectangles of the expanded panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    pub panel: Rect,
    pub minimize: Rect,
    pub progress: Rect,
    pub messages: Rect,
    pub toggle: Rect,
    pub input: Rect,
    pub send: Rect,
    pub disclaimer: Rect,
}

/// Where the mounted instance was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayLayout {
    #[default]
    Absent,
    Collapsed {
        badge: Rect,
    },
    Expanded(PanelLayout),
}

impl OverlayLayout {
    /// Compute the layout for `visibility` inside `area`.
    pub fn compute(area: Rect, visibility: Option<VisibilityMode>, input_lines: usize) -> Self {
        match visibility {
            None => OverlayLayout::Absent,
            Some(VisibilityMode::Collapsed) => OverlayLayout::Collapsed {
                badge: badge_rect(area),
            },
            Some(VisibilityMode::Expanded) => OverlayLayout::Expanded(panel_layout(area, input_lines)),
        }
    }

    pub fn badge(&self) -> Option<Rect> {
        match self {
            OverlayLayout::Collapsed { badge } => Some(*badge),
            _ => None,
        }
    }

    pub fn panel(&self) -> Option<&PanelLayout> {
        match self {
            OverlayLayout::Expanded(panel) => Some(panel),
            _ => None,
        }
    }
}

fn badge_rect(area: Rect) -> Rect {
    let width = BADGE_WIDTH.min(area.width);
    let height = BADGE_HEIGHT.min(area.height);
    Rect {
        x: area.right().saturating_sub(width),
        y: area.bottom().saturating_sub(height),
        width,
        height,
    }
}

fn panel_layout(area: Rect, input_lines: usize) -> PanelLayout {
    let width = PANEL_MAX_WIDTH.min(area.width);
    let panel = Rect {
        x: area.right().saturating_sub(width),
        width,
        ..area
    };
    let inner = Block::default().borders(Borders::ALL).inner(panel);
    let input_height = input_lines.clamp(1, MAX_INPUT_LINES) as u16 + 2;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // Progress strip
            Constraint::Min(1),               // Message list
            Constraint::Length(1),            // Details toggle
            Constraint::Length(input_height), // Input row
            Constraint::Length(1),            // Disclaimer
        ])
        .split(inner);
    let input_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(SEND_WIDTH)])
        .split(rows[3]);

    PanelLayout {
        panel,
        minimize: Rect {
            x: panel.right().saturating_sub(5),
            y: panel.y,
            width: 3.min(panel.width),
            height: 1.min(panel.height),
        },
        progress: rows[0],
        messages: rows[1],
        toggle: rows[2],
        input: input_row[0],
        send: input_row[1],
        disclaimer: rows[4],
    }
}

/// Draw the overlay described by `view`.
pub fn render_overlay(
    frame: &mut Frame,
    view: &OverlayView<'_>,
    config: &OverlayConfig,
    gate: &InputGate,
    scroll: &mut ScrollKeeper,
) -> OverlayLayout {
    let styles = style_registry::install();
    let area = frame.area();
    let layout = OverlayLayout::compute(area, view.visibility, gate.line_count());

    match &layout {
        OverlayLayout::Absent => {}
        OverlayLayout::Collapsed { badge } => {
            frame.render_widget(Paragraph::new(Span::styled(HOST_HINT, styles.disclaimer)), area);
            render_badge(frame, *badge, view, styles);
        }
        OverlayLayout::Expanded(panel) => {
            render_panel(frame, panel, view, config, gate, scroll, styles);
        }
    }
    layout
}

fn render_badge(frame: &mut Frame, badge: Rect, view: &OverlayView<'_>, styles: &Styles) {
    let accent = styles.accent(view.processing);
    let style = if view.hovered {
        styles.badge_hovered
    } else {
        styles.badge
    };
    let glyph = match view.processing {
        ProcessingMode::Processing => "◌",
        ProcessingMode::Init | ProcessingMode::Done => "◉",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(accent)
        .style(style);
    frame.render_widget(Clear, badge);
    frame.render_widget(
        Paragraph::new(Span::styled(glyph, accent.patch(style)))
            .alignment(Alignment::Center)
            .block(block),
        badge,
    );
}

fn render_panel(
    frame: &mut Frame,
    panel: &PanelLayout,
    view: &OverlayView<'_>,
    config: &OverlayConfig,
    gate: &InputGate,
    scroll: &mut ScrollKeeper,
    styles: &Styles,
) {
    let accent = styles.accent(view.processing);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles.frame)
        .title(Line::from(vec![
            Span::styled(" ◉ ", accent),
            Span::styled(format!("{} ", config.title), styles.title),
        ]))
        .title(Line::from(Span::styled("[–]", styles.toggle)).alignment(Alignment::Right));
    frame.render_widget(Clear, panel.panel);
    frame.render_widget(block, panel.panel);

    let progress = match view.processing {
        ProcessingMode::Init => "● Ready",
        ProcessingMode::Processing => "◌ Processing",
        ProcessingMode::Done => "✓ Done",
    };
    frame.render_widget(Paragraph::new(Span::styled(progress, accent)), panel.progress);

    let items = view.items();
    message_list::render(frame, panel.messages, &items, styles, scroll);

    let check = if view.details_visible { "x" } else { " " };
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("[{check}] Show Details  (Ctrl+D)"),
            styles.toggle,
        )),
        panel.toggle,
    );

    let placeholder = if view.input_enabled {
        &config.prompt_placeholder
    } else {
        &config.working_placeholder
    };
    let cursor: Option<Position> = gate.render(
        panel.input,
        panel.send,
        frame.buffer_mut(),
        styles,
        view.input_enabled,
        placeholder,
    );
    if let Some(position) = cursor {
        frame.set_cursor_position(position);
    }

    frame.render_widget(
        Paragraph::new(Span::styled(config.disclaimer.as_str(), styles.disclaimer))
            .alignment(Alignment::Center),
        panel.disclaimer,
    );
}

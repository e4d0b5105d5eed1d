//! Message list widget.
//!
//! Turns the view-model's render items into styled lines and draws them as
//! a wrapped, scrollable paragraph with a scrollbar.

use ao_core::view::{OutputStyle, RenderItem};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame,
};

use crate::scroll_keeper::ScrollKeeper;
use crate::style_registry::Styles;

/// Text of the synthesized loading indicator.
pub const LOADING_TEXT: &str = "Working on it...";

/// Convert render items into styled lines.
pub fn item_lines<'a>(items: &[RenderItem<'a>], styles: &Styles) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for item in items {
        match *item {
            RenderItem::User(text) => {
                lines.push(Line::default());
                for (i, part) in text.lines().enumerate() {
                    let prefix = if i == 0 { "You: " } else { "     " };
                    lines.push(Line::from(vec![
                        Span::styled(prefix, styles.user),
                        Span::raw(part),
                    ]));
                }
            }
            RenderItem::TurnHeader => {
                lines.push(Line::styled("Agent", styles.turn_header));
            }
            RenderItem::Narrative(text) => {
                lines.push(Line::from(vec![
                    Span::styled("▸ ", styles.turn_header),
                    Span::styled(text, styles.narrative),
                ]));
            }
            RenderItem::AgentHeader(name) => {
                lines.push(Line::styled(format!("┌ {name}"), styles.agent_header));
            }
            RenderItem::Instructions(text) => {
                lines.push(Line::from(vec![
                    Span::styled("│ ", styles.agent_header),
                    Span::styled(text, styles.instructions),
                ]));
            }
            RenderItem::StepsLabel => {
                lines.push(Line::from(vec![
                    Span::styled("│ ", styles.agent_header),
                    Span::styled("Steps:", styles.label),
                ]));
            }
            RenderItem::Step(text) => {
                lines.push(Line::from(vec![
                    Span::styled("│   • ", styles.agent_header),
                    Span::styled(text, styles.step),
                ]));
            }
            RenderItem::OutputLabel => {
                lines.push(Line::from(vec![
                    Span::styled("│ ", styles.agent_header),
                    Span::styled("Output:", styles.label),
                ]));
            }
            RenderItem::Output { text, style } => {
                let gutter = match style {
                    OutputStyle::Terminal => "│ $ ",
                    OutputStyle::Code | OutputStyle::Prose => "│   ",
                };
                for part in text.lines() {
                    lines.push(Line::from(vec![
                        Span::styled(gutter, styles.agent_header),
                        Span::styled(part, styles.output(style)),
                    ]));
                }
            }
            RenderItem::Notice { kind, ref text } => {
                for part in text.lines() {
                    lines.push(Line::styled(part.to_string(), styles.notice(kind)));
                }
            }
            RenderItem::Summary(text) => {
                lines.push(Line::styled("Summary", styles.summary));
                lines.extend(text.lines().map(|part| Line::styled(part, styles.narrative)));
            }
            RenderItem::Failure(text) => {
                lines.push(Line::styled("✗ Task failed", styles.failure));
                lines.extend(text.lines().map(|part| Line::styled(part, styles.failure)));
            }
            RenderItem::Loading => {
                lines.push(Line::styled(LOADING_TEXT, styles.loading));
            }
        }
    }
    lines
}

/// Draw the list into `area`, measuring it into `scroll` first.
pub fn render(frame: &mut Frame, area: Rect, items: &[RenderItem<'_>], styles: &Styles, scroll: &mut ScrollKeeper) {
    let paragraph = Paragraph::new(item_lines(items, styles)).wrap(Wrap { trim: false });
    let content_lines = paragraph.line_count(area.width.saturating_sub(1));
    let viewport_lines = area.height as usize;
    scroll.measure(content_lines, viewport_lines);

    let offset = u16::try_from(scroll.offset()).unwrap_or(u16::MAX);
    let text_area = Rect {
        width: area.width.saturating_sub(1),
        ..area
    };
    frame.render_widget(paragraph.scroll((offset, 0)), text_area);

    if content_lines > viewport_lines {
        let mut scrollbar_state = ScrollbarState::default()
            .content_length(scroll.max_offset() + 1)
            .viewport_content_length(viewport_lines)
            .position(scroll.offset());
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));
        frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style_registry;
    use ao_protocol::NoticeKind;

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_agent_card_lines() {
        let items = [
            RenderItem::AgentHeader("WebAgent"),
            RenderItem::Instructions("search weather"),
            RenderItem::StepsLabel,
            RenderItem::Step("opened browser"),
            RenderItem::OutputLabel,
            RenderItem::Output {
                text: "ls\nfile.txt",
                style: OutputStyle::Terminal,
            },
        ];

        let lines = plain(&item_lines(&items, style_registry::install()));

        assert_eq!(
            lines,
            vec![
                "┌ WebAgent",
                "│ search weather",
                "│ Steps:",
                "│   • opened browser",
                "│ Output:",
                "│ $ ls",
                "│ $ file.txt",
            ]
        );
    }

    #[test]
    fn test_failure_shows_literal_output() {
        let items = [RenderItem::Failure("tool failure")];

        let lines = plain(&item_lines(&items, style_registry::install()));

        assert_eq!(lines, vec!["✗ Task failed", "tool failure"]);
    }

    #[test]
    fn test_error_notice_uses_failure_style() {
        let styles = style_registry::install();
        let items = [RenderItem::Notice {
            kind: NoticeKind::Error,
            text: "quota exceeded".to_string(),
        }];

        let lines = item_lines(&items, styles);

        assert_eq!(lines[0].style, styles.failure);
    }
}

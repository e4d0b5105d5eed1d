//! Mapping of terminal input to overlay actions.
//!
//! Keys and mouse events mean different things depending on which instance
//! is mounted; this module decides what, without touching any state.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use ao_protocol::VisibilityMode;

use crate::render::OverlayLayout;

/// Lines moved by one mouse wheel notch.
pub const WHEEL_LINES: usize = 3;

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Quit,
    ActivateBadge,
    Minimize,
    ToggleDetails,
    ScrollUp(usize),
    ScrollDown(usize),
    PageUp,
    PageDown,
    /// Hover over (or off) the badge.
    Hover(bool),
    /// Click on the send control.
    Send,
    /// Offer the key to the input gate.
    Input(KeyEvent),
    None,
}

/// Decide what a key press means for the mounted instance.
pub fn map_key(key: KeyEvent, visibility: Option<VisibilityMode>) -> UiAction {
    if key.kind == KeyEventKind::Release {
        return UiAction::None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        return UiAction::Quit;
    }

    match visibility {
        None => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => UiAction::Quit,
            _ => UiAction::None,
        },
        Some(VisibilityMode::Collapsed) => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => UiAction::ActivateBadge,
            KeyCode::Char('q') | KeyCode::Esc => UiAction::Quit,
            _ => UiAction::None,
        },
        Some(VisibilityMode::Expanded) => match key.code {
            KeyCode::Esc => UiAction::Minimize,
            KeyCode::Char('d') if ctrl => UiAction::ToggleDetails,
            KeyCode::Up => UiAction::ScrollUp(1),
            KeyCode::Down => UiAction::ScrollDown(1),
            KeyCode::PageUp => UiAction::PageUp,
            KeyCode::PageDown => UiAction::PageDown,
            _ => UiAction::Input(key),
        },
    }
}

/// Decide what a mouse event means, hit-testing against the drawn layout.
pub fn map_mouse(mouse: MouseEvent, layout: &OverlayLayout) -> UiAction {
    let at = Position::new(mouse.column, mouse.row);
    let hit = |rect: Rect| rect.contains(at);

    match layout {
        OverlayLayout::Absent => UiAction::None,
        OverlayLayout::Collapsed { badge } => match mouse.kind {
            MouseEventKind::Moved => UiAction::Hover(hit(*badge)),
            MouseEventKind::Down(MouseButton::Left) if hit(*badge) => UiAction::ActivateBadge,
            _ => UiAction::None,
        },
        OverlayLayout::Expanded(panel) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if hit(panel.minimize) => UiAction::Minimize,
            MouseEventKind::Down(MouseButton::Left) if hit(panel.toggle) => UiAction::ToggleDetails,
            MouseEventKind::Down(MouseButton::Left) if hit(panel.send) => UiAction::Send,
            MouseEventKind::ScrollUp if hit(panel.messages) => UiAction::ScrollUp(WHEEL_LINES),
            MouseEventKind::ScrollDown if hit(panel.messages) => UiAction::ScrollDown(WHEEL_LINES),
            _ => UiAction::None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_keys_on_collapsed_badge() {
        let collapsed = Some(VisibilityMode::Collapsed);

        assert_eq!(map_key(KeyEvent::from(KeyCode::Enter), collapsed), UiAction::ActivateBadge);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('q')), collapsed), UiAction::Quit);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('x')), collapsed), UiAction::None);
    }

    #[test]
    fn test_keys_on_expanded_panel() {
        let expanded = Some(VisibilityMode::Expanded);

        assert_eq!(map_key(KeyEvent::from(KeyCode::Esc), expanded), UiAction::Minimize);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL), expanded),
            UiAction::ToggleDetails
        );
        assert_eq!(map_key(KeyEvent::from(KeyCode::PageUp), expanded), UiAction::PageUp);
        // 'q' is text while the panel is open
        let q = KeyEvent::from(KeyCode::Char('q'));
        assert_eq!(map_key(q, expanded), UiAction::Input(q));
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert_eq!(map_key(ctrl_c, None), UiAction::Quit);
        assert_eq!(map_key(ctrl_c, Some(VisibilityMode::Expanded)), UiAction::Quit);
    }

    #[test]
    fn test_badge_hover_and_click() {
        let layout = OverlayLayout::compute(Rect::new(0, 0, 80, 24), Some(VisibilityMode::Collapsed), 1);

        assert_eq!(map_mouse(mouse(MouseEventKind::Moved, 75, 22), &layout), UiAction::Hover(true));
        assert_eq!(map_mouse(mouse(MouseEventKind::Moved, 10, 5), &layout), UiAction::Hover(false));
        assert_eq!(
            map_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 75, 22), &layout),
            UiAction::ActivateBadge
        );
    }

    #[test]
    fn test_panel_clicks() {
        let layout = OverlayLayout::compute(Rect::new(0, 0, 80, 24), Some(VisibilityMode::Expanded), 1);
        let panel = *layout.panel().unwrap();
        let click = MouseEventKind::Down(MouseButton::Left);

        assert_eq!(
            map_mouse(mouse(click, panel.send.x + 1, panel.send.y + 1), &layout),
            UiAction::Send
        );
        assert_eq!(
            map_mouse(mouse(click, panel.toggle.x, panel.toggle.y), &layout),
            UiAction::ToggleDetails
        );
        assert_eq!(
            map_mouse(mouse(click, panel.minimize.x, panel.minimize.y), &layout),
            UiAction::Minimize
        );
        assert_eq!(
            map_mouse(
                mouse(MouseEventKind::ScrollUp, panel.messages.x, panel.messages.y),
                &layout
            ),
            UiAction::ScrollUp(WHEEL_LINES)
        );
    }
}

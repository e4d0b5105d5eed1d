//! Event handling types for the TUI.
//!
//! Keyboard and mouse events are offered to the widgets of the mounted
//! overlay in order; each widget reports whether it used the event.

/// Status of an event after being offered to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// The widget handled the event; stop propagating it.
    Consumed,
    /// The widget ignored the event; offer it to the next handler.
    NotConsumed,
}

impl EventStatus {
    pub fn is_consumed(self) -> bool {
        self == EventStatus::Consumed
    }
}

impl From<bool> for EventStatus {
    fn from(consumed: bool) -> Self {
        if consumed {
            EventStatus::Consumed
        } else {
            EventStatus::NotConsumed
        }
    }
}

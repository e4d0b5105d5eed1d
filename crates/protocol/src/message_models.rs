//! Controller notice models.
//!
//! Besides agent progress, the controller can post short notices into the
//! current turn (a plan line, a step, a final answer, an error). The producer
//! declares whether the body is plain text or structured data, so the UI
//! never has to guess by trial decoding.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Kind of a controller notice, deciding how it renders.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// Turn-level narration, always visible.
    #[default]
    Plan,

    /// Step-level detail, hidden while details are switched off.
    Step,

    /// Final answer of the task.
    Answer,

    /// Error reported by the controller.
    Error,

    /// The controller is still working; rendered like a plan line.
    Processing,
}

impl NoticeKind {
    /// Whether the notice is subject to the details toggle.
    pub fn is_step_level(self) -> bool {
        matches!(self, NoticeKind::Step)
    }
}

/// Body of a notice, tagged by the producer.
///
/// ```json
/// { "kind": "text", "value": "Opening the page" }
/// { "kind": "structured", "value": { "url": "https://example.com" } }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum MessageBody {
    /// Literal text, displayed as is.
    Text(String),

    /// Structured JSON payload.
    Structured(serde_json::Value),
}

impl MessageBody {
    pub fn text(value: impl Into<String>) -> Self {
        MessageBody::Text(value.into())
    }

    /// Text shown to the user.
    ///
    /// A structured string value is shown without quotes; any other
    /// structured value is pretty-printed.
    pub fn display_text(&self) -> String {
        match self {
            MessageBody::Text(text) => text.clone(),
            MessageBody::Structured(serde_json::Value::String(text)) => text.clone(),
            MessageBody::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }
}

//! Controller communication protocol.
//!
//! This module defines the message types exchanged between the widget core
//! and the external controller that owns the task and the event channel.
//!
//! The protocol follows an Operation/Event pattern:
//! - `Op`: Notifications sent from the widget to the controller
//! - `Event`: Commands and progress sent from the controller to the widget
//!
//! Communication is asynchronous and channel-based; delivery order is the only
//! guarantee and there is no acknowledgment.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::agent_models::AgentProgressEvent;
use crate::message_models::{MessageBody, NoticeKind};
use crate::mode_models::ProcessingMode;

/// Notifications sent from the widget to the controller.
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// {
///   "type": "submitTask",
///   "payload": {
///     "task_id": "uuid-here",
///     "text": "find the weather in Paris"
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Op {
    /// The widget switched between collapsed and expanded.
    VisibilityChanged { collapsed: bool },

    /// The user flipped the "Show Details" toggle.
    DetailsToggled { visible: bool },

    /// The user submitted a new task.
    ///
    /// The previous conversation has been cleared and a fresh turn opened.
    SubmitTask {
        #[ts(type = "string")]
        task_id: Uuid,
        text: String,
    },

    /// The user answered a clarifying question of the running task.
    UserReply { text: String },
}

/// Which turn a progress event belongs to.
///
/// A task that asked the user a question keeps running after the answer
/// arrives. Its next events are flagged `follow_up` so they open (or continue)
/// the system turn after the user's reply instead of being rejected for
/// arriving behind a user turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
pub enum TurnTarget {
    /// Merge into the last turn, which must be a system turn.
    #[default]
    Current,

    /// Merge into the system turn following the latest user reply, opening it
    /// if the reply has not been answered yet.
    FollowUp,
}

/// Commands and progress sent from the controller to the widget.
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// {
///   "type": "setProcessingMode",
///   "payload": { "mode": "processing" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// Rebuild the widget as the collapsed badge.
    ShowCollapsed { mode: ProcessingMode },

    /// Rebuild the widget as the expanded panel.
    ShowExpanded {
        mode: ProcessingMode,
        details_visible: bool,
    },

    /// Change the processing accent and the input gate in place.
    SetProcessingMode { mode: ProcessingMode },

    /// A controller notice for the current turn.
    Notice {
        #[serde(default)]
        kind: NoticeKind,
        body: MessageBody,
        /// Set when the notice is a question the user must answer.
        #[serde(default)]
        awaiting_user_response: bool,
    },

    /// An agent progress snapshot.
    Progress {
        event: AgentProgressEvent,
        #[serde(default)]
        turn: TurnTarget,
    },
}

impl From<AgentProgressEvent> for Event {
    fn from(event: AgentProgressEvent) -> Self {
        Event::Progress {
            event,
            turn: TurnTarget::Current,
        }
    }
}

/// One decoded frame of the inbound channel.
///
/// A frame is either a tagged control [`Event`] or a bare
/// [`AgentProgressEvent`] as emitted by the orchestrator backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
pub enum InboundFrame {
    Control(Event),
    Progress(AgentProgressEvent),
}

impl InboundFrame {
    /// Decode one JSON frame.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Convert into the event the widget consumes.
    pub fn into_event(self) -> Event {
        match self {
            InboundFrame::Control(event) => event,
            InboundFrame::Progress(event) => event.into(),
        }
    }
}

//! One widget session.
//!
//! A session owns everything that must outlive the mounted instance: the
//! state machine, the conversation and the merger. The terminal UI and the
//! controller talk to the widget only through it.

use ao_protocol::{Event, MessageBody, NoticeKind};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::merger::{MergeOutcome, StreamMerger};
use crate::overlay::{ControllerHooks, OverlayStateMachine, Transition};
use crate::store::MessageStore;
use crate::view::OverlayView;

/// What a submit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty text or a disabled gate; nothing changed.
    Rejected,
    /// The conversation was cleared and a new task opened.
    NewTask { task_id: Uuid },
    /// The text was appended as an answer to a pending question.
    Reply,
}

/// What an inbound event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The widget was rebuilt.
    Transitioned(Transition),
    /// State changed in place.
    Updated,
    /// A progress event was merged.
    Merged(MergeOutcome),
    /// The event was malformed or had no target and was dropped.
    Dropped,
}

/// Widget state that survives teardown and rebuild.
#[derive(Debug)]
pub struct WidgetSession {
    overlay: OverlayStateMachine,
    store: MessageStore,
    merger: StreamMerger,
    awaiting_user_response: bool,
}

impl WidgetSession {
    pub fn new(details_visible: bool) -> Self {
        Self {
            overlay: OverlayStateMachine::new(details_visible),
            store: MessageStore::new(),
            merger: StreamMerger::new(),
            awaiting_user_response: false,
        }
    }

    pub fn overlay(&self) -> &OverlayStateMachine {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut OverlayStateMachine {
        &mut self.overlay
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn merger(&self) -> &StreamMerger {
        &self.merger
    }

    pub fn is_awaiting_user_response(&self) -> bool {
        self.awaiting_user_response
    }

    pub fn is_input_disabled(&self) -> bool {
        self.overlay.is_input_disabled()
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> OverlayView<'_> {
        OverlayView {
            visibility: self.overlay.visibility(),
            processing: self.overlay.processing(),
            details_visible: self.overlay.details_visible(),
            hovered: self.overlay.is_hovered(),
            input_enabled: self.overlay.input_enabled(),
            store: &self.store,
        }
    }

    /// Handle text submitted through the input gate.
    ///
    /// The text is trimmed; empty text and a disabled gate are rejected
    /// without touching the store or the controller.
    pub fn submit(&mut self, text: &str, hooks: &mut dyn ControllerHooks) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() || self.overlay.is_input_disabled() {
            return SubmitOutcome::Rejected;
        }

        if self.awaiting_user_response {
            self.store.push_user_reply(text);
            hooks.on_user_reply(text);
            debug!("user replied to a pending question");
            return SubmitOutcome::Reply;
        }

        let task_id = Uuid::new_v4();
        self.store.clear();
        self.store.open_turn(text);
        self.overlay.lock_input();
        hooks.on_task_submitted(task_id, text);
        info!(%task_id, "task submitted");
        SubmitOutcome::NewTask { task_id }
    }

    /// Apply one event from the controller or the channel.
    pub fn handle_event(&mut self, event: Event, hooks: &mut dyn ControllerHooks) -> EventOutcome {
        match event {
            Event::ShowCollapsed { mode } => {
                EventOutcome::Transitioned(self.overlay.show_collapsed(mode, hooks))
            }
            Event::ShowExpanded {
                mode,
                details_visible,
            } => EventOutcome::Transitioned(self.overlay.show_expanded(mode, details_visible, hooks)),
            Event::SetProcessingMode { mode } => {
                if !self.overlay.set_processing_mode(mode) {
                    debug!(mode = mode.as_str(), "processing mode set with no mounted overlay");
                }
                EventOutcome::Updated
            }
            Event::Notice {
                kind,
                body,
                awaiting_user_response,
            } => self.post_notice(kind, body, awaiting_user_response),
            Event::Progress { event, turn } => {
                match self.merger.apply(&mut self.store, event, turn) {
                    Ok(outcome) => EventOutcome::Merged(outcome),
                    Err(e) => {
                        warn!(error = %e, "dropping progress event");
                        EventOutcome::Dropped
                    }
                }
            }
        }
    }

    fn post_notice(
        &mut self,
        kind: NoticeKind,
        body: MessageBody,
        awaiting_user_response: bool,
    ) -> EventOutcome {
        self.awaiting_user_response = awaiting_user_response;
        if self.store.push_notice(kind, body) {
            EventOutcome::Updated
        } else {
            warn!(?kind, "dropping notice with no open system turn");
            EventOutcome::Dropped
        }
    }

    /// Full reinitialization.
    pub fn reset(&mut self) {
        self.overlay.reset();
        self.store.clear();
        self.awaiting_user_response = false;
    }
}

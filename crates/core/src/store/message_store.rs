//! Ordered conversation store.
//!
//! The store is the source of truth for everything the message list shows.
//! It survives every teardown/rebuild of the widget, so the rendered output
//! can always be reproduced from it.

use ao_protocol::{MessageBody, NoticeKind};

use crate::store::turn::{ConversationTurn, Notice, SystemTurn, UserTurn};

/// Ordered sequence of conversation turns.
///
/// Framing invariant: a system turn is only ever pushed directly after a user
/// turn, so the store never holds two consecutive system turns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageStore {
    turns: Vec<ConversationTurn>,
    /// Bumped on every mutation; renderers use it to detect new content.
    revision: u64,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn last_turn(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    /// Frame a new task: the user's utterance followed by an empty system turn.
    ///
    /// Returns the index of the new system turn.
    pub fn open_turn(&mut self, text: impl Into<String>) -> usize {
        self.turns.push(ConversationTurn::User(UserTurn::new(text)));
        self.turns.push(ConversationTurn::System(SystemTurn::new()));
        self.touch();
        self.turns.len() - 1
    }

    /// Append a plain user message without opening a new task.
    pub fn push_user_reply(&mut self, text: impl Into<String>) {
        self.turns.push(ConversationTurn::User(UserTurn::new(text)));
        self.touch();
    }

    /// Drop the whole conversation.
    pub fn clear(&mut self) {
        self.turns.clear();
        self.touch();
    }

    /// The last turn, if it is a system turn.
    pub fn current_system_turn(&self) -> Option<&SystemTurn> {
        self.turns.last().and_then(ConversationTurn::as_system)
    }

    pub(crate) fn current_system_turn_mut(&mut self) -> Option<&mut SystemTurn> {
        match self.turns.last_mut() {
            Some(ConversationTurn::System(turn)) => Some(turn),
            _ => None,
        }
    }

    /// The system turn answering the latest user reply.
    ///
    /// Opens an empty system turn when the conversation ends with a user turn.
    /// Returns `None` for an empty store: a follow-up needs something to
    /// follow.
    pub(crate) fn follow_up_turn_mut(&mut self) -> Option<&mut SystemTurn> {
        if matches!(self.turns.last(), Some(ConversationTurn::User(_))) {
            self.turns.push(ConversationTurn::System(SystemTurn::new()));
        }
        self.current_system_turn_mut()
    }

    /// Attach a controller notice to the current system turn.
    ///
    /// Returns `false` when the conversation does not end with a system turn.
    pub fn push_notice(&mut self, kind: NoticeKind, body: MessageBody) -> bool {
        let Some(turn) = self.current_system_turn_mut() else {
            return false;
        };
        turn.push_notice(Notice { kind, body });
        self.touch();
        true
    }

    /// Whether the current turn has started receiving progress but has not
    /// yet seen its terminal orchestrator output.
    ///
    /// This is what the loading indicator is synthesized from.
    pub fn is_awaiting_settlement(&self) -> bool {
        self.current_system_turn()
            .is_some_and(|turn| turn.events_received() > 0 && !turn.is_settled())
    }

    pub(crate) fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

//! Incremental merge of agent progress into the message store.
//!
//! Each progress event is a cumulative snapshot of one agent. The merger folds
//! events, one at a time and in delivery order, into the current system turn:
//! unknown agents are appended in first-seen order, known agents are replaced
//! field by field (last writer wins). Duplicates and shrinking step lists are
//! accepted as they come.

use ao_protocol::{AgentProgressEvent, TurnTarget};
use thiserror::Error;
use tracing::{debug, trace};

use crate::store::{MessageStore, Upsert};

/// Reasons a progress event cannot be merged.
///
/// These are recovered locally: the event is dropped and logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// The event carries no agent identity.
    #[error("Progress event has no agent_name")]
    MissingAgentName,

    /// The conversation does not end with a system turn.
    #[error("Progress event for '{agent_name}' arrived with no open system turn")]
    NoOpenSystemTurn { agent_name: String },
}

/// Result of a successful merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Where the event landed in the turn's agent list.
    pub upsert: Upsert,
    /// The event settled the turn (terminal orchestrator output).
    pub settled_turn: bool,
}

/// Folds progress events into a [`MessageStore`].
#[derive(Debug, Default)]
pub struct StreamMerger {
    merged: u64,
    dropped: u64,
}

impl StreamMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events merged so far.
    pub fn merged(&self) -> u64 {
        self.merged
    }

    /// Number of events rejected so far.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Apply one event to the store.
    ///
    /// # Errors
    ///
    /// Returns `MergeError` if the event has no agent name, or if no system
    /// turn is open for it (for `TurnTarget::Current`, the last turn must be a
    /// system turn). The store is left untouched in both cases.
    pub fn apply(
        &mut self,
        store: &mut MessageStore,
        event: AgentProgressEvent,
        target: TurnTarget,
    ) -> Result<MergeOutcome, MergeError> {
        let result = Self::merge(store, event, target);
        match &result {
            Ok(_) => self.merged += 1,
            Err(_) => self.dropped += 1,
        }
        result
    }

    fn merge(
        store: &mut MessageStore,
        event: AgentProgressEvent,
        target: TurnTarget,
    ) -> Result<MergeOutcome, MergeError> {
        if event.agent_name.trim().is_empty() {
            return Err(MergeError::MissingAgentName);
        }

        let settled_turn = event.is_terminal();
        let agent_name = event.agent_name.clone();

        let turn = match target {
            TurnTarget::Current => store.current_system_turn_mut(),
            TurnTarget::FollowUp => store.follow_up_turn_mut(),
        };
        let Some(turn) = turn else {
            return Err(MergeError::NoOpenSystemTurn { agent_name });
        };

        let upsert = turn.upsert(event);
        store.touch();

        trace!(agent = %agent_name, ?upsert, "merged progress event");
        if settled_turn {
            debug!(agent = %agent_name, "turn settled");
        }

        Ok(MergeOutcome {
            upsert,
            settled_turn,
        })
    }
}

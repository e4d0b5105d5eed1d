//! Conversation turn types.
//!
//! A conversation is a sequence of turns. A user turn holds one utterance; a
//! system turn holds the latest known state of every agent that reported for
//! it, in first-seen order, plus any notices the controller posted.

use ao_protocol::{AgentProgressEvent, MessageBody, NoticeKind, ORCHESTRATOR_AGENT, STATUS_OK};

/// Latest known state of one agent's contribution within a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRecord {
    pub agent_name: String,
    pub instructions: String,
    pub steps: Vec<String>,
    pub output: String,
    pub status_code: i32,
}

impl AgentRecord {
    pub fn from_event(event: AgentProgressEvent) -> Self {
        Self {
            agent_name: event.agent_name,
            instructions: event.instructions,
            steps: event.steps,
            output: event.output,
            status_code: event.status_code,
        }
    }

    /// Replace every field but the name with the snapshot's values.
    pub fn replace_with(&mut self, event: AgentProgressEvent) {
        self.instructions = event.instructions;
        self.steps = event.steps;
        self.output = event.output;
        self.status_code = event.status_code;
    }

    pub fn is_orchestrator(&self) -> bool {
        self.agent_name == ORCHESTRATOR_AGENT
    }
}

/// A controller notice attached to a system turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub body: MessageBody,
}

/// Whether a system turn has reached its terminal orchestrator output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement<'a> {
    /// No terminal output yet.
    Pending,
    /// The orchestrator reported success; carries the summary.
    Succeeded(&'a str),
    /// The orchestrator reported a failure; carries its output.
    Failed(&'a str),
}

/// How an event landed in a system turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted(usize),
    Updated(usize),
}

/// The system's response to one user turn.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemTurn {
    agents: Vec<AgentRecord>,
    notices: Vec<Notice>,
    events_received: usize,
}

impl SystemTurn {
    pub fn new() -> Self {
        Self {
            agents: Vec::new(),
            notices: Vec::new(),
            events_received: 0,
        }
    }

    /// Agent records in first-seen order.
    pub fn agents(&self) -> &[AgentRecord] {
        &self.agents
    }

    pub fn agent(&self, agent_name: &str) -> Option<&AgentRecord> {
        self.agents.iter().find(|a| a.agent_name == agent_name)
    }

    pub fn orchestrator(&self) -> Option<&AgentRecord> {
        self.agent(ORCHESTRATOR_AGENT)
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Number of progress events merged into this turn, duplicates included.
    pub fn events_received(&self) -> usize {
        self.events_received
    }

    pub fn settlement(&self) -> Settlement<'_> {
        match self.orchestrator() {
            Some(record) if !record.output.is_empty() => {
                if record.status_code == STATUS_OK {
                    Settlement::Succeeded(&record.output)
                } else {
                    Settlement::Failed(&record.output)
                }
            }
            _ => Settlement::Pending,
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self.settlement(), Settlement::Pending)
    }

    /// Insert a new record or replace the existing one with the same name.
    pub(crate) fn upsert(&mut self, event: AgentProgressEvent) -> Upsert {
        self.events_received += 1;
        match self
            .agents
            .iter()
            .position(|a| a.agent_name == event.agent_name)
        {
            Some(index) => {
                self.agents[index].replace_with(event);
                Upsert::Updated(index)
            }
            None => {
                self.agents.push(AgentRecord::from_event(event));
                Upsert::Inserted(self.agents.len() - 1)
            }
        }
    }

    pub(crate) fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

impl Default for SystemTurn {
    fn default() -> Self {
        Self::new()
    }
}

/// One user utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTurn {
    pub text: String,
}

impl UserTurn {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// One entry of the conversation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationTurn {
    User(UserTurn),
    System(SystemTurn),
}

impl ConversationTurn {
    pub fn as_system(&self) -> Option<&SystemTurn> {
        match self {
            ConversationTurn::System(turn) => Some(turn),
            ConversationTurn::User(_) => None,
        }
    }

    pub fn as_user(&self) -> Option<&UserTurn> {
        match self {
            ConversationTurn::User(turn) => Some(turn),
            ConversationTurn::System(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_inserts_then_updates_in_place() {
        let mut turn = SystemTurn::new();

        let first = turn.upsert(AgentProgressEvent::new("WebAgent").with_steps(["a"]));
        let second = turn.upsert(AgentProgressEvent::new("WebAgent").with_steps(["a", "b"]));

        assert_eq!(first, Upsert::Inserted(0));
        assert_eq!(second, Upsert::Updated(0));
        assert_eq!(turn.agents().len(), 1);
        assert_eq!(turn.agents()[0].steps, vec!["a", "b"]);
        assert_eq!(turn.events_received(), 2);
    }

    #[test]
    fn test_settlement_requires_orchestrator_output() {
        let mut turn = SystemTurn::new();
        assert_eq!(turn.settlement(), Settlement::Pending);

        turn.upsert(AgentProgressEvent::new("WebAgent").with_output("done", STATUS_OK));
        assert_eq!(turn.settlement(), Settlement::Pending);

        turn.upsert(AgentProgressEvent::new(ORCHESTRATOR_AGENT).with_steps(["planning"]));
        assert!(!turn.is_settled());

        turn.upsert(AgentProgressEvent::new(ORCHESTRATOR_AGENT).with_output("all good", STATUS_OK));
        assert_eq!(turn.settlement(), Settlement::Succeeded("all good"));
    }

    #[test]
    fn test_non_ok_status_is_failure() {
        let mut turn = SystemTurn::new();
        turn.upsert(AgentProgressEvent::new(ORCHESTRATOR_AGENT).with_output("tool failure", 500));

        assert_eq!(turn.settlement(), Settlement::Failed("tool failure"));
    }
}

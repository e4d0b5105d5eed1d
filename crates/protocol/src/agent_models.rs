//! Agent progress models streamed over the event channel.
//!
//! This module defines the one bit-exact wire contract of agent-overlay:
//! the progress snapshot a sub-agent (or the orchestrator) reports while a
//! task is running.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Name of the distinguished agent that narrates a whole turn.
///
/// Its steps form the turn's narrative spine and its terminal output is the
/// turn's summary (or failure notice).
pub const ORCHESTRATOR_AGENT: &str = "Orchestrator";

/// Status code the orchestrator reports for a successful task.
pub const STATUS_OK: i32 = 200;

/// One progress snapshot for a single agent.
///
/// Snapshots are cumulative: each event carries the agent's full current
/// instructions, step list and output, not a delta.
///
/// # Example
///
/// ```json
/// {
///   "agent_name": "WebAgent",
///   "instructions": "search weather",
///   "steps": ["opened browser"],
///   "output": "",
///   "status_code": 0
/// }
/// ```
///
/// Every field defaults when absent so that partial frames still decode; a
/// frame without `agent_name` decodes to an empty name and is rejected by the
/// merger instead of by the decoder.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
pub struct AgentProgressEvent {
    /// Identity of the reporting agent, unique within a turn.
    #[serde(default)]
    pub agent_name: String,

    /// The instructions the agent is currently working on.
    #[serde(default)]
    pub instructions: String,

    /// Ordered list of steps taken so far.
    #[serde(default)]
    pub steps: Vec<String>,

    /// Output produced so far. Empty until the agent has something to report.
    #[serde(default)]
    pub output: String,

    /// Status of the agent's work; `200` marks success for the orchestrator.
    #[serde(default)]
    pub status_code: i32,
}

impl AgentProgressEvent {
    /// Create an event with the given agent name and empty fields.
    pub fn new(agent_name: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            ..Self::default()
        }
    }

    /// Builder-style setter for `instructions`.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Builder-style setter for `steps`.
    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps = steps.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style setter for `output` and `status_code`.
    pub fn with_output(mut self, output: impl Into<String>, status_code: i32) -> Self {
        self.output = output.into();
        self.status_code = status_code;
        self
    }

    /// Whether this event comes from the orchestrator.
    pub fn is_orchestrator(&self) -> bool {
        self.agent_name == ORCHESTRATOR_AGENT
    }

    /// Whether this event settles its turn.
    ///
    /// Only an orchestrator snapshot with a non-empty output is terminal,
    /// regardless of its status code.
    pub fn is_terminal(&self) -> bool {
        self.is_orchestrator() && !self.output.is_empty()
    }
}

//! Pure view-model of the widget.
//!
//! Rendering is a function of the widget state and a store snapshot. This
//! module flattens that input into a list of [`RenderItem`]s; the terminal
//! widget and the transcript printer only decide how each item looks.

use ao_protocol::{NoticeKind, ProcessingMode, VisibilityMode, ORCHESTRATOR_AGENT};

use crate::store::{AgentRecord, ConversationTurn, MessageStore, Settlement, SystemTurn};

/// How an agent's output is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    Prose,
    Code,
    Terminal,
}

impl OutputStyle {
    pub fn for_agent(agent_name: &str) -> Self {
        match agent_name {
            "Coder Agent" => OutputStyle::Code,
            "Code Executor Agent" | "Executor Agent" => OutputStyle::Terminal,
            _ => OutputStyle::Prose,
        }
    }
}

/// One renderable element of the message list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderItem<'a> {
    /// A user utterance.
    User(&'a str),
    /// Header opening a system turn.
    TurnHeader,
    /// One of the orchestrator's steps, the turn's narrative spine.
    Narrative(&'a str),
    /// Card header for a sub-agent.
    AgentHeader(&'a str),
    Instructions(&'a str),
    StepsLabel,
    /// A sub-agent step; step-level, hidden without details.
    Step(&'a str),
    OutputLabel,
    Output { text: &'a str, style: OutputStyle },
    /// A controller notice.
    Notice { kind: NoticeKind, text: String },
    /// The successful orchestrator output.
    Summary(&'a str),
    /// The failed orchestrator output.
    Failure(&'a str),
    /// Synthesized while the current turn is unsettled.
    Loading,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct OverlayView<'a> {
    /// `None` while no instance is mounted.
    pub visibility: Option<VisibilityMode>,
    pub processing: ProcessingMode,
    pub details_visible: bool,
    pub hovered: bool,
    pub input_enabled: bool,
    pub store: &'a MessageStore,
}

impl<'a> OverlayView<'a> {
    pub fn items(&self) -> Vec<RenderItem<'a>> {
        render_items(self.store, self.details_visible)
    }
}

/// Flatten the store into render items.
pub fn render_items(store: &MessageStore, details_visible: bool) -> Vec<RenderItem<'_>> {
    let mut items = Vec::new();
    for turn in store.turns() {
        match turn {
            ConversationTurn::User(user) => items.push(RenderItem::User(&user.text)),
            ConversationTurn::System(system) => push_system_turn(&mut items, system, details_visible),
        }
    }
    if store.is_awaiting_settlement() {
        items.push(RenderItem::Loading);
    }
    items
}

fn push_system_turn<'a>(items: &mut Vec<RenderItem<'a>>, turn: &'a SystemTurn, details_visible: bool) {
    items.push(RenderItem::TurnHeader);

    for record in turn.agents() {
        if record.agent_name == ORCHESTRATOR_AGENT {
            items.extend(record.steps.iter().map(|s| RenderItem::Narrative(s)));
        } else {
            push_agent_card(items, record, details_visible);
        }
    }

    for notice in turn.notices() {
        if notice.kind.is_step_level() && !details_visible {
            continue;
        }
        items.push(RenderItem::Notice {
            kind: notice.kind,
            text: notice.body.display_text(),
        });
    }

    match turn.settlement() {
        Settlement::Pending => {}
        Settlement::Succeeded(summary) => items.push(RenderItem::Summary(summary)),
        Settlement::Failed(output) => items.push(RenderItem::Failure(output)),
    }
}

fn push_agent_card<'a>(items: &mut Vec<RenderItem<'a>>, record: &'a AgentRecord, details_visible: bool) {
    items.push(RenderItem::AgentHeader(&record.agent_name));
    if !record.instructions.is_empty() {
        items.push(RenderItem::Instructions(&record.instructions));
    }
    if details_visible && !record.steps.is_empty() {
        items.push(RenderItem::StepsLabel);
        items.extend(record.steps.iter().map(|s| RenderItem::Step(s)));
    }
    if !record.output.is_empty() {
        items.push(RenderItem::OutputLabel);
        items.push(RenderItem::Output {
            text: &record.output,
            style: OutputStyle::for_agent(&record.agent_name),
        });
    }
}

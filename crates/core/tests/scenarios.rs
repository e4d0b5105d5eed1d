//! End-to-end widget scenarios.
//!
//! These tests drive a `WidgetSession` through the same event sequence a live
//! controller delivers and assert on the store and on the rendered items.

mod common;

use ao_core::session::{EventOutcome, SubmitOutcome, WidgetSession};
use ao_core::store::Settlement;
use ao_core::view::RenderItem;
use ao_protocol::{AgentProgressEvent, Event, Op, ProcessingMode, ORCHESTRATOR_AGENT};
use common::*;

fn expanded(ops: &mut Vec<Op>) -> WidgetSession {
    let mut session = WidgetSession::new(true);
    session.handle_event(
        Event::ShowExpanded {
            mode: ProcessingMode::Init,
            details_visible: true,
        },
        ops,
    );
    session
}

#[test]
fn test_weather_in_paris() {
    let mut ops = Vec::new();
    let mut session = expanded(&mut ops);
    let [searching, reading, answer]: [AgentProgressEvent; 3] =
        paris_frames().try_into().expect("three frames");

    // Given: a submitted task
    let outcome = session.submit("find the weather in Paris", &mut ops);
    assert!(matches!(outcome, SubmitOutcome::NewTask { .. }));
    assert_eq!(session.store().len(), 2);
    let turn = session.store().current_system_turn().unwrap();
    assert!(turn.agents().is_empty());

    // When: the first WebAgent snapshot arrives
    session.handle_event(searching.into(), &mut ops);
    let turn = session.store().current_system_turn().unwrap();
    assert_eq!(turn.agents().len(), 1);
    assert_eq!(turn.agents()[0].agent_name, "WebAgent");
    assert!(has_loading(&session.view().items()));

    // When: its cumulative successor arrives
    session.handle_event(reading.into(), &mut ops);
    let turn = session.store().current_system_turn().unwrap();
    assert_eq!(turn.agents().len(), 1);
    assert_eq!(turn.agent("WebAgent").unwrap().steps.len(), 2);

    // When: the orchestrator answers
    let outcome = session.handle_event(answer.into(), &mut ops);
    let EventOutcome::Merged(merged) = outcome else {
        panic!("expected a merge, got {outcome:?}");
    };
    assert!(merged.settled_turn);

    // Then: settled, no loading, literal summary
    let turn = session.store().current_system_turn().unwrap();
    assert_eq!(turn.settlement(), Settlement::Succeeded("It is 18°C in Paris"));
    let items = session.view().items();
    assert!(!has_loading(&items));
    assert_eq!(summary(&items), Some("It is 18°C in Paris"));
}

#[test]
fn test_tool_failure_renders_as_failure() {
    let mut ops = Vec::new();
    let mut session = expanded(&mut ops);
    session.submit("find the weather in Paris", &mut ops);

    session.handle_event(
        AgentProgressEvent::new(ORCHESTRATOR_AGENT)
            .with_output("tool failure", 500)
            .into(),
        &mut ops,
    );

    let items = session.view().items();
    assert!(failure(&items).is_some_and(|text| text.contains("tool failure")));
    assert_eq!(summary(&items), None);
    assert!(!has_loading(&items));
}

#[test]
fn test_interleaved_agents_keep_first_seen_order() {
    let mut ops = Vec::new();
    let mut session = expanded(&mut ops);
    session.submit("compare prices", &mut ops);

    for name in ["WebAgent", "Coder Agent", "WebAgent", "Executor Agent", "Coder Agent"] {
        session.handle_event(AgentProgressEvent::new(name).with_steps([name]).into(), &mut ops);
    }

    let turn = session.store().current_system_turn().unwrap();
    let names: Vec<&str> = turn.agents().iter().map(|a| a.agent_name.as_str()).collect();
    assert_eq!(names, vec!["WebAgent", "Coder Agent", "Executor Agent"]);
}

#[test]
fn test_details_toggle_never_touches_the_store() {
    let mut ops = Vec::new();
    let mut session = expanded(&mut ops);
    session.submit("find the weather in Paris", &mut ops);
    for event in paris_frames() {
        session.handle_event(event.into(), &mut ops);
    }
    let before = session.store().clone();

    session.overlay_mut().toggle_details(&mut ops);
    let hidden = session.view().items();
    assert!(!hidden.iter().any(|i| matches!(i, RenderItem::Step(_))));

    session.overlay_mut().toggle_details(&mut ops);
    session.overlay_mut().toggle_details(&mut ops);

    assert_eq!(session.store(), &before);
}

#[test]
fn test_collapse_and_expand_preserve_conversation() {
    let mut ops = Vec::new();
    let mut session = expanded(&mut ops);
    session.submit("find the weather in Paris", &mut ops);
    for event in paris_frames() {
        session.handle_event(event.into(), &mut ops);
    }
    session.handle_event(
        Event::ShowExpanded {
            mode: ProcessingMode::Done,
            details_visible: false,
        },
        &mut ops,
    );
    let before = session.view().items().len();

    session.overlay_mut().minimize(&mut ops).unwrap();
    session.overlay_mut().activate_badge(&mut ops).unwrap();

    assert!(!session.overlay().details_visible());
    assert_eq!(session.view().items().len(), before);
}

#[test]
fn test_submit_while_processing_emits_nothing() {
    let mut ops = Vec::new();
    let mut session = expanded(&mut ops);
    session.submit("first", &mut ops);
    session.handle_event(
        Event::SetProcessingMode {
            mode: ProcessingMode::Processing,
        },
        &mut ops,
    );
    let turns = session.store().len();
    let emitted = ops.len();

    assert_eq!(session.submit("second", &mut ops), SubmitOutcome::Rejected);

    assert_eq!(session.store().len(), turns);
    assert_eq!(ops.len(), emitted);
}

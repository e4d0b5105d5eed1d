use ao_protocol::*;
use serde_json::json;

#[test]
fn test_progress_event_wire_field_names() {
    let event = AgentProgressEvent::new("WebAgent")
        .with_instructions("search weather")
        .with_steps(["opened browser"]);

    let json = serde_json::to_value(&event).expect("Failed to serialize AgentProgressEvent");

    assert_eq!(
        json,
        json!({
            "agent_name": "WebAgent",
            "instructions": "search weather",
            "steps": ["opened browser"],
            "output": "",
            "status_code": 0
        })
    );
}

#[test]
fn test_progress_event_partial_frame_uses_defaults() {
    let raw = r#"{"agent_name": "WebAgent", "steps": ["opened browser", "read page"]}"#;

    let event: AgentProgressEvent =
        serde_json::from_str(raw).expect("Failed to deserialize partial frame");

    assert_eq!(event.agent_name, "WebAgent");
    assert_eq!(event.instructions, "");
    assert_eq!(event.steps.len(), 2);
    assert_eq!(event.status_code, 0);
}

#[test]
fn test_orchestrator_terminal_detection() {
    let pending = AgentProgressEvent::new(ORCHESTRATOR_AGENT).with_steps(["Agents are initialized"]);
    assert!(pending.is_orchestrator());
    assert!(!pending.is_terminal());

    let failed = AgentProgressEvent::new(ORCHESTRATOR_AGENT).with_output("tool failure", 500);
    assert!(failed.is_terminal());

    let other = AgentProgressEvent::new("Coder Agent").with_output("fn main() {}", STATUS_OK);
    assert!(!other.is_terminal());
}

#[test]
fn test_processing_mode_serialization() {
    let json = serde_json::to_value(ProcessingMode::Processing).expect("Failed to serialize ProcessingMode");
    assert_eq!(json, "processing");

    let mode: ProcessingMode = serde_json::from_value(json!("done")).expect("Failed to deserialize ProcessingMode");
    assert_eq!(mode, ProcessingMode::Done);
    assert!(mode.accepts_input());
    assert!(!ProcessingMode::Processing.accepts_input());
}

#[test]
fn test_event_tagged_serialization() {
    let event = Event::ShowExpanded {
        mode: ProcessingMode::Init,
        details_visible: false,
    };

    let json = serde_json::to_value(&event).expect("Failed to serialize Event");
    assert_eq!(
        json,
        json!({
            "type": "showExpanded",
            "payload": { "mode": "init", "details_visible": false }
        })
    );
}

#[test]
fn test_op_submit_task_serialization() {
    let task_id = uuid::Uuid::new_v4();
    let op = Op::SubmitTask {
        task_id,
        text: "find the weather in Paris".to_string(),
    };

    let json = serde_json::to_string(&op).expect("Failed to serialize Op");
    let deserialized: Op = serde_json::from_str(&json).expect("Failed to deserialize Op");

    assert_eq!(deserialized, op);
    assert!(json.contains("\"submitTask\""));
}

#[test]
fn test_inbound_frame_decodes_bare_progress() {
    let raw = r#"{"agent_name":"Orchestrator","instructions":"","steps":[],"output":"It is 18°C in Paris","status_code":200}"#;

    let frame = InboundFrame::parse(raw).expect("Failed to decode frame");

    match frame.into_event() {
        Event::Progress { event, turn } => {
            assert_eq!(event.output, "It is 18°C in Paris");
            assert_eq!(turn, TurnTarget::Current);
        }
        other => panic!("Expected Progress event, got {other:?}"),
    }
}

#[test]
fn test_inbound_frame_decodes_control_event() {
    let raw = r#"{"type":"setProcessingMode","payload":{"mode":"done"}}"#;

    let frame = InboundFrame::parse(raw).expect("Failed to decode frame");

    assert_eq!(
        frame,
        InboundFrame::Control(Event::SetProcessingMode {
            mode: ProcessingMode::Done
        })
    );
}

#[test]
fn test_follow_up_progress_envelope() {
    let raw = r#"{"type":"progress","payload":{"event":{"agent_name":"WebAgent"},"turn":"follow_up"}}"#;

    let frame = InboundFrame::parse(raw).expect("Failed to decode frame");

    match frame.into_event() {
        Event::Progress { turn, .. } => assert_eq!(turn, TurnTarget::FollowUp),
        other => panic!("Expected Progress event, got {other:?}"),
    }
}

#[test]
fn test_notice_body_is_tagged() {
    let raw = r#"{"type":"notice","payload":{"kind":"step","body":{"kind":"structured","value":{"url":"https://example.com"}}}}"#;

    let event: Event = serde_json::from_str(raw).expect("Failed to deserialize notice");

    match event {
        Event::Notice {
            kind,
            body,
            awaiting_user_response,
        } => {
            assert_eq!(kind, NoticeKind::Step);
            assert!(!awaiting_user_response);
            assert!(body.display_text().contains("https://example.com"));
        }
        other => panic!("Expected Notice event, got {other:?}"),
    }
}

#[test]
fn test_text_body_displays_literally() {
    // A text body that looks like JSON is still shown verbatim.
    let body = MessageBody::text("{\"not\": \"parsed\"}");
    assert_eq!(body.display_text(), "{\"not\": \"parsed\"}");

    let quoted = MessageBody::Structured(json!("plain string"));
    assert_eq!(quoted.display_text(), "plain string");
}

#[test]
fn test_overlay_config_defaults_from_empty_object() {
    let config: OverlayConfig = serde_json::from_value(json!({})).expect("Failed to deserialize OverlayConfig");

    assert_eq!(config, OverlayConfig::default());
    assert_eq!(config.scroll.settle_passes, 5);
    assert!(config.details_visible);
}

//! Test fixtures for progress streams and project directories.

use ao_protocol::{AgentProgressEvent, InboundFrame, ORCHESTRATOR_AGENT, STATUS_OK};
use tempfile::TempDir;

/// The three frames of the "weather in Paris" run.
#[allow(dead_code)]
pub fn paris_frames() -> Vec<AgentProgressEvent> {
    vec![
        AgentProgressEvent::new("WebAgent")
            .with_instructions("search weather")
            .with_steps(["opened browser"]),
        AgentProgressEvent::new("WebAgent").with_steps(["opened browser", "read page"]),
        AgentProgressEvent::new(ORCHESTRATOR_AGENT).with_output("It is 18°C in Paris", STATUS_OK),
    ]
}

/// The same run as JSON lines, the way a recorder writes it.
#[allow(dead_code)]
pub const PARIS_JSONL: &str = r#"{"agent_name":"WebAgent","instructions":"search weather","steps":["opened browser"],"output":"","status_code":0}
{"agent_name":"WebAgent","steps":["opened browser","read page"],"output":"","status_code":0}
{"agent_name":"Orchestrator","output":"It is 18°C in Paris","status_code":200}
"#;

#[allow(dead_code)]
pub fn as_frames(events: Vec<AgentProgressEvent>) -> Vec<InboundFrame> {
    events.into_iter().map(InboundFrame::Progress).collect()
}

/// Create a temporary project root holding one recorded stream.
///
/// Returns the TempDir (keep it alive for the test duration) and the path of
/// the stream file.
#[allow(dead_code)]
pub fn create_replay_project(content: &str) -> std::io::Result<(TempDir, std::path::PathBuf)> {
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("run.jsonl");
    std::fs::write(&path, content)?;
    Ok((temp_dir, path))
}

//! Event channel abstraction.
//!
//! The widget never talks to the agent backend directly: a controller owns a
//! channel, forwards the user's task and replies into it and pumps the frames
//! it yields back into the widget. [`ReplayChannel`] is the built-in channel;
//! it replays a recorded JSON-lines stream for every task.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ao_protocol::InboundFrame;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// Errors raised by an event channel.
#[derive(Error, Debug)]
pub enum ChannelError {
    /// Failed to read a recorded stream from disk.
    #[error("Failed to read replay file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The widget side of the channel went away.
    #[error("Event channel closed")]
    Closed,
}

/// A line of a recorded stream that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based line number in the source.
    pub line_number: usize,
    pub reason: String,
}

/// Decoded content of a recorded stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayScript {
    pub frames: Vec<InboundFrame>,
    pub rejected: Vec<RejectedLine>,
}

/// Decode JSON lines into frames.
///
/// Blank lines are ignored; undecodable lines are collected in
/// [`ReplayScript::rejected`] and logged, never fatal.
pub fn parse_frames(content: &str) -> ReplayScript {
    let mut script = ReplayScript::default();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match InboundFrame::parse(line) {
            Ok(frame) => script.frames.push(frame),
            Err(e) => {
                warn!(line = index + 1, error = %e, "skipping undecodable frame");
                script.rejected.push(RejectedLine {
                    line_number: index + 1,
                    reason: e.to_string(),
                });
            }
        }
    }
    script
}

/// Read and decode a recorded stream.
///
/// # Errors
///
/// Returns `ChannelError::Read` if the file cannot be read. Bad lines inside
/// a readable file are not errors; see [`parse_frames`].
pub async fn load_frames(path: &Path) -> Result<ReplayScript, ChannelError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ChannelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(parse_frames(&content))
}

/// Duplex link to whatever runs the agents.
#[async_trait]
pub trait EventChannel: Send {
    /// Start a new task.
    async fn send_task(&mut self, task_id: Uuid, text: &str) -> Result<(), ChannelError>;

    /// Forward the user's answer to a pending question.
    async fn send_reply(&mut self, text: &str) -> Result<(), ChannelError>;

    /// Next frame of the running task, or `None` once it has finished.
    async fn next_frame(&mut self) -> Option<InboundFrame>;
}

/// Replays the same recorded frames for every task.
#[derive(Debug, Clone)]
pub struct ReplayChannel {
    frames: Vec<InboundFrame>,
    pending: VecDeque<InboundFrame>,
    frame_delay: Duration,
}

impl ReplayChannel {
    pub fn new(frames: Vec<InboundFrame>) -> Self {
        Self {
            frames,
            pending: VecDeque::new(),
            frame_delay: Duration::ZERO,
        }
    }

    /// Pause between frames, to watch a recording stream in.
    pub fn with_frame_delay(mut self, delay: Duration) -> Self {
        self.frame_delay = delay;
        self
    }

    /// Build a channel from a JSON-lines file, logging skipped lines.
    pub async fn from_file(path: &Path) -> Result<Self, ChannelError> {
        let script = load_frames(path).await?;
        debug!(
            frames = script.frames.len(),
            rejected = script.rejected.len(),
            path = %path.display(),
            "loaded replay script"
        );
        Ok(Self::new(script.frames))
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

#[async_trait]
impl EventChannel for ReplayChannel {
    async fn send_task(&mut self, task_id: Uuid, text: &str) -> Result<(), ChannelError> {
        debug!(%task_id, text, "replaying recorded stream");
        self.pending = self.frames.iter().cloned().collect();
        Ok(())
    }

    async fn send_reply(&mut self, text: &str) -> Result<(), ChannelError> {
        debug!(text, "reply ignored by replay channel");
        Ok(())
    }

    async fn next_frame(&mut self) -> Option<InboundFrame> {
        let frame = self.pending.pop_front()?;
        if !self.frame_delay.is_zero() {
            tokio::time::sleep(self.frame_delay).await;
        }
        Some(frame)
    }
}

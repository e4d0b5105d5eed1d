//! Channel-backed controller.
//!
//! Bridges widget notifications ([`Op`]) to an [`EventChannel`] and feeds the
//! frames the channel yields back to the widget as [`Event`]s. Around every
//! task it drives the processing mode `processing` -> `done`, the way an
//! external controller does.

use ao_protocol::{Event, Op, ProcessingMode};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};
use uuid::Uuid;

use crate::channel::{ChannelError, EventChannel};

pub struct ChannelController<C> {
    channel: C,
    events: UnboundedSender<Event>,
}

impl<C: EventChannel> ChannelController<C> {
    pub fn new(channel: C, events: UnboundedSender<Event>) -> Self {
        Self { channel, events }
    }

    /// Serve widget notifications until either side hangs up.
    ///
    /// Tasks run one at a time; notifications arriving during a task queue
    /// up behind it.
    pub async fn run(mut self, mut ops: UnboundedReceiver<Op>) -> Result<(), ChannelError> {
        while let Some(op) = ops.recv().await {
            let result = match op {
                Op::SubmitTask { task_id, text } => self.run_task(task_id, &text).await,
                Op::UserReply { text } => self.channel.send_reply(&text).await,
                Op::VisibilityChanged { collapsed } => {
                    debug!(collapsed, "widget visibility changed");
                    Ok(())
                }
                Op::DetailsToggled { visible } => {
                    debug!(visible, "details toggled");
                    Ok(())
                }
            };
            match result {
                Ok(()) => {}
                Err(ChannelError::Closed) => {
                    debug!("widget went away, stopping controller");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    async fn run_task(&mut self, task_id: Uuid, text: &str) -> Result<(), ChannelError> {
        self.emit(Event::SetProcessingMode {
            mode: ProcessingMode::Processing,
        })?;
        self.channel.send_task(task_id, text).await?;

        let mut frames = 0usize;
        while let Some(frame) = self.channel.next_frame().await {
            self.emit(frame.into_event())?;
            frames += 1;
        }

        info!(%task_id, frames, "task stream finished");
        self.emit(Event::SetProcessingMode {
            mode: ProcessingMode::Done,
        })
    }

    fn emit(&self, event: Event) -> Result<(), ChannelError> {
        self.events.send(event).map_err(|_| ChannelError::Closed)
    }
}

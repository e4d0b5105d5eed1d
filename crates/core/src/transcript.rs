//! Headless folding of a recorded stream.

use ao_protocol::{Event, InboundFrame, Op, ProcessingMode};

use crate::session::{SubmitOutcome, WidgetSession};

/// Run `task` against `frames` without a terminal.
///
/// The session is mounted expanded, the task submitted, and every frame
/// applied in order between `processing` and `done`, exactly as a live
/// controller would deliver them. Returns the session together with the
/// notifications the widget emitted.
pub fn fold_frames<I>(task: &str, details_visible: bool, frames: I) -> (WidgetSession, Vec<Op>)
where
    I: IntoIterator<Item = InboundFrame>,
{
    let mut ops = Vec::new();
    let mut session = WidgetSession::new(details_visible);
    session.handle_event(
        Event::ShowExpanded {
            mode: ProcessingMode::Init,
            details_visible,
        },
        &mut ops,
    );

    if let SubmitOutcome::Rejected = session.submit(task, &mut ops) {
        return (session, ops);
    }

    session.handle_event(
        Event::SetProcessingMode {
            mode: ProcessingMode::Processing,
        },
        &mut ops,
    );
    for frame in frames {
        session.handle_event(frame.into_event(), &mut ops);
    }
    session.handle_event(
        Event::SetProcessingMode {
            mode: ProcessingMode::Done,
        },
        &mut ops,
    );
    (session, ops)
}

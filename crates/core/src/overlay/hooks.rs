//! Notifications from the widget to its controller.

use ao_protocol::Op;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;
use uuid::Uuid;

/// Callbacks the widget fires towards the external controller.
///
/// The widget never waits on the controller; every hook is fire-and-forget.
pub trait ControllerHooks {
    /// The widget was rebuilt as the badge (`true`) or the panel (`false`).
    fn on_visibility_changed(&mut self, collapsed: bool);

    /// The user flipped the "Show Details" toggle.
    fn on_details_toggle(&mut self, visible: bool);

    /// The user opened a new task.
    fn on_task_submitted(&mut self, task_id: Uuid, text: &str);

    /// The user answered a clarifying question.
    fn on_user_reply(&mut self, text: &str);
}

/// Forward every hook as an [`Op`] on the controller channel.
impl ControllerHooks for UnboundedSender<Op> {
    fn on_visibility_changed(&mut self, collapsed: bool) {
        forward(self, Op::VisibilityChanged { collapsed });
    }

    fn on_details_toggle(&mut self, visible: bool) {
        forward(self, Op::DetailsToggled { visible });
    }

    fn on_task_submitted(&mut self, task_id: Uuid, text: &str) {
        forward(
            self,
            Op::SubmitTask {
                task_id,
                text: text.to_string(),
            },
        );
    }

    fn on_user_reply(&mut self, text: &str) {
        forward(
            self,
            Op::UserReply {
                text: text.to_string(),
            },
        );
    }
}

fn forward(tx: &UnboundedSender<Op>, op: Op) {
    if tx.send(op).is_err() {
        warn!("controller channel closed, notification dropped");
    }
}

/// Collect every hook as an [`Op`], in order.
impl ControllerHooks for Vec<Op> {
    fn on_visibility_changed(&mut self, collapsed: bool) {
        self.push(Op::VisibilityChanged { collapsed });
    }

    fn on_details_toggle(&mut self, visible: bool) {
        self.push(Op::DetailsToggled { visible });
    }

    fn on_task_submitted(&mut self, task_id: Uuid, text: &str) {
        self.push(Op::SubmitTask {
            task_id,
            text: text.to_string(),
        });
    }

    fn on_user_reply(&mut self, text: &str) {
        self.push(Op::UserReply {
            text: text.to_string(),
        });
    }
}

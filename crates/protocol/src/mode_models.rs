//! Widget mode models.
//!
//! The widget's state is the cross product of two orthogonal enums: what the
//! user sees ([`VisibilityMode`]) and what the task is doing
//! ([`ProcessingMode`]).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Processing state of the task the widget is attached to.
///
/// The controller drives it through the lifecycle:
/// Init -> Processing -> Done (-> Processing for the next task)
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, TS)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingMode {
    /// No task has been submitted yet.
    #[default]
    Init,

    /// A task is running; input is disabled.
    Processing,

    /// The last task finished; input is enabled again.
    Done,
}

impl ProcessingMode {
    /// Whether the input gate accepts text in this mode.
    pub fn accepts_input(self) -> bool {
        !matches!(self, ProcessingMode::Processing)
    }

    /// Stable lowercase name, also used as the style class suffix.
    pub fn as_str(self) -> &'static str {
        match self {
            ProcessingMode::Init => "init",
            ProcessingMode::Processing => "processing",
            ProcessingMode::Done => "done",
        }
    }
}

/// How much of the widget is visible.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityMode {
    /// Icon-only badge.
    Collapsed,

    /// Full chat panel.
    Expanded,
}

impl VisibilityMode {
    pub fn is_collapsed(self) -> bool {
        matches!(self, VisibilityMode::Collapsed)
    }
}

//! Overlay state machine.
//!
//! The widget is either absent (before the first render) or mounted as one
//! instance in one visibility mode. Every show transition tears the mounted
//! instance down and mounts a fresh one with a new [`InstanceId`]; anything
//! bound to the old instance (timers, focus) must check its id and go quiet.
//!
//! The processing mode and the details flag live here, outside the rendered
//! instance, so they survive every rebuild.

use ao_protocol::{ProcessingMode, VisibilityMode};
use tracing::debug;

use crate::overlay::hooks::ControllerHooks;

/// Identity of one mounted widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(u64);

impl InstanceId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// The currently mounted widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountedInstance {
    pub id: InstanceId,
    pub visibility: VisibilityMode,
}

/// Record of one teardown/rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// The instance destroyed by this transition, if any was mounted.
    pub torn_down: Option<InstanceId>,
    /// The instance mounted by this transition.
    pub mounted: MountedInstance,
}

/// Owns the widget's visibility, processing mode and details flag.
#[derive(Debug)]
pub struct OverlayStateMachine {
    mounted: Option<MountedInstance>,
    processing: ProcessingMode,
    details_visible: bool,
    details_default: bool,
    /// Set by a submit, cleared by the next mode change or rebuild.
    input_locked: bool,
    /// Hover affordance of the collapsed badge.
    hovered: bool,
    next_id: u64,
}

impl OverlayStateMachine {
    /// Create an absent widget.
    ///
    /// `details_visible` is the value the details flag starts with and
    /// returns to on [`reset`](Self::reset).
    pub fn new(details_visible: bool) -> Self {
        Self {
            mounted: None,
            processing: ProcessingMode::Init,
            details_visible,
            details_default: details_visible,
            input_locked: false,
            hovered: false,
            next_id: 0,
        }
    }

    pub fn mounted(&self) -> Option<MountedInstance> {
        self.mounted
    }

    pub fn visibility(&self) -> Option<VisibilityMode> {
        self.mounted.map(|m| m.visibility)
    }

    pub fn processing(&self) -> ProcessingMode {
        self.processing
    }

    pub fn details_visible(&self) -> bool {
        self.details_visible
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether `id` is still the mounted instance.
    pub fn is_live(&self, id: InstanceId) -> bool {
        self.mounted.is_some_and(|m| m.id == id)
    }

    /// Whether the input gate accepts text right now.
    ///
    /// Only the expanded panel has an input; the badge and the absent widget
    /// report a disabled gate.
    pub fn input_enabled(&self) -> bool {
        self.visibility() == Some(VisibilityMode::Expanded)
            && self.processing.accepts_input()
            && !self.input_locked
    }

    pub fn is_input_disabled(&self) -> bool {
        !self.input_enabled()
    }

    /// Destroy any mounted instance and mount the collapsed badge.
    pub fn show_collapsed(
        &mut self,
        mode: ProcessingMode,
        hooks: &mut dyn ControllerHooks,
    ) -> Transition {
        let torn_down = self.teardown();
        hooks.on_visibility_changed(true);
        self.processing = mode;
        let mounted = self.mount(VisibilityMode::Collapsed);
        debug!(instance = mounted.id.get(), mode = mode.as_str(), "mounted collapsed overlay");
        Transition { torn_down, mounted }
    }

    /// Destroy any mounted instance and mount the expanded panel.
    pub fn show_expanded(
        &mut self,
        mode: ProcessingMode,
        details_visible: bool,
        hooks: &mut dyn ControllerHooks,
    ) -> Transition {
        let torn_down = self.teardown();
        hooks.on_visibility_changed(false);
        self.details_visible = details_visible;
        self.processing = mode;
        let mounted = self.mount(VisibilityMode::Expanded);
        debug!(
            instance = mounted.id.get(),
            mode = mode.as_str(),
            details_visible,
            "mounted expanded overlay"
        );
        Transition { torn_down, mounted }
    }

    /// Re-apply the processing accent and the input gate in place.
    ///
    /// Returns `false` when nothing is mounted; the mode is still recorded so
    /// the next rebuild starts from it.
    pub fn set_processing_mode(&mut self, mode: ProcessingMode) -> bool {
        self.processing = mode;
        self.input_locked = false;
        self.mounted.is_some()
    }

    /// Activate the collapsed badge: expand with the current mode and the
    /// last details flag.
    pub fn activate_badge(&mut self, hooks: &mut dyn ControllerHooks) -> Option<Transition> {
        if self.visibility() != Some(VisibilityMode::Collapsed) {
            return None;
        }
        Some(self.show_expanded(self.processing, self.details_visible, hooks))
    }

    /// Minimize the expanded panel back to the badge.
    pub fn minimize(&mut self, hooks: &mut dyn ControllerHooks) -> Option<Transition> {
        if self.visibility() != Some(VisibilityMode::Expanded) {
            return None;
        }
        Some(self.show_collapsed(self.processing, hooks))
    }

    /// Flip the details flag. Only the expanded panel has the toggle.
    pub fn toggle_details(&mut self, hooks: &mut dyn ControllerHooks) -> Option<bool> {
        if self.visibility() != Some(VisibilityMode::Expanded) {
            return None;
        }
        self.details_visible = !self.details_visible;
        hooks.on_details_toggle(self.details_visible);
        Some(self.details_visible)
    }

    /// Hover affordance; only the badge reacts.
    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered && self.visibility() == Some(VisibilityMode::Collapsed);
    }

    /// Disable the input until the controller reports a mode.
    pub fn lock_input(&mut self) {
        self.input_locked = true;
    }

    /// Full reinitialization: unmount and restore the details default.
    pub fn reset(&mut self) {
        self.teardown();
        self.processing = ProcessingMode::Init;
        self.details_visible = self.details_default;
    }

    fn teardown(&mut self) -> Option<InstanceId> {
        self.hovered = false;
        self.input_locked = false;
        self.mounted.take().map(|m| m.id)
    }

    fn mount(&mut self, visibility: VisibilityMode) -> MountedInstance {
        self.next_id += 1;
        let mounted = MountedInstance {
            id: InstanceId(self.next_id),
            visibility,
        };
        self.mounted = Some(mounted);
        mounted
    }
}

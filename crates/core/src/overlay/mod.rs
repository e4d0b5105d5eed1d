//! Widget lifecycle.
//!
//! This module provides:
//! - The overlay state machine (mount, teardown, mode changes)
//! - The controller hooks the widget notifies

pub mod hooks;
pub mod machine;

pub use hooks::ControllerHooks;
pub use machine::{InstanceId, MountedInstance, OverlayStateMachine, Transition};

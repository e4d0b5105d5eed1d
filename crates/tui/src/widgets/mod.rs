//! TUI widgets module.
//!
//! This module contains the widgets of the expanded panel.

pub mod input_gate;
pub mod message_list;

pub use input_gate::{InputAction, InputGate};

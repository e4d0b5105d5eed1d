//! # ao-core
//!
//! Core of the agent overlay widget.
//!
//! This crate provides:
//! - The overlay state machine (collapsed badge, expanded panel, teardown)
//! - The conversation store and the incremental progress merger
//! - A pure view-model the terminal UI and the transcript printer render
//! - Configuration loading from the `.agent-overlay/` directory
//! - The event channel abstraction and a channel-backed controller
//!
//! ## Modules
//!
//! - [`session`]: Widget state surviving every rebuild
//! - [`overlay`]: Lifecycle state machine and controller hooks
//! - [`store`]: Ordered conversation turns
//! - [`merger`]: Progress merge
//! - [`view`]: Render items
//! - [`config`]: Configuration loading
//! - [`channel`]: Event channel and replay
//! - [`controller`]: Channel-backed controller
//! - [`transcript`]: Headless folding of a recorded stream

pub mod channel;
pub mod config;
pub mod controller;
pub mod merger;
pub mod overlay;
pub mod session;
pub mod store;
pub mod transcript;
pub mod view;

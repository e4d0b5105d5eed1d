//! # ao-protocol
//!
//! Core protocol definitions and data models for agent-overlay.
//!
//! This crate defines all shared data structures used for:
//! - The agent progress events streamed over the event channel
//! - The widget's visibility and processing modes
//! - Communication between the widget and its external controller
//! - Configuration file parsing (`.agent-overlay/config.toml`)
//!
//! ## Modules
//!
//! - [`agent_models`]: Agent progress snapshots, the wire contract
//! - [`config_models`]: Widget configuration
//! - [`message_models`]: Controller notices and their tagged bodies
//! - [`mode_models`]: Visibility and processing modes
//! - [`ipc`]: Operations and Events between widget and controller
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, ts-rs, and uuid
//! - TypeScript generation: All types derive `TS` for the companion web view
//! - Independent compilation: No dependencies on other agent-overlay crates

pub mod agent_models;
pub mod config_models;
pub mod ipc;
pub mod message_models;
pub mod mode_models;

// Re-export all public types for convenience
pub use agent_models::*;
pub use config_models::*;
pub use ipc::*;
pub use message_models::*;
pub use mode_models::*;

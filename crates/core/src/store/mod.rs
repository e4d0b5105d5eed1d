//! Conversation state.
//!
//! This module provides:
//! - Turn and agent record types
//! - The MessageStore holding the ordered conversation

pub mod message_store;
pub mod turn;

pub use message_store::MessageStore;
pub use turn::{AgentRecord, ConversationTurn, Notice, Settlement, SystemTurn, Upsert, UserTurn};

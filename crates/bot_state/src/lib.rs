//! bot_state - Conversation state machine for the trainer bot
//!
//! This crate provides the per-chat finite state machine: the conversation
//! states, the external events that drive them, and a total transition
//! function that ignores events which are invalid for the current state.

pub mod machine;

// Re-export commonly used types
pub use machine::{buttons, commands, SessionEvent, SessionState, StateMachine, StateTransition};

//! # Session Manager
//!
//! Durable per-user session state for the trainer bot: which screen the
//! conversation is on, the live screen message, the loaded workout plan, and
//! the training progress. Storage is keyed by user id and survives process
//! restarts.
//!
//! There is deliberately no in-process session cache: each dispatched event
//! loads the session, mutates a local copy, and writes it back. The host
//! dispatcher must process a single chat's events serially for this
//! read-modify-write cycle to be safe; different chats are independent.

pub mod error;
pub mod manager;
pub mod storage;
pub mod structs;

// Re-exports
pub use error::SessionError;
pub use manager::SessionManager;
pub use storage::{FileSessionStorage, SessionStorage};
pub use structs::UserSession;

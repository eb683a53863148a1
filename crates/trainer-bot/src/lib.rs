//! trainer_bot - Screen rendering, event handling, and the Telegram adapter
//!
//! The library side of the bot binary. The conversation core (state machine,
//! workout store, progress tracker, session persistence) lives in the sibling
//! crates; this crate turns incoming chat events into state transitions and
//! screen renders through a narrow transport trait, so everything above the
//! transport is testable without Telegram.

pub mod error;
pub mod handlers;
pub mod screen;
pub mod telegram;
pub mod transport;

pub use error::BotError;
pub use screen::{Refresh, Screen};
pub use transport::{Button, ChatApi, ScreenContent, TransportError};

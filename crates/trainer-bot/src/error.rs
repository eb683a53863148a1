//! Bot error types

use session_manager::SessionError;
use thiserror::Error;

use crate::transport::TransportError;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

pub type Result<T> = std::result::Result<T, BotError>;

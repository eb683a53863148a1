//! Narrow transport interface consumed by the renderer and handlers
//!
//! The core never talks to a chat network itself; it sends, edits, and
//! deletes screens and fetches uploaded bytes through [`ChatApi`]. The
//! production implementation lives in [`crate::telegram`]; tests substitute
//! a recording fake.

use async_trait::async_trait;
use thiserror::Error;

/// Failure of a chat transport operation.
///
/// Transport failures never crash the dispatch loop: the event is dropped
/// (or an ingestion-failure screen is shown) and the user's next tap or
/// re-upload is the retry.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("chat API request failed: {0}")]
    Request(String),

    #[error("file download failed: {0}")]
    Download(String),
}

/// One inline control under a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub data: String,
}

impl Button {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Renderable content of one screen: text (or a photo with an HTML caption)
/// plus rows of inline controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenContent {
    pub text: String,
    /// Media reference for a photo screen: an http(s) URL or a transport
    /// file id.
    pub photo: Option<String>,
    pub buttons: Vec<Vec<Button>>,
}

/// Outbound chat operations, scoped per call to a chat id.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Post a new screen message; returns its handle.
    async fn send_screen(
        &self,
        chat_id: i64,
        content: &ScreenContent,
    ) -> Result<i32, TransportError>;

    /// Rewrite an existing screen message in place.
    async fn edit_screen(
        &self,
        chat_id: i64,
        message_id: i32,
        content: &ScreenContent,
    ) -> Result<(), TransportError>;

    /// Remove a message from the chat.
    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<(), TransportError>;

    /// Download the bytes of an uploaded document.
    async fn fetch_document(&self, file_ref: &str) -> Result<Vec<u8>, TransportError>;
}

//! Telegram adapter - maps updates to session events and implements the
//! transport trait over the Bot API
//!
//! The dispatcher groups updates by chat id and handles one chat's updates
//! sequentially (different chats run in parallel), which is exactly the
//! per-chat serialization the session read-modify-write cycle requires.

use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use bot_state::SessionEvent;
use chrono::Local;
use session_manager::{FileSessionStorage, SessionManager};
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, InputFile, MessageId, ParseMode,
};
use url::Url;

use crate::handlers;
use crate::transport::{ChatApi, ScreenContent, TransportError};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Shared services handed to every update handler.
pub struct AppDeps {
    pub api: TelegramApi,
    pub sessions: SessionManager<FileSessionStorage>,
}

/// [`ChatApi`] over the Telegram Bot API.
pub struct TelegramApi {
    bot: Bot,
}

impl TelegramApi {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ChatApi for TelegramApi {
    async fn send_screen(
        &self,
        chat_id: i64,
        content: &ScreenContent,
    ) -> Result<i32, TransportError> {
        let chat = ChatId(chat_id);
        let markup = keyboard(content);

        let message = match &content.photo {
            Some(image) => {
                self.bot
                    .send_photo(chat, photo_input(image))
                    .caption(content.text.clone())
                    .parse_mode(ParseMode::Html)
                    .reply_markup(markup)
                    .await
            }
            None => {
                self.bot
                    .send_message(chat, content.text.clone())
                    .parse_mode(ParseMode::Html)
                    .reply_markup(markup)
                    .await
            }
        }
        .map_err(request_error)?;

        Ok(message.id.0)
    }

    async fn edit_screen(
        &self,
        chat_id: i64,
        message_id: i32,
        content: &ScreenContent,
    ) -> Result<(), TransportError> {
        self.bot
            .edit_message_text(ChatId(chat_id), MessageId(message_id), content.text.clone())
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboard(content))
            .await
            .map_err(request_error)?;
        Ok(())
    }

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<(), TransportError> {
        self.bot
            .delete_message(ChatId(chat_id), MessageId(message_id))
            .await
            .map_err(request_error)?;
        Ok(())
    }

    async fn fetch_document(&self, file_ref: &str) -> Result<Vec<u8>, TransportError> {
        let file = self
            .bot
            .get_file(file_ref.to_string())
            .await
            .map_err(request_error)?;

        let mut buffer = Cursor::new(Vec::new());
        self.bot
            .download_file(&file.path, &mut buffer)
            .await
            .map_err(|err| TransportError::Download(err.to_string()))?;
        Ok(buffer.into_inner())
    }
}

fn request_error(err: teloxide::RequestError) -> TransportError {
    TransportError::Request(err.to_string())
}

fn keyboard(content: &ScreenContent) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(content.buttons.iter().map(|row| {
        row.iter()
            .map(|button| InlineKeyboardButton::callback(button.label.clone(), button.data.clone()))
            .collect::<Vec<_>>()
    }))
}

/// An image reference is either an http(s) URL or a Bot API file id.
fn photo_input(image: &str) -> InputFile {
    match Url::parse(image) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => InputFile::url(url),
        _ => InputFile::file_id(image.to_string()),
    }
}

/// Run long polling until externally terminated.
pub async fn run(bot: Bot, deps: Arc<AppDeps>) {
    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback_query));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![deps])
        .default_handler(|update| async move {
            log::debug!("unhandled update: {:?}", update);
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn on_message(msg: Message, deps: Arc<AppDeps>) -> HandlerResult {
    let chat_id = msg.chat.id.0;

    let event = if let Some(document) = msg.document() {
        Some(SessionEvent::document(document.file.id.clone()))
    } else {
        msg.text().and_then(parse_command).map(SessionEvent::command)
    };

    if let Some(event) = event {
        dispatch_event(&deps, chat_id, event, Some(msg.id.0)).await;
    }
    Ok(())
}

async fn on_callback_query(bot: Bot, query: CallbackQuery, deps: Arc<AppDeps>) -> HandlerResult {
    // Stop the client-side spinner whether or not the tap means anything.
    if let Err(err) = bot.answer_callback_query(query.id.clone()).await {
        log::warn!("failed to answer callback query: {}", err);
    }

    if let (Some(data), Some(message)) = (query.data, query.message) {
        let event = SessionEvent::button_tap(data);
        dispatch_event(&deps, message.chat.id.0, event, None).await;
    }
    Ok(())
}

async fn dispatch_event(deps: &AppDeps, chat_id: i64, event: SessionEvent, user_message: Option<i32>) {
    let today = Local::now().date_naive();
    if let Err(err) =
        handlers::handle_event(&deps.api, &deps.sessions, chat_id, event, user_message, today).await
    {
        // The user's next tap or re-upload is the retry; nothing to unwind.
        log::error!("[{}] event dropped: {}", chat_id, err);
    }
}

/// Extract a bare command name from a `/command` message, tolerating
/// arguments and the `/command@botname` form.
fn parse_command(text: &str) -> Option<String> {
    let command = text.trim().strip_prefix('/')?;
    let name = command.split_whitespace().next()?;
    let name = name.split('@').next()?;
    if name.is_empty() {
        return None;
    }
    Some(name.to_ascii_lowercase())
}

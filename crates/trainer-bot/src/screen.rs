//! Screen catalog and the one-live-message render protocol
//!
//! At most one bot-authored message per chat represents the current screen.
//! Every render therefore pairs "show new content" with "retire the previous
//! screen": either by editing the live message in place (button-tap
//! transitions between text screens) or by sending the new screen and then
//! deleting the old one (media screens, and events that arrived as their own
//! user message, which is deleted along the way to keep the chat clean).

use bot_state::buttons;
use session_manager::UserSession;
use workout_core::WorkoutStep;

use crate::transport::{Button, ChatApi, ScreenContent, TransportError};

const MENU_TEXT: &str = "Hi! I'm your daily workout coach.\n\
    I can remind you to exercise and walk you through your routine \
    one step at a time.";
const UPLOAD_PROMPT_TEXT: &str = "Send me a JSON file describing your workout.";
const UPLOAD_OK_TEXT: &str = "Workout saved. Your routine is ready.";
const UPLOAD_FAILED_TEXT: &str =
    "That file didn't load as a workout. Check the format and try again.";
const FINISHED_TEXT: &str = "Workout complete! See you tomorrow.";
const NO_WORKOUT_TEXT: &str = "You don't have a workout yet. Add one first.";

/// Everything the bot can put on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Menu,
    UploadPrompt,
    UploadOk,
    UploadFailed,
    Step { step: WorkoutStep, total: usize },
    Finished,
    NoWorkout,
}

impl Screen {
    pub fn content(&self) -> ScreenContent {
        match self {
            Self::Menu => ScreenContent {
                text: MENU_TEXT.to_string(),
                photo: None,
                buttons: vec![
                    vec![Button::new("Start training", buttons::TRAIN)],
                    vec![Button::new("Add workout", buttons::ADD_WORKOUT)],
                ],
            },
            Self::UploadPrompt => back_only(UPLOAD_PROMPT_TEXT),
            Self::UploadOk => back_only(UPLOAD_OK_TEXT),
            Self::UploadFailed => back_only(UPLOAD_FAILED_TEXT),
            Self::Step { step, total } => ScreenContent {
                text: step_caption(step, *total),
                photo: Some(step.image.clone()),
                buttons: vec![
                    vec![Button::new("Next step", buttons::NEXT_STEP)],
                    vec![Button::new("Back", buttons::BACK)],
                ],
            },
            Self::Finished => back_only(FINISHED_TEXT),
            Self::NoWorkout => back_only(NO_WORKOUT_TEXT),
        }
    }
}

fn back_only(text: &str) -> ScreenContent {
    ScreenContent {
        text: text.to_string(),
        photo: None,
        buttons: vec![vec![Button::new("Back", buttons::BACK)]],
    }
}

fn step_caption(step: &WorkoutStep, total: usize) -> String {
    format!(
        "<b>Step {} of {}</b>\n\n<b>Name:</b>\n{}\n\n<b>Description:</b>\n{}",
        step.index,
        total,
        escape_html(&step.title),
        escape_html(&step.description),
    )
}

/// Escape user-provided text for an HTML-parse-mode caption.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// How to retire the previous screen when showing a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// Edit the live message in place. Used for button-tap transitions
    /// between text screens; degrades to [`Refresh::Replace`] when there is
    /// no live message, the new screen is a photo, or the transport rejects
    /// the edit (the live message may be a media message).
    Edit,
    /// Send the new screen, then delete the old one, then delete the
    /// triggering user message if the event arrived as one.
    Replace { user_message: Option<i32> },
}

/// Render `screen` for the chat and retire the previous screen, keeping the
/// session's live-message handle current.
pub async fn show(
    api: &dyn ChatApi,
    chat_id: i64,
    session: &mut UserSession,
    screen: &Screen,
    refresh: Refresh,
) -> Result<(), TransportError> {
    let content = screen.content();

    if let Refresh::Edit = refresh {
        if let Some(message_id) = session.screen_message_id {
            if content.photo.is_none() {
                match api.edit_screen(chat_id, message_id, &content).await {
                    Ok(()) => return Ok(()),
                    Err(err) => {
                        log::warn!(
                            "[{}] edit of screen {} failed ({}), replacing instead",
                            chat_id,
                            message_id,
                            err
                        );
                    }
                }
            }
        }
    }

    let user_message = match refresh {
        Refresh::Replace { user_message } => user_message,
        Refresh::Edit => None,
    };
    replace(api, chat_id, session, &content, user_message).await
}

async fn replace(
    api: &dyn ChatApi,
    chat_id: i64,
    session: &mut UserSession,
    content: &ScreenContent,
    user_message: Option<i32>,
) -> Result<(), TransportError> {
    let new_id = api.send_screen(chat_id, content).await?;

    // Retirement failures are non-fatal: the old message may already be
    // gone, and the new screen is live either way.
    if let Some(old_id) = session.record_screen(new_id) {
        if let Err(err) = api.delete_message(chat_id, old_id).await {
            log::warn!("[{}] failed to retire screen {}: {}", chat_id, old_id, err);
        }
    }
    if let Some(message_id) = user_message {
        if let Err(err) = api.delete_message(chat_id, message_id).await {
            log::warn!(
                "[{}] failed to delete user message {}: {}",
                chat_id,
                message_id,
                err
            );
        }
    }

    Ok(())
}

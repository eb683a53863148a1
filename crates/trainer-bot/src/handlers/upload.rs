//! Upload handlers: the upload prompt and workout document ingestion

use session_manager::UserSession;
use thiserror::Error;
use workout_core::{WorkoutError, WorkoutPlan};

use crate::screen::{show, Refresh, Screen};
use crate::transport::{ChatApi, TransportError};

#[derive(Error, Debug)]
enum IngestError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Workout(#[from] WorkoutError),
}

/// "add workout" tap - show the upload prompt.
pub async fn handle_add_workout(
    api: &dyn ChatApi,
    chat_id: i64,
    session: &mut UserSession,
) -> Result<(), TransportError> {
    show(api, chat_id, session, &Screen::UploadPrompt, Refresh::Edit).await
}

/// An uploaded document while awaiting a workout file.
///
/// Ingestion is atomic: the previous plan is replaced only after the new
/// document downloads and parses. On any failure the failure screen is
/// shown, the state stays at the upload prompt, and the previous plan and
/// the progress are untouched. The user's upload message is deleted either
/// way so the chat keeps a single live screen.
pub async fn handle_document(
    api: &dyn ChatApi,
    chat_id: i64,
    session: &mut UserSession,
    file_ref: &str,
    user_message: Option<i32>,
) -> Result<(), TransportError> {
    let screen = match ingest(api, session, file_ref).await {
        Ok(steps) => {
            log::info!("[{}] workout installed, {} steps", chat_id, steps);
            Screen::UploadOk
        }
        Err(err) => {
            log::warn!("[{}] workout upload rejected: {}", chat_id, err);
            Screen::UploadFailed
        }
    };

    show(api, chat_id, session, &screen, Refresh::Replace { user_message }).await
}

async fn ingest(
    api: &dyn ChatApi,
    session: &mut UserSession,
    file_ref: &str,
) -> Result<usize, IngestError> {
    let bytes = api.fetch_document(file_ref).await?;
    let plan = WorkoutPlan::parse(&bytes)?;
    let steps = plan.len();
    session.install_workout(plan);
    Ok(steps)
}

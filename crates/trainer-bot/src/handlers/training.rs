//! Training handlers: the step-card walk and routine completion
//!
//! Every entry into the training screen applies the daily reset before any
//! step lookup, so a routine finished on an earlier day restarts from step 1
//! while a same-day re-entry re-confirms completion. A "next step" tap
//! advances by exactly one, and only while the current step still exists;
//! once the lookup fails the position is frozen and further taps re-render
//! the finished notice.

use chrono::NaiveDate;
use session_manager::UserSession;

use crate::screen::{show, Refresh, Screen};
use crate::transport::{ChatApi, TransportError};

/// "train" tap - enter training at the current position.
pub async fn handle_train(
    api: &dyn ChatApi,
    chat_id: i64,
    session: &mut UserSession,
    today: NaiveDate,
) -> Result<(), TransportError> {
    render_training(api, chat_id, session, today, false).await
}

/// "next step" tap - advance and show the next step or the completion
/// notice. The caller guarantees a workout is loaded.
pub async fn handle_next_step(
    api: &dyn ChatApi,
    chat_id: i64,
    session: &mut UserSession,
    today: NaiveDate,
) -> Result<(), TransportError> {
    render_training(api, chat_id, session, today, true).await
}

async fn render_training(
    api: &dyn ChatApi,
    chat_id: i64,
    session: &mut UserSession,
    today: NaiveDate,
    advance: bool,
) -> Result<(), TransportError> {
    let mut progress = session.progress.apply_daily_reset(today);

    let screen = match &session.workout {
        None => {
            session.progress = progress;
            return show(api, chat_id, session, &Screen::NoWorkout, Refresh::Edit).await;
        }
        Some(plan) => {
            if advance && plan.step(progress.current_step).is_some() {
                progress = progress.advance();
            }
            match plan.step(progress.current_step) {
                Some(step) => Screen::Step {
                    step: step.clone(),
                    total: plan.len(),
                },
                None => {
                    log::info!("[{}] routine completed on {}", chat_id, today);
                    progress = progress.complete(today);
                    Screen::Finished
                }
            }
        }
    };

    session.progress = progress;
    // Step cards are media messages; entering them always replaces the
    // previous screen rather than editing it.
    show(
        api,
        chat_id,
        session,
        &screen,
        Refresh::Replace { user_message: None },
    )
    .await
}

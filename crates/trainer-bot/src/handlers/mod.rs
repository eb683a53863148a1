//! Event handlers - wire chat events to state transitions and renders
//!
//! One call to [`handle_event`] is one complete dispatch: load the session,
//! consult the state machine, run the matching handler's side effects, and
//! write the whole session back. The host dispatcher must deliver a single
//! chat's events serially and in arrival order; the read-modify-write cycle
//! here is not reentrant per chat. Different chats never share state.

pub mod menu;
pub mod training;
pub mod upload;

use bot_state::{buttons, commands, SessionEvent, StateMachine};
use chrono::NaiveDate;
use session_manager::{SessionManager, SessionStorage};

use crate::error::Result;
use crate::transport::ChatApi;

/// Dispatch one event for one chat.
///
/// `user_message` is the handle of the chat message that carried the event
/// (commands, uploads), `None` for button taps on the live screen. `today`
/// is injected so the day-rollover rule is testable.
///
/// Events that are not valid in the current state are ignored outright: no
/// render, no state change, no write-back. A failed render drops the event
/// and leaves the persisted session at its prior state, so the user's next
/// tap retries from known ground.
pub async fn handle_event<S: SessionStorage>(
    api: &dyn ChatApi,
    sessions: &SessionManager<S>,
    chat_id: i64,
    event: SessionEvent,
    user_message: Option<i32>,
    today: NaiveDate,
) -> Result<()> {
    let user_id = chat_id.to_string();
    let mut session = sessions.load_or_create(&user_id).await?;

    let mut machine = StateMachine::with_state(session.state);
    let transition = machine.handle_event(event.clone());
    if !transition.accepted {
        log::debug!(
            "[{}] ignoring {:?} in state {:?}",
            chat_id,
            event,
            transition.from
        );
        return Ok(());
    }

    // Guard on the "next step" row: without a workout there is nothing to
    // advance through, and the tap is ignored entirely.
    let next_step_tap =
        matches!(&event, SessionEvent::ButtonTap { data } if data == buttons::NEXT_STEP);
    if next_step_tap && session.workout.is_none() {
        log::debug!("[{}] ignoring next_step without a workout", chat_id);
        return Ok(());
    }

    log::info!(
        "[{}] {:?} -> {:?} on {:?}",
        chat_id,
        transition.from,
        transition.to,
        event
    );

    match &event {
        SessionEvent::Command { name } if name == commands::START => {
            menu::handle_start(api, chat_id, &mut session, user_message).await?;
        }
        SessionEvent::Command { name } if name == commands::RESET => {
            menu::handle_reset(api, chat_id, &mut session, user_message).await?;
        }
        SessionEvent::ButtonTap { data } => match data.as_str() {
            buttons::ADD_WORKOUT => upload::handle_add_workout(api, chat_id, &mut session).await?,
            buttons::BACK => menu::handle_back(api, chat_id, &mut session).await?,
            buttons::TRAIN => training::handle_train(api, chat_id, &mut session, today).await?,
            buttons::NEXT_STEP => {
                training::handle_next_step(api, chat_id, &mut session, today).await?
            }
            other => log::debug!("[{}] no handler for tap {:?}", chat_id, other),
        },
        SessionEvent::DocumentUploaded { file_ref } => {
            upload::handle_document(api, chat_id, &mut session, file_ref, user_message).await?;
        }
        SessionEvent::Command { name } => {
            log::debug!("[{}] no handler for command {:?}", chat_id, name);
        }
    }

    session.enter(transition.to);
    sessions.save(&user_id, &session).await?;
    Ok(())
}

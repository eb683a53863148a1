//! Menu handlers: `/start`, `/reset`, and the "back" control

use session_manager::UserSession;

use crate::screen::{show, Refresh, Screen};
use crate::transport::{ChatApi, TransportError};

/// `/start` - (re)enter the menu. Stored workout and progress survive; only
/// the screen changes. The command message itself is cleaned up.
pub async fn handle_start(
    api: &dyn ChatApi,
    chat_id: i64,
    session: &mut UserSession,
    user_message: Option<i32>,
) -> Result<(), TransportError> {
    show(api, chat_id, session, &Screen::Menu, Refresh::Replace { user_message }).await
}

/// `/reset` - restart the routine from step 1 and return to the menu.
pub async fn handle_reset(
    api: &dyn ChatApi,
    chat_id: i64,
    session: &mut UserSession,
    user_message: Option<i32>,
) -> Result<(), TransportError> {
    session.progress = session.progress.restart();
    log::info!("[{}] progress restarted from step 1", chat_id);
    show(api, chat_id, session, &Screen::Menu, Refresh::Replace { user_message }).await
}

/// "back" tap - return to the menu from any screen that offers it.
pub async fn handle_back(
    api: &dyn ChatApi,
    chat_id: i64,
    session: &mut UserSession,
) -> Result<(), TransportError> {
    show(api, chat_id, session, &Screen::Menu, Refresh::Edit).await
}

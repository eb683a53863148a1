//! Session data structures

use bot_state::SessionState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use workout_core::{Progress, WorkoutPlan};

/// Per-chat session state - the unit of persistence.
///
/// One session per chat, created on the first `/start` and kept
/// indefinitely. A newly uploaded workout replaces `workout` wholesale;
/// `progress` is preserved across uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    /// User id the session is keyed by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Current conversation state.
    #[serde(default)]
    pub state: SessionState,

    /// Handle of the live screen message, if one has been rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_message_id: Option<i32>,

    /// The loaded workout plan, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout: Option<WorkoutPlan>,

    /// Training progress within the plan.
    #[serde(default)]
    pub progress: Progress,

    /// Last time the session was updated.
    pub last_updated: DateTime<Utc>,
}

impl Default for UserSession {
    fn default() -> Self {
        Self {
            user_id: None,
            state: SessionState::default(),
            screen_message_id: None,
            workout: None,
            progress: Progress::default(),
            last_updated: Utc::now(),
        }
    }
}

impl UserSession {
    /// Create a fresh session for a user.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Self::default()
        }
    }

    /// Replace the workout plan wholesale, preserving progress.
    pub fn install_workout(&mut self, plan: WorkoutPlan) {
        self.workout = Some(plan);
        self.last_updated = Utc::now();
    }

    /// Move the conversation to a new state.
    pub fn enter(&mut self, state: SessionState) {
        self.state = state;
        self.last_updated = Utc::now();
    }

    /// Record the handle of the live screen message, returning the handle
    /// of the screen it replaces.
    pub fn record_screen(&mut self, message_id: i32) -> Option<i32> {
        self.last_updated = Utc::now();
        self.screen_message_id.replace(message_id)
    }
}

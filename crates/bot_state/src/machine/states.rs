//! Conversation states - Defines all possible states of a chat session

use serde::{Deserialize, Serialize};

/// Defines the possible states of a chat session.
///
/// Each state maps to one screen family; which events are meaningful in
/// which state is decided by the transition table, not by flags on the
/// session.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// The main menu is showing; awaiting a "train" or "add workout" tap.
    Menu,

    /// The upload prompt is showing; awaiting a workout document.
    AwaitingWorkoutFile,

    /// A training screen (step card, finished notice, or no-workout notice)
    /// is showing.
    InTraining,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Menu
    }
}

impl SessionState {
    /// Check whether document uploads are meaningful in this state.
    pub fn accepts_uploads(&self) -> bool {
        matches!(self, Self::AwaitingWorkoutFile)
    }

    /// Get a human-readable description of the current state.
    pub fn description(&self) -> &str {
        match self {
            Self::Menu => "At the main menu",
            Self::AwaitingWorkoutFile => "Waiting for a workout file",
            Self::InTraining => "Training",
        }
    }
}

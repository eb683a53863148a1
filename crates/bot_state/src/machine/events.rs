//! Session events - Defines the external events that drive the conversation

use serde::{Deserialize, Serialize};

/// Commands the bot understands, as bare names without the leading slash.
pub mod commands {
    /// Entry point; resets the conversation to the menu from anywhere.
    pub const START: &str = "start";
    /// Restarts the routine from step 1.
    pub const RESET: &str = "reset";
}

/// Callback payloads carried by the inline keyboard buttons.
pub mod buttons {
    pub const TRAIN: &str = "train";
    pub const ADD_WORKOUT: &str = "add_workout";
    pub const NEXT_STEP: &str = "next_step";
    pub const BACK: &str = "back";
}

/// Defines the events that can trigger state transitions in the FSM.
///
/// Every event is scoped to one chat by the dispatcher; the machine itself
/// never sees chat ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEvent {
    /// A slash command arrived as a chat message.
    Command { name: String },

    /// An inline keyboard button was tapped.
    ButtonTap { data: String },

    /// A document was uploaded as a chat message.
    DocumentUploaded { file_ref: String },
}

impl SessionEvent {
    pub fn command(name: impl Into<String>) -> Self {
        Self::Command { name: name.into() }
    }

    pub fn button_tap(data: impl Into<String>) -> Self {
        Self::ButtonTap { data: data.into() }
    }

    pub fn document(file_ref: impl Into<String>) -> Self {
        Self::DocumentUploaded {
            file_ref: file_ref.into(),
        }
    }

    /// Check whether this event arrived as its own chat message (and must
    /// be cleaned up by the renderer), as opposed to a button tap on the
    /// live screen.
    pub fn is_user_message(&self) -> bool {
        matches!(self, Self::Command { .. } | Self::DocumentUploaded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_detection() {
        assert!(SessionEvent::command(commands::START).is_user_message());
        assert!(SessionEvent::document("file-1").is_user_message());
        assert!(!SessionEvent::button_tap(buttons::TRAIN).is_user_message());
    }

    #[test]
    fn test_serde_round_trip() {
        let event = SessionEvent::button_tap(buttons::NEXT_STEP);
        let json = serde_json::to_string(&event).unwrap();
        let restored: SessionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, restored);
    }
}

//! State transitions - FSM transition logic
//!
//! Implements the state machine that handles event-driven state transitions.
//! The transition function is total: any (state, event) pair not listed in
//! the table is reported as not accepted and leaves the state untouched, so
//! stray taps and stale messages are no-ops rather than failures.

use super::events::{buttons, commands, SessionEvent};
use super::states::SessionState;

/// Represents a state transition result.
#[derive(Debug, Clone)]
pub struct StateTransition {
    /// The state before the transition.
    pub from: SessionState,
    /// The state after the transition.
    pub to: SessionState,
    /// The event that triggered the transition.
    pub event: SessionEvent,
    /// Whether the event is valid in the `from` state. Unaccepted events
    /// must produce no side effects at all.
    pub accepted: bool,
    /// Whether the state actually changed.
    pub changed: bool,
}

/// State machine for managing conversation state transitions.
#[derive(Debug, Clone)]
pub struct StateMachine {
    /// Current state.
    current_state: SessionState,
    /// Transition history (limited).
    history: Vec<StateTransition>,
    /// Max history entries to keep.
    max_history: usize,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// Create a new state machine at the menu.
    pub fn new() -> Self {
        Self::with_state(SessionState::Menu)
    }

    /// Create a state machine with a specific initial state.
    pub fn with_state(state: SessionState) -> Self {
        Self {
            current_state: state,
            history: Vec::new(),
            max_history: 50,
        }
    }

    /// Get the current state.
    pub fn state(&self) -> SessionState {
        self.current_state
    }

    /// Get the transition history.
    pub fn history(&self) -> &[StateTransition] {
        &self.history
    }

    /// Handle an event and transition to a new state.
    pub fn handle_event(&mut self, event: SessionEvent) -> StateTransition {
        let old_state = self.current_state;
        let next = Self::compute_next_state(old_state, &event);
        let new_state = next.unwrap_or(old_state);

        self.current_state = new_state;

        let transition = StateTransition {
            from: old_state,
            to: new_state,
            event,
            accepted: next.is_some(),
            changed: old_state != new_state,
        };

        self.history.push(transition.clone());
        if self.history.len() > self.max_history {
            self.history.remove(0);
        }

        transition
    }

    /// Check if an event is valid in the current state without executing it.
    pub fn accepts(&self, event: &SessionEvent) -> bool {
        Self::compute_next_state(self.current_state, event).is_some()
    }

    /// Compute the next state given current state and event.
    ///
    /// `None` means the event is not listed for the state and must be
    /// ignored by the caller.
    fn compute_next_state(state: SessionState, event: &SessionEvent) -> Option<SessionState> {
        use SessionEvent::*;
        use SessionState::*;

        match (state, event) {
            // ========== Commands (accepted from every state) ==========
            // `/start` mid-flow resets to the menu, discarding no stored data.
            (_, Command { name }) if name == commands::START => Some(Menu),
            (_, Command { name }) if name == commands::RESET => Some(Menu),

            // ========== Menu ==========
            (Menu, ButtonTap { data }) if data == buttons::ADD_WORKOUT => {
                Some(AwaitingWorkoutFile)
            }
            (Menu, ButtonTap { data }) if data == buttons::TRAIN => Some(InTraining),

            // ========== Awaiting workout file ==========
            (AwaitingWorkoutFile, DocumentUploaded { .. }) => Some(AwaitingWorkoutFile),
            (AwaitingWorkoutFile, ButtonTap { data }) if data == buttons::BACK => Some(Menu),

            // ========== In training ==========
            (InTraining, ButtonTap { data }) if data == buttons::BACK => Some(Menu),
            (InTraining, ButtonTap { data }) if data == buttons::NEXT_STEP => Some(InTraining),

            // ========== Default: event not valid here ==========
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_flow() {
        let mut sm = StateMachine::new();
        assert_eq!(sm.state(), SessionState::Menu);

        let t1 = sm.handle_event(SessionEvent::button_tap(buttons::ADD_WORKOUT));
        assert!(t1.accepted);
        assert!(t1.changed);
        assert_eq!(sm.state(), SessionState::AwaitingWorkoutFile);

        let t2 = sm.handle_event(SessionEvent::button_tap(buttons::BACK));
        assert!(t2.accepted);
        assert_eq!(sm.state(), SessionState::Menu);

        let t3 = sm.handle_event(SessionEvent::button_tap(buttons::TRAIN));
        assert!(t3.accepted);
        assert_eq!(sm.state(), SessionState::InTraining);
    }

    #[test]
    fn test_next_step_stays_in_training() {
        let mut sm = StateMachine::with_state(SessionState::InTraining);

        let t = sm.handle_event(SessionEvent::button_tap(buttons::NEXT_STEP));
        assert!(t.accepted);
        assert!(!t.changed);
        assert_eq!(sm.state(), SessionState::InTraining);
    }

    #[test]
    fn test_start_reenters_menu_from_anywhere() {
        for state in [
            SessionState::Menu,
            SessionState::AwaitingWorkoutFile,
            SessionState::InTraining,
        ] {
            let mut sm = StateMachine::with_state(state);
            let t = sm.handle_event(SessionEvent::command(commands::START));
            assert!(t.accepted, "start must be accepted in {state:?}");
            assert_eq!(sm.state(), SessionState::Menu);
        }
    }

    #[test]
    fn test_unlisted_pairs_are_ignored() {
        let cases = [
            (SessionState::Menu, SessionEvent::document("f")),
            (SessionState::Menu, SessionEvent::button_tap(buttons::NEXT_STEP)),
            (SessionState::Menu, SessionEvent::button_tap(buttons::BACK)),
            (
                SessionState::AwaitingWorkoutFile,
                SessionEvent::button_tap(buttons::TRAIN),
            ),
            (
                SessionState::InTraining,
                SessionEvent::button_tap(buttons::ADD_WORKOUT),
            ),
            (SessionState::InTraining, SessionEvent::document("f")),
            (SessionState::Menu, SessionEvent::command("unknown")),
            (SessionState::Menu, SessionEvent::button_tap("garbage")),
        ];

        for (state, event) in cases {
            let mut sm = StateMachine::with_state(state);
            let t = sm.handle_event(event.clone());
            assert!(!t.accepted, "{event:?} must be ignored in {state:?}");
            assert!(!t.changed);
            assert_eq!(sm.state(), state);
        }
    }

    #[test]
    fn test_upload_keeps_awaiting_state() {
        let mut sm = StateMachine::with_state(SessionState::AwaitingWorkoutFile);

        let t = sm.handle_event(SessionEvent::document("file-1"));
        assert!(t.accepted);
        assert!(!t.changed);
        assert_eq!(sm.state(), SessionState::AwaitingWorkoutFile);
    }

    #[test]
    fn test_history_tracking() {
        let mut sm = StateMachine::new();
        sm.handle_event(SessionEvent::button_tap(buttons::TRAIN));
        sm.handle_event(SessionEvent::button_tap(buttons::BACK));

        assert_eq!(sm.history().len(), 2);
        assert!(sm.history()[0].accepted);
    }
}

//! Training progress - per-user position within the routine
//!
//! Pure value type, no I/O. `current_step` only ever moves by `advance`
//! (exactly +1) or by the daily reset; it is never set directly from user
//! input. `last_completed_date` is set only when the step lookup for
//! `current_step` fails, which is the "routine finished" signal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn first_step() -> u32 {
    1
}

/// A user's position within their workout routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// 1-based index of the step the user is on.
    #[serde(default = "first_step")]
    pub current_step: u32,

    /// Calendar date the routine was last completed, if ever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completed_date: Option<NaiveDate>,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            current_step: first_step(),
            last_completed_date: None,
        }
    }
}

impl Progress {
    /// Move to the next step. Exactly one advance per "next step" event.
    #[must_use]
    pub fn advance(self) -> Self {
        Self {
            current_step: self.current_step + 1,
            ..self
        }
    }

    /// Restart from step 1 when a new calendar day has begun since the
    /// routine was last completed.
    ///
    /// Must be applied before any step lookup on every entry into the
    /// training screen. Same-day re-entry is unchanged, so a just-finished
    /// routine re-confirms completion instead of silently restarting.
    #[must_use]
    pub fn apply_daily_reset(self, today: NaiveDate) -> Self {
        match self.last_completed_date {
            Some(completed) if today > completed => Self {
                current_step: first_step(),
                ..self
            },
            _ => self,
        }
    }

    /// Record that the routine was finished today.
    #[must_use]
    pub fn complete(self, today: NaiveDate) -> Self {
        Self {
            last_completed_date: Some(today),
            ..self
        }
    }

    /// Restart from step 1, keeping the completion date.
    #[must_use]
    pub fn restart(self) -> Self {
        Self {
            current_step: first_step(),
            ..self
        }
    }
}

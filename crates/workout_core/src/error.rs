//! Workout document error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkoutError {
    #[error("malformed workout document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("workout document must be a JSON object")]
    NotAnObject,

    #[error("invalid step key {0:?}: expected step_<n> with n >= 1")]
    InvalidStepKey(String),

    #[error("workout steps must cover 1..={total} without gaps, step {missing} is missing")]
    MissingStep { missing: u32, total: u32 },
}

pub type Result<T> = std::result::Result<T, WorkoutError>;

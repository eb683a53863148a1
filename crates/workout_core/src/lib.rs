//! workout_core - Core types for workout routines and training progress
//!
//! This crate provides the foundational types used across the trainer bot:
//! - `plan` - WorkoutStep, WorkoutPlan and the uploaded-document parser
//! - `progress` - per-user training position and the daily-reset rule
//! - `error` - parse/validation errors for uploaded workout documents

pub mod error;
pub mod plan;
pub mod progress;

// Re-export commonly used types
pub use error::{Result, WorkoutError};
pub use plan::{WorkoutPlan, WorkoutStep};
pub use progress::Progress;

//! Error types for the animation engine

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    #[error("Animation duration must be greater than zero, got {0}")]
    InvalidDuration(f64),

    #[error("Animation {field} must not be negative, got {value}")]
    InvalidDelay { field: &'static str, value: f64 },

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Animation failed: {0}")]
    Runtime(String),

    #[error("Animation was dropped before it completed")]
    Dropped,
}

pub type AnimationResult<T> = Result<T, AnimationError>;

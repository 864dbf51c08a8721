//! Motionline: a time-driven property animation engine.
//!
//! Build an [`Animation`](animations::Animation) from a target adapter and a
//! set of property ranges, or sequence several on a
//! [`Timeline`](animations::Timeline), then tick them from a frame loop.

pub mod animations;
pub mod cli;
pub mod config;

pub use animations::{
    Animation, AnimationDefinition, AnimationError, AnimationOptions, AnimationResult,
    AnimationState, Easing, PropertyAnimation, Timeline, TimelineOptions, Value,
};

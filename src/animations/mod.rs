//! Animation engine
//!
//! This module provides the building blocks for time-based property animation:
//!
//! ## Features
//!
//! - Easing curves with combinators (reverse, mirror, mix)
//! - Interpolation of numbers, unit strings, colors and single transform calls
//! - Pause/resume-aware progress tracking driven by a pluggable clock
//! - Single-target animations and timelines that sequence them
//! - Staggered delays for groups of targets
//! - Ready-made presets (fades, slides, attention seekers)

pub mod animation;
pub mod clock;
pub mod completion;
pub mod easing;
pub mod errors;
pub mod interpolation;
pub mod presets;
pub mod progress;
pub mod stagger;
pub mod target;
pub mod timeline;

mod playback;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use animation::{
    Animation, AnimationDefinition, AnimationOptions, NormalizedProperty, PropertyAnimation,
};
pub use clock::{drive, Clock, FrameTicker, ManualClock, MonotonicClock, SharedClock};
pub use completion::Completion;
pub use easing::Easing;
pub use errors::{AnimationError, AnimationResult};
pub use interpolation::{interpolate, interpolate_steps, Rgba, Value};
pub use presets::{animate_all, preset, PresetOverrides, PRESET_NAMES};
pub use progress::{ProgressDriver, ProgressSample};
pub use stagger::{
    stagger, GridOrder, Stagger, StaggerDirection, StaggerFrom, StaggerGrid, StaggerOptions,
    StaggerValue,
};
pub use target::{ObjectTarget, PropertyValues, StyleTarget, TargetAdapter};
pub use timeline::{Offset, Timeline, TimelineEntry, TimelineItem, TimelineOptions};

/// Run state shared by animations and timelines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationState {
    /// Not started, or stopped
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
}

impl fmt::Display for AnimationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnimationState::Idle => "idle",
            AnimationState::Running => "running",
            AnimationState::Paused => "paused",
            AnimationState::Completed => "completed",
        };
        write!(f, "{}", name)
    }
}

/// Something that can be advanced frame by frame
pub trait Playback {
    /// Advance one frame; returns whether playback is still running
    fn tick(&mut self) -> bool;

    fn state(&self) -> AnimationState;

    fn progress(&self) -> f64;

    /// Total span in milliseconds
    fn duration(&self) -> f64;
}

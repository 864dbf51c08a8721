//! Timeline for sequencing multiple animations.
//!
//! A timeline lays its children out on a shared time axis and is the only
//! thing that moves them: every frame it maps its own progress to a local
//! progress per child and seeks the child there. Children are never played
//! or paused by the timeline.

use std::fmt;

use tokio::sync::watch;
use tracing::{debug, trace, warn};

use super::animation::{Animation, AnimationDefinition};
use super::clock::{MonotonicClock, SharedClock};
use super::completion::Completion;
use super::easing::Easing;
use super::errors::AnimationResult;
use super::playback::PlaybackCore;
use super::{AnimationState, Playback};

/// Where a child starts on the timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Offset {
    /// `"+=N"`: N ms after the previous entry ends
    After(f64),
    /// `"-=N"`: N ms before the previous entry ends, never before 0
    Before(f64),
    /// Bare number: absolute start time
    At(f64),
}

impl Offset {
    /// Parse offset syntax; anything unrecognized is `At(0)`
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let relative = |rest: &str| rest.trim().parse::<f64>().ok().filter(|n| n.is_finite());

        let parsed = if let Some(rest) = raw.strip_prefix("+=") {
            relative(rest).map(Offset::After)
        } else if let Some(rest) = raw.strip_prefix("-=") {
            relative(rest).map(Offset::Before)
        } else {
            raw.parse::<f64>().ok().filter(|n| n.is_finite()).map(Offset::At)
        };

        parsed.unwrap_or_else(|| {
            warn!(target: "motionline", offset = raw, "unrecognized timeline offset, starting at 0");
            Offset::At(0.0)
        })
    }

    /// Absolute start time given the end of the previous entry
    pub fn resolve(self, reference: f64) -> f64 {
        match self {
            Offset::After(n) => (reference + n).max(0.0),
            Offset::Before(n) => (reference - n).max(0.0),
            Offset::At(n) => n.max(0.0),
        }
    }
}

impl Default for Offset {
    fn default() -> Self {
        Offset::After(0.0)
    }
}

impl From<&str> for Offset {
    fn from(raw: &str) -> Self {
        Offset::parse(raw)
    }
}

impl From<String> for Offset {
    fn from(raw: String) -> Self {
        Offset::parse(&raw)
    }
}

impl From<f64> for Offset {
    fn from(at: f64) -> Self {
        Offset::At(at)
    }
}

/// Either a ready animation or a definition to build one from
pub enum TimelineItem {
    Animation(Animation),
    Definition(AnimationDefinition),
}

impl From<Animation> for TimelineItem {
    fn from(animation: Animation) -> Self {
        TimelineItem::Animation(animation)
    }
}

impl From<AnimationDefinition> for TimelineItem {
    fn from(definition: AnimationDefinition) -> Self {
        TimelineItem::Definition(definition)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TimelineOptions {
    pub autoplay: bool,
}

impl TimelineOptions {
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }
}

/// A child animation and its resolved start time
#[derive(Debug)]
pub struct TimelineEntry {
    animation: Animation,
    offset: f64,
}

impl TimelineEntry {
    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Start time in milliseconds
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn end(&self) -> f64 {
        self.offset + self.animation.duration()
    }

    /// Child progress for a point on the timeline
    fn local_progress(&self, current_time: f64) -> f64 {
        if current_time < self.offset {
            0.0
        } else if current_time > self.end() {
            1.0
        } else {
            (current_time - self.offset) / self.animation.duration()
        }
    }
}

pub struct Timeline {
    entries: Vec<TimelineEntry>,
    duration: f64,
    clock: SharedClock,
    core: PlaybackCore,
}

impl Timeline {
    pub fn new(options: TimelineOptions) -> Self {
        Self::with_clock(options, MonotonicClock::shared())
    }

    pub fn with_clock(options: TimelineOptions, clock: SharedClock) -> Self {
        let core = PlaybackCore::new(
            "timeline",
            clock.clone(),
            0.0,
            0.0,
            Easing::linear(),
            options.autoplay,
        );
        Self {
            entries: Vec::new(),
            duration: 0.0,
            clock,
            core,
        }
    }

    /// Append a child at `offset`, resolved against the end of the last entry.
    ///
    /// Definitions are built into animations on this timeline's clock; an
    /// invalid definition is returned as an error and nothing is added.
    /// Adding while running extends the current run to the new duration.
    pub fn add(
        &mut self,
        item: impl Into<TimelineItem>,
        offset: impl Into<Offset>,
    ) -> AnimationResult<&mut Self> {
        let animation = match item.into() {
            TimelineItem::Animation(animation) => animation,
            TimelineItem::Definition(definition) => {
                Animation::with_clock(definition, self.clock.clone())?
            }
        };

        let reference = self.entries.last().map(TimelineEntry::end).unwrap_or(0.0);
        let offset = offset.into().resolve(reference);
        let entry = TimelineEntry { animation, offset };

        self.duration = self.duration.max(entry.end());
        self.core.set_span(self.duration);
        debug!(
            target: "motionline",
            index = self.entries.len(),
            offset,
            duration = self.duration,
            "timeline entry added"
        );
        self.entries.push(entry);
        Ok(self)
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Longest `offset + duration` over all entries
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn state(&self) -> AnimationState {
        self.core.state()
    }

    pub fn progress(&self) -> f64 {
        self.core.progress()
    }

    pub fn watch_state(&self) -> watch::Receiver<AnimationState> {
        self.core.watch_state()
    }

    pub fn watch_progress(&self) -> watch::Receiver<f64> {
        self.core.watch_progress()
    }

    pub fn play(&mut self) -> &mut Self {
        self.core.play();
        self
    }

    pub fn pause(&mut self) -> &mut Self {
        self.core.pause();
        self
    }

    /// Cancel playback and stop every child
    pub fn stop(&mut self) -> &mut Self {
        self.core.stop();
        for entry in &mut self.entries {
            entry.animation.stop();
        }
        self
    }

    pub fn seek(&mut self, progress: f64) -> &mut Self {
        let progress = progress.clamp(0.0, 1.0);
        self.core.set_progress(progress);
        if let Err(e) = self.update_animations(progress) {
            self.core.fail(e.to_string());
        }
        self
    }

    /// Rewind to the start and play a fresh run
    pub fn restart(&mut self) -> &mut Self {
        self.core.stop();
        self.seek(0.0);
        self.play()
    }

    pub fn completion(&mut self) -> Completion {
        if self.core.state() != AnimationState::Running {
            self.core.play();
        }
        self.core.completion()
    }

    /// Seek every child to where timeline `progress` puts it, in insertion order
    pub fn update_animations(&mut self, progress: f64) -> anyhow::Result<()> {
        let current_time = progress * self.duration;
        for entry in &mut self.entries {
            let local = entry.local_progress(current_time);
            entry.animation.seek_to(local)?;
        }
        Ok(())
    }

    pub fn tick(&mut self) -> bool {
        let Some(sample) = self.core.next_sample() else {
            return self.core.is_active();
        };
        trace!(raw = sample.raw, eased = sample.eased, "timeline frame");

        self.core.set_progress(sample.eased);
        if let Err(e) = self.update_animations(sample.eased) {
            self.core.fail(e.to_string());
            return false;
        }
        if sample.done {
            self.core.finish();
        }
        self.core.is_active()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(TimelineOptions::default())
    }
}

impl Playback for Timeline {
    fn tick(&mut self) -> bool {
        Timeline::tick(self)
    }

    fn state(&self) -> AnimationState {
        Timeline::state(self)
    }

    fn progress(&self) -> f64 {
        Timeline::progress(self)
    }

    fn duration(&self) -> f64 {
        Timeline::duration(self)
    }
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("entries", &self.entries)
            .field("duration", &self.duration)
            .field("state", &self.core.state())
            .field("progress", &self.core.progress())
            .finish_non_exhaustive()
    }
}

//! Single-target property animation.
//!
//! An [`Animation`] binds a target adapter, a set of per-property ranges and
//! timing options to a progress driver. Each tick interpolates every property
//! at the same progress value and writes them to the target as one batch.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, trace};

use super::clock::{MonotonicClock, SharedClock};
use super::completion::Completion;
use super::easing::Easing;
use super::errors::{AnimationError, AnimationResult};
use super::interpolation::{interpolate, interpolate_steps, Value};
use super::playback::PlaybackCore;
use super::target::{PropertyValues, TargetAdapter};
use super::{AnimationState, Playback};

/// How one property is animated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyAnimation {
    /// Explicit `[from, to]` pair
    Range(Value, Value),
    /// `from`, ordered intermediate `steps`, then `to`
    Steps {
        from: Value,
        to: Value,
        #[serde(default)]
        steps: Vec<Value>,
    },
    /// Value with its own timing. Only `value` affects interpolation; the
    /// per-property `duration` and `delay` are recorded but not applied.
    Timed {
        value: Box<PropertyAnimation>,
        #[serde(default)]
        duration: Option<f64>,
        #[serde(default)]
        delay: Option<f64>,
    },
    /// Target value only; `from` is read from the target
    To(Value),
}

impl PropertyAnimation {
    pub fn range(from: impl Into<Value>, to: impl Into<Value>) -> Self {
        Self::Range(from.into(), to.into())
    }

    pub fn to(value: impl Into<Value>) -> Self {
        Self::To(value.into())
    }

    pub fn steps<I, V>(from: impl Into<Value>, steps: I, to: impl Into<Value>) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Steps {
            from: from.into(),
            to: to.into(),
            steps: steps.into_iter().map(Into::into).collect(),
        }
    }

    pub fn timed(value: PropertyAnimation, duration: Option<f64>, delay: Option<f64>) -> Self {
        Self::Timed {
            value: Box::new(value),
            duration,
            delay,
        }
    }

    /// Reduce to the `{from, to, steps}` form used for interpolation
    pub fn normalize(&self) -> NormalizedProperty {
        match self {
            Self::Range(from, to) => NormalizedProperty {
                from: Some(from.clone()),
                to: to.clone(),
                steps: Vec::new(),
                timing: None,
            },
            Self::To(to) => NormalizedProperty {
                from: None,
                to: to.clone(),
                steps: Vec::new(),
                timing: None,
            },
            Self::Steps { from, to, steps } => NormalizedProperty {
                from: Some(from.clone()),
                to: to.clone(),
                steps: steps.clone(),
                timing: None,
            },
            Self::Timed {
                value,
                duration,
                delay,
            } => NormalizedProperty {
                timing: Some(PropertyTiming {
                    duration: *duration,
                    delay: *delay,
                }),
                ..value.normalize()
            },
        }
    }
}

impl From<Value> for PropertyAnimation {
    fn from(value: Value) -> Self {
        Self::To(value)
    }
}

impl From<f64> for PropertyAnimation {
    fn from(value: f64) -> Self {
        Self::To(value.into())
    }
}

impl From<&str> for PropertyAnimation {
    fn from(value: &str) -> Self {
        Self::To(value.into())
    }
}

/// Per-property timing override
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyTiming {
    pub duration: Option<f64>,
    pub delay: Option<f64>,
}

/// `{from, to, steps}`; a missing `from` is resolved from the target
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedProperty {
    pub from: Option<Value>,
    pub to: Value,
    pub steps: Vec<Value>,
    pub timing: Option<PropertyTiming>,
}

impl NormalizedProperty {
    /// Value at `progress`, given the resolved starting value
    pub fn value_at(&self, from: &Value, progress: f64) -> Value {
        if self.steps.is_empty() {
            return interpolate(from, &self.to, progress);
        }
        let mut waypoints = Vec::with_capacity(self.steps.len() + 2);
        waypoints.push(from.clone());
        waypoints.extend(self.steps.iter().cloned());
        waypoints.push(self.to.clone());
        interpolate_steps(&waypoints, progress).unwrap_or_else(|| self.to.clone())
    }
}

/// Timing options for an animation
#[derive(Debug, Clone)]
pub struct AnimationOptions {
    /// Duration in milliseconds, must be greater than zero
    pub duration: f64,
    pub easing: Easing,
    /// Milliseconds before progress starts moving
    pub delay: f64,
    /// Milliseconds of trailing space when laid out on a timeline
    pub end_delay: f64,
    /// Start playing on the first tick
    pub autoplay: bool,
}

impl AnimationOptions {
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            easing: Easing::linear(),
            delay: 0.0,
            end_delay: 0.0,
            autoplay: false,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_end_delay(mut self, end_delay: f64) -> Self {
        self.end_delay = end_delay;
        self
    }

    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    pub fn validate(&self) -> AnimationResult<()> {
        if !(self.duration > 0.0) {
            return Err(AnimationError::InvalidDuration(self.duration));
        }
        if self.delay < 0.0 {
            return Err(AnimationError::InvalidDelay {
                field: "delay",
                value: self.delay,
            });
        }
        if self.end_delay < 0.0 {
            return Err(AnimationError::InvalidDelay {
                field: "end delay",
                value: self.end_delay,
            });
        }
        Ok(())
    }
}

/// Everything needed to build an [`Animation`]
pub struct AnimationDefinition {
    pub target: Box<dyn TargetAdapter>,
    pub properties: BTreeMap<String, PropertyAnimation>,
    pub options: AnimationOptions,
}

impl AnimationDefinition {
    pub fn new(target: impl TargetAdapter + 'static, options: AnimationOptions) -> Self {
        Self {
            target: Box::new(target),
            properties: BTreeMap::new(),
            options,
        }
    }

    pub fn property(mut self, name: &str, animation: impl Into<PropertyAnimation>) -> Self {
        self.properties.insert(name.to_string(), animation.into());
        self
    }
}

impl fmt::Debug for AnimationDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationDefinition")
            .field("properties", &self.properties)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

pub struct Animation {
    target: Box<dyn TargetAdapter>,
    properties: Vec<(String, NormalizedProperty)>,
    resolved_from: Option<Vec<Value>>,
    options: AnimationOptions,
    core: PlaybackCore,
}

impl Animation {
    /// Build an animation driven by the wall clock
    pub fn new(definition: AnimationDefinition) -> AnimationResult<Self> {
        Self::with_clock(definition, MonotonicClock::shared())
    }

    pub fn with_clock(definition: AnimationDefinition, clock: SharedClock) -> AnimationResult<Self> {
        let AnimationDefinition {
            target,
            properties,
            options,
        } = definition;
        options.validate()?;

        let properties: Vec<(String, NormalizedProperty)> = properties
            .into_iter()
            .map(|(name, animation)| {
                let normalized = animation.normalize();
                if let Some(timing) = normalized.timing {
                    debug!(
                        property = %name,
                        duration = ?timing.duration,
                        delay = ?timing.delay,
                        "per-property timing is recorded but not applied"
                    );
                }
                (name, normalized)
            })
            .collect();

        let core = PlaybackCore::new(
            "animation",
            clock,
            options.duration,
            options.delay,
            options.easing.clone(),
            options.autoplay,
        );

        Ok(Self {
            target,
            properties,
            resolved_from: None,
            options,
            core,
        })
    }

    pub fn options(&self) -> &AnimationOptions {
        &self.options
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &NormalizedProperty)> {
        self.properties.iter().map(|(name, prop)| (name.as_str(), prop))
    }

    /// Total span including delay and end delay
    pub fn duration(&self) -> f64 {
        self.options.duration + self.options.delay + self.options.end_delay
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

    /// Cancel playback and put every property back at progress zero
    pub fn stop(&mut self) -> &mut Self {
        self.core.stop();
        self.render_or_fail(0.0);
        self
    }

    /// Jump to `progress` (clamped to `[0, 1]`) without changing run state
    pub fn seek(&mut self, progress: f64) -> &mut Self {
        if let Err(e) = self.seek_to(progress) {
            self.core.fail(e.to_string());
        }
        self
    }

    /// Seek and hand a target error back to the caller instead of failing this run
    pub(crate) fn seek_to(&mut self, progress: f64) -> anyhow::Result<()> {
        let progress = progress.clamp(0.0, 1.0);
        self.core.set_progress(progress);
        self.render(progress)
    }

    /// Handle that resolves when this run completes; starts playback if needed
    pub fn completion(&mut self) -> Completion {
        if self.core.state() != AnimationState::Running {
            self.core.play();
        }
        self.core.completion()
    }

    /// Advance one frame. Returns whether the animation is still running.
    pub fn tick(&mut self) -> bool {
        let Some(sample) = self.core.next_sample() else {
            return self.core.is_active();
        };
        trace!(raw = sample.raw, eased = sample.eased, "animation frame");

        self.core.set_progress(sample.eased);
        if !self.render_or_fail(sample.eased) {
            return false;
        }
        if sample.done {
            self.core.finish();
        }
        self.core.is_active()
    }

    /// Interpolated values at `progress`, without touching the target
    pub fn values_at(&mut self, progress: f64) -> PropertyValues {
        let froms = self.starting_values().to_vec();
        self.properties
            .iter()
            .zip(froms.iter())
            .map(|((name, prop), from)| (name.clone(), prop.value_at(from, progress)))
            .collect()
    }

    /// Explicit `from` values, or the target's values the first time they are needed
    fn starting_values(&mut self) -> &[Value] {
        if self.resolved_from.is_none() {
            let target = &self.target;
            let resolved = self
                .properties
                .iter()
                .map(|(name, prop)| {
                    prop.from.clone().unwrap_or_else(|| {
                        target
                            .current_value(name)
                            .unwrap_or_else(|| target.default_value(name))
                    })
                })
                .collect();
            self.resolved_from = Some(resolved);
        }
        self.resolved_from.as_deref().unwrap_or_default()
    }

    fn render(&mut self, progress: f64) -> anyhow::Result<()> {
        let values = self.values_at(progress);
        self.target.apply_values(&values)
    }

    fn render_or_fail(&mut self, progress: f64) -> bool {
        match self.render(progress) {
            Ok(()) => true,
            Err(e) => {
                self.core.fail(e.to_string());
                false
            }
        }
    }
}

impl Playback for Animation {
    fn tick(&mut self) -> bool {
        Animation::tick(self)
    }

    fn state(&self) -> AnimationState {
        Animation::state(self)
    }

    fn progress(&self) -> f64 {
        Animation::progress(self)
    }

    fn duration(&self) -> f64 {
        Animation::duration(self)
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("properties", &self.properties)
            .field("options", &self.options)
            .field("state", &self.core.state())
            .field("progress", &self.core.progress())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animations::clock::ManualClock;
    use crate::animations::easing::ease_out_back;
    use crate::animations::target::{ObjectTarget, StyleTarget};
    use anyhow::anyhow;

    fn fade(target: &ObjectTarget, clock: &ManualClock, options: AnimationOptions) -> Animation {
        let definition = AnimationDefinition::new(target.clone(), options)
            .property("opacity", PropertyAnimation::range(0.0, 1.0))
            .property("left", PropertyAnimation::range("0px", "100px"));
        Animation::with_clock(definition, clock.shared()).unwrap()
    }

    #[derive(Debug)]
    struct DetachedTarget;

    impl TargetAdapter for DetachedTarget {
        fn current_value(&self, _property: &str) -> Option<Value> {
            None
        }

        fn apply_values(&mut self, _values: &PropertyValues) -> anyhow::Result<()> {
            Err(anyhow!("target detached"))
        }
    }

    #[test]
    fn test_invalid_duration_is_rejected() {
        for duration in [0.0, -10.0, f64::NAN] {
            let definition = AnimationDefinition::new(ObjectTarget::new(), AnimationOptions::new(duration));
            let result = Animation::new(definition);
            assert!(matches!(result, Err(AnimationError::InvalidDuration(_))));
        }

        let definition = AnimationDefinition::new(
            ObjectTarget::new(),
            AnimationOptions::new(100.0).with_delay(-1.0),
        );
        assert!(matches!(
            Animation::new(definition),
            Err(AnimationError::InvalidDelay { field: "delay", .. })
        ));
    }

    #[test]
    fn test_normalize_forms() {
        let range = PropertyAnimation::range(0.0, 1.0).normalize();
        assert_eq!(range.from, Some(Value::Number(0.0)));
        assert!(range.steps.is_empty());

        let to = PropertyAnimation::from("10px").normalize();
        assert_eq!(to.from, None);
        assert_eq!(to.to, Value::from("10px"));

        let steps = PropertyAnimation::steps(0.0, [50.0], 100.0).normalize();
        assert_eq!(steps.steps, vec![Value::Number(50.0)]);

        let timed = PropertyAnimation::timed(PropertyAnimation::to(1.0), Some(200.0), None).normalize();
        assert_eq!(timed.to, Value::Number(1.0));
        assert_eq!(
            timed.timing,
            Some(PropertyTiming {
                duration: Some(200.0),
                delay: None
            })
        );
    }

    #[test]
    fn test_property_animation_from_json() {
        let parsed: BTreeMap<String, PropertyAnimation> = serde_json::from_str(
            r#"{
                "opacity": [0, 1],
                "left": "100px",
                "scale": {"from": 1, "to": 1, "steps": [1.2]},
                "rotate": {"value": "90deg", "duration": 300}
            }"#,
        )
        .unwrap();
        assert_eq!(parsed["opacity"], PropertyAnimation::range(0.0, 1.0));
        assert_eq!(parsed["left"], PropertyAnimation::to("100px"));
        assert_eq!(parsed["scale"], PropertyAnimation::steps(1.0, [1.2], 1.0));
        assert_eq!(
            parsed["rotate"],
            PropertyAnimation::timed(PropertyAnimation::to("90deg"), Some(300.0), None)
        );
    }

    #[test]
    fn test_duration_includes_delays() {
        let clock = ManualClock::new();
        let target = ObjectTarget::new();
        let animation = fade(
            &target,
            &clock,
            AnimationOptions::new(200.0).with_delay(50.0).with_end_delay(25.0),
        );
        assert_eq!(animation.duration(), 275.0);
    }

    #[test]
    fn test_play_runs_to_completion() {
        let clock = ManualClock::new();
        let target = ObjectTarget::new();
        let mut animation = fade(&target, &clock, AnimationOptions::new(100.0));

        assert_eq!(animation.state(), AnimationState::Idle);
        assert!(!animation.tick());

        animation.play();
        assert_eq!(animation.state(), AnimationState::Running);

        assert!(animation.tick());
        assert_eq!(target.get("opacity"), Some(Value::Number(0.0)));

        clock.advance(50.0);
        assert!(animation.tick());
        assert_eq!(target.get("opacity"), Some(Value::Number(0.5)));
        assert_eq!(target.get("left"), Some(Value::from("50px")));

        clock.advance(60.0);
        assert!(!animation.tick());
        assert_eq!(animation.state(), AnimationState::Completed);
        assert_eq!(animation.progress(), 1.0);
        assert_eq!(target.get("opacity"), Some(Value::Number(1.0)));

        // No samples after completion
        clock.advance(10.0);
        target.set("opacity", 0.3);
        assert!(!animation.tick());
        assert_eq!(target.get("opacity"), Some(Value::Number(0.3)));
    }

    #[test]
    fn test_delay_holds_progress_at_zero() {
        let clock = ManualClock::new();
        let target = ObjectTarget::new();
        let mut animation = fade(&target, &clock, AnimationOptions::new(100.0).with_delay(40.0));

        animation.play();
        clock.advance(30.0);
        animation.tick();
        assert_eq!(animation.progress(), 0.0);

        clock.advance(60.0);
        animation.tick();
        assert_eq!(animation.progress(), 0.5);
    }

    #[test]
    fn test_pause_and_resume_preserve_elapsed_time() {
        let clock = ManualClock::new();
        let target = ObjectTarget::new();
        let mut animation = fade(&target, &clock, AnimationOptions::new(100.0));

        animation.play();
        clock.advance(30.0);
        animation.tick();
        animation.pause();
        assert_eq!(animation.state(), AnimationState::Paused);

        // Time spent paused does not count
        clock.advance(500.0);
        assert!(!animation.tick());
        assert_eq!(animation.progress(), 0.3);

        animation.play();
        clock.advance(20.0);
        animation.tick();
        assert_eq!(animation.state(), AnimationState::Running);
        assert_eq!(animation.progress(), 0.5);
    }

    #[test]
    fn test_play_while_running_is_a_no_op() {
        let clock = ManualClock::new();
        let target = ObjectTarget::new();
        let mut animation = fade(&target, &clock, AnimationOptions::new(100.0));

        animation.play();
        clock.advance(40.0);
        animation.play();
        animation.tick();
        assert_eq!(animation.progress(), 0.4);
    }

    #[test]
    fn test_stop_resets_from_any_state() {
        let clock = ManualClock::new();
        let target = ObjectTarget::new();
        let mut animation = fade(&target, &clock, AnimationOptions::new(100.0));

        animation.play();
        clock.advance(70.0);
        animation.tick();
        animation.stop();
        assert_eq!(animation.state(), AnimationState::Idle);
        assert_eq!(animation.progress(), 0.0);
        assert_eq!(target.get("opacity"), Some(Value::Number(0.0)));
        assert_eq!(target.get("left"), Some(Value::from("0px")));

        animation.play();
        clock.advance(200.0);
        animation.tick();
        assert_eq!(animation.state(), AnimationState::Completed);
        animation.stop();
        assert_eq!(animation.state(), AnimationState::Idle);

        animation.pause();
        assert_eq!(animation.state(), AnimationState::Idle);
    }

    #[test]
    fn test_replay_after_completion_restarts() {
        let clock = ManualClock::new();
        let target = ObjectTarget::new();
        let mut animation = fade(&target, &clock, AnimationOptions::new(100.0));

        animation.play();
        clock.advance(150.0);
        animation.tick();
        assert_eq!(animation.state(), AnimationState::Completed);

        animation.play();
        animation.tick();
        assert_eq!(animation.state(), AnimationState::Running);
        assert_eq!(animation.progress(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_run_completion_survives_replay() {
        let clock = ManualClock::new();
        let target = ObjectTarget::new();
        let mut animation = fade(&target, &clock, AnimationOptions::new(100.0));

        let first_run = animation.completion();
        clock.advance(100.0);
        animation.tick();
        assert_eq!(animation.state(), AnimationState::Completed);

        animation.play();
        let second_run = animation.completion();
        assert_eq!(first_run.try_result(), Some(Ok(())));
        assert!(second_run.try_result().is_none());

        let settled = tokio::time::timeout(std::time::Duration::from_millis(200), first_run.wait()).await;
        assert_eq!(settled, Ok(Ok(())));
    }

    #[test]
    fn test_timed_property_follows_animation_progress() {
        let clock = ManualClock::new();
        let target = ObjectTarget::new();
        let definition = AnimationDefinition::new(target.clone(), AnimationOptions::new(100.0))
            .property(
                "opacity",
                PropertyAnimation::timed(PropertyAnimation::range(0.0, 1.0), Some(400.0), Some(50.0)),
            );
        let mut animation = Animation::with_clock(definition, clock.shared()).unwrap();

        animation.play();
        clock.advance(25.0);
        animation.tick();
        assert_eq!(target.get("opacity"), Some(Value::Number(0.25)));

        clock.advance(75.0);
        animation.tick();
        assert_eq!(target.get("opacity"), Some(Value::Number(1.0)));
        assert_eq!(animation.state(), AnimationState::Completed);
    }

    #[test]
    fn test_seek_is_deterministic_and_clamped() {
        let clock = ManualClock::new();
        let target = ObjectTarget::new();
        let mut animation = fade(&target, &clock, AnimationOptions::new(100.0));

        animation.seek(0.5);
        let first = target.snapshot();
        animation.seek(0.5);
        assert_eq!(target.snapshot(), first);
        assert_eq!(animation.state(), AnimationState::Idle);

        animation.seek(3.0);
        assert_eq!(animation.progress(), 1.0);
        assert_eq!(target.get("left"), Some(Value::from("100px")));
        animation.seek(-1.0);
        assert_eq!(animation.progress(), 0.0);
    }

    #[test]
    fn test_implicit_from_reads_target_once() {
        let clock = ManualClock::new();
        let target = ObjectTarget::new().with("width", "20px");
        let definition = AnimationDefinition::new(target.clone(), AnimationOptions::new(100.0))
            .property("width", "120px")
            .property("opacity", PropertyAnimation::to(0.0))
            .property("rotate", "90deg");
        let mut animation = Animation::with_clock(definition, clock.shared()).unwrap();

        animation.seek(0.5);
        assert_eq!(target.get("width"), Some(Value::from("70px")));
        // opacity defaults to 1, rotate to 0deg
        assert_eq!(target.get("opacity"), Some(Value::Number(0.5)));
        assert_eq!(target.get("rotate"), Some(Value::from("45deg")));

        // The starting point does not drift with the written values
        animation.seek(0.5);
        assert_eq!(target.get("width"), Some(Value::from("70px")));
    }

    #[test]
    fn test_multi_step_property() {
        let clock = ManualClock::new();
        let target = ObjectTarget::new();
        let definition = AnimationDefinition::new(target.clone(), AnimationOptions::new(100.0))
            .property("x", PropertyAnimation::steps(0.0, [100.0], 0.0));
        let mut animation = Animation::with_clock(definition, clock.shared()).unwrap();

        let expected = [(0.0, 0.0), (0.25, 50.0), (0.5, 100.0), (0.75, 50.0), (1.0, 0.0)];
        for (progress, value) in expected {
            animation.seek(progress);
            assert_eq!(target.get("x"), Some(Value::Number(value)), "at {}", progress);
        }
    }

    #[test]
    fn test_overshoot_easing_reaches_target() {
        let clock = ManualClock::new();
        let target = ObjectTarget::new();
        let options = AnimationOptions::new(100.0).with_easing(Easing::new(ease_out_back));
        let mut animation = fade(&target, &clock, options);

        animation.play();
        clock.advance(80.0);
        animation.tick();
        assert!(animation.progress() > 1.0);

        clock.advance(20.0);
        animation.tick();
        assert_eq!(animation.progress(), 1.0);
        assert_eq!(animation.state(), AnimationState::Completed);
    }

    #[test]
    fn test_autoplay_starts_on_first_tick() {
        let clock = ManualClock::new();
        let target = ObjectTarget::new();
        let mut animation = fade(&target, &clock, AnimationOptions::new(100.0).with_autoplay(true));

        assert_eq!(animation.state(), AnimationState::Idle);
        assert!(animation.tick());
        assert_eq!(animation.state(), AnimationState::Running);
    }

    #[test]
    fn test_style_target_animation() {
        let clock = ManualClock::new();
        let target = StyleTarget::new();
        let definition = AnimationDefinition::new(target.clone(), AnimationOptions::new(100.0))
            .property("x", PropertyAnimation::range(0.0, 40.0))
            .property("color", PropertyAnimation::range("#000", "#fff"));
        let mut animation = Animation::with_clock(definition, clock.shared()).unwrap();

        animation.seek(0.5);
        assert_eq!(target.style("transform").as_deref(), Some("translateX(20px)"));
        assert_eq!(target.style("color").as_deref(), Some("rgba(128, 128, 128, 1)"));
    }

    #[test]
    fn test_target_error_forces_idle() {
        let clock = ManualClock::new();
        let definition = AnimationDefinition::new(DetachedTarget, AnimationOptions::new(100.0))
            .property("opacity", PropertyAnimation::range(0.0, 1.0));
        let mut animation = Animation::with_clock(definition, clock.shared()).unwrap();

        let completion = animation.completion();
        assert_eq!(animation.state(), AnimationState::Running);
        assert!(!animation.tick());
        assert_eq!(animation.state(), AnimationState::Idle);
        assert_eq!(
            completion.try_result(),
            Some(Err(AnimationError::Runtime("target detached".to_string())))
        );
    }

    #[test]
    fn test_state_stream_follows_transitions() {
        let clock = ManualClock::new();
        let target = ObjectTarget::new();
        let mut animation = fade(&target, &clock, AnimationOptions::new(100.0));
        let states = animation.watch_state();
        let progress = animation.watch_progress();

        animation.play();
        assert_eq!(*states.borrow(), AnimationState::Running);
        clock.advance(25.0);
        animation.tick();
        assert_eq!(*progress.borrow(), 0.25);
        animation.pause();
        assert_eq!(*states.borrow(), AnimationState::Paused);
    }

    #[tokio::test]
    async fn test_completion_resolves_when_driven() {
        let clock = ManualClock::new();
        let target = ObjectTarget::new();
        let mut animation = fade(&target, &clock, AnimationOptions::new(100.0));

        let completion = animation.completion();
        assert_eq!(animation.state(), AnimationState::Running);

        let driver_clock = clock.clone();
        let handle = tokio::spawn(async move {
            while animation.tick() {
                driver_clock.advance(16.0);
                tokio::task::yield_now().await;
            }
            animation
        });

        assert_eq!(completion.await, Ok(()));
        let animation = handle.await.unwrap();
        assert_eq!(animation.state(), AnimationState::Completed);
    }
}

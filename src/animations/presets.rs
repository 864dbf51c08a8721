//! Ready-made animations.
//!
//! Presets are plain property/option bundles fed into [`Animation`]; they add
//! no engine behavior of their own. [`animate_all`] lays one preset out over
//! a group of targets using a stagger function for the start offsets.

use tracing::debug;

use super::animation::{Animation, AnimationDefinition, AnimationOptions, PropertyAnimation};
use super::clock::SharedClock;
use super::easing::Easing;
use super::errors::{AnimationError, AnimationResult};
use super::interpolation::Value;
use super::target::TargetAdapter;
use super::timeline::{Offset, Timeline, TimelineOptions};

/// Every preset name, entrances and exits first
pub const PRESET_NAMES: &[&str] = &[
    "fadeIn",
    "fadeOut",
    "slideInLeft",
    "slideInRight",
    "slideInUp",
    "slideInDown",
    "zoomIn",
    "zoomOut",
    "pulse",
    "shake",
    "bounce",
    "flash",
    "heartBeat",
    "rubberBand",
    "swing",
    "tada",
    "wobble",
    "jello",
    "headShake",
];

/// Caller-supplied replacements for a preset's own timing
#[derive(Debug, Clone, Default)]
pub struct PresetOverrides {
    pub duration: Option<f64>,
    pub delay: Option<f64>,
    pub easing: Option<Easing>,
}

impl PresetOverrides {
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }
}

struct PresetSpec {
    duration: f64,
    easing: &'static str,
    properties: Vec<(&'static str, PropertyAnimation)>,
}

impl PresetSpec {
    fn new(duration: f64, easing: &'static str) -> Self {
        Self {
            duration,
            easing,
            properties: Vec::new(),
        }
    }

    fn range(mut self, property: &'static str, from: impl Into<Value>, to: impl Into<Value>) -> Self {
        self.properties.push((property, PropertyAnimation::range(from, to)));
        self
    }

    /// Keyframes that start and end at `rest`
    fn keyframes<V: Into<Value> + Copy>(mut self, property: &'static str, rest: V, frames: &[V]) -> Self {
        self.properties.push((
            property,
            PropertyAnimation::steps(rest, frames.iter().copied(), rest),
        ));
        self
    }
}

fn preset_spec(name: &str) -> Option<PresetSpec> {
    let spec = match name {
        "fadeIn" => PresetSpec::new(500.0, "easeOutQuad").range("opacity", 0.0, 1.0),
        "fadeOut" => PresetSpec::new(500.0, "easeInQuad").range("opacity", 1.0, 0.0),
        "slideInLeft" => PresetSpec::new(600.0, "easeOutCubic")
            .range("translateX", "-100%", "0%")
            .range("opacity", 0.0, 1.0),
        "slideInRight" => PresetSpec::new(600.0, "easeOutCubic")
            .range("translateX", "100%", "0%")
            .range("opacity", 0.0, 1.0),
        "slideInUp" => PresetSpec::new(600.0, "easeOutCubic")
            .range("translateY", "100%", "0%")
            .range("opacity", 0.0, 1.0),
        "slideInDown" => PresetSpec::new(600.0, "easeOutCubic")
            .range("translateY", "-100%", "0%")
            .range("opacity", 0.0, 1.0),
        "zoomIn" => PresetSpec::new(500.0, "easeOutBack")
            .range("scale", 0.3, 1.0)
            .range("opacity", 0.0, 1.0),
        "zoomOut" => PresetSpec::new(500.0, "easeInQuad")
            .range("scale", 1.0, 0.3)
            .range("opacity", 1.0, 0.0),
        "pulse" => PresetSpec::new(1000.0, "easeInOutSine").keyframes("scale", 1.0, &[1.05]),
        "shake" => PresetSpec::new(1000.0, "linear").keyframes(
            "translateX",
            "0px",
            &["-10px", "10px", "-10px", "10px", "-10px", "10px", "-10px", "10px", "-10px"],
        ),
        "bounce" => PresetSpec::new(1000.0, "easeOutQuad").keyframes(
            "translateY",
            "0px",
            &["-30px", "0px", "-15px", "0px", "-4px"],
        ),
        "flash" => PresetSpec::new(1000.0, "linear").keyframes("opacity", 1.0, &[0.0, 1.0, 0.0]),
        "heartBeat" => {
            PresetSpec::new(1300.0, "easeInOutQuad").keyframes("scale", 1.0, &[1.3, 1.0, 1.3])
        }
        "rubberBand" => PresetSpec::new(1000.0, "linear").keyframes(
            "scale",
            1.0,
            &[1.25, 0.75, 1.15, 0.95, 1.05],
        ),
        "swing" => PresetSpec::new(1000.0, "easeInOutSine").keyframes(
            "rotate",
            "0deg",
            &["15deg", "-10deg", "5deg", "-5deg"],
        ),
        "tada" => PresetSpec::new(1000.0, "linear")
            .keyframes("scale", 1.0, &[0.9, 1.1, 1.1, 1.1, 1.1])
            .keyframes("rotate", "0deg", &["-3deg", "3deg", "-3deg", "3deg", "-3deg"]),
        "wobble" => PresetSpec::new(1000.0, "linear")
            .keyframes("translateX", "0%", &["-25%", "20%", "-15%", "10%", "-5%"])
            .keyframes("rotate", "0deg", &["-5deg", "3deg", "-3deg", "2deg", "-1deg"]),
        "jello" => PresetSpec::new(1000.0, "linear").keyframes(
            "rotate",
            "0deg",
            &["-12.5deg", "6.25deg", "-3.125deg", "1.5625deg", "-0.78125deg"],
        ),
        "headShake" => PresetSpec::new(1000.0, "easeInOutSine")
            .keyframes("translateX", "0px", &["-6px", "5px", "-3px", "2px"])
            .keyframes("rotate", "0deg", &["-9deg", "7deg", "-5deg", "3deg"]),
        _ => return None,
    };
    Some(spec)
}

/// Definition for preset `name`, with `overrides` applied
pub fn preset_definition(
    name: &str,
    target: impl TargetAdapter + 'static,
    overrides: &PresetOverrides,
) -> AnimationResult<AnimationDefinition> {
    let spec = preset_spec(name).ok_or_else(|| AnimationError::UnknownPreset(name.to_string()))?;

    let easing = overrides
        .easing
        .clone()
        .or_else(|| Easing::named(spec.easing))
        .unwrap_or_default();
    let options = AnimationOptions::new(overrides.duration.unwrap_or(spec.duration))
        .with_delay(overrides.delay.unwrap_or(0.0))
        .with_easing(easing);

    debug!(target: "motionline", preset = name, duration = options.duration, "preset resolved");
    Ok(spec
        .properties
        .into_iter()
        .fold(AnimationDefinition::new(target, options), |definition, (property, animation)| {
            definition.property(property, animation)
        }))
}

/// Build preset `name` on `target`
pub fn preset(
    name: &str,
    target: impl TargetAdapter + 'static,
    overrides: &PresetOverrides,
) -> AnimationResult<Animation> {
    Animation::new(preset_definition(name, target, overrides)?)
}

pub fn preset_with_clock(
    name: &str,
    target: impl TargetAdapter + 'static,
    overrides: &PresetOverrides,
    clock: SharedClock,
) -> AnimationResult<Animation> {
    Animation::with_clock(preset_definition(name, target, overrides)?, clock)
}

/// One preset per target on a shared timeline.
///
/// Target `i` of `n` starts at `stagger(i, n)` milliseconds.
pub fn animate_all<T, I, F>(
    targets: I,
    name: &str,
    overrides: &PresetOverrides,
    stagger: F,
) -> AnimationResult<Timeline>
where
    T: TargetAdapter + 'static,
    I: IntoIterator<Item = T>,
    F: Fn(usize, usize) -> f64,
{
    animate_all_on(
        Timeline::new(TimelineOptions::default()),
        targets,
        name,
        overrides,
        stagger,
    )
}

/// [`animate_all`] onto an existing timeline
pub fn animate_all_on<T, I, F>(
    mut timeline: Timeline,
    targets: I,
    name: &str,
    overrides: &PresetOverrides,
    stagger: F,
) -> AnimationResult<Timeline>
where
    T: TargetAdapter + 'static,
    I: IntoIterator<Item = T>,
    F: Fn(usize, usize) -> f64,
{
    if preset_spec(name).is_none() {
        return Err(AnimationError::UnknownPreset(name.to_string()));
    }

    let targets: Vec<T> = targets.into_iter().collect();
    let total = targets.len();
    for (index, target) in targets.into_iter().enumerate() {
        let definition = preset_definition(name, target, overrides)?;
        timeline.add(definition, Offset::At(stagger(index, total)))?;
    }
    Ok(timeline)
}

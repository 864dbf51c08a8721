use anyhow::{Context, Result};
use clap::Args;
use std::collections::BTreeMap;
use tracing::info;

use super::preview::{named_easing, run_frames};
use crate::animations::{Animation, AnimationDefinition, AnimationOptions, ObjectTarget, PropertyAnimation};
use crate::config::EngineConfig;

/// Animate a custom property set against an in-memory target
#[derive(Args)]
pub struct AnimateCommand {
    /// JSON object of property animations, e.g. '{"opacity": [0, 1], "left": "100px"}'
    pub properties: String,

    /// Duration in milliseconds (defaults to the configured duration)
    #[arg(long = "duration")]
    pub duration: Option<f64>,

    /// Delay in milliseconds before progress starts
    #[arg(long = "delay", default_value_t = 0.0)]
    pub delay: f64,

    /// Easing name (defaults to the configured easing)
    #[arg(long = "easing")]
    pub easing: Option<String>,

    /// Frames per second (defaults to the configured rate)
    #[arg(long = "fps")]
    pub fps: Option<u32>,

    /// Print frames as JSON lines
    #[arg(long = "json")]
    pub json: bool,
}

impl AnimateCommand {
    pub async fn execute(&self, config: &EngineConfig) -> Result<()> {
        let target = ObjectTarget::new();
        let animation = self.build(config, &target)?;

        info!(
            properties = animation.properties().count(),
            duration = animation.options().duration,
            "Starting animation"
        );
        run_frames(animation, &target, self.fps.unwrap_or(config.fps), self.json).await
    }

    fn build(&self, config: &EngineConfig, target: &ObjectTarget) -> Result<Animation> {
        let properties: BTreeMap<String, PropertyAnimation> =
            serde_json::from_str(&self.properties).context("Invalid property JSON")?;

        let easing = match &self.easing {
            Some(name) => named_easing(name)?,
            None => config.easing()?,
        };
        let options = AnimationOptions::new(self.duration.unwrap_or(config.default_duration_ms))
            .with_delay(self.delay)
            .with_easing(easing);

        let definition = AnimationDefinition {
            target: Box::new(target.clone()),
            properties,
            options,
        };
        Ok(Animation::new(definition)?)
    }
}

use anyhow::{anyhow, Result};
use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::animations::{
    preset, Animation, Easing, FrameTicker, ObjectTarget, PresetOverrides, PropertyValues, PRESET_NAMES,
};
use crate::config::EngineConfig;

/// Play a preset against an in-memory target and print each frame
#[derive(Args)]
pub struct PreviewCommand {
    /// Preset name, e.g. fadeIn or shake
    pub preset: String,

    /// Override the preset duration in milliseconds
    #[arg(long = "duration")]
    pub duration: Option<f64>,

    /// Override the preset easing by name
    #[arg(long = "easing")]
    pub easing: Option<String>,

    /// Frames per second (defaults to the configured rate)
    #[arg(long = "fps")]
    pub fps: Option<u32>,

    /// Print frames as JSON lines
    #[arg(long = "json")]
    pub json: bool,
}

impl PreviewCommand {
    pub async fn execute(&self, config: &EngineConfig) -> Result<()> {
        let overrides = PresetOverrides {
            duration: self.duration,
            delay: None,
            easing: self.easing.as_deref().map(named_easing).transpose()?,
        };

        let target = ObjectTarget::new();
        let animation = preset(&self.preset, target.clone(), &overrides).map_err(|e| {
            anyhow!("{} (available: {})", e, PRESET_NAMES.join(", "))
        })?;

        info!(preset = %self.preset, duration = animation.options().duration, "Starting preview");
        run_frames(animation, &target, self.fps.unwrap_or(config.fps), self.json).await
    }
}

pub(super) fn named_easing(name: &str) -> Result<Easing> {
    Easing::named(name).ok_or_else(|| anyhow!("Unknown easing: {}", name))
}

#[derive(Serialize)]
struct FrameRecord<'a> {
    frame: u64,
    progress: f64,
    values: &'a PropertyValues,
}

fn format_frame(frame: u64, progress: f64, values: &PropertyValues, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string(&FrameRecord {
            frame,
            progress,
            values,
        })?);
    }

    let values: Vec<String> = values
        .iter()
        .map(|(property, value)| format!("{}={}", property, value))
        .collect();
    Ok(format!("{:>4}  {:>6.3}  {}", frame, progress, values.join("  ")))
}

/// Play `animation` on the frame ticker, printing `target` after every frame
pub(super) async fn run_frames(
    mut animation: Animation,
    target: &ObjectTarget,
    fps: u32,
    json: bool,
) -> Result<()> {
    let completion = animation.completion();
    let mut ticker = FrameTicker::new(fps);
    let mut frame = 0;

    loop {
        ticker.next_frame().await;
        let running = animation.tick();
        println!(
            "{}",
            format_frame(frame, animation.progress(), &target.snapshot(), json)?
        );
        frame += 1;
        if !running {
            break;
        }
    }

    completion.await?;
    info!(frames = frame, "Preview finished");
    Ok(())
}

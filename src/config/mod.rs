use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::animations::clock::DEFAULT_FPS;
use crate::animations::easing::Easing;

/// Engine configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Frame rate of the frame ticker
    pub fps: u32,

    /// Duration in milliseconds for animations built without one
    pub default_duration_ms: f64,

    /// Named easing for animations built without one
    pub default_easing: String,

    /// Tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            default_duration_ms: 1000.0,
            default_easing: "linear".to_string(),
            log_filter: "motionline=info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Initialize configuration from defaults, the first config file found,
    /// then environment variables
    pub async fn init() -> Result<Self> {
        debug!("Initializing configuration");

        let mut config = match Self::load_from_file().await? {
            Some(file_config) => file_config,
            None => Self::default(),
        };
        config.load_from_env();

        Ok(config)
    }

    /// Config file locations, highest priority first
    pub fn config_paths() -> Vec<PathBuf> {
        let mut config_paths = vec![
            PathBuf::from("./.motionline.json"),
            PathBuf::from("./motionline.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            config_paths.push(config_dir.join("motionline").join("motionline.json"));
        }

        config_paths
    }

    /// Load the first config file that exists, if any
    pub async fn load_from_file() -> Result<Option<Self>> {
        for path in Self::config_paths() {
            if path.exists() {
                return Self::load_from_path(&path).await.map(Some);
            }
        }
        Ok(None)
    }

    pub async fn load_from_path(path: &Path) -> Result<Self> {
        debug!("Loading configuration from: {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Load configuration from environment variables
    pub fn load_from_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    /// Apply `MOTIONLINE_*` overrides read through `lookup`; unparsable numbers are ignored
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(fps) = lookup("MOTIONLINE_FPS").and_then(|v| v.trim().parse().ok()) {
            self.fps = fps;
        }

        if let Some(duration) = lookup("MOTIONLINE_DEFAULT_DURATION").and_then(|v| v.trim().parse().ok()) {
            self.default_duration_ms = duration;
        }

        if let Some(easing) = lookup("MOTIONLINE_DEFAULT_EASING") {
            self.default_easing = easing;
        }

        if let Some(filter) = lookup("MOTIONLINE_LOG") {
            self.log_filter = filter;
        }
    }

    /// The configured default easing curve
    pub fn easing(&self) -> Result<Easing> {
        Easing::named(&self.default_easing)
            .ok_or_else(|| anyhow!("Unknown easing: {}", self.default_easing))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(anyhow!("fps must be greater than 0"));
        }

        if !(self.default_duration_ms > 0.0) {
            return Err(anyhow!("default_duration_ms must be greater than 0"));
        }

        self.easing()?;

        Ok(())
    }
}

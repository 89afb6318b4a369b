use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::segmenter::SegmentationOptions;
use crate::text_format::TextFormatOptions;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Cue segmentation limits
    #[serde(default)]
    pub segmentation: SegmentationOptions,

    /// Text post-processing policy
    #[serde(default)]
    pub formatting: TextFormatOptions,

    /// Timeline placement settings
    #[serde(default)]
    pub timeline: TimelineConfig,

    /// Ask the transcription engine to refine word boundaries (slower)
    #[serde(default = "default_true")]
    pub refine_timestamps: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for placing cues on the editing timeline
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimelineConfig {
    /// Video track that receives the timed text objects
    #[serde(default = "default_video_track")]
    pub video_track: usize,

    /// Timeline frame rate used when the host does not report one
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            video_track: default_video_track(),
            frame_rate: default_frame_rate(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_true() -> bool {
    true
}

fn default_video_track() -> usize {
    2
}

fn default_frame_rate() -> f64 {
    24.0
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            segmentation: Default::default(),
            formatting: Default::default(),
            timeline: Default::default(),
            refine_timestamps: default_true(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.segmentation
            .validate()
            .map_err(|e| anyhow!(e.to_string()))?;

        if self.timeline.video_track < 1 {
            return Err(anyhow!("Video track numbers start at 1"));
        }
        if !(self.timeline.frame_rate > 0.0) {
            return Err(anyhow!(
                "Frame rate must be positive, got {}",
                self.timeline.frame_rate
            ));
        }

        Ok(())
    }
}

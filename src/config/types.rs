use bitrate_core::Timescale;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub segment: SegmentConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InputConfig {
    /// Ticks per second of `best_effort_timestamp` and `pkt_duration`
    /// (the stream time base denominator, e.g. 1000 for Matroska, 90000 for MPEG-TS)
    #[serde(default = "default_timescale")]
    pub timescale: u32,

    /// Drop frames whose `media_type` is not "video"
    #[serde(default = "default_skip_non_video")]
    pub skip_non_video: bool,

    /// Log and skip frames that fail to decode instead of aborting
    #[serde(default)]
    pub skip_invalid: bool,
}

fn default_timescale() -> u32 {
    1000
}

fn default_skip_non_video() -> bool {
    true
}

impl InputConfig {
    /// `None` when the configured timescale is zero.
    pub fn timescale(&self) -> Option<Timescale> {
        Timescale::new(self.timescale)
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            timescale: default_timescale(),
            skip_non_video: default_skip_non_video(),
            skip_invalid: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SegmentConfig {
    #[serde(default)]
    pub policy: Policy,

    /// Window length for the duration policy, in milliseconds
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
}

fn default_window_ms() -> u64 {
    1000
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            window_ms: default_window_ms(),
        }
    }
}

/// How frames are grouped into segments.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Fixed wall-clock windows
    #[default]
    Duration,
    /// One segment per GOP, split at I frames
    Keyframe,
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duration => write!(f, "duration"),
            Self::Keyframe => write!(f, "keyframe"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Number of heaviest frames to report
    #[serde(default = "default_top")]
    pub top: usize,
}

fn default_top() -> usize {
    10
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            top: default_top(),
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Csv,
    #[default]
    Table,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Table => write!(f, "table"),
        }
    }
}

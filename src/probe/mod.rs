//! Reading ffprobe frame dumps.
//!
//! Input is the JSON printed by
//! `ffprobe -select_streams v:0 -show_frames -print_format json <file>`,
//! either as the full `{"frames": [...]}` document or as a bare array of frame
//! objects. Each frame goes through [`FrameRecord::decode`].

use anyhow::{Context, Result};
use bitrate_core::{DecodeError, FrameRecord, Sample};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FfprobeFrames {
    Document {
        #[serde(default)]
        frames: Vec<FrameRecord>,
    },
    Bare(Vec<FrameRecord>),
}

impl FfprobeFrames {
    fn into_frames(self) -> Vec<FrameRecord> {
        match self {
            Self::Document { frames } | Self::Bare(frames) => frames,
        }
    }
}

/// A frame that failed to decode, with its position in the dump.
#[derive(Debug, thiserror::Error)]
#[error("frame {index}: {source}")]
pub struct FrameError {
    pub index: usize,
    pub source: DecodeError,
}

/// How to treat frames that are not usable as video samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOptions {
    pub skip_non_video: bool,
    pub skip_invalid: bool,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            skip_non_video: true,
            skip_invalid: false,
        }
    }
}

impl From<&crate::config::InputConfig> for ProbeOptions {
    fn from(input: &crate::config::InputConfig) -> Self {
        Self {
            skip_non_video: input.skip_non_video,
            skip_invalid: input.skip_invalid,
        }
    }
}

/// Samples decoded from a frame dump, in decode order.
#[derive(Debug, Default)]
pub struct DecodedFrames {
    pub samples: Vec<Sample>,
    /// Frames dropped because their `media_type` was not video.
    pub skipped_non_video: usize,
    /// Frames that failed to decode (only populated with `skip_invalid`).
    pub invalid: Vec<FrameError>,
}

/// Decode a frame dump held in memory.
pub fn parse_frames(json: &str, options: ProbeOptions) -> Result<DecodedFrames> {
    let document: FfprobeFrames =
        serde_json::from_str(json).context("Failed to parse ffprobe frame JSON")?;

    decode_frames(document.into_frames(), options)
}

/// Decode already-deserialized frame records.
pub fn decode_frames(records: Vec<FrameRecord>, options: ProbeOptions) -> Result<DecodedFrames> {
    let mut decoded = DecodedFrames {
        samples: Vec::with_capacity(records.len()),
        ..Default::default()
    };

    for (index, record) in records.iter().enumerate() {
        if options.skip_non_video && !record.is_video() {
            decoded.skipped_non_video += 1;
            continue;
        }

        match record.decode() {
            Ok(sample) => decoded.samples.push(sample),
            Err(source) => {
                let err = FrameError { index, source };
                if !options.skip_invalid {
                    return Err(err.into());
                }
                tracing::warn!("Skipping {}", err);
                decoded.invalid.push(err);
            }
        }
    }

    tracing::debug!(
        frames = records.len(),
        samples = decoded.samples.len(),
        skipped_non_video = decoded.skipped_non_video,
        invalid = decoded.invalid.len(),
        "decoded frame dump"
    );

    Ok(decoded)
}

/// Read a frame dump from `path`, or from stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read frame dump from stdin")?;
        return Ok(buf);
    }

    if !path.exists() {
        anyhow::bail!("Input file does not exist: {:?}", path);
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read frame dump: {:?}", path))
}

/// Read and decode a frame dump.
pub fn load_frames(path: &Path, options: ProbeOptions) -> Result<DecodedFrames> {
    let json = read_input(path)?;
    parse_frames(&json, options).with_context(|| format!("Invalid frame dump: {:?}", path))
}

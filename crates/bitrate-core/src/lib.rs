//! bitrate-core: per-frame sample model and bitrate segmentation.
//!
//! This crate turns the per-frame records emitted by `ffprobe -show_frames`
//! into [`Sample`] values and groups them into contiguous segments whose
//! aggregates drive a bitrate-over-time curve.
//!
//! # Modules
//!
//! - [`time`] - Exact integer tick arithmetic ([`TimeValue`], [`Timescale`])
//! - [`picture`] - Frame picture types ([`PictureType`])
//! - [`sample`] - The [`Sample`] value, its merge operator and size ordering
//! - [`decode`] - Mapping external frame records into validated samples
//! - [`segment`] - Duration-threshold and keyframe-aligned slicing
//!
//! # Example
//!
//! ```
//! use bitrate_core::{slice_by_duration, PictureType, Sample, TimeValue};
//!
//! let samples: Vec<Sample> = (0..5)
//!     .map(|i| Sample::new(TimeValue::new(i * 10), TimeValue::new(10), 100, PictureType::P))
//!     .collect::<Result<_, _>>()?;
//!
//! let groups = slice_by_duration(&samples, TimeValue::new(25), Sample::aggregate);
//! assert_eq!(groups.len(), 2);
//! # Ok::<(), bitrate_core::DecodeError>(())
//! ```

pub mod decode;
pub mod error;
pub mod picture;
pub mod sample;
pub mod segment;
pub mod time;

pub use decode::FrameRecord;
pub use error::{DecodeError, Result};
pub use picture::PictureType;
pub use sample::{sort_by_size, Sample};
pub use segment::{
    segment_ranges, slice_by_duration, slice_by_keyframe, slice_with, DurationThreshold,
    HasDuration, HasPictureType, Keyframe, SlicePolicy,
};
pub use time::{TimeValue, Timescale};

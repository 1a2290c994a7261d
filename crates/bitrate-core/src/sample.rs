//! The per-frame sample value and its merge operator.
//!
//! A [`Sample`] is either one decoded frame or an aggregate folded from a
//! contiguous run of frames. Aggregates always carry [`PictureType::None`].
//!
//! Equality is structural over all four fields. Ranking by encoded weight is a
//! separate, size-only order exposed through [`Sample::cmp_by_size`] and
//! [`sort_by_size`]. There is no `PartialOrd`: a size-only order would
//! disagree with `==`.

use serde::Serialize;
use std::cmp::Ordering;
use std::ops::Add;

use crate::error::{DecodeError, Result};
use crate::picture::PictureType;
use crate::time::TimeValue;

/// One frame record, or the aggregate of several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Sample {
    time_stamp: TimeValue,
    duration: TimeValue,
    size: u64,
    #[serde(rename = "type")]
    picture_type: PictureType,
}

impl Sample {
    /// Build a sample, rejecting a negative `duration`.
    pub fn new(
        time_stamp: TimeValue,
        duration: TimeValue,
        size: u64,
        picture_type: PictureType,
    ) -> Result<Self> {
        if duration.is_negative() {
            return Err(DecodeError::NegativeDuration {
                value: duration.ticks(),
            });
        }
        Ok(Self {
            time_stamp,
            duration,
            size,
            picture_type,
        })
    }

    /// Presentation timestamp, or the earliest constituent timestamp for an aggregate.
    pub fn time_stamp(&self) -> TimeValue {
        self.time_stamp
    }

    /// Frame duration, or the summed duration for an aggregate.
    pub fn duration(&self) -> TimeValue {
        self.duration
    }

    /// Encoded size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn picture_type(&self) -> PictureType {
        self.picture_type
    }

    pub fn is_aggregate(&self) -> bool {
        self.picture_type == PictureType::None
    }

    /// `time_stamp + duration`.
    pub fn end(&self) -> TimeValue {
        self.time_stamp + self.duration
    }

    /// Merge two samples into an aggregate.
    ///
    /// Durations and sizes add, the timestamp is the earlier of the two and the
    /// picture type resets to [`PictureType::None`].
    ///
    /// Both sums saturate: duration at [`TimeValue::MAX`], size at `u64::MAX`.
    /// Below those bounds the result is exact.
    pub fn merge(&self, other: &Sample) -> Sample {
        Sample {
            time_stamp: self.time_stamp.min(other.time_stamp),
            duration: self.duration + other.duration,
            size: self.size.saturating_add(other.size),
            picture_type: PictureType::None,
        }
    }

    /// Left fold of [`Sample::merge`] over `samples`, starting from the first element.
    ///
    /// A singleton still yields an aggregate (`PictureType::None`), so every
    /// emitted group describes a span rather than an original frame. Returns
    /// `None` for an empty slice.
    pub fn aggregate(samples: &[Sample]) -> Option<Sample> {
        let (first, rest) = samples.split_first()?;
        let seed = Sample {
            picture_type: PictureType::None,
            ..*first
        };
        Some(rest.iter().fold(seed, |acc, sample| acc.merge(sample)))
    }

    /// Order by encoded size only.
    pub fn cmp_by_size(&self, other: &Sample) -> Ordering {
        self.size.cmp(&other.size)
    }
}

impl Add for Sample {
    type Output = Sample;

    fn add(self, rhs: Sample) -> Sample {
        self.merge(&rhs)
    }
}

/// Stable sort by size, ascending. Timestamp, duration and type are ignored, so
/// equally sized samples keep their input order.
pub fn sort_by_size(samples: &mut [Sample]) {
    samples.sort_by_key(Sample::size);
}

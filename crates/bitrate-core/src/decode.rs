//! Mapping external frame records into validated samples.
//!
//! [`FrameRecord`] mirrors one entry of the `frames` array printed by
//! `ffprobe -show_frames -print_format json`. Field names follow ffprobe;
//! everything is optional at the serde level so that absent fields surface as
//! [`DecodeError::MissingField`] instead of an opaque JSON error.

use serde::Deserialize;

use crate::error::{DecodeError, Result};
use crate::picture::PictureType;
use crate::sample::Sample;
use crate::time::TimeValue;

/// One raw frame record as emitted by ffprobe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FrameRecord {
    /// `"video"`, `"audio"`, ... Absent when the producer already filtered streams.
    #[serde(default)]
    pub media_type: Option<String>,

    #[serde(rename = "best_effort_timestamp", default)]
    pub timestamp: Option<i64>,

    #[serde(rename = "pkt_duration", default)]
    pub duration: Option<i64>,

    /// Newer ffprobe releases print `duration` in place of `pkt_duration`.
    #[serde(rename = "duration", default)]
    pub frame_duration: Option<i64>,

    /// Byte size; ffprobe prints it as a decimal string.
    #[serde(rename = "pkt_size", default)]
    pub size: Option<String>,

    #[serde(rename = "pict_type", default)]
    pub picture_type: Option<String>,
}

impl FrameRecord {
    /// Whether this record describes a video frame. Records without a
    /// `media_type` are assumed to be video.
    pub fn is_video(&self) -> bool {
        self.media_type.as_deref().map_or(true, |t| t == "video")
    }

    /// Validate this record and build a [`Sample`] from it.
    pub fn decode(&self) -> Result<Sample> {
        let time_stamp = self
            .timestamp
            .ok_or(DecodeError::missing_field("best_effort_timestamp"))?;

        let duration = self
            .duration
            .or(self.frame_duration)
            .ok_or(DecodeError::missing_field("pkt_duration"))?;

        let size = self
            .size
            .as_deref()
            .ok_or(DecodeError::missing_field("pkt_size"))
            .and_then(parse_size)?;

        let token = self
            .picture_type
            .as_deref()
            .ok_or(DecodeError::missing_field("pict_type"))?;
        let picture_type = match token.parse::<PictureType>() {
            Ok(ty) if ty.is_frame_type() => ty,
            _ => return Err(DecodeError::unknown_type(token)),
        };

        let sample = Sample::new(
            TimeValue::new(time_stamp),
            TimeValue::new(duration),
            size,
            picture_type,
        )?;

        tracing::trace!(
            time_stamp,
            duration,
            size,
            picture_type = %picture_type,
            "decoded frame record"
        );

        Ok(sample)
    }
}

impl TryFrom<&FrameRecord> for Sample {
    type Error = DecodeError;

    fn try_from(record: &FrameRecord) -> Result<Self> {
        record.decode()
    }
}

impl TryFrom<FrameRecord> for Sample {
    type Error = DecodeError;

    fn try_from(record: FrameRecord) -> Result<Self> {
        record.decode()
    }
}

fn parse_size(value: &str) -> Result<u64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::malformed_size(value));
    }
    value
        .parse::<u64>()
        .map_err(|_| DecodeError::malformed_size(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> FrameRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_decode_ffprobe_frame() {
        let rec = record(
            r#"{
                "media_type": "video",
                "stream_index": 0,
                "key_frame": 1,
                "best_effort_timestamp": 3003,
                "best_effort_timestamp_time": "0.033367",
                "pkt_duration": 1001,
                "pkt_size": "48213",
                "width": 1920,
                "height": 1080,
                "pict_type": "I"
            }"#,
        );
        assert!(rec.is_video());

        let sample = rec.decode().unwrap();
        assert_eq!(sample.time_stamp(), TimeValue::new(3003));
        assert_eq!(sample.duration(), TimeValue::new(1001));
        assert_eq!(sample.size(), 48213);
        assert_eq!(sample.picture_type(), PictureType::I);
    }

    #[test]
    fn test_decode_falls_back_to_duration() {
        let rec = record(
            r#"{"best_effort_timestamp": 0, "duration": 40, "pkt_size": "10", "pict_type": "P"}"#,
        );
        assert_eq!(rec.decode().unwrap().duration(), TimeValue::new(40));

        let both = record(
            r#"{"best_effort_timestamp": 0, "pkt_duration": 33, "duration": 40, "pkt_size": "10", "pict_type": "P"}"#,
        );
        assert_eq!(both.decode().unwrap().duration(), TimeValue::new(33));
    }

    #[test]
    fn test_malformed_size() {
        for bad in ["abc", "", "-5", "12.5", " 12", "0x10", "99999999999999999999999"] {
            let rec = FrameRecord {
                timestamp: Some(0),
                duration: Some(1),
                size: Some(bad.to_string()),
                picture_type: Some("P".into()),
                ..Default::default()
            };
            assert_eq!(
                rec.decode(),
                Err(DecodeError::malformed_size(bad)),
                "size {bad:?}"
            );
        }
    }

    #[test]
    fn test_missing_fields() {
        let full = FrameRecord {
            timestamp: Some(0),
            duration: Some(1),
            size: Some("1".into()),
            picture_type: Some("B".into()),
            ..Default::default()
        };
        assert!(full.decode().is_ok());

        let cases = [
            (
                FrameRecord {
                    timestamp: None,
                    ..full.clone()
                },
                "best_effort_timestamp",
            ),
            (
                FrameRecord {
                    duration: None,
                    ..full.clone()
                },
                "pkt_duration",
            ),
            (
                FrameRecord {
                    size: None,
                    ..full.clone()
                },
                "pkt_size",
            ),
            (
                FrameRecord {
                    picture_type: None,
                    ..full.clone()
                },
                "pict_type",
            ),
        ];
        for (rec, field) in cases {
            assert_eq!(rec.decode(), Err(DecodeError::missing_field(field)));
        }
    }

    #[test]
    fn test_unknown_type() {
        for token in ["?", "None", "S", "i", ""] {
            let rec = FrameRecord {
                timestamp: Some(0),
                duration: Some(1),
                size: Some("1".into()),
                picture_type: Some(token.to_string()),
                ..Default::default()
            };
            assert_eq!(rec.decode(), Err(DecodeError::unknown_type(token)));
        }
    }

    #[test]
    fn test_negative_duration() {
        let rec = FrameRecord {
            timestamp: Some(0),
            duration: Some(-1),
            size: Some("1".into()),
            picture_type: Some("P".into()),
            ..Default::default()
        };
        assert_eq!(
            rec.decode(),
            Err(DecodeError::NegativeDuration { value: -1 })
        );
    }

    #[test]
    fn test_negative_timestamp_is_accepted() {
        let rec = record(
            r#"{"best_effort_timestamp": -2002, "pkt_duration": 1001, "pkt_size": "7", "pict_type": "B"}"#,
        );
        let sample = Sample::try_from(&rec).unwrap();
        assert_eq!(sample.time_stamp(), TimeValue::new(-2002));
    }

    #[test]
    fn test_is_video() {
        assert!(record(r#"{"media_type": "video"}"#).is_video());
        assert!(record("{}").is_video());
        assert!(!record(r#"{"media_type": "audio"}"#).is_video());
    }
}

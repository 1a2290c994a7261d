//! Bitrate-over-time reports built from segment aggregates.

use bitrate_core::{
    slice_by_duration, slice_by_keyframe, PictureType, Sample, TimeValue, Timescale,
};
use serde::Serialize;

use crate::config::Policy;

/// Parameters for [`build_report`].
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub policy: Policy,
    /// Window length for [`Policy::Duration`], in ticks.
    pub window: TimeValue,
    pub timescale: Timescale,
    /// Number of heaviest frames to include.
    pub top: usize,
}

/// One point of the bitrate curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BitratePoint {
    pub index: usize,
    pub start_secs: f64,
    pub duration_secs: f64,
    pub size_bytes: u64,
    pub bitrate_bps: f64,
}

impl BitratePoint {
    pub fn from_aggregate(index: usize, aggregate: &Sample, timescale: Timescale) -> Self {
        Self {
            index,
            start_secs: aggregate.time_stamp().as_secs_f64(timescale),
            duration_secs: aggregate.duration().as_secs_f64(timescale),
            size_bytes: aggregate.size(),
            bitrate_bps: bitrate_bps(aggregate.size(), aggregate.duration(), timescale),
        }
    }
}

/// A single frame ranked by encoded size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedFrame {
    pub rank: usize,
    pub time_stamp: TimeValue,
    pub time_secs: f64,
    pub size_bytes: u64,
    #[serde(rename = "type")]
    pub picture_type: PictureType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub segments: usize,
    pub total_bytes: u64,
    pub total_secs: f64,
    /// Bits over the total covered duration.
    pub average_bitrate_bps: f64,
    pub min_bitrate_bps: f64,
    pub max_bitrate_bps: f64,
    pub i_frames: usize,
    pub p_frames: usize,
    pub b_frames: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub policy: Policy,
    pub timescale: u32,
    pub frame_count: usize,
    pub points: Vec<BitratePoint>,
    pub summary: Summary,
    pub heaviest: Vec<RankedFrame>,
}

/// `size * 8` bits over `duration` ticks, in bits per second. Zero for an empty span.
pub fn bitrate_bps(size: u64, duration: TimeValue, timescale: Timescale) -> f64 {
    if duration.ticks() <= 0 {
        return 0.0;
    }
    let bits_ticks = u128::from(size) * 8 * u128::from(timescale.get());
    bits_ticks as f64 / duration.ticks() as f64
}

/// Slice `samples` with `policy` and fold each group into an aggregate.
pub fn segment(samples: &[Sample], policy: Policy, window: TimeValue) -> Vec<Sample> {
    let groups = match policy {
        Policy::Duration => slice_by_duration(samples, window, Sample::aggregate),
        Policy::Keyframe => slice_by_keyframe(samples, Sample::aggregate),
    };
    groups.into_iter().flatten().collect()
}

/// The `n` largest frames, heaviest first. Equal sizes keep decode order.
pub fn heaviest(samples: &[Sample], n: usize, timescale: Timescale) -> Vec<RankedFrame> {
    let mut ranked = samples.to_vec();
    ranked.sort_by(|a, b| b.cmp_by_size(a));

    ranked
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, sample)| RankedFrame {
            rank: i + 1,
            time_stamp: sample.time_stamp(),
            time_secs: sample.time_stamp().as_secs_f64(timescale),
            size_bytes: sample.size(),
            picture_type: sample.picture_type(),
        })
        .collect()
}

/// Segment `samples` and summarize the resulting bitrate curve.
pub fn build_report(samples: &[Sample], options: &ReportOptions) -> Report {
    let aggregates = segment(samples, options.policy, options.window);

    let points: Vec<BitratePoint> = aggregates
        .iter()
        .enumerate()
        .map(|(i, agg)| BitratePoint::from_aggregate(i, agg, options.timescale))
        .collect();

    let summary = summarize(samples, &aggregates, &points, options.timescale);

    tracing::info!(
        policy = %options.policy,
        frames = samples.len(),
        segments = points.len(),
        "built bitrate report"
    );

    Report {
        policy: options.policy,
        timescale: options.timescale.get(),
        frame_count: samples.len(),
        points,
        summary,
        heaviest: heaviest(samples, options.top, options.timescale),
    }
}

fn summarize(
    samples: &[Sample],
    aggregates: &[Sample],
    points: &[BitratePoint],
    timescale: Timescale,
) -> Summary {
    let covered = Sample::aggregate(aggregates);
    let (total_bytes, total_duration) = covered
        .map(|s| (s.size(), s.duration()))
        .unwrap_or((0, TimeValue::ZERO));

    let count = |ty: PictureType| samples.iter().filter(|s| s.picture_type() == ty).count();

    let min_bitrate_bps = points
        .iter()
        .map(|p| p.bitrate_bps)
        .reduce(f64::min)
        .unwrap_or(0.0);
    let max_bitrate_bps = points
        .iter()
        .map(|p| p.bitrate_bps)
        .reduce(f64::max)
        .unwrap_or(0.0);

    Summary {
        segments: points.len(),
        total_bytes,
        total_secs: total_duration.as_secs_f64(timescale),
        average_bitrate_bps: bitrate_bps(total_bytes, total_duration, timescale),
        min_bitrate_bps,
        max_bitrate_bps,
        i_frames: count(PictureType::I),
        p_frames: count(PictureType::P),
        b_frames: count(PictureType::B),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(ts: i64, size: u64, ty: PictureType) -> Sample {
        Sample::new(TimeValue::new(ts), TimeValue::new(40), size, ty).unwrap()
    }

    fn gop() -> Vec<Sample> {
        vec![
            frame(0, 20_000, PictureType::I),
            frame(40, 4_000, PictureType::B),
            frame(80, 6_000, PictureType::P),
            frame(120, 20_000, PictureType::I),
            frame(160, 5_000, PictureType::P),
        ]
    }

    #[test]
    fn test_bitrate_bps() {
        let ms = Timescale::MILLIS;
        assert_eq!(bitrate_bps(1000, TimeValue::new(1000), ms), 8000.0);
        assert_eq!(bitrate_bps(1000, TimeValue::new(500), ms), 16000.0);
        assert_eq!(bitrate_bps(1000, TimeValue::ZERO, ms), 0.0);

        let ts = Timescale::new(90_000).unwrap();
        assert_eq!(bitrate_bps(45_000, TimeValue::new(90_000), ts), 360_000.0);
    }

    #[test]
    fn test_segment_by_keyframe() {
        let aggregates = segment(&gop(), Policy::Keyframe, TimeValue::ZERO);
        assert_eq!(aggregates.len(), 2);
        assert_eq!(aggregates[0].size(), 30_000);
        assert_eq!(aggregates[1].size(), 20_000);
        assert!(aggregates.iter().all(Sample::is_aggregate));
    }

    #[test]
    fn test_segment_by_duration() {
        let aggregates = segment(&gop(), Policy::Duration, TimeValue::new(80));
        // Running totals 40, 80, 120 (close), 80, 120 (close, last).
        assert_eq!(aggregates.len(), 2);
        assert_eq!(aggregates[0].duration(), TimeValue::new(80));
        assert_eq!(aggregates[1].time_stamp(), TimeValue::new(80));
    }

    #[test]
    fn test_heaviest_is_stable() {
        let ranked = heaviest(&gop(), 3, Timescale::MILLIS);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].time_stamp, TimeValue::new(0));
        assert_eq!(ranked[1].time_stamp, TimeValue::new(120));
        assert_eq!(ranked[2].size_bytes, 6_000);
        assert_eq!(ranked[2].rank, 3);
        assert!((ranked[1].time_secs - 0.12).abs() < 1e-9);
    }

    #[test]
    fn test_build_report() {
        let options = ReportOptions {
            policy: Policy::Keyframe,
            window: TimeValue::ZERO,
            timescale: Timescale::MILLIS,
            top: 2,
        };
        let report = build_report(&gop(), &options);

        assert_eq!(report.frame_count, 5);
        assert_eq!(report.points.len(), 2);
        assert_eq!(report.points[0].bitrate_bps, 2_000_000.0);
        assert_eq!(report.points[1].bitrate_bps, 4_000_000.0);
        assert_eq!(report.summary.total_bytes, 50_000);
        assert!((report.summary.total_secs - 0.16).abs() < 1e-9);
        assert_eq!(report.summary.max_bitrate_bps, 4_000_000.0);
        assert_eq!(report.summary.i_frames, 2);
        assert_eq!(report.summary.p_frames, 2);
        assert_eq!(report.summary.b_frames, 1);
        assert_eq!(report.heaviest.len(), 2);
    }

    #[test]
    fn test_single_point_min_equals_max() {
        let options = ReportOptions {
            policy: Policy::Keyframe,
            window: TimeValue::new(1000),
            timescale: Timescale::MILLIS,
            top: 0,
        };
        let report = build_report(&gop()[..4], &options);
        assert_eq!(report.points.len(), 1);
        assert_eq!(report.summary.min_bitrate_bps, report.points[0].bitrate_bps);
        assert_eq!(report.summary.max_bitrate_bps, report.points[0].bitrate_bps);
    }

    #[test]
    fn test_empty_report() {
        let options = ReportOptions {
            policy: Policy::Duration,
            window: TimeValue::new(1000),
            timescale: Timescale::MILLIS,
            top: 5,
        };
        let report = build_report(&[], &options);
        assert!(report.points.is_empty());
        assert!(report.heaviest.is_empty());
        assert_eq!(report.summary.average_bitrate_bps, 0.0);
        assert_eq!(report.summary.min_bitrate_bps, 0.0);
        assert_eq!(report.summary.max_bitrate_bps, 0.0);
    }
}

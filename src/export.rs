//! Rendering reports as JSON, CSV, or a text table.

use anyhow::{Context, Result};
use std::fmt::Write;

use crate::config::OutputFormat;
use crate::report::{RankedFrame, Report};

const POINTS_HEADER: &str = "index,start_secs,duration_secs,size_bytes,bitrate_bps";
const FRAMES_HEADER: &str = "rank,time_stamp,time_secs,size_bytes,type";

/// Render a full report.
///
/// CSV carries only the bitrate points, one row per segment.
pub fn render_report(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("Failed to serialize report")
        }
        OutputFormat::Csv => Ok(points_csv(report)),
        OutputFormat::Table => Ok(report_table(report)),
    }
}

/// Render a list of ranked frames.
pub fn render_frames(frames: &[RankedFrame], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(frames).context("Failed to serialize frames")
        }
        OutputFormat::Csv => Ok(frames_csv(frames)),
        OutputFormat::Table => Ok(frames_table(frames)),
    }
}

fn points_csv(report: &Report) -> String {
    let mut output = String::new();
    output.push_str(POINTS_HEADER);
    output.push('\n');

    for p in &report.points {
        let _ = writeln!(
            output,
            "{},{:.6},{:.6},{},{:.0}",
            p.index, p.start_secs, p.duration_secs, p.size_bytes, p.bitrate_bps
        );
    }
    output
}

fn frames_csv(frames: &[RankedFrame]) -> String {
    let mut output = String::new();
    output.push_str(FRAMES_HEADER);
    output.push('\n');

    for f in frames {
        let _ = writeln!(
            output,
            "{},{},{:.6},{},{}",
            f.rank, f.time_stamp, f.time_secs, f.size_bytes, f.picture_type
        );
    }
    output
}

fn report_table(report: &Report) -> String {
    let s = &report.summary;
    let mut output = String::new();

    let _ = writeln!(
        output,
        "Policy: {}  Timescale: {}  Frames: {} (I {} / P {} / B {})",
        report.policy, report.timescale, report.frame_count, s.i_frames, s.p_frames, s.b_frames
    );
    let _ = writeln!(
        output,
        "Segments: {}  Total: {} bytes over {:.3} s  Average: {:.1} kbps",
        s.segments,
        s.total_bytes,
        s.total_secs,
        s.average_bitrate_bps / 1000.0
    );
    let _ = writeln!(
        output,
        "Min: {:.1} kbps  Max: {:.1} kbps",
        s.min_bitrate_bps / 1000.0,
        s.max_bitrate_bps / 1000.0
    );

    output.push('\n');
    let _ = writeln!(
        output,
        "{:>6}  {:>10}  {:>8}  {:>12}  {:>12}",
        "#", "start(s)", "dur(s)", "bytes", "kbps"
    );
    for p in &report.points {
        let _ = writeln!(
            output,
            "{:>6}  {:>10.3}  {:>8.3}  {:>12}  {:>12.1}",
            p.index,
            p.start_secs,
            p.duration_secs,
            p.size_bytes,
            p.bitrate_bps / 1000.0
        );
    }

    if !report.heaviest.is_empty() {
        output.push_str("\nHeaviest frames:\n");
        output.push_str(&frames_table(&report.heaviest));
    }

    output
}

fn frames_table(frames: &[RankedFrame]) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "{:>6}  {:>4}  {:>10}  {:>12}",
        "rank", "type", "time(s)", "bytes"
    );
    for f in frames {
        let _ = writeln!(
            output,
            "{:>6}  {:>4}  {:>10.3}  {:>12}",
            f.rank, f.picture_type, f.time_secs, f.size_bytes
        );
    }
    output
}

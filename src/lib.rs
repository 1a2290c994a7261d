//! bitrate-viewer - bitrate-over-time analysis of ffprobe frame dumps
//!
//! This library crate exposes the application layer for integration testing.
//! The frame model and segmentation live in `bitrate-core`.

pub mod config;
pub mod export;
pub mod probe;
pub mod report;

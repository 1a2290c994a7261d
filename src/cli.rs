use bitrate_viewer::config::{OutputFormat, Policy};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bitrate-viewer")]
#[command(author, version, about = "Bitrate-over-time analysis of ffprobe frame dumps")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Segment a frame dump and report bitrate over time
    Analyze {
        /// ffprobe -show_frames JSON ("-" for stdin)
        #[arg(required = true)]
        input: PathBuf,

        /// Segmentation policy
        #[arg(long, value_enum)]
        policy: Option<Policy>,

        /// Window length in milliseconds (duration policy)
        #[arg(long)]
        window_ms: Option<u64>,

        /// Ticks per second of the frame timestamps
        #[arg(long)]
        timescale: Option<u32>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Number of heaviest frames to report
        #[arg(long)]
        top: Option<usize>,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the heaviest frames of a frame dump
    Frames {
        /// ffprobe -show_frames JSON ("-" for stdin)
        #[arg(required = true)]
        input: PathBuf,

        /// Number of frames to list
        #[arg(long)]
        top: Option<usize>,

        /// Ticks per second of the frame timestamps
        #[arg(long)]
        timescale: Option<u32>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Write a config file populated with defaults
    InitConfig {
        /// Destination path
        #[arg(default_value = "bitrate-viewer.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

mod cli;

use bitrate_core::TimeValue;
use bitrate_viewer::{
    config::{self, Config},
    export, probe,
    report::{self, ReportOptions},
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "bitrate_viewer=debug,bitrate_core=debug".to_string()
        } else {
            "bitrate_viewer=info,bitrate_core=info".to_string()
        }
    });

    // stdout carries the report; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Analyze {
            input,
            policy,
            window_ms,
            timescale,
            format,
            top,
            output,
        } => {
            let mut config = config::load_config_or_default(cli.config.as_deref())?;
            if let Some(policy) = policy {
                config.segment.policy = policy;
            }
            if let Some(window_ms) = window_ms {
                config.segment.window_ms = window_ms;
            }
            if let Some(timescale) = timescale {
                config.input.timescale = timescale;
            }
            if let Some(format) = format {
                config.output.format = format;
            }
            if let Some(top) = top {
                config.output.top = top;
            }
            config::validate_config(&config)?;
            analyze(&input, &config, output.as_deref())
        }
        Commands::Frames {
            input,
            top,
            timescale,
            format,
        } => {
            let mut config = config::load_config_or_default(cli.config.as_deref())?;
            if let Some(top) = top {
                config.output.top = top;
            }
            if let Some(timescale) = timescale {
                config.input.timescale = timescale;
            }
            if let Some(format) = format {
                config.output.format = format;
            }
            config::validate_config(&config)?;
            list_frames(&input, &config)
        }
        Commands::InitConfig { path, force } => init_config(&path, force),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("bitrate-viewer {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn analyze(input: &Path, config: &Config, output: Option<&Path>) -> Result<()> {
    let timescale = config
        .input
        .timescale()
        .context("Input timescale cannot be 0")?;

    tracing::info!("Reading frame dump: {:?}", input);
    let decoded = probe::load_frames(input, (&config.input).into())?;
    if !decoded.invalid.is_empty() {
        tracing::warn!("Skipped {} undecodable frames", decoded.invalid.len());
    }

    let options = ReportOptions {
        policy: config.segment.policy,
        window: TimeValue::from_millis(config.segment.window_ms, timescale),
        timescale,
        top: config.output.top,
    };
    let report = report::build_report(&decoded.samples, &options);
    let rendered = export::render_report(&report, config.output.format)?;

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write report: {:?}", path))?;
            tracing::info!("Wrote report to {:?}", path);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn list_frames(input: &Path, config: &Config) -> Result<()> {
    let timescale = config
        .input
        .timescale()
        .context("Input timescale cannot be 0")?;

    let decoded = probe::load_frames(input, (&config.input).into())?;
    let ranked = report::heaviest(&decoded.samples, config.output.top, timescale);
    print!("{}", export::render_frames(&ranked, config.output.format)?);

    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {:?} (use --force to overwrite)",
            path
        );
    }

    config::persist::save_config(path, &Config::default())?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_config(&config);
        }
        None => {
            println!("No config file specified, using defaults");
            print_config(&Config::default());
        }
    }

    Ok(())
}

fn print_config(config: &Config) {
    println!("  Timescale: {}", config.input.timescale);
    println!("  Skip non-video: {}", config.input.skip_non_video);
    println!("  Skip invalid: {}", config.input.skip_invalid);
    println!("  Policy: {}", config.segment.policy);
    println!("  Window: {} ms", config.segment.window_ms);
    println!("  Format: {}", config.output.format);
    println!("  Top frames: {}", config.output.top);
}

pub mod persist;
mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./bitrate-viewer.toml",
        "~/.config/bitrate-viewer/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.input.timescale == 0 {
        anyhow::bail!("Input timescale cannot be 0");
    }

    if config.segment.window_ms == 0 {
        anyhow::bail!("Segment window_ms cannot be 0");
    }

    if config.segment.policy == Policy::Keyframe && config.segment.window_ms != default_window() {
        tracing::warn!(
            "window_ms = {} is ignored by the keyframe policy",
            config.segment.window_ms
        );
    }

    if config.output.top == 0 {
        tracing::warn!("output.top is 0, no heaviest frames will be reported");
    }

    Ok(())
}

fn default_window() -> u64 {
    SegmentConfig::default().window_ms
}

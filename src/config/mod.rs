mod types;

pub use types::*;

use crate::preset;
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
        "./shortform.toml",
        "~/.config/shortform/config.toml",
        "/etc/shortform/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Loading config from {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.batch.input_dir.as_os_str().is_empty() {
        anyhow::bail!("batch.input_dir cannot be empty");
    }

    if config.batch.output_dir.as_os_str().is_empty() {
        anyhow::bail!("batch.output_dir cannot be empty");
    }

    if preset::find(&config.batch.preset).is_none() {
        tracing::warn!(
            "Unknown preset {:?} in config, {} will be used",
            config.batch.preset,
            preset::DEFAULT_PRESET
        );
    }

    if let Some(ref ffmpeg) = config.tools.ffmpeg_path {
        if !ffmpeg.exists() {
            tracing::warn!("Configured ffmpeg path does not exist: {:?}", ffmpeg);
        }
    }

    Ok(())
}

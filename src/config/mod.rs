mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;
    expand_paths(&mut config);

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./tagscan.toml", "~/.config/tagscan/config.toml"];

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

fn expand_paths(config: &mut Config) {
    let db = shellexpand::tilde(&config.database.path.to_string_lossy()).into_owned();
    config.database.path = db.into();

    if let Some(ref ffmpeg) = config.tools.ffmpeg_path {
        let expanded = shellexpand::tilde(&ffmpeg.to_string_lossy()).into_owned();
        config.tools.ffmpeg_path = Some(expanded.into());
    }
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.database.path.as_os_str().is_empty() {
        anyhow::bail!("database.path cannot be empty");
    }

    if let Some(ref ffmpeg) = config.tools.ffmpeg_path {
        if !ffmpeg.exists() {
            tracing::warn!("Configured ffmpeg path does not exist: {:?}", ffmpeg);
        }
    }

    Ok(())
}

pub mod model;

use anyhow::{Context, Result};
use std::path::PathBuf;

pub use model::{AppConfig, LocationConfig, LoggingConfig, MapConfig, ProviderKind, SearchConfig};

/// Environment variable holding the Places API key.
pub const API_KEY_ENV: &str = "PINPOINT_PLACES_API_KEY";

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pinpoint")
        .join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    let path = config_path();
    let mut config = if path.exists() {
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        parse_config(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?
    } else {
        AppConfig::default()
    };
    apply_env(&mut config, std::env::var(API_KEY_ENV).ok());
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents)?;
    Ok(config)
}

/// The environment key wins over the file so secrets can stay out of it.
fn apply_env(config: &mut AppConfig, api_key: Option<String>) {
    if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
        config.search.api_key = Some(key);
    }
}

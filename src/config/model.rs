//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use crate::location::{PermissionStatus, Platform};
use serde::{Deserialize, Serialize};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Place autocomplete settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Places API key. Usually injected through `PINPOINT_PLACES_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    /// Quiet period after the last keystroke before a request is sent.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_search_endpoint(),
            language: default_language(),
            min_query_len: default_min_query_len(),
            max_suggestions: default_max_suggestions(),
            debounce_ms: default_debounce_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SearchConfig {
    /// The API key, if one is set and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Fixed position from this config file.
    Static,
    /// Position looked up from the public IP address.
    Ip,
}

/// Device location settings.
///
/// A terminal has no OS permission prompt, so the answers the permission
/// requests return are configured here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_provider")]
    pub provider: ProviderKind,
    /// Overrides platform detection; decides whether a background
    /// permission tier exists.
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default = "default_granted")]
    pub foreground_permission: PermissionStatus,
    #[serde(default = "default_granted")]
    pub background_permission: PermissionStatus,
    /// Fix reported by the static provider.
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default = "default_ip_endpoint")]
    pub ip_endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            platform: None,
            foreground_permission: default_granted(),
            background_permission: default_granted(),
            latitude: None,
            longitude: None,
            ip_endpoint: default_ip_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LocationConfig {
    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::current)
    }
}

/// Initial map region used until the first location fix arrives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_center_latitude")]
    pub center_latitude: f64,
    #[serde(default = "default_center_longitude")]
    pub center_longitude: f64,
    #[serde(default = "default_latitude_delta")]
    pub latitude_delta: f64,
    #[serde(default = "default_longitude_delta")]
    pub longitude_delta: f64,
    /// Keep the map centered on the device until the user pans or zooms.
    #[serde(default = "default_true")]
    pub follow_location: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_latitude: default_center_latitude(),
            center_longitude: default_center_longitude(),
            latitude_delta: default_latitude_delta(),
            longitude_delta: default_longitude_delta(),
            follow_location: true,
        }
    }
}

/// Diagnostic log file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    /// Filter directive, e.g. `info` or `pinpoint=debug`. `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_dir: default_log_dir(),
            level: default_log_level(),
        }
    }
}

fn default_search_endpoint() -> String {
    "https://maps.googleapis.com/maps/api/place".into()
}

fn default_language() -> String {
    "en".into()
}

fn default_min_query_len() -> usize {
    2
}

fn default_max_suggestions() -> usize {
    5
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_provider() -> ProviderKind {
    ProviderKind::Ip
}

fn default_granted() -> PermissionStatus {
    PermissionStatus::Granted
}

fn default_ip_endpoint() -> String {
    "http://ip-api.com/json".into()
}

fn default_center_latitude() -> f64 {
    37.78825
}

fn default_center_longitude() -> f64 {
    -122.4324
}

fn default_latitude_delta() -> f64 {
    0.0922
}

fn default_longitude_delta() -> f64 {
    0.0421
}

fn default_true() -> bool {
    true
}

fn default_log_dir() -> String {
    "~/.local/share/pinpoint/logs".into()
}

fn default_log_level() -> String {
    "info".into()
}

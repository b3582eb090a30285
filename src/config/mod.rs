//! Configuration module for LiveTemp-RS
//!
//! This module handles application configuration including:
//! - The external temperature source (URL, markup selector, mode)
//! - Sampling cadence, history size and fallback range
//! - The displayed location and UI preferences
//! - Runtime settings during execution (see [`settings`])
//!
//! # Config Location
//!
//! The configuration file is optional. It is looked up in this order:
//! 1. The path in the `LIVETEMP_CONFIG` environment variable
//! 2. `config.toml` in the platform data directory under `dev.livetemp.livetemp-rs`
//!    - **Linux**: `~/.local/share/dev.livetemp.livetemp-rs/`
//!    - **macOS**: `~/Library/Application Support/dev.livetemp.livetemp-rs/`
//!    - **Windows**: `%APPDATA%\dev.livetemp.livetemp-rs\`
//!
//! Missing files and missing keys fall back to defaults. Collected readings
//! are never written anywhere.
//!
//! # Example
//!
//! ```toml
//! [source]
//! url = "http://www.bom.gov.au/nsw/forecasts/sydney.shtml"
//! mode = "scrape"
//!
//! [sampling]
//! interval_secs = 30
//! history_capacity = 5
//!
//! [location]
//! city = "Sydney"
//! latitude = -33.8688
//! longitude = 151.2093
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{LiveTempError, Result, ResultExt};
use crate::history::{DEFAULT_HISTORY_CAPACITY, MAX_HISTORY_CAPACITY};
use crate::source::usable_range;
use crate::types::TemperatureUnit;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application identifier for data directories
pub const APP_ID: &str = "dev.livetemp.livetemp-rs";

/// Config filename inside the app data directory
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the config path
pub const CONFIG_ENV_VAR: &str = "LIVETEMP_CONFIG";

/// Default forecast page
pub const DEFAULT_SOURCE_URL: &str = "http://www.bom.gov.au/nsw/forecasts/sydney.shtml";

/// Default refresh interval in seconds
pub const DEFAULT_INTERVAL_SECS: u64 = 30;

/// Default lower bound of simulated readings (°C)
pub const DEFAULT_FALLBACK_MIN_C: f64 = 15.0;

/// Default upper bound of simulated readings (°C)
pub const DEFAULT_FALLBACK_MAX_C: f64 = 25.0;

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Resolve which config file to read, if any
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }
    app_data_dir().map(|p| p.join(CONFIG_FILE))
}

// ==================== App Config ====================

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    /// External temperature source
    #[serde(default)]
    pub source: SourceConfig,

    /// Sampling cadence and history
    #[serde(default)]
    pub sampling: SamplingConfig,

    /// Location shown on the dashboard
    #[serde(default)]
    pub location: LocationConfig,

    /// UI configuration
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(content)?;
        config.validate();
        Ok(config)
    }

    /// Load a configuration file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))
    }

    /// Load from the default location, returning defaults on any error
    pub fn load_or_default() -> Self {
        let Some(path) = config_path() else {
            tracing::warn!("Could not determine config path, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Save configuration to disk as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                LiveTempError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {:?}", path))
    }

    /// Clamp out-of-range values to something usable
    pub fn validate(&mut self) {
        if self.sampling.history_capacity == 0 {
            tracing::warn!("history_capacity must be at least 1, using 1");
            self.sampling.history_capacity = 1;
        }
        if self.sampling.history_capacity > MAX_HISTORY_CAPACITY {
            tracing::warn!(
                "history_capacity {} is above {}, using {}",
                self.sampling.history_capacity,
                MAX_HISTORY_CAPACITY,
                MAX_HISTORY_CAPACITY
            );
            self.sampling.history_capacity = MAX_HISTORY_CAPACITY;
        }
        if self.sampling.interval_secs == 0 {
            tracing::warn!("interval_secs must be at least 1, using 1");
            self.sampling.interval_secs = 1;
        }
        if self.sampling.fallback_min_c > self.sampling.fallback_max_c {
            tracing::warn!(
                "fallback_min_c {} is above fallback_max_c {}, swapping",
                self.sampling.fallback_min_c,
                self.sampling.fallback_max_c
            );
            std::mem::swap(
                &mut self.sampling.fallback_min_c,
                &mut self.sampling.fallback_max_c,
            );
        }
        if usable_range(self.sampling.fallback_min_c, self.sampling.fallback_max_c).is_none() {
            tracing::warn!(
                "fallback range [{}, {}] is not usable, using [{}, {}]",
                self.sampling.fallback_min_c,
                self.sampling.fallback_max_c,
                DEFAULT_FALLBACK_MIN_C,
                DEFAULT_FALLBACK_MAX_C
            );
            self.sampling.fallback_min_c = DEFAULT_FALLBACK_MIN_C;
            self.sampling.fallback_max_c = DEFAULT_FALLBACK_MAX_C;
        }
    }
}

// ==================== Source Config ====================

/// How readings are obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// Scrape the forecast page, simulate on failure
    #[default]
    Scrape,
    /// Never touch the network; every reading is simulated
    Simulated,
}

impl std::fmt::Display for SourceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceMode::Scrape => write!(f, "Scrape"),
            SourceMode::Simulated => write!(f, "Simulated"),
        }
    }
}

/// External temperature source configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    /// Page to fetch
    pub url: String,

    /// Source mode
    pub mode: SourceMode,

    /// Tag of the element holding the temperature
    pub element: String,

    /// Class of the element holding the temperature
    pub class: String,

    /// Optional request timeout; `None` keeps the HTTP client default
    pub timeout_secs: Option<u64>,

    /// Optional User-Agent header
    pub user_agent: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            mode: SourceMode::Scrape,
            element: "em".to_string(),
            class: "temp".to_string(),
            timeout_secs: None,
            user_agent: None,
        }
    }
}

impl SourceConfig {
    /// Request timeout, if configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

// ==================== Sampling Config ====================

/// Sampling cadence, history size and fallback range
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SamplingConfig {
    /// Seconds between refreshes
    pub interval_secs: u64,

    /// Number of readings retained
    pub history_capacity: usize,

    /// Lower bound of simulated readings (°C, inclusive)
    pub fallback_min_c: f64,

    /// Upper bound of simulated readings (°C, inclusive)
    pub fallback_max_c: f64,

    /// Optional seed for the simulated readings
    pub fallback_seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            fallback_min_c: DEFAULT_FALLBACK_MIN_C,
            fallback_max_c: DEFAULT_FALLBACK_MAX_C,
            fallback_seed: None,
        }
    }
}

impl SamplingConfig {
    /// Refresh interval
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

// ==================== Location Config ====================

/// Location shown on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocationConfig {
    /// City name
    pub city: String,

    /// Country or region shown under the city
    pub region: String,

    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,

    /// Zoom level (degrees of longitude visible = 360 / 2^zoom)
    pub zoom: u8,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            city: "Sydney".to_string(),
            region: "Australia".to_string(),
            latitude: -33.8688,
            longitude: 151.2093,
            zoom: 10,
        }
    }
}

// ==================== UI Config ====================

/// UI preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Enable dark mode
    pub dark_mode: bool,

    /// Unit selected at startup
    pub default_unit: TemperatureUnit,

    /// Show the regression line on the trend plot
    pub show_trend_line: bool,

    /// Initial window size
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dark_mode: true,
            default_unit: TemperatureUnit::Celsius,
            show_trend_line: true,
            window_width: 1280.0,
            window_height: 760.0,
        }
    }
}

// ==================== Tests ====================

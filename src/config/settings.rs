//! Runtime settings that can be modified during application execution
//!
//! These settings control the current display state and are never saved.
//! Changing them only re-derives views from the snapshot already on
//! screen; it never causes a new fetch.

use crate::config::UiConfig;
use crate::types::TemperatureUnit;

/// Runtime settings for the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeSettings {
    /// Unit used for the readout, table and chart
    pub unit: TemperatureUnit,

    /// Whether the regression line is drawn
    pub show_trend_line: bool,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            unit: TemperatureUnit::Celsius,
            show_trend_line: true,
        }
    }
}

impl RuntimeSettings {
    /// Create runtime settings from UI configuration
    pub fn from_config(config: &UiConfig) -> Self {
        Self {
            unit: config.default_unit,
            show_trend_line: config.show_trend_line,
        }
    }
}

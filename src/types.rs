//! Core data types for LiveTemp-RS
//!
//! This module contains the fundamental data structures used throughout
//! the application for representing temperature readings and their units.
//!
//! # Main Types
//!
//! - [`TemperatureUnit`] - Display unit selected by the user (Celsius / Fahrenheit)
//! - [`ReadingSource`] - Where a reading came from (scraped page or simulated fallback)
//! - [`Reading`] - A single timestamped temperature sample in both units
//! - [`TickId`] - Identifier of one recompute cycle of the sampling pipeline
//!
//! # Invariants
//!
//! A [`Reading`] is immutable once built. Its Fahrenheit value is always
//! derived from its Celsius value with [`celsius_to_fahrenheit`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Format used for reading timestamps (local wall clock)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Short time-of-day format used for chart axis labels
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M:%S";

/// Convert a Celsius temperature to Fahrenheit
#[inline]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}

/// Unit used to display temperatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    /// Degrees Celsius
    #[default]
    Celsius,
    /// Degrees Fahrenheit
    Fahrenheit,
}

impl TemperatureUnit {
    /// Get all available units
    pub fn all() -> &'static [TemperatureUnit] {
        &[TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit]
    }

    /// Unit symbol, e.g. `°C`
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// Column / axis label, e.g. `Temperature (°C)`
    pub fn column_label(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "Temperature (°C)",
            TemperatureUnit::Fahrenheit => "Temperature (°F)",
        }
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemperatureUnit::Celsius => write!(f, "Celsius"),
            TemperatureUnit::Fahrenheit => write!(f, "Fahrenheit"),
        }
    }
}

/// Origin of a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadingSource {
    /// Parsed from the external forecast page
    Scraped,
    /// Generated by the fallback because the fetch failed
    Simulated,
}

impl ReadingSource {
    /// Check if this reading was substituted
    pub fn is_simulated(&self) -> bool {
        matches!(self, ReadingSource::Simulated)
    }
}

impl std::fmt::Display for ReadingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadingSource::Scraped => write!(f, "scraped"),
            ReadingSource::Simulated => write!(f, "simulated"),
        }
    }
}

/// One timestamped temperature sample
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    temperature_celsius: f64,
    temperature_fahrenheit: f64,
    timestamp: String,
    captured_at: NaiveDateTime,
    source: ReadingSource,
}

impl Reading {
    /// Build a reading from a Celsius value captured at `captured_at`
    pub fn new(celsius: f64, captured_at: NaiveDateTime, source: ReadingSource) -> Self {
        Self {
            temperature_celsius: celsius,
            temperature_fahrenheit: celsius_to_fahrenheit(celsius),
            timestamp: captured_at.format(TIMESTAMP_FORMAT).to_string(),
            captured_at,
            source,
        }
    }

    /// Temperature in degrees Celsius
    pub fn celsius(&self) -> f64 {
        self.temperature_celsius
    }

    /// Temperature in degrees Fahrenheit
    pub fn fahrenheit(&self) -> f64 {
        self.temperature_fahrenheit
    }

    /// Temperature in the requested unit
    pub fn temperature(&self, unit: TemperatureUnit) -> f64 {
        match unit {
            TemperatureUnit::Celsius => self.temperature_celsius,
            TemperatureUnit::Fahrenheit => self.temperature_fahrenheit,
        }
    }

    /// Formatted capture time (`YYYY-MM-DD HH:MM:SS`)
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Capture time as a date-time value
    pub fn captured_at(&self) -> NaiveDateTime {
        self.captured_at
    }

    /// Where this reading came from
    pub fn source(&self) -> ReadingSource {
        self.source
    }
}

/// Identifier of one recompute cycle (0 = nothing computed yet)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TickId(pub u64);

impl TickId {
    /// The id before any tick ran
    pub const NONE: TickId = TickId(0);

    /// The id following this one
    pub fn next(self) -> TickId {
        TickId(self.0 + 1)
    }
}

impl std::fmt::Display for TickId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_celsius_to_fahrenheit() {
        assert!((celsius_to_fahrenheit(0.0) - 32.0).abs() < 1e-9);
        assert!((celsius_to_fahrenheit(100.0) - 212.0).abs() < 1e-9);
        assert!((celsius_to_fahrenheit(-40.0) + 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_reading_derives_fahrenheit() {
        let reading = Reading::new(26.5, at(14, 5, 0), ReadingSource::Scraped);
        assert_eq!(reading.celsius(), 26.5);
        assert!((reading.fahrenheit() - 79.7).abs() < 1e-9);
        assert_eq!(reading.temperature(TemperatureUnit::Celsius), 26.5);
        assert!((reading.temperature(TemperatureUnit::Fahrenheit) - 79.7).abs() < 1e-9);
    }

    #[test]
    fn test_reading_timestamp_format() {
        let reading = Reading::new(20.0, at(9, 3, 7), ReadingSource::Simulated);
        assert_eq!(reading.timestamp(), "2024-03-09 09:03:07");
        assert_eq!(reading.captured_at(), at(9, 3, 7));
        assert!(reading.source().is_simulated());
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(TemperatureUnit::Celsius.symbol(), "°C");
        assert_eq!(TemperatureUnit::Fahrenheit.column_label(), "Temperature (°F)");
        assert_eq!(TemperatureUnit::all().len(), 2);
    }

    #[test]
    fn test_tick_id_ordering() {
        let first = TickId::NONE.next();
        assert_eq!(first, TickId(1));
        assert!(first.next() > first);
        assert_eq!(first.to_string(), "#1");
    }
}

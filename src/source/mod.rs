//! Temperature sources
//!
//! A [`TemperatureSource`] yields one Celsius value per call or a
//! [`FetchError`]. The sampler never lets that error escape: it hands the
//! failure to the [`FallbackGenerator`] and records a simulated reading
//! instead.
//!
//! - [`ScrapedSource`] - HTTP GET of a forecast page plus markup extraction
//! - [`DisabledSource`] - always unavailable, used in simulated-only mode
//! - [`FallbackGenerator`] - bounded random readings used on failure

pub mod scrape;
pub mod simulated;

pub use scrape::{parse_temperature_markup, ScrapedSource};
pub use simulated::{usable_range, DisabledSource, FallbackGenerator};

use crate::config::{SourceConfig, SourceMode};
use crate::error::{FetchError, Result};

/// Unified interface for temperature feeds
///
/// Implementations must be `Send` so the sampler can live on the feed
/// worker thread.
#[cfg_attr(test, mockall::automock)]
pub trait TemperatureSource: Send {
    /// Fetch the current temperature in degrees Celsius
    fn fetch(&mut self) -> std::result::Result<f64, FetchError>;

    /// Short human-readable description, used in logs and the status bar
    fn describe(&self) -> String;
}

/// Build the source selected by the configuration
pub fn from_config(config: &SourceConfig) -> Result<Box<dyn TemperatureSource>> {
    match config.mode {
        SourceMode::Scrape => Ok(Box::new(ScrapedSource::from_config(config)?)),
        SourceMode::Simulated => Ok(Box::new(DisabledSource::new("simulated-only mode"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_mode_never_fetches() {
        let config = SourceConfig {
            mode: SourceMode::Simulated,
            ..Default::default()
        };
        let mut source = from_config(&config).unwrap();
        assert!(matches!(source.fetch(), Err(FetchError::Unavailable(_))));
    }

    #[test]
    fn test_scrape_mode_describes_url() {
        let source = from_config(&SourceConfig::default()).unwrap();
        assert!(source.describe().contains("bom.gov.au"));
    }
}

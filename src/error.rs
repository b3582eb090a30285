//! Error handling for the LiveTemp-RS application
//!
//! This module defines custom error types and a Result alias for use
//! throughout the application. Fetch failures have their own type,
//! [`FetchError`], because they are absorbed by the sampler and never
//! reach the display layer as failures.

use thiserror::Error;

/// Reasons the external temperature feed produced no value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, timeout, body read)
    #[error("network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The marked element was not present in the page
    #[error("no <{tag} class=\"{class}\"> element in page")]
    ElementNotFound { tag: String, class: String },

    /// The element text could not be parsed as a temperature
    #[error("could not parse temperature from {0:?}")]
    Parse(String),

    /// The source is disabled (simulated-only mode)
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FetchError::Status(status.as_u16()),
            None => FetchError::Network(err.to_string()),
        }
    }
}

/// Main error type for LiveTemp-RS operations
#[derive(Error, Debug)]
pub enum LiveTempError {
    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to channel communication
    #[error("Channel error: {0}")]
    Channel(String),

    /// Temperature feed errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// HTTP client construction errors
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<LiveTempError>,
    },
}

impl LiveTempError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        LiveTempError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<toml::de::Error> for LiveTempError {
    fn from(err: toml::de::Error) -> Self {
        LiveTempError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for LiveTempError {
    fn from(err: toml::ser::Error) -> Self {
        LiveTempError::Serialization(err.to_string())
    }
}

/// Result type alias for LiveTemp-RS operations
pub type Result<T> = std::result::Result<T, LiveTempError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<LiveTempError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}

//! Mock construction helpers

use livetemp_rs::error::FetchError;
use livetemp_rs::source::TemperatureSource;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A source that replays a fixed script of results
///
/// Once the script runs out, every further fetch fails with
/// [`FetchError::Unavailable`]. The call counter is shared so tests can
/// keep a handle after moving the source into a sampler.
pub struct ScriptedSource {
    script: VecDeque<Result<f64, FetchError>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = Result<f64, FetchError>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Source whose every fetch fails
    pub fn always_failing() -> Self {
        Self::new(std::iter::empty())
    }

    /// Source that scrapes the same markup text every time
    pub fn from_markup(html: &str, times: usize) -> Self {
        let value = livetemp_rs::source::parse_temperature_markup(html, "em", "temp");
        Self::new(std::iter::repeat(value).take(times))
    }

    /// Shared counter of fetch calls
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl TemperatureSource for ScriptedSource {
    fn fetch(&mut self) -> Result<f64, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Unavailable("script exhausted".to_string())))
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

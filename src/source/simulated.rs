//! Simulated readings
//!
//! [`FallbackGenerator`] produces uniformly distributed values in a closed
//! Celsius range, rounded to one decimal place. It is what the sampler uses
//! whenever the real source fails.

use super::TemperatureSource;
use crate::config::{DEFAULT_FALLBACK_MAX_C, DEFAULT_FALLBACK_MIN_C};
use crate::error::FetchError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Round to one decimal place
fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Normalize a fallback range to bounds on whole tenths
///
/// Bounds are ordered and rounded inward to one decimal place so that
/// rounding a sample never lands outside them. A range narrower than one
/// tenth collapses to the tenth nearest its midpoint. Returns `None` when
/// either bound or the width of the range is not finite.
pub fn usable_range(min: f64, max: f64) -> Option<(f64, f64)> {
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    let (low, high) = (min.min(max), min.max(max));
    let (low, high) = ((low * 10.0).ceil() / 10.0, (high * 10.0).floor() / 10.0);
    let (low, high) = if low > high {
        let mid = round_tenths(min / 2.0 + max / 2.0);
        (mid, mid)
    } else {
        (low, high)
    };

    // gen_range scales the width by slightly more than one
    let width = (high - low) / (1.0 - f64::EPSILON);
    (low.is_finite() && high.is_finite() && width.is_finite()).then_some((low, high))
}

/// Bounded random temperature generator
#[derive(Debug, Clone)]
pub struct FallbackGenerator {
    min: f64,
    max: f64,
    rng: StdRng,
}

impl Default for FallbackGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_MIN_C, DEFAULT_FALLBACK_MAX_C)
    }
}

impl FallbackGenerator {
    /// Create a generator over `[min, max]` seeded from the OS
    pub fn new(min: f64, max: f64) -> Self {
        Self::with_rng(min, max, StdRng::from_entropy())
    }

    /// Create a generator with a fixed seed
    pub fn seeded(min: f64, max: f64, seed: u64) -> Self {
        Self::with_rng(min, max, StdRng::seed_from_u64(seed))
    }

    fn with_rng(min: f64, max: f64, rng: StdRng) -> Self {
        let (min, max) = usable_range(min, max).unwrap_or_else(|| {
            tracing::warn!(
                "Unusable fallback range [{}, {}], using defaults",
                min,
                max
            );
            (DEFAULT_FALLBACK_MIN_C, DEFAULT_FALLBACK_MAX_C)
        });
        Self { min, max, rng }
    }

    /// Range the generated values fall in
    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Generate one simulated Celsius value
    pub fn generate(&mut self) -> f64 {
        let raw = self.rng.gen_range(self.min..=self.max);
        round_tenths(raw).clamp(self.min, self.max)
    }
}

/// A source that never produces a value
///
/// Used when the configuration selects simulated-only mode, so every
/// reading goes through the fallback path.
#[derive(Debug, Clone)]
pub struct DisabledSource {
    reason: String,
}

impl DisabledSource {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl TemperatureSource for DisabledSource {
    fn fetch(&mut self) -> Result<f64, FetchError> {
        Err(FetchError::Unavailable(self.reason.clone()))
    }

    fn describe(&self) -> String {
        format!("disabled ({})", self.reason)
    }
}

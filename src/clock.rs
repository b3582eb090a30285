//! Time sources for the sampling pipeline
//!
//! The sampler needs two notions of time: a monotonic instant for the
//! refresh timer and the local wall clock for reading timestamps. Both come
//! from a [`Clock`] so tests can drive time by hand with [`ManualClock`].

use chrono::{Local, NaiveDateTime};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Source of monotonic and wall-clock time
pub trait Clock: Send {
    /// Monotonic time, used for refresh deadlines
    fn now(&self) -> Instant;

    /// Local wall-clock time, used for reading timestamps
    fn local_time(&self) -> NaiveDateTime;
}

/// The real system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn local_time(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Debug)]
struct ManualTime {
    base_instant: Instant,
    base_local: NaiveDateTime,
    offset: Duration,
}

/// A clock that only moves when told to
///
/// Clones share the same time, so a test can keep one handle and give
/// another to the component under test.
#[derive(Debug, Clone)]
pub struct ManualClock {
    inner: Arc<Mutex<ManualTime>>,
}

impl ManualClock {
    /// Create a clock frozen at the given wall-clock time
    pub fn starting_at(local: NaiveDateTime) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ManualTime {
                base_instant: Instant::now(),
                base_local: local,
                offset: Duration::ZERO,
            })),
        }
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        if let Ok(mut time) = self.inner.lock() {
            time.offset += by;
        }
    }

    /// Total time advanced since creation
    pub fn elapsed(&self) -> Duration {
        self.inner.lock().map(|t| t.offset).unwrap_or_default()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::starting_at(Local::now().naive_local())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        match self.inner.lock() {
            Ok(time) => time.base_instant + time.offset,
            Err(_) => Instant::now(),
        }
    }

    fn local_time(&self) -> NaiveDateTime {
        match self.inner.lock() {
            Ok(time) => {
                let offset = chrono::Duration::from_std(time.offset)
                    .unwrap_or_else(|_| chrono::Duration::zero());
                time.base_local + offset
            }
            Err(_) => Local::now().naive_local(),
        }
    }
}

//! Sampler: turns source results into readings and snapshots
//!
//! The sampler is the only owner of the [`History`]. Each [`Sampler::tick`]
//! produces exactly one reading (scraped, or simulated when the source
//! fails), appends it, and captures an immutable [`Snapshot`].
//!
//! ```text
//! tick ─▶ produce_reading ─▶ source.fetch() ──ok──▶ Reading(Scraped)
//!                                   │
//!                                  err ─▶ FallbackGenerator ─▶ Reading(Simulated)
//!      ─▶ History::push ─▶ Snapshot::capture
//! ```

use crate::clock::Clock;
use crate::history::History;
use crate::snapshot::Snapshot;
use crate::source::{FallbackGenerator, TemperatureSource};
use crate::types::{Reading, ReadingSource, TickId};
use std::time::{Duration, Instant};

/// Counters describing what the sampler has done so far
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SamplerStats {
    /// Number of ticks run
    pub ticks: u64,
    /// Readings obtained from the source
    pub scraped_count: u64,
    /// Readings substituted by the fallback
    pub simulated_count: u64,
    /// Most recent fetch failure, cleared by the next success
    pub last_fetch_error: Option<String>,
    /// Wall time spent in the last tick
    pub last_tick_duration: Option<Duration>,
}

/// Produces readings and owns the rolling history
pub struct Sampler {
    source: Box<dyn TemperatureSource>,
    fallback: FallbackGenerator,
    history: History,
    clock: Box<dyn Clock>,
    stats: SamplerStats,
}

impl Sampler {
    pub fn new(
        source: Box<dyn TemperatureSource>,
        fallback: FallbackGenerator,
        history: History,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            source,
            fallback,
            history,
            clock,
            stats: SamplerStats::default(),
        }
    }

    /// Obtain one reading; never fails
    ///
    /// Fetch errors are logged and replaced with a simulated value.
    pub fn produce_reading(&mut self) -> Reading {
        let (celsius, source) = match self.source.fetch() {
            Ok(celsius) => {
                tracing::debug!("Fetched {:.1} °C from {}", celsius, self.source.describe());
                self.stats.scraped_count += 1;
                self.stats.last_fetch_error = None;
                (celsius, ReadingSource::Scraped)
            }
            Err(e) => {
                let celsius = self.fallback.generate();
                tracing::debug!("Fetch failed ({}), simulating {:.1} °C", e, celsius);
                self.stats.simulated_count += 1;
                self.stats.last_fetch_error = Some(e.to_string());
                (celsius, ReadingSource::Simulated)
            }
        };

        Reading::new(celsius, self.clock.local_time(), source)
    }

    /// Run one cycle: produce, append, capture
    pub fn tick(&mut self) -> Snapshot {
        let started = Instant::now();

        let reading = self.produce_reading();
        if let Some(evicted) = self.history.push(reading.clone()) {
            tracing::trace!("Evicted reading from {}", evicted.timestamp());
        }

        let tick_id = self.last_tick().next();
        self.stats.ticks = tick_id.0;
        let snapshot = Snapshot::capture(tick_id, &self.history, reading);

        self.stats.last_tick_duration = Some(started.elapsed());
        snapshot
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn stats(&self) -> &SamplerStats {
        &self.stats
    }

    /// Tick id of the last completed tick
    pub fn last_tick(&self) -> TickId {
        TickId(self.stats.ticks)
    }

    /// Description of the underlying source
    pub fn describe_source(&self) -> String {
        self.source.describe()
    }
}

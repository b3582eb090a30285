//! Memoized, pull-based snapshot cache
//!
//! The cache holds the last [`Snapshot`] and a deadline. Reads before the
//! deadline return the same `Arc`; the first read after it (or after an
//! explicit [`SnapshotCache::invalidate`]) runs one [`Sampler::tick`].
//! Nothing happens between reads, so a dashboard nobody looks at never
//! fetches.

use crate::clock::Clock;
use crate::sampler::Sampler;
use crate::snapshot::Snapshot;
use crate::types::TickId;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Lazily recomputed snapshot
pub struct SnapshotCache {
    sampler: Sampler,
    interval: Duration,
    clock: Box<dyn Clock>,
    current: Option<Arc<Snapshot>>,
    computed_at: Option<Instant>,
    invalidated: bool,
}

impl SnapshotCache {
    pub fn new(sampler: Sampler, interval: Duration, clock: Box<dyn Clock>) -> Self {
        Self {
            sampler,
            interval,
            clock,
            current: None,
            computed_at: None,
            invalidated: false,
        }
    }

    /// Check if the next read will recompute
    pub fn is_stale(&self) -> bool {
        match (&self.current, self.computed_at) {
            (Some(_), Some(at)) => {
                self.invalidated || self.clock.now().saturating_duration_since(at) >= self.interval
            }
            _ => true,
        }
    }

    /// Current snapshot, recomputing first if stale
    pub fn read(&mut self) -> Arc<Snapshot> {
        if let (false, Some(snapshot)) = (self.is_stale(), &self.current) {
            tracing::trace!("Snapshot cache hit ({})", snapshot.tick_id());
            return Arc::clone(snapshot);
        }

        let snapshot = Arc::new(self.sampler.tick());
        tracing::debug!(
            "Recomputed snapshot {} ({} readings)",
            snapshot.tick_id(),
            snapshot.len()
        );

        self.current = Some(Arc::clone(&snapshot));
        self.computed_at = Some(self.clock.now());
        self.invalidated = false;
        snapshot
    }

    /// Mark the snapshot stale; the next read recomputes
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    /// Tick id of the memoized snapshot
    pub fn current_tick(&self) -> TickId {
        self.current
            .as_ref()
            .map(|s| s.tick_id())
            .unwrap_or(TickId::NONE)
    }

    /// Time left until the memoized snapshot expires
    ///
    /// `None` when nothing is memoized or it is already stale.
    pub fn time_until_stale(&self) -> Option<Duration> {
        if self.is_stale() {
            return None;
        }
        let at = self.computed_at?;
        let elapsed = self.clock.now().saturating_duration_since(at);
        Some(self.interval.saturating_sub(elapsed))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::history::History;
    use crate::source::{FallbackGenerator, MockTemperatureSource};

    fn cache_with(source: MockTemperatureSource, clock: &ManualClock) -> SnapshotCache {
        let sampler = Sampler::new(
            Box::new(source),
            FallbackGenerator::seeded(15.0, 25.0, 11),
            History::with_capacity(5),
            Box::new(clock.clone()),
        );
        SnapshotCache::new(sampler, Duration::from_secs(30), Box::new(clock.clone()))
    }

    fn counting_source(times: usize) -> MockTemperatureSource {
        let mut source = MockTemperatureSource::new();
        source.expect_fetch().times(times).returning(|| Ok(20.0));
        source.expect_describe().returning(|| "mock".to_string());
        source
    }

    #[test]
    fn test_reads_within_interval_are_memoized() {
        let clock = ManualClock::default();
        let mut cache = cache_with(counting_source(1), &clock);

        assert!(cache.is_stale());
        assert_eq!(cache.current_tick(), TickId::NONE);

        let first = cache.read();
        clock.advance(Duration::from_secs(10));
        let second = cache.read();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.current_tick(), TickId(1));
        assert_eq!(cache.time_until_stale(), Some(Duration::from_secs(20)));
    }

    #[test]
    fn test_recompute_after_interval() {
        let clock = ManualClock::default();
        let mut cache = cache_with(counting_source(2), &clock);

        let first = cache.read();
        clock.advance(Duration::from_secs(30));
        assert!(cache.is_stale());
        assert_eq!(cache.time_until_stale(), None);

        let second = cache.read();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.tick_id(), TickId(2));
        assert_eq!(second.len(), 2);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn test_no_fetch_without_reads() {
        let clock = ManualClock::default();
        let cache = cache_with(counting_source(0), &clock);
        clock.advance(Duration::from_secs(600));
        assert_eq!(cache.current_tick(), TickId::NONE);
    }

    #[test]
    fn test_invalidate_forces_recompute() {
        let clock = ManualClock::default();
        let mut cache = cache_with(counting_source(2), &clock);

        let first = cache.read();
        cache.invalidate();
        assert!(cache.is_stale());
        let second = cache.read();

        assert_eq!(first.tick_id(), TickId(1));
        assert_eq!(second.tick_id(), TickId(2));
        assert!(!cache.is_stale());
    }
}

//! Test data builders for creating test objects

use livetemp_rs::cache::SnapshotCache;
use livetemp_rs::clock::ManualClock;
use livetemp_rs::history::History;
use livetemp_rs::sampler::Sampler;
use livetemp_rs::source::{FallbackGenerator, TemperatureSource};
use std::time::Duration;

/// Fixed start time for test clocks
pub fn test_clock() -> ManualClock {
    let start = chrono::NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid test date");
    ManualClock::starting_at(start)
}

/// Builder for a sampler and cache around any source
pub struct PipelineBuilder<S> {
    source: S,
    capacity: usize,
    interval: Duration,
    seed: u64,
    clock: ManualClock,
}

impl<S: TemperatureSource + 'static> PipelineBuilder<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            capacity: 5,
            interval: Duration::from_secs(30),
            seed: 42,
            clock: test_clock(),
        }
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn clock(mut self, clock: ManualClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn build_sampler(self) -> Sampler {
        Sampler::new(
            Box::new(self.source),
            FallbackGenerator::seeded(15.0, 25.0, self.seed),
            History::with_capacity(self.capacity),
            Box::new(self.clock),
        )
    }

    pub fn build_cache(self) -> SnapshotCache {
        let interval = self.interval;
        let clock = self.clock.clone();
        SnapshotCache::new(self.build_sampler(), interval, Box::new(clock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::mock_helpers::ScriptedSource;

    #[test]
    fn test_pipeline_builder() {
        let sampler = PipelineBuilder::new(ScriptedSource::always_failing())
            .capacity(3)
            .build_sampler();
        assert_eq!(sampler.history().capacity(), 3);
        assert!(sampler.history().is_empty());
    }
}

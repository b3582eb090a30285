//! Rolling history of recent readings
//!
//! [`History`] is a fixed-capacity FIFO ring buffer. When full, pushing a
//! new reading evicts the oldest one. It is owned by the sampler and only
//! ever handed out as a copy inside a snapshot.

use crate::types::Reading;
use std::collections::VecDeque;

/// Default number of readings retained
pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

/// Largest capacity accepted from configuration
pub const MAX_HISTORY_CAPACITY: usize = 10_000;

/// Readings allocated up front; larger buffers grow as they fill
const PREALLOCATED_READINGS: usize = 64;

/// Fixed-capacity ring buffer of readings, oldest first
#[derive(Debug, Clone)]
pub struct History {
    readings: VecDeque<Reading>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    /// Create an empty history; a capacity of 0 is treated as 1
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            readings: VecDeque::with_capacity(capacity.min(PREALLOCATED_READINGS)),
            capacity,
        }
    }

    /// Append a reading, returning the evicted one if the buffer was full
    pub fn push(&mut self, reading: Reading) -> Option<Reading> {
        let evicted = if self.readings.len() >= self.capacity {
            self.readings.pop_front()
        } else {
            None
        };
        self.readings.push_back(reading);
        evicted
    }

    /// Maximum number of readings retained
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Check if the next push will evict
    pub fn is_full(&self) -> bool {
        self.readings.len() >= self.capacity
    }

    /// Most recent reading
    pub fn latest(&self) -> Option<&Reading> {
        self.readings.back()
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.readings.iter()
    }

    /// Copy of the readings, oldest first
    pub fn to_vec(&self) -> Vec<Reading> {
        self.readings.iter().cloned().collect()
    }
}

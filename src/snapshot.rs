//! Immutable per-tick snapshots
//!
//! A [`Snapshot`] is produced once per tick and shared read-only with every
//! view. It bundles the history as of that tick, a column-oriented
//! projection of it ([`ReadingTable`]), and the reading just appended.

use crate::history::History;
use crate::types::{Reading, ReadingSource, TemperatureUnit, TickId};

/// Column-oriented copy of the history; row `i` is history entry `i`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingTable {
    pub timestamps: Vec<String>,
    pub celsius: Vec<f64>,
    pub fahrenheit: Vec<f64>,
    pub sources: Vec<ReadingSource>,
}

impl ReadingTable {
    /// Project readings into columns
    pub fn from_readings<'a>(readings: impl IntoIterator<Item = &'a Reading>) -> Self {
        let mut table = Self::default();
        for reading in readings {
            table.timestamps.push(reading.timestamp().to_string());
            table.celsius.push(reading.celsius());
            table.fahrenheit.push(reading.fahrenheit());
            table.sources.push(reading.source());
        }
        table
    }

    /// Temperature column for a unit
    pub fn column(&self, unit: TemperatureUnit) -> &[f64] {
        match unit {
            TemperatureUnit::Celsius => &self.celsius,
            TemperatureUnit::Fahrenheit => &self.fahrenheit,
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// The output of one tick
#[derive(Debug, Clone)]
pub struct Snapshot {
    tick_id: TickId,
    readings: Vec<Reading>,
    table: ReadingTable,
    latest: Reading,
}

impl Snapshot {
    /// Capture the history right after `latest` was appended to it
    pub fn capture(tick_id: TickId, history: &History, latest: Reading) -> Self {
        let readings = history.to_vec();
        let table = ReadingTable::from_readings(&readings);
        Self {
            tick_id,
            readings,
            table,
            latest,
        }
    }

    pub fn tick_id(&self) -> TickId {
        self.tick_id
    }

    /// History as of this tick, oldest first
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Tabular projection of the history
    pub fn table(&self) -> &ReadingTable {
        &self.table
    }

    /// The reading appended by this tick
    pub fn latest(&self) -> &Reading {
        &self.latest
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Number of readings in the window that were simulated
    pub fn simulated_count(&self) -> usize {
        self.readings
            .iter()
            .filter(|r| r.source().is_simulated())
            .count()
    }
}

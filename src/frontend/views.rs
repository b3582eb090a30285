//! Pure view derivations
//!
//! Every value the dashboard shows is computed here from a [`Snapshot`]
//! and the selected [`TemperatureUnit`]. None of these functions touch the
//! feed, so switching units only re-runs them over the snapshot already
//! held by the UI.

use crate::analysis::LinearFit;
use crate::config::LocationConfig;
use crate::snapshot::Snapshot;
use crate::types::{TemperatureUnit, TIME_OF_DAY_FORMAT};
use std::time::Duration;

/// Header of the timestamp column
pub const TIMESTAMP_HEADER: &str = "timestamp";

/// Card above the readings table
pub const TABLE_CARD_TITLE: &str = "Temperature Readings";

/// Card around the trend plot
pub const TREND_CARD_TITLE: &str = "Temperature Trend";

/// Legend entry of the fitted line
pub const REGRESSION_LEGEND: &str = "Regression Line";

/// Numeric readout of the latest reading, e.g. `26.5 °C`
pub fn readout(snapshot: &Snapshot, unit: TemperatureUnit) -> String {
    format!(
        "{:.1} {}",
        snapshot.latest().temperature(unit),
        unit.symbol()
    )
}

/// Timestamp of the latest reading
pub fn timestamp(snapshot: &Snapshot) -> &str {
    snapshot.latest().timestamp()
}

/// Two-column table over the history
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub header: [String; 2],
    pub rows: Vec<[String; 2]>,
}

/// Build the readings table, oldest row first
pub fn table(snapshot: &Snapshot, unit: TemperatureUnit) -> TableView {
    let projection = snapshot.table();
    let rows = projection
        .timestamps
        .iter()
        .zip(projection.column(unit))
        .map(|(ts, value)| [ts.clone(), format!("{:.1}", value)])
        .collect();

    TableView {
        header: [TIMESTAMP_HEADER.to_string(), unit.column_label().to_string()],
        rows,
    }
}

/// Scatter plot of the history with its trend line
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub title: String,
    pub y_label: String,
    /// `[index, value]` per reading
    pub points: Vec<[f64; 2]>,
    /// Regression line evaluated at each index; `None` below two readings
    pub trend: Option<Vec<[f64; 2]>>,
    pub fit: Option<LinearFit>,
    /// Full timestamp per point
    pub timestamps: Vec<String>,
    /// `HH:MM:SS` label per point, used on the x axis
    pub time_labels: Vec<String>,
}

impl ChartView {
    /// Axis label for an x value, if it lands on a reading
    pub fn time_label_at(&self, x: f64) -> Option<&str> {
        if x < 0.0 || x.fract().abs() > 1e-6 {
            return None;
        }
        self.time_labels.get(x.round() as usize).map(String::as_str)
    }
}

/// Build the trend chart
pub fn chart(snapshot: &Snapshot, unit: TemperatureUnit) -> ChartView {
    let values = snapshot.table().column(unit);
    let points: Vec<[f64; 2]> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| [i as f64, v])
        .collect();

    let fit = LinearFit::fit(values);
    let trend = fit.map(|f| f.line_points(values.len()));

    let readings = snapshot.readings();
    ChartView {
        title: format!("Temperature Readings ({})", unit.column_label()),
        y_label: unit.column_label().to_string(),
        points,
        trend,
        fit,
        timestamps: readings.iter().map(|r| r.timestamp().to_string()).collect(),
        time_labels: readings
            .iter()
            .map(|r| r.captured_at().format(TIME_OF_DAY_FORMAT).to_string())
            .collect(),
    }
}

/// Static marker at the configured location
#[derive(Debug, Clone, PartialEq)]
pub struct LocationView {
    pub title: String,
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    /// `[lon_min, lat_min]`
    pub min: [f64; 2],
    /// `[lon_max, lat_max]`
    pub max: [f64; 2],
}

/// Build the location view from configuration only
pub fn location(config: &LocationConfig) -> LocationView {
    // Degrees of longitude on screen halve with each zoom level
    let lon_span = 360.0 / 2f64.powi(i32::from(config.zoom.min(20)));
    let lat_span = lon_span / 2.0;

    LocationView {
        title: format!("{} Map", config.city),
        label: format!("{}, {}", config.city, config.region),
        latitude: config.latitude,
        longitude: config.longitude,
        min: [
            config.longitude - lon_span / 2.0,
            config.latitude - lat_span / 2.0,
        ],
        max: [
            config.longitude + lon_span / 2.0,
            config.latitude + lat_span / 2.0,
        ],
    }
}

/// Sidebar heading
pub fn heading(config: &LocationConfig) -> String {
    format!("{} Weather Explorer", config.city)
}

/// Caption under the current temperature
pub fn readout_caption(config: &LocationConfig) -> String {
    format!("in {}", config.city)
}

/// Sidebar description line
pub fn description(config: &LocationConfig) -> String {
    format!(
        "Real-time temperature readings in {}, {}.",
        config.city, config.region
    )
}

/// Countdown text for the status bar
pub fn countdown(remaining: Option<Duration>) -> String {
    match remaining {
        Some(d) if d > Duration::ZERO => {
            let secs = d.as_secs() + u64::from(d.subsec_nanos() > 0);
            format!("Next refresh in {}s", secs)
        }
        _ => "Refreshing…".to_string(),
    }
}

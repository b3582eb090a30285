//! # LiveTemp-RS: Live City Temperature Dashboard
//!
//! A desktop dashboard that polls a forecast page for the current
//! temperature of one city, keeps a short rolling history, and shows it as
//! a readout, a table, a trend plot and a location marker.
//!
//! ## Architecture
//!
//! - **Sampling**: [`sampler::Sampler`] turns source results into readings,
//!   substituting simulated values when the fetch fails, and owns the
//!   rolling [`history::History`]
//! - **Caching**: [`cache::SnapshotCache`] recomputes at most once per
//!   interval, and only when read
//! - **Backend**: [`backend::FeedWorker`] owns the cache on its own thread
//! - **Frontend**: eframe/egui dashboard deriving every view from the
//!   latest immutable [`snapshot::Snapshot`]
//! - **Communication**: Crossbeam channels for thread-safe data transfer
//!
//! ## Configuration
//!
//! An optional TOML file is read from `LIVETEMP_CONFIG` or from the
//! platform data directory under `dev.livetemp.livetemp-rs`:
//!
//! - **Linux**: `~/.local/share/dev.livetemp.livetemp-rs/config.toml`
//! - **macOS**: `~/Library/Application Support/dev.livetemp.livetemp-rs/config.toml`
//! - **Windows**: `%APPDATA%\dev.livetemp.livetemp-rs\config.toml`
//!
//! ## Example
//!
//! ```ignore
//! use livetemp_rs::{backend::FeedBackend, config::AppConfig, frontend::LiveTempApp};
//!
//! fn main() -> eframe::Result<()> {
//!     let config = AppConfig::load_or_default();
//!     let (bridge, handle, _running) = FeedBackend::spawn(&config).expect("feed");
//!
//!     eframe::run_native(
//!         "LiveTemp-RS",
//!         eframe::NativeOptions::default(),
//!         Box::new(|cc| Ok(Box::new(LiveTempApp::new(cc, bridge, config)))),
//!     )
//! }
//! ```

pub mod analysis;
pub mod backend;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod frontend;
pub mod history;
pub mod sampler;
pub mod snapshot;
pub mod source;
pub mod types;

// Re-export commonly used types
pub use analysis::LinearFit;
pub use backend::{FeedBackend, FeedBridge, FeedCommand, FeedMessage, FeedStats, SendStatus};
pub use cache::SnapshotCache;
pub use config::{AppConfig, RuntimeSettings};
pub use error::{FetchError, LiveTempError, Result};
pub use frontend::LiveTempApp;
pub use sampler::Sampler;
pub use snapshot::{ReadingTable, Snapshot};
pub use source::{FallbackGenerator, TemperatureSource};
pub use types::{Reading, ReadingSource, TemperatureUnit, TickId};

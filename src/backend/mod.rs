//! Backend module for the temperature feed
//!
//! This module runs the sampling pipeline in a separate thread to keep the
//! UI responsive while a slow forecast server is being fetched. It uses
//! crossbeam channels for thread-safe communication with the frontend.
//!
//! # Architecture
//!
//! - [`FeedCommand`] - Messages sent from UI to backend (read, refresh, shutdown)
//! - [`FeedMessage`] - Messages sent from backend to UI (snapshots, stats)
//! - [`FeedBridge`] - UI-side handle for sending commands and receiving messages
//! - [`FeedWorker`] - Worker loop that owns the [`SnapshotCache`]
//! - [`FeedBackend`] - Builds the pipeline from configuration and spawns the worker
//!
//! # Example
//!
//! ```ignore
//! use livetemp_rs::backend::{FeedBackend, FeedMessage};
//! use livetemp_rs::config::AppConfig;
//!
//! let config = AppConfig::default();
//! let (bridge, handle, running) = FeedBackend::spawn(&config)?;
//!
//! // Each frame: ask for anything newer than what we hold
//! bridge.request(held_tick);
//! for msg in bridge.drain() {
//!     if let FeedMessage::Snapshot(snapshot) = msg {
//!         held_tick = snapshot.tick_id();
//!     }
//! }
//! ```

pub mod worker;

pub use worker::FeedWorker;

use crate::cache::SnapshotCache;
use crate::clock::SystemClock;
use crate::config::AppConfig;
use crate::error::{LiveTempError, Result};
use crate::history::History;
use crate::sampler::{Sampler, SamplerStats};
use crate::snapshot::Snapshot;
use crate::source::{self, FallbackGenerator};
use crate::types::TickId;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Channel capacity for commands (UI → worker).
const CMD_CHANNEL_CAPACITY: usize = 64;
/// Channel capacity for messages (worker → UI).
const MSG_CHANNEL_CAPACITY: usize = 64;

/// Message sent from the UI to the feed worker
#[derive(Debug, Clone, PartialEq)]
pub enum FeedCommand {
    /// Ask for the current snapshot; answered only if newer than `seen`
    Read { seen: TickId },
    /// Invalidate the memoized snapshot and recompute now
    Refresh,
    /// Shutdown the worker
    Shutdown,
}

/// Statistics about the feed, sent after every recompute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedStats {
    /// Number of ticks run
    pub ticks: u64,
    /// Readings obtained from the source
    pub scraped_count: u64,
    /// Readings substituted by the fallback
    pub simulated_count: u64,
    /// Most recent fetch failure, if the last fetch failed
    pub last_fetch_error: Option<String>,
    /// Time spent in the last tick
    pub last_tick_duration: Option<Duration>,
    /// Description of the configured source
    pub source: String,
    /// Messages dropped because the UI queue was full
    pub dropped_messages: u64,
    /// Time left until the snapshot goes stale, as of sending
    pub next_refresh: Option<Duration>,
}

impl FeedStats {
    pub fn from_sampler(stats: &SamplerStats, source: String, dropped_messages: u64) -> Self {
        Self {
            ticks: stats.ticks,
            scraped_count: stats.scraped_count,
            simulated_count: stats.simulated_count,
            last_fetch_error: stats.last_fetch_error.clone(),
            last_tick_duration: stats.last_tick_duration,
            source,
            dropped_messages,
            next_refresh: None,
        }
    }
}

/// Message sent from the feed worker to the UI
#[derive(Debug, Clone)]
pub enum FeedMessage {
    /// A snapshot newer than the one the UI reported holding
    Snapshot(Arc<Snapshot>),
    /// Statistics update
    Stats(FeedStats),
    /// Worker is shutting down
    Shutdown,
}

/// Outcome of a non-blocking command send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendStatus {
    /// Command queued
    Sent,
    /// Queue full; the worker is busy and will answer queued reads
    Busy,
    /// The worker is gone
    Disconnected,
}

impl SendStatus {
    pub fn is_sent(&self) -> bool {
        matches!(self, SendStatus::Sent)
    }

    pub fn is_disconnected(&self) -> bool {
        matches!(self, SendStatus::Disconnected)
    }
}

impl<T> From<std::result::Result<(), TrySendError<T>>> for SendStatus {
    fn from(result: std::result::Result<(), TrySendError<T>>) -> Self {
        match result {
            Ok(()) => SendStatus::Sent,
            Err(TrySendError::Full(_)) => SendStatus::Busy,
            Err(TrySendError::Disconnected(_)) => SendStatus::Disconnected,
        }
    }
}

/// UI-side handle for communicating with the feed worker
pub struct FeedBridge {
    pub cmd_tx: Sender<FeedCommand>,
    pub msg_rx: Receiver<FeedMessage>,
}

impl FeedBridge {
    /// Create a new bridge pair: `(bridge_for_ui, cmd_rx, msg_tx)`.
    ///
    /// The worker thread owns `cmd_rx` and `msg_tx`.
    pub fn new() -> (Self, Receiver<FeedCommand>, Sender<FeedMessage>) {
        let (cmd_tx, cmd_rx) = bounded(CMD_CHANNEL_CAPACITY);
        let (msg_tx, msg_rx) = bounded(MSG_CHANNEL_CAPACITY);
        (Self { cmd_tx, msg_rx }, cmd_rx, msg_tx)
    }

    /// Drain all pending messages.
    pub fn drain(&self) -> Vec<FeedMessage> {
        let mut msgs = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            msgs.push(msg);
        }
        msgs
    }

    /// Try to receive a single message without blocking.
    pub fn try_recv(&self) -> Option<FeedMessage> {
        self.msg_rx.try_recv().ok()
    }

    /// Ask for a snapshot newer than `seen`
    ///
    /// Never blocks. A full queue means the worker is busy fetching and
    /// will answer the reads already queued.
    pub fn request(&self, seen: TickId) -> SendStatus {
        self.cmd_tx.try_send(FeedCommand::Read { seen }).into()
    }

    pub fn refresh(&self) -> SendStatus {
        self.cmd_tx.try_send(FeedCommand::Refresh).into()
    }

    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(FeedCommand::Shutdown);
    }
}

/// Builds the feed pipeline and runs it on a worker thread
pub struct FeedBackend;

impl FeedBackend {
    /// Build the sampler and cache described by the configuration
    pub fn build_cache(config: &AppConfig) -> Result<SnapshotCache> {
        let source = source::from_config(&config.source)?;
        let sampling = &config.sampling;
        let fallback = match sampling.fallback_seed {
            Some(seed) => {
                FallbackGenerator::seeded(sampling.fallback_min_c, sampling.fallback_max_c, seed)
            }
            None => FallbackGenerator::new(sampling.fallback_min_c, sampling.fallback_max_c),
        };

        let sampler = Sampler::new(
            source,
            fallback,
            History::with_capacity(sampling.history_capacity),
            Box::new(SystemClock),
        );
        Ok(SnapshotCache::new(
            sampler,
            sampling.interval(),
            Box::new(SystemClock),
        ))
    }

    /// Spawn the worker for the given configuration
    pub fn spawn(config: &AppConfig) -> Result<(FeedBridge, JoinHandle<()>, Arc<AtomicBool>)> {
        let cache = Self::build_cache(config)?;
        tracing::info!(
            "Starting feed: {} every {:?}, keeping {} readings",
            cache.sampler().describe_source(),
            cache.interval(),
            config.sampling.history_capacity
        );
        Self::spawn_with_cache(cache)
    }

    /// Spawn the worker around an already built cache
    pub fn spawn_with_cache(
        cache: SnapshotCache,
    ) -> Result<(FeedBridge, JoinHandle<()>, Arc<AtomicBool>)> {
        let (bridge, cmd_rx, msg_tx) = FeedBridge::new();
        let running = Arc::new(AtomicBool::new(true));
        let worker_running = Arc::clone(&running);

        let handle = std::thread::Builder::new()
            .name("feed-worker".to_string())
            .spawn(move || {
                let mut worker = FeedWorker::new(cache, cmd_rx, msg_tx, worker_running);
                worker.run();
            })
            .map_err(|e| {
                running.store(false, Ordering::SeqCst);
                LiveTempError::Io(e).with_context("Failed to spawn feed worker")
            })?;

        Ok((bridge, handle, running))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceMode;

    #[test]
    fn test_bridge_request_is_non_blocking() {
        let (bridge, cmd_rx, _msg_tx) = FeedBridge::new();
        for _ in 0..CMD_CHANNEL_CAPACITY {
            assert_eq!(bridge.request(TickId::NONE), SendStatus::Sent);
        }
        // Queue full: reported, not blocked
        assert_eq!(bridge.request(TickId::NONE), SendStatus::Busy);
        assert_eq!(cmd_rx.len(), CMD_CHANNEL_CAPACITY);
    }

    #[test]
    fn test_bridge_reports_dead_worker() {
        let (bridge, cmd_rx, msg_tx) = FeedBridge::new();
        drop(cmd_rx);
        drop(msg_tx);

        assert!(bridge.request(TickId::NONE).is_disconnected());
        assert!(bridge.refresh().is_disconnected());
    }

    #[test]
    fn test_build_cache_survives_extreme_fallback_range() {
        let config = AppConfig::from_toml_str(
            "[source]\nmode = \"simulated\"\n[sampling]\nfallback_min_c = -1.0e308\nfallback_max_c = 1.0e308\nhistory_capacity = 9223372036854775807",
        )
        .unwrap();

        let mut cache = FeedBackend::build_cache(&config).unwrap();
        let snapshot = cache.read();
        let celsius = snapshot.latest().celsius();
        assert!((15.0..=25.0).contains(&celsius), "{} out of range", celsius);
    }

    #[test]
    fn test_bridge_drain() {
        let (bridge, _cmd_rx, msg_tx) = FeedBridge::new();
        msg_tx.send(FeedMessage::Stats(FeedStats::default())).unwrap();
        msg_tx.send(FeedMessage::Shutdown).unwrap();

        let msgs = bridge.drain();
        assert_eq!(msgs.len(), 2);
        assert!(matches!(msgs[1], FeedMessage::Shutdown));
        assert!(bridge.try_recv().is_none());
    }

    #[test]
    fn test_build_cache_simulated_mode() {
        let mut config = AppConfig::default();
        config.source.mode = SourceMode::Simulated;
        config.sampling.history_capacity = 3;
        config.sampling.fallback_seed = Some(1);

        let mut cache = FeedBackend::build_cache(&config).unwrap();
        let snapshot = cache.read();
        assert!(snapshot.latest().source().is_simulated());
        assert_eq!(cache.interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_spawn_and_shutdown() {
        let mut config = AppConfig::default();
        config.source.mode = SourceMode::Simulated;

        let (bridge, handle, running) = FeedBackend::spawn(&config).unwrap();
        bridge.shutdown();
        handle.join().unwrap();

        assert!(!running.load(Ordering::SeqCst));
        let msgs = bridge.drain();
        assert!(matches!(msgs.last(), Some(FeedMessage::Shutdown)));
    }
}

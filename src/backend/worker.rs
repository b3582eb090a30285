//! Feed Worker Thread Implementation
//!
//! This module contains the worker loop that runs in a separate thread and
//! owns the sampling pipeline. It communicates with the UI thread through
//! crossbeam channels.
//!
//! # Responsibilities
//!
//! - **Command processing**: Answers snapshot reads and refresh requests
//! - **Recompute**: Lets the [`SnapshotCache`] decide when a tick is due
//! - **Statistics**: Reports scrape/simulate counts after every tick
//!
//! # Blocking
//!
//! The worker waits on the command channel with a short timeout rather
//! than polling, so an idle dashboard costs nothing. A pending HTTP fetch
//! blocks this thread only; reads that arrive meanwhile are coalesced into
//! one answer.

use crate::backend::{FeedCommand, FeedMessage, FeedStats};
use crate::cache::SnapshotCache;
use crate::types::TickId;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How often the loop wakes to check the running flag
const RUNNING_CHECK_INTERVAL: Duration = Duration::from_millis(250);

/// Worker that owns the snapshot cache
pub struct FeedWorker {
    /// Memoized sampler
    cache: SnapshotCache,
    /// Command receiver from the UI
    command_rx: Receiver<FeedCommand>,
    /// Message sender to the UI
    message_tx: Sender<FeedMessage>,
    /// Running flag
    running: Arc<AtomicBool>,
    /// Read to answer after the current batch of commands
    pending_read: Option<TickId>,
    /// Messages dropped on a full queue
    dropped_messages: u64,
}

impl FeedWorker {
    /// Create a new feed worker
    pub fn new(
        cache: SnapshotCache,
        command_rx: Receiver<FeedCommand>,
        message_tx: Sender<FeedMessage>,
        running: Arc<AtomicBool>,
    ) -> Self {
        Self {
            cache,
            command_rx,
            message_tx,
            running,
            pending_read: None,
            dropped_messages: 0,
        }
    }

    /// Run the main worker loop
    pub fn run(&mut self) {
        tracing::info!("Feed worker started");

        while self.running.load(Ordering::SeqCst) {
            match self.command_rx.recv_timeout(RUNNING_CHECK_INTERVAL) {
                Ok(cmd) => {
                    self.handle_command(cmd);
                    self.process_commands();
                    self.answer_pending_read();
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::debug!("Command channel closed");
                    self.running.store(false, Ordering::SeqCst);
                }
            }
        }

        let _ = self.message_tx.send(FeedMessage::Shutdown);
        tracing::info!("Feed worker stopped after {} ticks", self.cache.current_tick().0);
    }

    /// Drain commands that are already queued
    fn process_commands(&mut self) {
        while self.running.load(Ordering::SeqCst) {
            match self.command_rx.try_recv() {
                Ok(cmd) => self.handle_command(cmd),
                Err(_) => break,
            }
        }
    }

    /// Handle a single command
    fn handle_command(&mut self, cmd: FeedCommand) {
        match cmd {
            FeedCommand::Read { seen } => {
                self.pending_read = Some(seen);
            }
            FeedCommand::Refresh => {
                tracing::debug!("Refresh requested");
                self.cache.invalidate();
                self.pending_read.get_or_insert(TickId::NONE);
            }
            FeedCommand::Shutdown => {
                self.running.store(false, Ordering::SeqCst);
                self.pending_read = None;
            }
        }
    }

    /// Read through the cache and reply if the UI is behind
    fn answer_pending_read(&mut self) {
        let Some(seen) = self.pending_read.take() else {
            return;
        };
        if !self.running.load(Ordering::SeqCst) {
            return;
        }

        let before = self.cache.current_tick();
        let snapshot = self.cache.read();

        if snapshot.tick_id() != before {
            self.send_stats();
        }
        if snapshot.tick_id() != seen {
            self.try_send_message(FeedMessage::Snapshot(snapshot));
        }
    }

    /// Send statistics to UI
    fn send_stats(&mut self) {
        let sampler = self.cache.sampler();
        let stats = FeedStats {
            next_refresh: self.cache.time_until_stale(),
            ..FeedStats::from_sampler(
                sampler.stats(),
                sampler.describe_source(),
                self.dropped_messages,
            )
        };
        self.try_send_message(FeedMessage::Stats(stats));
    }

    /// Try to send a message, counting it as dropped if the queue is full
    fn try_send_message(&mut self, msg: FeedMessage) {
        if self.message_tx.try_send(msg).is_err() {
            self.dropped_messages += 1;
        }
    }
}

//! Frontend module for the LiveTemp-RS UI
//!
//! This module contains the egui-based dashboard. All displayed values are
//! derived from the latest [`Snapshot`] received from the feed worker by
//! the pure functions in [`views`]; the frontend never mutates readings.
//!
//! # Architecture
//!
//! - [`LiveTempApp`] - main application implementing [`eframe::App`]
//! - [`views`] - pure snapshot → view derivations (unit tested without a GUI)
//! - [`panels`] - sidebar controls, readout cards, readings table
//! - [`plot`] - trend scatter and location marker plots
//! - [`status_bar`] - bottom bar with feed source and counts
//! - [`widgets`] - small reusable widgets
//!
//! # Update Loop
//!
//! Each frame the app drains worker messages, asks for anything newer
//! than the snapshot it holds, and schedules the next repaint within one
//! second so the refresh timer is observed even when the window is idle.

pub mod panels;
pub mod plot;
pub mod status_bar;
pub mod views;
pub mod widgets;

use crate::backend::{FeedBridge, FeedMessage, FeedStats, SendStatus};
use crate::config::{AppConfig, RuntimeSettings};
use crate::snapshot::Snapshot;
use crate::types::TickId;
use panels::{ControlsPanel, ReadingsTablePanel, ReadoutCards};
use plot::{LocationPlot, TrendPlot};
use status_bar::{render_status_bar, StatusBarContext};
use widgets::Card;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Upper bound between repaints while idle
const REPAINT_INTERVAL: Duration = Duration::from_secs(1);

/// Main application state
pub struct LiveTempApp {
    /// Bridge to the feed worker
    bridge: FeedBridge,
    /// Application configuration
    config: AppConfig,
    /// Runtime display settings
    settings: RuntimeSettings,
    /// Latest snapshot received
    snapshot: Option<Arc<Snapshot>>,
    /// When the latest statistics arrived
    stats_received_at: Option<Instant>,
    /// Latest feed statistics
    stats: FeedStats,
    /// Set once the worker reported shutdown
    worker_stopped: bool,
    trend_plot: TrendPlot,
    location_plot: LocationPlot,
}

impl LiveTempApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>, bridge: FeedBridge, config: AppConfig) -> Self {
        let visuals = if config.ui.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        cc.egui_ctx.set_visuals(visuals);

        let settings = RuntimeSettings::from_config(&config.ui);

        Self {
            bridge,
            config,
            settings,
            snapshot: None,
            stats_received_at: None,
            stats: FeedStats::default(),
            worker_stopped: false,
            trend_plot: TrendPlot::default(),
            location_plot: LocationPlot::default(),
        }
    }

    /// Tick id of the snapshot currently shown
    fn held_tick(&self) -> TickId {
        self.snapshot
            .as_ref()
            .map(|s| s.tick_id())
            .unwrap_or(TickId::NONE)
    }

    fn process_feed_messages(&mut self) -> bool {
        let messages = self.bridge.drain();
        let had_messages = !messages.is_empty();

        for msg in messages {
            match msg {
                FeedMessage::Snapshot(snapshot) => {
                    if snapshot.tick_id() > self.held_tick() {
                        tracing::debug!(
                            "Showing snapshot {} ({})",
                            snapshot.tick_id(),
                            snapshot.latest().source()
                        );
                        self.snapshot = Some(snapshot);
                    }
                }
                FeedMessage::Stats(stats) => {
                    self.stats = stats;
                    self.stats_received_at = Some(Instant::now());
                }
                FeedMessage::Shutdown => {
                    tracing::info!("Feed worker shutdown received");
                    self.worker_stopped = true;
                }
            }
        }

        had_messages
    }

    /// Time left until the worker's snapshot goes stale
    fn next_refresh(&self) -> Option<Duration> {
        let received = self.stats_received_at?;
        self.stats.next_refresh?.checked_sub(received.elapsed())
    }

    /// Note a command the worker can no longer receive
    fn observe_send(&mut self, status: SendStatus) {
        if status.is_disconnected() && !self.worker_stopped {
            tracing::warn!("Feed worker is gone, no further readings");
            self.worker_stopped = true;
        }
    }

    fn render_dashboard(&self, ui: &mut egui::Ui, snapshot: &Snapshot) {
        let unit = self.settings.unit;

        ReadoutCards::render(ui, snapshot, unit, &self.config.location);
        ui.add_space(8.0);
        ReadingsTablePanel::render(ui, &views::table(snapshot, unit));
        ui.add_space(8.0);

        let chart = views::chart(snapshot, unit);
        let location = views::location(&self.config.location);
        ui.columns(2, |columns| {
            Card::new(views::TREND_CARD_TITLE).show(&mut columns[0], |ui| {
                self.trend_plot
                    .render(ui, &chart, self.settings.show_trend_line);
            });
            Card::new(location.title.clone()).show(&mut columns[1], |ui| {
                self.location_plot.render(ui, &location);
            });
        });
    }
}

impl eframe::App for LiveTempApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let had_messages = self.process_feed_messages();

        if !self.worker_stopped {
            let status = self.bridge.request(self.held_tick());
            self.observe_send(status);
        }

        if had_messages {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(REPAINT_INTERVAL);
        }

        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(format!("Live {} Temperature", self.config.location.city));
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let status_ctx = StatusBarContext {
                snapshot: self.snapshot.as_deref(),
                stats: &self.stats,
                next_refresh: self.next_refresh(),
                worker_stopped: self.worker_stopped,
            };
            render_status_bar(ui, &status_ctx);
        });

        let action = egui::SidePanel::left("controls")
            .resizable(false)
            .default_width(220.0)
            .show(ctx, |ui| {
                ControlsPanel::render(ui, &mut self.settings, &self.config.location)
            })
            .inner;

        if action.refresh && !self.worker_stopped {
            let status = self.bridge.refresh();
            if status == SendStatus::Busy {
                tracing::warn!("Refresh request dropped, feed worker busy");
            }
            self.observe_send(status);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.snapshot.clone() {
                Some(snapshot) => self.render_dashboard(ui, &snapshot),
                None if self.worker_stopped => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.colored_label(egui::Color32::LIGHT_RED, "Temperature feed stopped");
                    });
                }
                None => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.spinner();
                        ui.label("Waiting for the first reading…");
                    });
                }
            });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        tracing::info!("Shutting down feed worker");
        self.bridge.shutdown();
    }
}

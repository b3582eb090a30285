//! Status bar panel: feed source, counts, and the last fetch error.

use egui::{Color32, RichText, Ui};

use crate::backend::FeedStats;
use crate::frontend::views;
use crate::frontend::widgets::{StatusIndicator, ValueDisplay};
use crate::snapshot::Snapshot;
use std::time::Duration;

/// Context needed to render the status bar.
pub struct StatusBarContext<'a> {
    pub snapshot: Option<&'a Snapshot>,
    pub stats: &'a FeedStats,
    pub next_refresh: Option<Duration>,
    pub worker_stopped: bool,
}

/// Render the status bar.
pub fn render_status_bar(ui: &mut Ui, ctx: &StatusBarContext<'_>) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        // === Source of the latest reading ===
        let indicator = match (ctx.worker_stopped, ctx.snapshot) {
            (true, _) => StatusIndicator::stopped(),
            (false, Some(snapshot)) => StatusIndicator::for_source(snapshot.latest().source()),
            (false, None) => StatusIndicator::waiting(),
        };
        ui.add(indicator.with_tooltip(ctx.stats.source.clone()));

        ui.separator();

        // === Tick ===
        let tick = ctx
            .snapshot
            .map(|s| s.tick_id().to_string())
            .unwrap_or_else(|| "-".to_string());
        ui.add(ValueDisplay::new("Tick", tick));

        ui.separator();

        // === Scraped / simulated counts ===
        ui.add(ValueDisplay::new("Scraped", ctx.stats.scraped_count.to_string()));
        let simulated_color = if ctx.stats.simulated_count > 0 {
            Color32::YELLOW
        } else {
            Color32::GRAY
        };
        ui.add(
            ValueDisplay::new("Simulated", ctx.stats.simulated_count.to_string())
                .with_color(simulated_color),
        );

        if let Some(duration) = ctx.stats.last_tick_duration {
            ui.separator();
            ui.add(ValueDisplay::from_f64("Fetch", duration.as_secs_f64() * 1000.0, 0).with_unit("ms"));
        }

        ui.separator();

        // === Countdown ===
        if !ctx.worker_stopped {
            ui.label(RichText::new(views::countdown(ctx.next_refresh)).small());
        }

        // === Last fetch error (right-aligned) ===
        if let Some(error) = &ctx.stats.last_fetch_error {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.colored_label(Color32::LIGHT_RED, RichText::new(error).small());
            });
        }
    });
}

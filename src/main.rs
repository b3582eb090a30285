//! LiveTemp-RS - Main Entry Point
//!
//! Live temperature dashboard for a single city.

use livetemp_rs::{backend::FeedBackend, config::AppConfig, frontend::LiveTempApp};
use std::sync::atomic::Ordering;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,livetemp_rs=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LiveTemp-RS");

    let config = AppConfig::load_or_default();

    // Spawn the feed worker
    let (bridge, worker_handle, running) = match FeedBackend::spawn(&config) {
        Ok(feed) => feed,
        Err(e) => {
            tracing::error!("Failed to start temperature feed: {}", e);
            std::process::exit(1);
        }
    };

    let title = format!("Live {} Temperature", config.location.city);

    // Configure eframe options
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_resizable(false)
            .with_title(&title),
        ..Default::default()
    };

    // Run the eframe application
    let result = eframe::run_native(
        &title,
        native_options,
        Box::new(|cc| Ok(Box::new(LiveTempApp::new(cc, bridge, config)))),
    );

    // Signal the worker to stop and wait for it
    tracing::info!("Shutting down...");
    running.store(false, Ordering::SeqCst);
    if worker_handle.join().is_err() {
        tracing::warn!("Feed worker panicked");
    }

    result
}

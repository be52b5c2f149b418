//! GP Practice Explorer - demographics dashboard and map viewer for English
//! GP practices.
//!
//! Loads the practice CSV once per process, then re-derives the whole view
//! from the current filter selection on every frame.

mod config;
mod data;
mod export;
mod gui;
mod map;
mod view;

use anyhow::Context;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::AppConfig;
use data::Dataset;
use gui::ExplorerApp;

fn init_logger() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("practice_explorer=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logger();

    let config = AppConfig::load();
    let dataset = Dataset::init(&config.data_csv)
        .with_context(|| format!("failed to load {}", config.data_csv.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([1000.0, 640.0])
            .with_title("GP Practice Explorer"),
        ..Default::default()
    };

    eframe::run_native(
        "GP Practice Explorer",
        options,
        Box::new(move |cc| Ok(Box::new(ExplorerApp::new(cc, dataset, config)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start UI: {e}"))?;

    Ok(())
}

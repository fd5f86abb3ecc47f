mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::LaunchDashApp;
use clap::Parser;
use config::{Cli, Settings};
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let settings = Settings::from_cli(Cli::parse());
    let mut state = AppState::new(settings.slider);

    // A table named at startup must load, or we never open the window.
    if let Some(path) = &settings.data_path {
        let store = data::loader::load_file(path)
            .inspect_err(|e| log::error!("Failed to load {}: {e}", path.display()))
            .with_context(|| format!("loading launch records from {}", path.display()))?;
        log::info!(
            "Loaded {} launch records, payload {}..{} kg, sites {:?}",
            store.len(),
            store.min_payload_kg(),
            store.max_payload_kg(),
            store.distinct_sites()
        );
        state.set_store(store);
    } else {
        log::info!("No launch table given; starting empty");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow!("running dashboard: {e}"))
}

mod app;
mod color;
mod config;
mod data;
mod format;
mod state;
mod ui;

use anyhow::Context;
use app::SalaryDashboardApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_env().inspect_err(|e| log::error!("{e}"))?;
    log::info!("Loading salary data from {}", config.source);

    // Nothing to show without data: a failed initial load ends the process.
    let dataset = data::loader::load_source(&config.source, config.http_timeout)
        .with_context(|| format!("loading salary data from {}", config.source))
        .inspect_err(|e| log::error!("{e:#}"))?;

    let state = AppState::new(dataset, config.source, config.http_timeout);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Dashboard de Salários",
        options,
        Box::new(move |_cc| Ok(Box::new(SalaryDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}

mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::anyhow;
use app::EegLensApp;
use clap::Parser;
use config::Cli;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "EEG Lens – Seizure Label Lookup",
        options,
        Box::new(move |cc| Ok(Box::new(EegLensApp::new(cc, cli)))),
    )
    .map_err(|e| anyhow!("running UI: {e}"))
}

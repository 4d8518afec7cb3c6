//! GUI entry point for Caprino Checker

mod app;
mod manual_panel;
mod photo_panel;
mod result_card;
mod start_panel;

use app::CaprinoApp;
use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([460.0, 760.0])
            .with_min_inner_size([380.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Calculadora Caprina IA",
        options,
        Box::new(|cc| Ok(Box::new(CaprinoApp::new(cc)))),
    )
}

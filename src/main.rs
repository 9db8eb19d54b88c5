mod app;
mod color;
mod config;
mod data;
mod scale;
mod scene;
mod state;
mod svg;
mod tooltip;
mod ui;

use app::HeatMapApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1460.0, 720.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        config::TITLE,
        options,
        Box::new(|cc| Ok(Box::new(HeatMapApp::new(cc)))),
    )
}

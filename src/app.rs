use eframe::egui;

use crate::config::DATASET_URL;
use crate::data::loader::DataSource;
use crate::state::AppState;
use crate::ui::{heatmap, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct HeatMapApp {
    pub state: AppState,
}

impl HeatMapApp {
    /// Create the app and kick off the initial dataset fetch.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self::default();
        app.state
            .begin_load(DataSource::Url(DATASET_URL.to_string()), &cc.egui_ctx);
        app
    }
}

impl eframe::App for HeatMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_load();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: title + heat map ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::header(ui, &self.state);
            heatmap::heat_map(ui, &mut self.state);
        });
    }
}

use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::{DATASET_URL, TITLE};
use crate::data::export::write_csv;
use crate::data::loader::DataSource;
use crate::state::AppState;
use crate::svg::write_svg;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Reload").clicked() {
                state.begin_load(DataSource::Url(DATASET_URL.to_string()), ui.ctx());
                ui.close_menu();
            }
            if ui.button("Open…").clicked() {
                open_file_dialog(state, ui.ctx());
                ui.close_menu();
            }
            ui.separator();
            let has_chart = !state.scene.is_empty();
            if ui
                .add_enabled(has_chart, egui::Button::new("Export SVG…"))
                .clicked()
            {
                export_svg_dialog(state);
                ui.close_menu();
            }
            let has_data = state.dataset.is_some();
            if ui
                .add_enabled(has_data, egui::Button::new("Export CSV…"))
                .clicked()
            {
                export_csv_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if state.loading() {
            ui.spinner();
            ui.label("Loading…");
        } else if let Some(ds) = &state.dataset {
            ui.label(format!("{} records loaded", ds.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Title and the year-range / base-temperature line.
pub fn header(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new(TITLE).strong());
        if let Some(description) = state.description() {
            ui.label(description);
        }
    });
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState, ctx: &egui::Context) {
    let file = rfd::FileDialog::new()
        .set_title("Open temperature dataset")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.begin_load(DataSource::File(path), ctx);
    }
}

fn export_svg_dialog(state: &mut AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export heat map")
        .set_file_name("heat-map.svg")
        .add_filter("SVG", &["svg"])
        .save_file();

    if let Some(path) = file {
        match write_svg(&state.scene, dataset, TITLE, &path) {
            Ok(()) => log::info!("Exported SVG to {}", path.display()),
            Err(e) => {
                log::error!("Failed to export SVG: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn export_csv_dialog(state: &mut AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export records")
        .set_file_name("global-temperature.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match write_csv(dataset, &path) {
            Ok(()) => log::info!("Exported {} records to {}", dataset.len(), path.display()),
            Err(e) => {
                log::error!("Failed to export CSV: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

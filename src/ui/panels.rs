use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::TitleType;
use crate::state::AppState;
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Left side panel – filter and data quality
// ---------------------------------------------------------------------------

/// Render the left panel: type filter and missing-value report.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter by Type");
    ui.separator();

    let mut selected = state.filter();
    egui::ComboBox::from_id_salt("type_filter")
        .selected_text(selected.as_str())
        .show_ui(ui, |ui: &mut Ui| {
            for kind in TitleType::ALL {
                ui.selectable_value(&mut selected, kind, kind.as_str());
            }
        });
    if selected != state.filter() {
        state.set_filter(selected);
    }

    ui.add_space(12.0);
    ui.heading("Missing values");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("missing_values")
                .striped(true)
                .num_columns(3)
                .show(ui, |ui: &mut Ui| {
                    ui.strong("column");
                    ui.strong("raw");
                    ui.strong("clean");
                    ui.end_row();

                    for ((column, before), (_, after)) in
                        state.missing_before.iter().zip(&state.missing_after)
                    {
                        ui.label(column);
                        ui.label(before.to_string());
                        let after_text = RichText::new(after.to_string());
                        ui.label(if *after > 0 { after_text.color(Color32::YELLOW) } else { after_text });
                        ui.end_row();
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Central panel – the six charts
// ---------------------------------------------------------------------------

/// Render the chart grid (two per row) and the data preview.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.heading(RichText::new("Movies and TV Shows").size(28.0));
            });
            ui.add_space(8.0);

            for pair in state.dashboard.charts().chunks(2) {
                ui.columns(2, |cols| {
                    for (col, spec) in cols.iter_mut().zip(pair) {
                        plot::chart_panel(col, spec);
                    }
                });
                ui.add_space(8.0);
            }

            egui::CollapsingHeader::new(RichText::new("Data preview").strong())
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    table::preview(ui, &state.table);
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export charts…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{}: {} titles",
            state.source.display(),
            state.table.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open title table")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart specifications")
        .add_filter("JSON", &["json"])
        .set_file_name("charts.json")
        .save_file();

    if let Some(path) = file {
        state.export(&path);
    }
}

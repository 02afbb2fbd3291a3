use std::path::Path;

use anyhow::Context;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use sales_lens::data::model::Dimension;
use sales_lens::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Cheap Arc clone so we can mutate state inside the loop.
    let Some(table) = state.table.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Per-dimension multi-selects (collapsible) ----
            for dim in Dimension::ALL {
                let all_values = table.distinct_values(dim);
                let n_selected = state.selection.allowed(dim).map_or(0, |s| s.len());
                let header_text = format!("{dim}  ({n_selected}/{})", all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(dim.column())
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(dim);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(dim);
                            }
                        });

                        for val in all_values {
                            let mut checked = state.selection.is_allowed(dim, val);
                            if ui.checkbox(&mut checked, val.as_str()).changed() {
                                state.toggle_filter_value(dim, val);
                            }
                        }
                    });
            }

            ui.separator();

            // ---- Age range ----
            if let Some((lo, hi)) = table.age_bounds() {
                ui.strong("Age range");
                let mut min_age = state.selection.min_age;
                let mut max_age = state.selection.max_age;
                let min_changed = ui
                    .add(egui::Slider::new(&mut min_age, lo..=hi).text("min"))
                    .changed();
                let max_changed = ui
                    .add(egui::Slider::new(&mut max_age, lo..=hi).text("max"))
                    .changed();
                if min_changed || max_changed {
                    state.set_age_range(min_age, max_age);
                }
                ui.separator();
            }

            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
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
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} transactions loaded, {} visible",
                table.len(),
                state.visible_indices.len()
            ));
            if let Some((first, last)) = table.date_bounds() {
                ui.separator();
                ui.label(format!("{first} → {last}"));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open transactions")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        open_path(state, &path);
    }
}

/// Load `path` into `state`, reporting failures in the status bar.
pub fn open_path(state: &mut AppState, path: &Path) {
    let loaded = sales_lens::data::loader::load_file(path)
        .with_context(|| format!("loading {}", path.display()));
    match loaded {
        Ok(table) => state.set_table(table),
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use sales_lens::data::loader::COLUMNS;
use sales_lens::fmt;
use sales_lens::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Raw data table (central panel, bottom half)
// ---------------------------------------------------------------------------

/// Render the filtered rows with all eight columns.
pub fn raw_table(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        return;
    };

    ui.strong("Raw data (filtered)");

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(70.0), COLUMNS.len())
        .min_scrolled_height(0.0)
        .header(20.0, |mut header| {
            for name in COLUMNS {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.visible_indices.len(), |mut row| {
                let tx = &table.transactions[state.visible_indices[row.index()]];
                let cells = [
                    tx.date.to_string(),
                    tx.store.clone(),
                    tx.gender.clone(),
                    tx.nationality.clone(),
                    tx.category.clone(),
                    tx.payment_method.clone(),
                    tx.age.to_string(),
                    fmt::amount(tx.total_amount),
                ];
                for text in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(text);
                    });
                }
            });
        });
}

use eframe::egui;

use sales_lens::settings::Settings;
use sales_lens::state::AppState;

use crate::ui::{dashboard, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalesLensApp {
    pub state: AppState,
}

impl SalesLensApp {
    pub fn new(settings: Settings) -> Self {
        let mut state = AppState {
            currency: settings.currency,
            ..AppState::default()
        };
        if let Some(path) = &settings.data_file {
            panels::open_path(&mut state, path);
        }
        Self { state }
    }
}

impl eframe::App for SalesLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: caption ----
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.small("This dashboard and dataset are synthetic for demonstration purposes.");
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, raw rows ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard::summary_view(ui, &self.state);
            ui.separator();
            table::raw_table(ui, &self.state);
        });
    }
}

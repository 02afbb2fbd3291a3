mod app;
mod ui;

use std::path::PathBuf;

use app::SalesLensApp;
use eframe::egui;
use sales_lens::settings;

fn main() -> eframe::Result {
    env_logger::init();

    let mut settings = settings::load_settings();
    // A path on the command line wins over the configured one.
    if let Some(path) = std::env::args_os().nth(1) {
        settings.data_file = Some(PathBuf::from(path));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width, settings.window_height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sales Lens – Sales by Demographics",
        options,
        Box::new(|_cc| Ok(Box::new(SalesLensApp::new(settings)))),
    )
}

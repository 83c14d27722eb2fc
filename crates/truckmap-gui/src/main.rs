//! GUI entry point for Truckmap

mod app;
mod detail_panel;
mod form_panel;
mod map_canvas;
mod sidebar_panel;
mod textures;

use app::TruckmapApp;
use eframe::egui;
use truckmap_app::{init_logging, Verbosity};

fn main() -> eframe::Result<()> {
    init_logging(Verbosity::Normal);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Truckmap",
        options,
        Box::new(|cc| Ok(Box::new(TruckmapApp::new(cc)))),
    )
}

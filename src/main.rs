use eframe::egui;

mod app;

use app::TaxApp;

fn main() {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "taxrings — where your city taxes go",
        options,
        Box::new(|_cc| Ok(Box::new(TaxApp::default()))),
    )
    .expect("Failed to start taxrings");
}

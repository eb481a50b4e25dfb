pub mod beach;
pub mod sand_view;

use crate::settings::Settings;
use eframe::egui;
pub use sand_view::{PointerTracker, SandPaintView};

pub struct BeachApp {
    sand: SandPaintView,
}

impl BeachApp {
    pub fn new(settings: &Settings) -> Self {
        Self {
            sand: SandPaintView::new(settings.stroke_style(), settings.surface_height_ratio),
        }
    }
}

impl eframe::App for BeachApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                beach::paint(ui.painter(), ui.max_rect());
            });

        self.sand.show(ctx);
    }
}

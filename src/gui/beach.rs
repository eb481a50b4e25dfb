use eframe::egui::{self, Color32, Pos2, Rect};

const SKY: Color32 = Color32::from_rgb(0x9F, 0xD8, 0xF5);
const SEA: Color32 = Color32::from_rgb(0x2E, 0x8B, 0xC0);
const FOAM: Color32 = Color32::from_rgb(0xF4, 0xF8, 0xFA);
const SAND: Color32 = Color32::from_rgb(0xC8, 0xA8, 0x72);
const SUN: Color32 = Color32::from_rgb(0xFF, 0xD9, 0x5A);

/// Paints the static beach backdrop the sand surface sits on.
pub fn paint(painter: &egui::Painter, rect: Rect) {
    let h = rect.height();
    let horizon = rect.min.y + h * 0.4;
    let shore = rect.min.y + h * 0.55;

    painter.rect_filled(
        Rect::from_min_max(rect.min, Pos2::new(rect.max.x, horizon)),
        0.0,
        SKY,
    );
    painter.circle_filled(
        Pos2::new(rect.min.x + rect.width() * 0.8, rect.min.y + h * 0.15),
        h * 0.07,
        SUN,
    );
    painter.rect_filled(
        Rect::from_min_max(Pos2::new(rect.min.x, horizon), Pos2::new(rect.max.x, shore)),
        0.0,
        SEA,
    );
    painter.rect_filled(
        Rect::from_min_max(Pos2::new(rect.min.x, shore), rect.max),
        0.0,
        SAND,
    );
    painter.line_segment(
        [Pos2::new(rect.min.x, shore), Pos2::new(rect.max.x, shore)],
        egui::Stroke::new(3.0, FOAM),
    );
}

pub mod context;
pub mod events;
pub mod model;
pub mod raster;
pub mod state;
pub mod widget;

pub use context::{Context2d, RecordedStroke, StrokeBackend, StrokeRecorder};
pub use events::{PointerEvent, PointerEventKind, SurfaceElement};
pub use model::{Color, Coordinate, LineJoin, StrokeStyle};
pub use raster::{DirtyRect, PixelCanvas};
pub use widget::SandPaint;

/// Fraction of the viewport height covered by the sand surface.
pub const DEFAULT_SURFACE_HEIGHT_RATIO: f32 = 0.4;

/// Surface size for a viewport, captured once when the surface is created.
pub fn surface_size(viewport_width: f32, viewport_height: f32, height_ratio: f32) -> (u32, u32) {
    let width = viewport_width.max(1.0).round() as u32;
    let height = (viewport_height * height_ratio).max(1.0).round() as u32;
    (width, height)
}

use crate::sand::{
    surface_size, Coordinate, PixelCanvas, PointerEvent, PointerEventKind, SandPaint,
    StrokeStyle, SurfaceElement,
};
use eframe::egui;

/// Turns the window-wide egui event stream into the element-scoped pointer
/// events a DOM element would receive.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    hovered: bool,
    last_pos: Option<egui::Pos2>,
}

impl PointerTracker {
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn translate(&mut self, events: &[egui::Event], rect: egui::Rect) -> Vec<PointerEvent> {
        let mut out = Vec::new();
        for event in events {
            match event {
                egui::Event::PointerMoved(pos) => {
                    let inside = rect.contains(*pos);
                    if inside {
                        out.push(pointer_event(PointerEventKind::Move, *pos));
                    } else if self.hovered {
                        out.push(pointer_event(PointerEventKind::Leave, *pos));
                    }
                    self.hovered = inside;
                    self.last_pos = Some(*pos);
                }
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    if rect.contains(*pos) {
                        let kind = if *pressed {
                            PointerEventKind::Down
                        } else {
                            PointerEventKind::Up
                        };
                        out.push(pointer_event(kind, *pos));
                    }
                    self.last_pos = Some(*pos);
                }
                egui::Event::PointerGone => {
                    if self.hovered {
                        let pos = self.last_pos.unwrap_or(rect.min);
                        out.push(pointer_event(PointerEventKind::Leave, pos));
                    }
                    self.hovered = false;
                }
                _ => {}
            }
        }
        out
    }
}

fn pointer_event(kind: PointerEventKind, pos: egui::Pos2) -> PointerEvent {
    PointerEvent::new(kind, Coordinate::new(pos.x, pos.y))
}

/// Hosts a [`SandPaint`] widget along the bottom edge of the window, above
/// every other layer.
pub struct SandPaintView {
    widget: SandPaint<PixelCanvas>,
    height_ratio: f32,
    tracker: PointerTracker,
    texture: Option<egui::TextureHandle>,
}

impl SandPaintView {
    pub fn new(style: StrokeStyle, height_ratio: f32) -> Self {
        Self {
            widget: SandPaint::new(style),
            height_ratio,
            tracker: PointerTracker::default(),
            texture: None,
        }
    }

    pub fn widget(&self) -> &SandPaint<PixelCanvas> {
        &self.widget
    }

    /// Creates the surface on first use. Its size is fixed from then on.
    fn ensure_surface(&mut self, screen: egui::Rect) {
        if self.widget.is_mounted() {
            return;
        }
        let (width, height) = surface_size(screen.width(), screen.height(), self.height_ratio);
        tracing::debug!(
            width,
            height,
            viewport_width = screen.width(),
            viewport_height = screen.height(),
            "creating sand surface"
        );
        let offset = Coordinate::new(screen.min.x, screen.max.y - height as f32);
        self.widget
            .mount(SurfaceElement::new(PixelCanvas::new(width, height), offset));
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        let screen = ctx.screen_rect();
        self.ensure_surface(screen);

        let Some(element) = self.widget.element_mut() else {
            return;
        };
        let (width, height) = element.size();
        let origin = egui::pos2(screen.min.x, screen.max.y - height as f32);
        element.set_offset(Coordinate::new(origin.x, origin.y));
        let rect = egui::Rect::from_min_size(origin, egui::vec2(width as f32, height as f32));

        let events = ctx.input(|i| i.events.clone());
        for mut event in self.tracker.translate(&events, rect) {
            self.widget.dispatch(&mut event);
        }

        self.upload(ctx);

        if let Some(texture) = &self.texture {
            let painter = ctx.layer_painter(egui::LayerId::new(
                egui::Order::Foreground,
                egui::Id::new("sand_paint_surface"),
            ));
            painter.image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
    }

    fn upload(&mut self, ctx: &egui::Context) {
        let Some(element) = self.widget.element_mut() else {
            return;
        };
        let (width, height) = element.size();
        let canvas = element.context_mut().backend_mut();

        if let Some(texture) = self.texture.as_mut() {
            if let Some(dirty) = canvas.take_dirty() {
                let image = egui::ColorImage::from_rgba_unmultiplied(
                    [dirty.width as usize, dirty.height as usize],
                    &canvas.region_rgba(dirty),
                );
                texture.set_partial(
                    [dirty.x as usize, dirty.y as usize],
                    image,
                    egui::TextureOptions::NEAREST,
                );
            }
            return;
        }

        let image = egui::ColorImage::from_rgba_unmultiplied(
            [width as usize, height as usize],
            canvas.rgba_pixels(),
        );
        self.texture = Some(ctx.load_texture("sand_paint", image, egui::TextureOptions::NEAREST));
        let _ = canvas.take_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sand::model::SAND_COLOR;

    fn surface_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(0.0, 460.0), egui::vec2(800.0, 240.0))
    }

    fn press(x: f32, y: f32, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos: egui::pos2(x, y),
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::default(),
        }
    }

    fn kinds(events: &[PointerEvent]) -> Vec<PointerEventKind> {
        events.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn drag_inside_surface_yields_down_move_up() {
        let mut tracker = PointerTracker::default();
        let events = tracker.translate(
            &[
                egui::Event::PointerMoved(egui::pos2(10.0, 500.0)),
                press(10.0, 500.0, true),
                egui::Event::PointerMoved(egui::pos2(20.0, 510.0)),
                press(20.0, 510.0, false),
            ],
            surface_rect(),
        );
        assert_eq!(
            kinds(&events),
            vec![
                PointerEventKind::Move,
                PointerEventKind::Down,
                PointerEventKind::Move,
                PointerEventKind::Up,
            ]
        );
        assert_eq!(events[2].page, Coordinate::new(20.0, 510.0));
    }

    #[test]
    fn leaving_surface_emits_single_leave() {
        let mut tracker = PointerTracker::default();
        let events = tracker.translate(
            &[
                egui::Event::PointerMoved(egui::pos2(10.0, 500.0)),
                egui::Event::PointerMoved(egui::pos2(10.0, 100.0)),
                egui::Event::PointerMoved(egui::pos2(12.0, 90.0)),
            ],
            surface_rect(),
        );
        assert_eq!(
            kinds(&events),
            vec![PointerEventKind::Move, PointerEventKind::Leave]
        );
        assert!(!tracker.is_hovered());
    }

    #[test]
    fn pointer_gone_while_hovered_is_a_leave() {
        let mut tracker = PointerTracker::default();
        let events = tracker.translate(
            &[
                egui::Event::PointerMoved(egui::pos2(10.0, 500.0)),
                egui::Event::PointerGone,
                egui::Event::PointerGone,
            ],
            surface_rect(),
        );
        assert_eq!(
            kinds(&events),
            vec![PointerEventKind::Move, PointerEventKind::Leave]
        );
        assert_eq!(events[1].page, Coordinate::new(10.0, 500.0));
    }

    #[test]
    fn presses_outside_surface_and_secondary_buttons_are_ignored() {
        let mut tracker = PointerTracker::default();
        let events = tracker.translate(
            &[
                press(10.0, 100.0, true),
                egui::Event::PointerButton {
                    pos: egui::pos2(10.0, 500.0),
                    button: egui::PointerButton::Secondary,
                    pressed: true,
                    modifiers: egui::Modifiers::default(),
                },
            ],
            surface_rect(),
        );
        assert!(events.is_empty());
    }

    #[test]
    fn first_frame_sizes_surface_from_viewport() {
        let ctx = egui::Context::default();
        let mut view = SandPaintView::new(StrokeStyle::sand(), 0.4);
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(1000.0, 500.0),
            )),
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| view.show(ctx));

        let element = view.widget().element().expect("mounted surface");
        assert_eq!(element.size(), (1000, 200));
        assert_eq!(element.offset(), Coordinate::new(0.0, 300.0));
    }

    #[test]
    fn later_frames_paint_and_drain_dirty_region() {
        let ctx = egui::Context::default();
        let mut view = SandPaintView::new(StrokeStyle::sand(), 0.4);
        let screen = Some(egui::Rect::from_min_size(
            egui::Pos2::ZERO,
            egui::vec2(1000.0, 500.0),
        ));
        let _ = ctx.run(
            egui::RawInput {
                screen_rect: screen,
                ..Default::default()
            },
            |ctx| view.show(ctx),
        );
        assert!(view.texture.is_some());

        let _ = ctx.run(
            egui::RawInput {
                screen_rect: screen,
                events: vec![
                    egui::Event::PointerMoved(egui::pos2(100.0, 400.0)),
                    press(100.0, 400.0, true),
                    egui::Event::PointerMoved(egui::pos2(140.0, 400.0)),
                ],
                ..Default::default()
            },
            |ctx| view.show(ctx),
        );

        assert!(view.widget().is_painting());
        let canvas = view
            .widget
            .element_mut()
            .expect("mounted surface")
            .context_mut()
            .backend_mut();
        assert_eq!(canvas.pixel(120, 100), Some(SAND_COLOR));
        assert_eq!(canvas.take_dirty(), None);
    }
}

use crate::sand::context::StrokeBackend;
use crate::sand::events::{
    ListenerKey, PaintHandler, PointerEvent, PointerEventKind, SurfaceElement,
};
use crate::sand::model::{Coordinate, StrokeStyle};
use crate::sand::state::PaintState;

/// Keys of the four listeners attached while mounted.
#[derive(Debug, Clone, Copy)]
struct Registrations {
    down: ListenerKey,
    moved: ListenerKey,
    up: ListenerKey,
    leave: ListenerKey,
}

/// Freehand "draw in the sand" widget.
///
/// The widget owns its surface element between [`SandPaint::mount`] and
/// [`SandPaint::unmount`]. Events delivered while no element is mounted
/// reach no listener and change nothing. Dropping a mounted widget drops
/// the element with it.
#[derive(Debug)]
pub struct SandPaint<B> {
    element: Option<SurfaceElement<B>>,
    registrations: Option<Registrations>,
    state: PaintState,
    style: StrokeStyle,
}

impl<B: StrokeBackend> Default for SandPaint<B> {
    fn default() -> Self {
        Self::new(StrokeStyle::sand())
    }
}

impl<B: StrokeBackend> SandPaint<B> {
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            element: None,
            registrations: None,
            state: PaintState::default(),
            style,
        }
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn state(&self) -> PaintState {
        self.state
    }

    pub fn is_painting(&self) -> bool {
        self.state.is_painting
    }

    pub fn is_mounted(&self) -> bool {
        self.element.is_some()
    }

    pub fn element(&self) -> Option<&SurfaceElement<B>> {
        self.element.as_ref()
    }

    pub fn element_mut(&mut self) -> Option<&mut SurfaceElement<B>> {
        self.element.as_mut()
    }

    /// Takes ownership of `element` and attaches the pointer listeners.
    /// A previously mounted element is unmounted and returned.
    pub fn mount(&mut self, mut element: SurfaceElement<B>) -> Option<SurfaceElement<B>> {
        let previous = self.unmount();
        self.registrations = Some(Registrations {
            down: element.add_event_listener(PointerEventKind::Down, PaintHandler::StartPaint),
            moved: element.add_event_listener(PointerEventKind::Move, PaintHandler::Paint),
            up: element.add_event_listener(PointerEventKind::Up, PaintHandler::ExitPaint),
            leave: element.add_event_listener(PointerEventKind::Leave, PaintHandler::ExitPaint),
        });
        let (width, height) = element.size();
        tracing::debug!(width, height, "sand surface mounted");
        self.element = Some(element);
        previous
    }

    /// Detaches all listeners and hands the element back.
    pub fn unmount(&mut self) -> Option<SurfaceElement<B>> {
        let mut element = self.element.take()?;
        if let Some(keys) = self.registrations.take() {
            for key in [keys.down, keys.moved, keys.up, keys.leave] {
                element.remove_event_listener(key);
            }
        }
        self.state = PaintState::default();
        tracing::debug!(
            remaining_listeners = element.listener_count(),
            "sand surface unmounted"
        );
        Some(element)
    }

    /// Delivers `event` to the listeners registered on the mounted element.
    pub fn dispatch(&mut self, event: &mut PointerEvent) {
        let Some(element) = self.element.as_ref() else {
            return;
        };
        for handler in element.handlers_for(event.kind) {
            match handler {
                PaintHandler::StartPaint => self.on_pointer_down(event),
                PaintHandler::Paint => self.on_pointer_move(event),
                PaintHandler::ExitPaint => self.on_pointer_exit(event),
            }
        }
    }

    fn coordinates(&self, event: &PointerEvent) -> Option<Coordinate> {
        self.element
            .as_ref()
            .map(|element| element.to_local(event.page))
    }

    fn on_pointer_down(&mut self, event: &PointerEvent) {
        if let Some(at) = self.coordinates(event) {
            self.state.start(at);
        }
    }

    fn on_pointer_move(&mut self, event: &mut PointerEvent) {
        event.prevent_default();
        event.stop_propagation();

        if !self.state.is_painting {
            return;
        }
        let Some(to) = self.coordinates(event) else {
            return;
        };
        if let Some((from, to)) = self.state.advance(to) {
            self.draw_line(from, to);
        }
    }

    fn on_pointer_exit(&mut self, _event: &PointerEvent) {
        self.state.stop();
    }

    fn draw_line(&mut self, from: Coordinate, to: Coordinate) {
        let style = self.style;
        let Some(element) = self.element.as_mut() else {
            return;
        };
        let ctx = element.context_mut();
        ctx.apply_style(style);
        ctx.begin_path();
        ctx.move_to(from);
        ctx.line_to(to);
        ctx.close_path();
        ctx.stroke();
    }
}

use crate::sand::context::{Context2d, StrokeBackend};
use crate::sand::model::Coordinate;
use slab::Slab;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Leave,
}

/// Pointer event carrying window ("page") coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub page: Coordinate,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, page: Coordinate) -> Self {
        Self {
            kind,
            page,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Down, Coordinate::new(x, y))
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Move, Coordinate::new(x, y))
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Up, Coordinate::new(x, y))
    }

    pub fn leave(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Leave, Coordinate::new(x, y))
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Stable handler identities a widget registers on its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintHandler {
    StartPaint,
    Paint,
    ExitPaint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Listener {
    kind: PointerEventKind,
    handler: PaintHandler,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerKey(usize);

/// Drawable element: a 2D context, its position in the window and the
/// pointer listeners attached to it.
#[derive(Debug)]
pub struct SurfaceElement<B> {
    context: Context2d<B>,
    offset: Coordinate,
    listeners: Slab<Listener>,
}

impl<B: StrokeBackend> SurfaceElement<B> {
    pub fn new(backend: B, offset: Coordinate) -> Self {
        Self {
            context: Context2d::new(backend),
            offset,
            listeners: Slab::new(),
        }
    }

    pub fn context(&self) -> &Context2d<B> {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context2d<B> {
        &mut self.context
    }

    pub fn offset(&self) -> Coordinate {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Coordinate) {
        self.offset = offset;
    }

    pub fn size(&self) -> (u32, u32) {
        self.context.size()
    }

    /// Converts a window position into surface-relative coordinates.
    pub fn to_local(&self, page: Coordinate) -> Coordinate {
        page.offset_from(self.offset)
    }

    pub fn add_event_listener(
        &mut self,
        kind: PointerEventKind,
        handler: PaintHandler,
    ) -> ListenerKey {
        ListenerKey(self.listeners.insert(Listener { kind, handler }))
    }

    /// Returns `false` when `key` was not registered.
    pub fn remove_event_listener(&mut self, key: ListenerKey) -> bool {
        self.listeners.try_remove(key.0).is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Handlers registered for `kind`, in registration order.
    pub fn handlers_for(&self, kind: PointerEventKind) -> Vec<PaintHandler> {
        self.listeners
            .iter()
            .filter(|(_, listener)| listener.kind == kind)
            .map(|(_, listener)| listener.handler)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sand::context::StrokeRecorder;

    #[test]
    fn listeners_can_be_added_and_removed() {
        let mut element = SurfaceElement::new(StrokeRecorder::new(10, 10), Coordinate::default());
        let down = element.add_event_listener(PointerEventKind::Down, PaintHandler::StartPaint);
        let up = element.add_event_listener(PointerEventKind::Up, PaintHandler::ExitPaint);
        element.add_event_listener(PointerEventKind::Leave, PaintHandler::ExitPaint);

        assert_eq!(element.listener_count(), 3);
        assert_eq!(
            element.handlers_for(PointerEventKind::Down),
            vec![PaintHandler::StartPaint]
        );

        assert!(element.remove_event_listener(down));
        assert!(!element.remove_event_listener(down));
        assert!(element.remove_event_listener(up));
        assert_eq!(element.listener_count(), 1);
        assert!(element.handlers_for(PointerEventKind::Down).is_empty());
    }

    #[test]
    fn to_local_subtracts_element_offset() {
        let element = SurfaceElement::new(StrokeRecorder::new(10, 10), Coordinate::new(0.0, 460.0));
        assert_eq!(
            element.to_local(Coordinate::new(25.0, 500.0)),
            Coordinate::new(25.0, 40.0)
        );
    }

    #[test]
    fn event_flags_start_cleared() {
        let mut event = PointerEvent::moved(1.0, 2.0);
        assert!(!event.default_prevented());
        assert!(!event.propagation_stopped());
        event.prevent_default();
        event.stop_propagation();
        assert!(event.default_prevented());
        assert!(event.propagation_stopped());
    }
}

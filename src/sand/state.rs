use crate::sand::model::Coordinate;

/// Per-widget drag state.
///
/// `last_position` is only read while `is_painting` is true.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PaintState {
    pub is_painting: bool,
    pub last_position: Option<Coordinate>,
}

impl PaintState {
    pub fn start(&mut self, at: Coordinate) {
        self.is_painting = true;
        self.last_position = Some(at);
    }

    /// Returns the segment to draw for a move to `to`, advancing the last
    /// known position. `None` when not painting.
    pub fn advance(&mut self, to: Coordinate) -> Option<(Coordinate, Coordinate)> {
        if !self.is_painting {
            return None;
        }
        let from = self.last_position.replace(to)?;
        Some((from, to))
    }

    pub fn stop(&mut self) {
        self.is_painting = false;
        self.last_position = None;
    }
}

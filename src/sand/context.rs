use crate::sand::model::{Color, Coordinate, LineJoin, Path, StrokeStyle, SubPath};

/// Receives fully built paths from a [`Context2d`].
pub trait StrokeBackend {
    fn stroke_path(&mut self, path: &Path, style: &StrokeStyle);

    fn size(&self) -> (u32, u32);
}

/// Immediate-mode 2D drawing context modelled on the canvas API.
#[derive(Debug, Clone)]
pub struct Context2d<B> {
    backend: B,
    style: StrokeStyle,
    path: Path,
}

impl<B: StrokeBackend> Context2d<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            style: StrokeStyle::default(),
            path: Path::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn size(&self) -> (u32, u32) {
        self.backend.size()
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.style.color = color;
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        self.style.line_join = join;
    }

    /// Zero, negative and non-finite widths are ignored.
    pub fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.style.line_width = width;
        }
    }

    pub fn apply_style(&mut self, style: StrokeStyle) {
        self.set_stroke_color(style.color);
        self.set_line_join(style.line_join);
        self.set_line_width(style.line_width);
    }

    pub fn begin_path(&mut self) {
        self.path.subpaths.clear();
    }

    pub fn move_to(&mut self, point: Coordinate) {
        if !point.is_finite() {
            return;
        }
        self.path.subpaths.push(SubPath {
            points: vec![point],
            closed: false,
        });
    }

    pub fn line_to(&mut self, point: Coordinate) {
        if !point.is_finite() {
            return;
        }
        match self.path.subpaths.last_mut() {
            Some(sub) if !sub.points.is_empty() => sub.points.push(point),
            _ => self.move_to(point),
        }
    }

    pub fn close_path(&mut self) {
        let Some(sub) = self.path.subpaths.last_mut() else {
            return;
        };
        if sub.points.is_empty() || sub.closed {
            return;
        }
        sub.closed = true;
        let start = sub.points[0];
        self.path.subpaths.push(SubPath {
            points: vec![start],
            closed: false,
        });
    }

    pub fn stroke(&mut self) {
        if self.path.is_empty() {
            return;
        }
        self.backend.stroke_path(&self.path, &self.style);
    }
}

/// One `stroke()` call captured by [`StrokeRecorder`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedStroke {
    pub path: Path,
    pub style: StrokeStyle,
}

impl RecordedStroke {
    /// Subpaths that actually produce ink, i.e. have at least two points.
    pub fn drawn_subpaths(&self) -> impl Iterator<Item = &SubPath> {
        self.path.subpaths.iter().filter(|sub| sub.points.len() >= 2)
    }
}

/// Backend that keeps every stroked path instead of rasterizing it.
#[derive(Debug, Clone, Default)]
pub struct StrokeRecorder {
    size: (u32, u32),
    strokes: Vec<RecordedStroke>,
}

impl StrokeRecorder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            strokes: Vec::new(),
        }
    }

    pub fn strokes(&self) -> &[RecordedStroke] {
        &self.strokes
    }
}

impl StrokeBackend for StrokeRecorder {
    fn stroke_path(&mut self, path: &Path, style: &StrokeStyle) {
        self.strokes.push(RecordedStroke {
            path: path.clone(),
            style: *style,
        });
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> Context2d<StrokeRecorder> {
        Context2d::new(StrokeRecorder::new(100, 40))
    }

    #[test]
    fn stroke_without_segments_is_skipped() {
        let mut ctx = recorder();
        ctx.begin_path();
        ctx.move_to(Coordinate::new(3.0, 3.0));
        ctx.stroke();
        assert!(ctx.backend().strokes().is_empty());
    }

    #[test]
    fn close_path_reopens_at_subpath_start() {
        let mut ctx = recorder();
        ctx.begin_path();
        ctx.move_to(Coordinate::new(1.0, 2.0));
        ctx.line_to(Coordinate::new(8.0, 2.0));
        ctx.close_path();
        ctx.line_to(Coordinate::new(1.0, 9.0));
        ctx.stroke();

        let stroke = &ctx.backend().strokes()[0];
        assert_eq!(stroke.path.subpaths.len(), 2);
        assert!(stroke.path.subpaths[0].closed);
        assert_eq!(
            stroke.path.subpaths[1].points,
            vec![Coordinate::new(1.0, 2.0), Coordinate::new(1.0, 9.0)]
        );
    }

    #[test]
    fn line_to_without_current_point_starts_subpath() {
        let mut ctx = recorder();
        ctx.begin_path();
        ctx.line_to(Coordinate::new(4.0, 4.0));
        ctx.line_to(Coordinate::new(6.0, 4.0));
        ctx.stroke();
        assert_eq!(
            ctx.backend().strokes()[0].path.segments(),
            vec![(Coordinate::new(4.0, 4.0), Coordinate::new(6.0, 4.0))]
        );
    }

    #[test]
    fn invalid_widths_and_points_are_ignored() {
        let mut ctx = recorder();
        ctx.set_line_width(10.0);
        ctx.set_line_width(0.0);
        ctx.set_line_width(f32::NAN);
        assert_eq!(ctx.style().line_width, 10.0);

        ctx.begin_path();
        ctx.move_to(Coordinate::new(f32::INFINITY, 0.0));
        assert!(ctx.path.subpaths.is_empty());
    }

    #[test]
    fn begin_path_discards_previous_segments() {
        let mut ctx = recorder();
        ctx.begin_path();
        ctx.move_to(Coordinate::new(0.0, 0.0));
        ctx.line_to(Coordinate::new(5.0, 5.0));
        ctx.stroke();
        ctx.begin_path();
        ctx.move_to(Coordinate::new(10.0, 10.0));
        ctx.line_to(Coordinate::new(12.0, 10.0));
        ctx.stroke();

        let strokes = ctx.backend().strokes();
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[1].path.segments().len(), 1);
    }
}

use crate::sand::context::StrokeBackend;
use crate::sand::model::{Color, Coordinate, LineJoin, Path, StrokeStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl DirtyRect {
    pub fn union(self, other: DirtyRect) -> DirtyRect {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = self.right().max(other.right());
        let max_y = self.bottom().max(other.bottom());
        DirtyRect {
            x: min_x,
            y: min_y,
            width: max_x.saturating_sub(min_x).max(1),
            height: max_y.saturating_sub(min_y).max(1),
        }
    }

    fn right(self) -> i32 {
        self.x.saturating_add(self.width)
    }

    fn bottom(self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn clamp(self, width: u32, height: u32) -> Option<DirtyRect> {
        let max_w = width as i32;
        let max_h = height as i32;
        let x0 = self.x.clamp(0, max_w);
        let y0 = self.y.clamp(0, max_h);
        let x1 = self.right().clamp(0, max_w);
        let y1 = self.bottom().clamp(0, max_h);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(DirtyRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }

    /// Bounding box of `points` grown by `pad`, limited to the canvas so
    /// far-away coordinates never reach integer conversion.
    fn around(points: &[Coordinate], pad: f32, width: u32, height: u32) -> Option<DirtyRect> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for point in points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }
        let limit_x = |v: f32| v.clamp(-1.0, width as f32 + 1.0);
        let limit_y = |v: f32| v.clamp(-1.0, height as f32 + 1.0);
        let x0 = limit_x((min_x - pad).floor()) as i32;
        let y0 = limit_y((min_y - pad).floor()) as i32;
        let x1 = limit_x((max_x + pad).ceil()) as i32;
        let y1 = limit_y((max_y + pad).ceil()) as i32;
        Some(DirtyRect {
            x: x0,
            y: y0,
            width: (x1 - x0 + 1).max(1),
            height: (y1 - y0 + 1).max(1),
        })
    }
}

/// Software RGBA surface. Starts fully transparent; every stroke is
/// blended permanently into the buffer.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
    dirty: Option<DirtyRect>,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        Self {
            width,
            height,
            rgba: vec![0; len],
            dirty: None,
        }
    }

    pub fn rgba_pixels(&self) -> &[u8] {
        &self.rgba
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = pixel_index(self.width, x as usize, y as usize);
        Some(Color::rgba(
            self.rgba[idx],
            self.rgba[idx + 1],
            self.rgba[idx + 2],
            self.rgba[idx + 3],
        ))
    }

    /// Region touched since the previous call, clipped to the canvas.
    pub fn take_dirty(&mut self) -> Option<DirtyRect> {
        self.dirty.take()
    }

    pub fn region_rgba(&self, rect: DirtyRect) -> Vec<u8> {
        let Some(rect) = rect.clamp(self.width, self.height) else {
            return Vec::new();
        };
        let row_len = rect.width as usize * 4;
        let mut out = Vec::with_capacity(row_len * rect.height as usize);
        for y in rect.y..(rect.y + rect.height) {
            let start = pixel_index(self.width, rect.x as usize, y as usize);
            out.extend_from_slice(&self.rgba[start..start + row_len]);
        }
        out
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        let idx = pixel_index(self.width, x as usize, y as usize);
        if idx + 3 >= self.rgba.len() {
            return;
        }
        if color.a == 255 {
            self.rgba[idx..idx + 4].copy_from_slice(&color.to_rgba_array());
            return;
        }

        let src_a = color.a as f32 / 255.0;
        let dst_a = self.rgba[idx + 3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= f32::EPSILON {
            return;
        }
        let mix = |src: u8, dst: u8| -> u8 {
            let value = (src as f32 * src_a + dst as f32 * dst_a * (1.0 - src_a)) / out_a;
            value.round().clamp(0.0, 255.0) as u8
        };
        self.rgba[idx] = mix(color.r, self.rgba[idx]);
        self.rgba[idx + 1] = mix(color.g, self.rgba[idx + 1]);
        self.rgba[idx + 2] = mix(color.b, self.rgba[idx + 2]);
        self.rgba[idx + 3] = (out_a * 255.0).round() as u8;
    }

    fn mark_dirty(&mut self, rect: DirtyRect) {
        self.dirty = Some(match self.dirty {
            Some(existing) => existing.union(rect),
            None => rect,
        });
    }
}

impl StrokeBackend for PixelCanvas {
    fn stroke_path(&mut self, path: &Path, style: &StrokeStyle) {
        let shape = StrokeShape::build(path, style);
        if shape.segments.is_empty() {
            return;
        }
        let Some(bounds) =
            DirtyRect::around(&shape.points, shape.half_width + 1.0, self.width, self.height)
                .and_then(|rect| rect.clamp(self.width, self.height))
        else {
            return;
        };

        let mut touched: Option<DirtyRect> = None;
        for y in bounds.y..(bounds.y + bounds.height) {
            for x in bounds.x..(bounds.x + bounds.width) {
                let center = Coordinate::new(x as f32 + 0.5, y as f32 + 0.5);
                if !shape.covers(center) {
                    continue;
                }
                self.blend_pixel(x, y, style.color);
                let pixel = DirtyRect {
                    x,
                    y,
                    width: 1,
                    height: 1,
                };
                touched = Some(touched.map_or(pixel, |rect| rect.union(pixel)));
            }
        }
        if let Some(rect) = touched {
            self.mark_dirty(rect);
        }
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

fn pixel_index(width: u32, x: usize, y: usize) -> usize {
    (y * width as usize + x) * 4
}

enum JoinShape {
    Disc(Coordinate),
    Triangle([Coordinate; 3]),
}

/// Geometry covered by one stroked path: butt-ended segment quads plus
/// the join pieces between consecutive segments.
struct StrokeShape {
    half_width: f32,
    segments: Vec<(Coordinate, Coordinate)>,
    joins: Vec<JoinShape>,
    points: Vec<Coordinate>,
}

impl StrokeShape {
    fn build(path: &Path, style: &StrokeStyle) -> Self {
        let half_width = style.line_width / 2.0;
        let mut shape = StrokeShape {
            half_width,
            segments: Vec::new(),
            joins: Vec::new(),
            points: Vec::new(),
        };

        for sub in &path.subpaths {
            let mut points: Vec<Coordinate> = Vec::with_capacity(sub.points.len());
            for point in &sub.points {
                if points.last() != Some(point) {
                    points.push(*point);
                }
            }
            if sub.closed && points.len() > 2 && points.first() == points.last() {
                points.pop();
            }
            if points.len() < 2 {
                continue;
            }

            let mut segments: Vec<(Coordinate, Coordinate)> =
                points.windows(2).map(|pair| (pair[0], pair[1])).collect();
            if sub.closed {
                segments.push((points[points.len() - 1], points[0]));
            }

            let join_count = if sub.closed {
                segments.len()
            } else {
                segments.len() - 1
            };
            for i in 0..join_count {
                let incoming = segments[i];
                let outgoing = segments[(i + 1) % segments.len()];
                shape
                    .joins
                    .extend(join_pieces(incoming, outgoing, style.line_join, half_width));
            }

            shape.points.extend_from_slice(&points);
            shape.segments.extend(segments);
        }
        shape
    }

    fn covers(&self, point: Coordinate) -> bool {
        self.segments
            .iter()
            .any(|&(a, b)| segment_covers(point, a, b, self.half_width))
            || self.joins.iter().any(|join| match join {
                JoinShape::Disc(center) => {
                    distance_sq(point, *center) <= self.half_width * self.half_width
                }
                JoinShape::Triangle(corners) => triangle_contains(point, corners),
            })
    }
}

fn join_pieces(
    incoming: (Coordinate, Coordinate),
    outgoing: (Coordinate, Coordinate),
    join: LineJoin,
    half_width: f32,
) -> Vec<JoinShape> {
    let vertex = incoming.1;
    match join {
        LineJoin::Round => vec![JoinShape::Disc(vertex)],
        LineJoin::Bevel => {
            let (Some(n_in), Some(n_out)) = (
                unit_normal(incoming.0, incoming.1),
                unit_normal(outgoing.0, outgoing.1),
            ) else {
                return Vec::new();
            };
            let offset = |n: Coordinate, sign: f32| {
                Coordinate::new(
                    vertex.x + n.x * half_width * sign,
                    vertex.y + n.y * half_width * sign,
                )
            };
            // One of the two triangles lies inside the turn and is already
            // covered by the segment quads.
            vec![
                JoinShape::Triangle([vertex, offset(n_in, 1.0), offset(n_out, 1.0)]),
                JoinShape::Triangle([vertex, offset(n_in, -1.0), offset(n_out, -1.0)]),
            ]
        }
    }
}

fn unit_normal(a: Coordinate, b: Coordinate) -> Option<Coordinate> {
    let vx = b.x - a.x;
    let vy = b.y - a.y;
    let len = (vx * vx + vy * vy).sqrt();
    if len <= f32::EPSILON {
        return None;
    }
    Some(Coordinate::new(-vy / len, vx / len))
}

fn distance_sq(a: Coordinate, b: Coordinate) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

fn segment_covers(point: Coordinate, start: Coordinate, end: Coordinate, half_width: f32) -> bool {
    let vx = end.x - start.x;
    let vy = end.y - start.y;
    let len_sq = vx * vx + vy * vy;
    if len_sq <= f32::EPSILON {
        return false;
    }
    let wx = point.x - start.x;
    let wy = point.y - start.y;
    let t = (wx * vx + wy * vy) / len_sq;
    if !(0.0..=1.0).contains(&t) {
        return false;
    }
    let cross = vx * wy - vy * wx;
    cross * cross <= half_width * half_width * len_sq
}

fn triangle_contains(point: Coordinate, [a, b, c]: &[Coordinate; 3]) -> bool {
    let edge = |p: Coordinate, q: Coordinate| {
        (q.x - p.x) * (point.y - p.y) - (q.y - p.y) * (point.x - p.x)
    };
    let d1 = edge(*a, *b);
    let d2 = edge(*b, *c);
    let d3 = edge(*c, *a);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    let area = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    area.abs() > f32::EPSILON && !(has_neg && has_pos)
}

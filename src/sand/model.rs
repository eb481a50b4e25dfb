use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// Position relative to the surface's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub x: f32,
    pub y: f32,
}

impl Coordinate {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn offset_from(self, origin: Coordinate) -> Coordinate {
        Coordinate::new(self.x - origin.x, self.y - origin.y)
    }
}

impl From<(f32, f32)> for Coordinate {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA`. The leading `#` is optional.
    pub fn from_hex(value: &str) -> Result<Self> {
        let digits = value.trim().trim_start_matches('#');
        let bytes = hex::decode(digits).with_context(|| format!("decode color '{value}'"))?;
        match bytes.as_slice() {
            [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
            [r, g, b, a] => Ok(Color::rgba(*r, *g, *b, *a)),
            _ => Err(anyhow!(
                "color '{value}' must have 6 or 8 hex digits, got {}",
                digits.len()
            )),
        }
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{}", hex::encode_upper([self.r, self.g, self.b]))
        } else {
            format!("#{}", hex::encode_upper([self.r, self.g, self.b, self.a]))
        }
    }

    pub fn to_rgba_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineJoin {
    #[default]
    Round,
    Bevel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub line_join: LineJoin,
    pub line_width: f32,
}

/// Sand tone used for every stroke unless configured otherwise.
pub const SAND_COLOR: Color = Color::rgb(0xE2, 0xCD, 0xA7);
pub const SAND_LINE_WIDTH: f32 = 10.0;

impl StrokeStyle {
    pub const fn sand() -> Self {
        Self {
            color: SAND_COLOR,
            line_join: LineJoin::Round,
            line_width: SAND_LINE_WIDTH,
        }
    }
}

impl Default for StrokeStyle {
    /// Fresh context state: opaque black, width 1, bevel joins.
    fn default() -> Self {
        Self {
            color: Color::rgb(0, 0, 0),
            line_join: LineJoin::Bevel,
            line_width: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubPath {
    pub points: Vec<Coordinate>,
    pub closed: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    pub subpaths: Vec<SubPath>,
}

impl Path {
    pub fn is_empty(&self) -> bool {
        self.subpaths.iter().all(|sub| sub.points.len() < 2)
    }

    /// Every straight segment of the path in drawing order, including the
    /// closing segment of closed subpaths.
    pub fn segments(&self) -> Vec<(Coordinate, Coordinate)> {
        let mut segments = Vec::new();
        for sub in &self.subpaths {
            for pair in sub.points.windows(2) {
                segments.push((pair[0], pair[1]));
            }
            if sub.closed && sub.points.len() >= 2 {
                if let (Some(&last), Some(&first)) = (sub.points.last(), sub.points.first()) {
                    segments.push((last, first));
                }
            }
        }
        segments
    }
}

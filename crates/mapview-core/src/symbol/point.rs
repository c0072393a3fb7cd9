use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::{random_color, Color};
use crate::error::{check_vertices, Result};
use crate::geometry::{BBox, GeometryKind, Point};
use crate::style::{Brush, Pen};
use crate::surface::DrawingSurface;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Marker shape of a point symbol, numbered 1 through 8.
///
/// Values outside that range can only come from deserialized data or
/// [`ShapeKind::from_raw`]; they are kept as-is and draw nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeKind(u8);

impl ShapeKind {
    pub const HOLLOW_CIRCLE: ShapeKind = ShapeKind(1);
    pub const FILLED_CIRCLE: ShapeKind = ShapeKind(2);
    pub const HOLLOW_SQUARE: ShapeKind = ShapeKind(3);
    pub const FILLED_SQUARE: ShapeKind = ShapeKind(4);
    pub const HOLLOW_TRIANGLE: ShapeKind = ShapeKind(5);
    pub const FILLED_TRIANGLE: ShapeKind = ShapeKind(6);
    /// Hollow circle with a filled dot a third of its size in the middle.
    pub const DOTTED_CIRCLE: ShapeKind = ShapeKind(7);
    /// Hollow circle with a second hollow circle of half its size inside.
    pub const DOUBLE_CIRCLE: ShapeKind = ShapeKind(8);

    pub const FIRST: u8 = 1;
    pub const LAST: u8 = 8;

    pub fn new(raw: u8) -> Option<Self> {
        (Self::FIRST..=Self::LAST).contains(&raw).then_some(Self(raw))
    }

    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u8 {
        self.0
    }

    pub fn is_known(self) -> bool {
        (Self::FIRST..=Self::LAST).contains(&self.0)
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random_range(Self::FIRST..=Self::LAST))
    }
}

/// Style for point features: a marker of `size` pixels centered on each vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointSymbol {
    pub shape: ShapeKind,
    pub color: Color,
    /// Marker diameter (or side length) in pixels.
    pub size: f32,
}

impl PointSymbol {
    pub fn new(shape: ShapeKind, color: Color, size: f32) -> Self {
        Self { shape, color, size }
    }

    /// `n` variants with random shape and palette color, keeping this size.
    pub fn random_variants<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<PointSymbol> {
        (0..n)
            .map(|_| PointSymbol::new(ShapeKind::random(rng), random_color(rng), self.size))
            .collect()
    }

    /// Draw one marker per screen point.
    pub fn draw<S: DrawingSurface + ?Sized>(&self, surface: &mut S, points: &[Point]) -> Result<()> {
        check_vertices(GeometryKind::Point, points.len())?;
        for &center in points {
            self.draw_marker(surface, center);
        }
        Ok(())
    }

    /// Draw a single marker centered on `center`.
    pub fn draw_marker<S: DrawingSurface + ?Sized>(&self, surface: &mut S, center: Point) {
        let size = self.size as f64;
        let pen = Pen::new(self.color, 1.0);
        let brush = Brush::new(self.color);
        let outer = BBox::centered(center, size, size);

        match self.shape {
            ShapeKind::HOLLOW_CIRCLE => surface.stroke_ellipse(outer, &pen),
            ShapeKind::FILLED_CIRCLE => surface.fill_ellipse(outer, &brush),
            ShapeKind::HOLLOW_SQUARE => surface.stroke_rect(outer, &pen),
            ShapeKind::FILLED_SQUARE => surface.fill_rect(outer, &brush),
            ShapeKind::HOLLOW_TRIANGLE => {
                surface.stroke_polyline(&triangle(center, size), &pen, true)
            }
            ShapeKind::FILLED_TRIANGLE => surface.fill_polygon(&triangle(center, size), &brush),
            ShapeKind::DOTTED_CIRCLE => {
                surface.stroke_ellipse(outer, &pen);
                surface.fill_ellipse(BBox::centered(center, size / 3.0, size / 3.0), &brush);
            }
            ShapeKind::DOUBLE_CIRCLE => {
                surface.stroke_ellipse(outer, &pen);
                surface.stroke_ellipse(BBox::centered(center, size / 2.0, size / 2.0), &pen);
            }
            _ => {}
        }
    }
}

/// Apex-up equilateral triangle with side `size` and centroid at `center`.
fn triangle(center: Point, size: f64) -> [Point; 3] {
    let base_y = center.y + size / (2.0 * SQRT_3);
    [
        Point::new(center.x, center.y - size / SQRT_3),
        Point::new(center.x - size / 2.0, base_y),
        Point::new(center.x + size / 2.0, base_y),
    ]
}

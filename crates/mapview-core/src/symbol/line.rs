use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::{random_color, Color};
use crate::error::{check_vertices, Result};
use crate::geometry::{GeometryKind, Point};
use crate::style::{DashPattern, Pen, StyleCache};
use crate::surface::DrawingSurface;

/// Style for line features.
///
/// `color`, `width` and `dash` are the canonical state. The [`Pen`] returned
/// by [`LineSymbol::pen`] is derived from them on first use and rebuilt after
/// any setter runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSymbol {
    color: Color,
    width: f32,
    dash: DashPattern,
    #[serde(skip)]
    pen: StyleCache<Pen>,
}

impl LineSymbol {
    pub fn new(color: Color, width: f32, dash: DashPattern) -> Self {
        Self {
            color,
            width,
            dash,
            pen: StyleCache::default(),
        }
    }

    pub fn from_pen(pen: Pen) -> Self {
        let mut symbol = Self::new(pen.color, pen.width, pen.dash);
        symbol.pen.set(pen);
        symbol
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn dash(&self) -> DashPattern {
        self.dash
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.pen.invalidate();
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
        self.pen.invalidate();
    }

    pub fn set_dash(&mut self, dash: DashPattern) {
        self.dash = dash;
        self.pen.invalidate();
    }

    /// The stroke style for drawing, built lazily from the scalar fields.
    pub fn pen(&self) -> &Pen {
        self.pen.get_or_build(|| Pen {
            color: self.color,
            width: self.width,
            dash: self.dash,
        })
    }

    /// Replace the whole stroke style; the scalar fields follow it.
    pub fn set_pen(&mut self, pen: Pen) {
        self.pen.set(pen);
        self.commit();
    }

    /// Edit the current stroke style in place, then commit it.
    pub fn modify_pen(&mut self, edit: impl FnOnce(&mut Pen)) {
        let mut pen = *self.pen();
        edit(&mut pen);
        self.set_pen(pen);
    }

    /// Copy the cached pen back into the scalar fields. A no-op when no pen is
    /// cached or the two already agree.
    pub fn commit(&mut self) {
        if let Some(pen) = self.pen.cached().copied() {
            self.color = pen.color;
            self.width = pen.width;
            self.dash = pen.dash;
        }
    }

    /// `n` variants with a random palette color, keeping width and dash.
    pub fn random_variants<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<LineSymbol> {
        (0..n)
            .map(|_| LineSymbol::new(random_color(rng), self.width, self.dash))
            .collect()
    }

    /// Stroke connected segments through `points` in order.
    pub fn draw<S: DrawingSurface + ?Sized>(&self, surface: &mut S, points: &[Point]) -> Result<()> {
        check_vertices(GeometryKind::Line, points.len())?;
        surface.stroke_polyline(points, self.pen(), false);
        Ok(())
    }
}

impl PartialEq for LineSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color && self.width == other.width && self.dash == other.dash
    }
}

impl Default for LineSymbol {
    fn default() -> Self {
        Self::new(Color::BLACK, 1.0, DashPattern::Solid)
    }
}

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::{random_color, Color};
use crate::error::{check_vertices, Result};
use crate::geometry::{GeometryKind, Point};
use crate::style::{Brush, Pen, StyleCache};
use crate::surface::DrawingSurface;

fn default_outline_width() -> f32 {
    1.0
}

/// Style for polygon features: a solid fill under a solid outline.
///
/// Same caching rule as [`LineSymbol`](super::LineSymbol): the colors and
/// outline width are canonical, the outline pen and fill brush are derived
/// lazily and dropped by every setter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolygonSymbol {
    outline_color: Color,
    #[serde(default = "default_outline_width")]
    outline_width: f32,
    fill_color: Color,
    #[serde(skip)]
    outline: StyleCache<Pen>,
    #[serde(skip)]
    fill: StyleCache<Brush>,
}

impl PolygonSymbol {
    pub fn new(outline_color: Color, fill_color: Color) -> Self {
        Self {
            outline_color,
            outline_width: default_outline_width(),
            fill_color,
            outline: StyleCache::default(),
            fill: StyleCache::default(),
        }
    }

    pub fn from_styles(outline: Pen, fill: Brush) -> Self {
        let mut symbol = Self::new(outline.color, fill.color);
        symbol.outline_width = outline.width;
        symbol.outline.set(outline);
        symbol.fill.set(fill);
        symbol
    }

    pub fn outline_color(&self) -> Color {
        self.outline_color
    }

    pub fn outline_width(&self) -> f32 {
        self.outline_width
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn set_outline_color(&mut self, color: Color) {
        self.outline_color = color;
        self.outline.invalidate();
    }

    pub fn set_outline_width(&mut self, width: f32) {
        self.outline_width = width;
        self.outline.invalidate();
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
        self.fill.invalidate();
    }

    pub fn outline(&self) -> &Pen {
        self.outline
            .get_or_build(|| Pen::new(self.outline_color, self.outline_width))
    }

    pub fn fill(&self) -> &Brush {
        self.fill.get_or_build(|| Brush::new(self.fill_color))
    }

    pub fn set_outline(&mut self, pen: Pen) {
        self.outline.set(pen);
        self.commit();
    }

    pub fn set_fill(&mut self, brush: Brush) {
        self.fill.set(brush);
        self.commit();
    }

    pub fn modify_outline(&mut self, edit: impl FnOnce(&mut Pen)) {
        let mut pen = *self.outline();
        edit(&mut pen);
        self.set_outline(pen);
    }

    pub fn modify_fill(&mut self, edit: impl FnOnce(&mut Brush)) {
        let mut brush = *self.fill();
        edit(&mut brush);
        self.set_fill(brush);
    }

    /// Copy whichever derived styles are cached back into the scalar fields.
    pub fn commit(&mut self) {
        if let Some(pen) = self.outline.cached().copied() {
            self.outline_color = pen.color;
            self.outline_width = pen.width;
        }
        if let Some(brush) = self.fill.cached().copied() {
            self.fill_color = brush.color;
        }
    }

    /// `n` variants whose outline and fill colors are drawn independently.
    pub fn random_variants<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<PolygonSymbol> {
        (0..n)
            .map(|_| {
                let outline = random_color(rng);
                let fill = random_color(rng);
                let mut variant = PolygonSymbol::new(outline, fill);
                variant.outline_width = self.outline_width;
                variant
            })
            .collect()
    }

    /// Fill the ring, then stroke its closed boundary with smooth edges. The
    /// surface's previous anti-aliasing setting is restored afterwards.
    pub fn draw<S: DrawingSurface + ?Sized>(&self, surface: &mut S, points: &[Point]) -> Result<()> {
        check_vertices(GeometryKind::Polygon, points.len())?;
        let previous = surface.anti_alias();
        surface.set_anti_alias(true);
        surface.fill_polygon(points, self.fill());
        surface.stroke_polyline(points, self.outline(), true);
        surface.set_anti_alias(previous);
        Ok(())
    }
}

impl PartialEq for PolygonSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.outline_color == other.outline_color
            && self.outline_width == other.outline_width
            && self.fill_color == other.fill_color
    }
}

//! Visual styles for map features.
//!
//! A [`Symbol`] is one of three concrete styles, one per [`GeometryKind`].
//! Symbols own no geometry: they take a feature's screen-space vertices and
//! emit calls on a [`DrawingSurface`]. Cloning always copies the full style,
//! derived caches included, so two layers never share a symbol.

mod line;
mod point;
mod polygon;

pub use line::LineSymbol;
pub use point::{PointSymbol, ShapeKind};
pub use polygon::PolygonSymbol;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{GeometryKind, Point};
use crate::surface::DrawingSurface;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Symbol {
    Point(PointSymbol),
    Line(LineSymbol),
    Polygon(PolygonSymbol),
}

impl Symbol {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Symbol::Point(_) => GeometryKind::Point,
            Symbol::Line(_) => GeometryKind::Line,
            Symbol::Polygon(_) => GeometryKind::Polygon,
        }
    }

    /// Draw one feature given its vertices in screen coordinates.
    ///
    /// Fails with `EmptyGeometry` and draws nothing when the feature has too
    /// few vertices for this symbol's kind.
    pub fn draw<S: DrawingSurface + ?Sized>(&self, surface: &mut S, points: &[Point]) -> Result<()> {
        match self {
            Symbol::Point(s) => s.draw(surface, points),
            Symbol::Line(s) => s.draw(surface, points),
            Symbol::Polygon(s) => s.draw(surface, points),
        }
    }

    /// `n` randomized variants of this symbol, all of the same kind.
    pub fn random_variants<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Symbol> {
        match self {
            Symbol::Point(s) => s.random_variants(n, rng).into_iter().map(Symbol::Point).collect(),
            Symbol::Line(s) => s.random_variants(n, rng).into_iter().map(Symbol::Line).collect(),
            Symbol::Polygon(s) => s
                .random_variants(n, rng)
                .into_iter()
                .map(Symbol::Polygon)
                .collect(),
        }
    }
}

impl From<PointSymbol> for Symbol {
    fn from(s: PointSymbol) -> Self {
        Symbol::Point(s)
    }
}

impl From<LineSymbol> for Symbol {
    fn from(s: LineSymbol) -> Self {
        Symbol::Line(s)
    }
}

impl From<PolygonSymbol> for Symbol {
    fn from(s: PolygonSymbol) -> Self {
        Symbol::Polygon(s)
    }
}

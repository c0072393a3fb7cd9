use std::cell::OnceCell;

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Dash pattern of a stroked line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DashPattern {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDotDot,
}

impl DashPattern {
    pub const ALL: [DashPattern; 5] = [
        DashPattern::Solid,
        DashPattern::Dash,
        DashPattern::Dot,
        DashPattern::DashDot,
        DashPattern::DashDotDot,
    ];

    /// On/off run lengths in multiples of the stroke width. Empty for solid lines.
    pub fn intervals(self) -> &'static [f32] {
        match self {
            DashPattern::Solid => &[],
            DashPattern::Dash => &[3.0, 1.0],
            DashPattern::Dot => &[1.0, 1.0],
            DashPattern::DashDot => &[3.0, 1.0, 1.0, 1.0],
            DashPattern::DashDotDot => &[3.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Stroke style handed to a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
    pub dash: DashPattern,
}

impl Pen {
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: DashPattern::Solid,
        }
    }

    pub fn with_dash(mut self, dash: DashPattern) -> Self {
        self.dash = dash;
        self
    }
}

impl Default for Pen {
    fn default() -> Self {
        Self::new(Color::BLACK, 1.0)
    }
}

/// Solid fill style handed to a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Brush {
    pub color: Color,
}

impl Brush {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

/// A lazily built style value derived from a symbol's scalar fields.
///
/// The owning symbol's fields stay the source of truth: the value is built on
/// first read and dropped by [`StyleCache::invalidate`] whenever a field changes.
/// Never serialized.
#[derive(Debug, Clone)]
pub struct StyleCache<T> {
    cell: OnceCell<T>,
}

impl<T> Default for StyleCache<T> {
    fn default() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }
}

impl<T> StyleCache<T> {
    pub fn get_or_build(&self, build: impl FnOnce() -> T) -> &T {
        self.cell.get_or_init(build)
    }

    /// The cached value, if one has been built since the last invalidation.
    pub fn cached(&self) -> Option<&T> {
        self.cell.get()
    }

    pub fn set(&mut self, value: T) {
        self.cell = OnceCell::from(value);
    }

    pub fn invalidate(&mut self) {
        self.cell.take();
    }

    pub fn is_built(&self) -> bool {
        self.cell.get().is_some()
    }
}

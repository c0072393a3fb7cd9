//! # MapView Core
//!
//! The model side of a simple 2D map viewer: the map/screen transform with
//! pan and zoom, an ordered stack of toggleable layers, and the point, line
//! and polygon symbols that turn screen-space geometry into drawing calls.
//!
//! Geometry arrives already parsed; drawing goes out through the
//! [`DrawingSurface`] trait. Nothing here is thread-safe by itself: the host
//! owns the [`Map`] and wraps it in a lock if it needs one.

pub mod color;
pub mod error;
pub mod geometry;
pub mod layer;
pub mod map;
pub mod style;
pub mod surface;
pub mod symbol;
pub mod viewport;

pub use color::Color;
pub use error::{MapError, Result};
pub use geometry::{BBox, Feature, GeometryKind, Point};
pub use layer::{Layer, LayerId, LayerStack, SelectionMove};
pub use map::Map;
pub use style::{Brush, DashPattern, Pen};
pub use surface::DrawingSurface;
pub use symbol::{LineSymbol, PointSymbol, PolygonSymbol, ShapeKind, Symbol};
pub use viewport::Viewport;

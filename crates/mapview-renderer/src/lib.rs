//! # MapView Renderer
//!
//! The render pass for MapView: walks the visible layers of a
//! [`mapview_core::Map`] bottom to top, transforms each feature through the
//! viewport and lets the layer's symbol draw it.
//!
//! Two surfaces ship with the crate: [`CommandRecorder`], which captures
//! JSON-serializable draw commands for a frontend canvas, and
//! [`PixmapSurface`], which rasterizes with tiny-skia.

pub mod error;
pub mod pixmap;
pub mod render_data;
pub mod renderer;
pub mod settings;

pub use error::RenderError;
pub use pixmap::PixmapSurface;
pub use render_data::{CommandRecorder, DrawCommand, RenderFrame};
pub use renderer::{render, render_frame, render_pixmap, RenderStats};
pub use settings::RenderSettings;

//! Raster output using tiny-skia.

use std::path::Path as FsPath;

use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, StrokeDash,
    Transform,
};

use mapview_core::{BBox, Brush, Color, DrawingSurface, Pen, Point};

use crate::error::{RenderError, Result};

/// Cubic bezier control distance for a quarter circle.
const BEZIER_K: f32 = 0.552_284_8;

/// A [`DrawingSurface`] that paints into an RGBA pixmap.
pub struct PixmapSurface {
    pixmap: Pixmap,
    anti_alias: bool,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::InvalidCanvas { width, height })?;
        Ok(Self {
            pixmap,
            anti_alias: false,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn clear(&mut self, color: Color) {
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a));
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Unpremultiplied RGBA at a pixel, `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(c.red(), c.green(), c.blue(), c.alpha()))
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))
    }

    pub fn save_png(&self, path: impl AsRef<FsPath>) -> Result<()> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn paint(&self, color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = self.anti_alias;
        paint
    }

    fn stroke_path(&mut self, path: &Path, pen: &Pen) {
        let paint = self.paint(pen.color);
        self.pixmap
            .stroke_path(path, &paint, &stroke(pen), Transform::identity(), None);
    }

    fn fill_path(&mut self, path: &Path, brush: &Brush) {
        let paint = self.paint(brush.color);
        self.pixmap
            .fill_path(path, &paint, FillRule::EvenOdd, Transform::identity(), None);
    }
}

fn stroke(pen: &Pen) -> Stroke {
    let width = pen.width.max(0.0);
    let unit = width.max(1.0);
    let dash = match pen.dash.intervals() {
        [] => None,
        runs => StrokeDash::new(runs.iter().map(|r| r * unit).collect(), 0.0),
    };
    Stroke {
        width,
        line_cap: LineCap::Butt,
        line_join: LineJoin::Round,
        dash,
        ..Default::default()
    }
}

fn to_rect(bounds: BBox) -> Option<Rect> {
    Rect::from_ltrb(
        bounds.min.x as f32,
        bounds.min.y as f32,
        bounds.max.x as f32,
        bounds.max.y as f32,
    )
}

/// Ellipse inscribed in `bounds`, built from four cubic beziers.
fn ellipse_path(bounds: BBox) -> Option<Path> {
    let center = bounds.center();
    let (cx, cy) = (center.x as f32, center.y as f32);
    let rx = (bounds.width() / 2.0) as f32;
    let ry = (bounds.height() / 2.0) as f32;
    let kx = rx * BEZIER_K;
    let ky = ry * BEZIER_K;

    let mut pb = PathBuilder::new();
    pb.move_to(cx, cy - ry);
    pb.cubic_to(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy);
    pb.cubic_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry);
    pb.cubic_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy);
    pb.cubic_to(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry);
    pb.close();
    pb.finish()
}

fn polyline_path(points: &[Point], closed: bool) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for p in rest {
        pb.line_to(p.x as f32, p.y as f32);
    }
    if closed {
        pb.close();
    }
    pb.finish()
}

impl DrawingSurface for PixmapSurface {
    fn stroke_ellipse(&mut self, bounds: BBox, pen: &Pen) {
        if let Some(path) = ellipse_path(bounds) {
            self.stroke_path(&path, pen);
        }
    }

    fn fill_ellipse(&mut self, bounds: BBox, brush: &Brush) {
        if let Some(path) = ellipse_path(bounds) {
            self.fill_path(&path, brush);
        }
    }

    fn stroke_rect(&mut self, bounds: BBox, pen: &Pen) {
        if let Some(rect) = to_rect(bounds) {
            self.stroke_path(&PathBuilder::from_rect(rect), pen);
        }
    }

    fn fill_rect(&mut self, bounds: BBox, brush: &Brush) {
        if let Some(rect) = to_rect(bounds) {
            let paint = self.paint(brush.color);
            self.pixmap
                .fill_rect(rect, &paint, Transform::identity(), None);
        }
    }

    fn stroke_polyline(&mut self, points: &[Point], pen: &Pen, closed: bool) {
        if let Some(path) = polyline_path(points, closed) {
            self.stroke_path(&path, pen);
        }
    }

    fn fill_polygon(&mut self, points: &[Point], brush: &Brush) {
        if let Some(path) = polyline_path(points, true) {
            self.fill_path(&path, brush);
        }
    }

    fn set_anti_alias(&mut self, enabled: bool) {
        self.anti_alias = enabled;
    }

    fn anti_alias(&self) -> bool {
        self.anti_alias
    }
}

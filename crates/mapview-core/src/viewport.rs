use serde::{Deserialize, Serialize};

use crate::error::{check_scale, MapError, Result};
use crate::geometry::{BBox, Point};

/// The map/screen transform.
///
/// `offset` is the map coordinate shown at the screen origin (0, 0) and `scale`
/// is map units per screen pixel. There is no rotation or shear, so these three
/// scalars fully describe the mapping:
///
/// ```text
/// screen = (map - offset) / scale
/// map    = screen * scale + offset
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ViewportRepr")]
pub struct Viewport {
    /// Map X coordinate at the screen origin.
    pub offset_x: f64,
    /// Map Y coordinate at the screen origin.
    pub offset_y: f64,
    /// Map units per screen pixel. Always finite and > 0.
    scale: f64,
}

/// Unchecked wire form; deserialization goes through [`Viewport::new`].
#[derive(Deserialize)]
struct ViewportRepr {
    offset_x: f64,
    offset_y: f64,
    scale: f64,
}

impl TryFrom<ViewportRepr> for Viewport {
    type Error = MapError;

    fn try_from(repr: ViewportRepr) -> Result<Self> {
        Viewport::new(repr.offset_x, repr.offset_y, repr.scale)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(offset_x: f64, offset_y: f64, scale: f64) -> Result<Self> {
        Ok(Self {
            offset_x,
            offset_y,
            scale: check_scale(scale)?,
        })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    // ── Transforms ───────────────────────────────────────────────────

    /// Convert a map coordinate to a screen coordinate.
    pub fn to_screen(&self, map: Point) -> Point {
        Point::new(
            (map.x - self.offset_x) / self.scale,
            (map.y - self.offset_y) / self.scale,
        )
    }

    /// Convert a screen coordinate to a map coordinate.
    pub fn to_map(&self, screen: Point) -> Point {
        Point::new(
            screen.x * self.scale + self.offset_x,
            screen.y * self.scale + self.offset_y,
        )
    }

    pub fn map_distance_to_screen(&self, d: f64) -> f64 {
        d / self.scale
    }

    pub fn screen_distance_to_map(&self, d: f64) -> f64 {
        d * self.scale
    }

    /// Transform every vertex of a map-space path into screen space.
    pub fn path_to_screen(&self, map_points: &[Point]) -> Vec<Point> {
        map_points.iter().map(|p| self.to_screen(*p)).collect()
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Put map coordinate (x, y) at the screen origin. No clamping.
    pub fn pan_to(&mut self, x: f64, y: f64) {
        self.offset_x = x;
        self.offset_y = y;
        log::debug!("pan to ({x}, {y})");
    }

    /// Pan by a delta in screen pixels, as produced by dragging the canvas.
    /// Dragging right moves the view content right, i.e. the offset left.
    pub fn pan_by_screen(&mut self, dx: f64, dy: f64) {
        let x = self.offset_x - self.screen_distance_to_map(dx);
        let y = self.offset_y - self.screen_distance_to_map(dy);
        self.pan_to(x, y);
    }

    pub fn set_scale(&mut self, scale: f64) -> Result<()> {
        self.scale = check_scale(scale).inspect_err(|e| log::warn!("rejected scale: {e}"))?;
        log::debug!("scale set to {scale}");
        Ok(())
    }

    /// Zoom by `ratio` keeping `center` (map coordinates) at the same screen pixel.
    ///
    /// `ratio > 1` zooms in, `0 < ratio < 1` zooms out. On error the viewport is
    /// left untouched.
    pub fn zoom_by_center(&mut self, center: Point, ratio: f64) -> Result<()> {
        if !(ratio.is_finite() && ratio > 0.0) {
            log::warn!("rejected zoom ratio {ratio}");
            return Err(MapError::InvalidZoomRatio { ratio });
        }
        let scale = check_scale(self.scale / ratio)?;

        let k = 1.0 - 1.0 / ratio;
        self.offset_x += k * (center.x - self.offset_x);
        self.offset_y += k * (center.y - self.offset_y);
        self.scale = scale;
        log::debug!(
            "zoom x{ratio} about ({}, {}) -> scale {}",
            center.x,
            center.y,
            self.scale
        );
        Ok(())
    }

    /// Zoom by `ratio` keeping the map point under `screen` fixed.
    pub fn zoom_at_screen(&mut self, screen: Point, ratio: f64) -> Result<()> {
        self.zoom_by_center(self.to_map(screen), ratio)
    }

    /// Fit `bbox` into a canvas of the given pixel size, centered, using `fill`
    /// (0..=1) of the limiting dimension. Degenerate inputs leave the viewport
    /// unchanged.
    pub fn fit_bbox(&mut self, bbox: &BBox, canvas_width: f64, canvas_height: f64, fill: f64) {
        let width = bbox.width();
        let height = bbox.height();
        if width <= 0.0 && height <= 0.0 {
            return;
        }
        if canvas_width <= 0.0 || canvas_height <= 0.0 || !(fill > 0.0 && fill <= 1.0) {
            return;
        }

        let scale_x = width / (canvas_width * fill);
        let scale_y = height / (canvas_height * fill);
        let Ok(scale) = check_scale(scale_x.max(scale_y)) else {
            return;
        };

        let center = bbox.center();
        self.scale = scale;
        self.offset_x = center.x - canvas_width / 2.0 * scale;
        self.offset_y = center.y - canvas_height / 2.0 * scale;
        log::debug!("fit {bbox:?} -> scale {scale}");
    }

    /// The map-space rectangle covered by a canvas of the given pixel size.
    pub fn visible_bounds(&self, canvas_width: f64, canvas_height: f64) -> BBox {
        BBox::new(
            self.to_map(Point::new(0.0, 0.0)),
            self.to_map(Point::new(canvas_width, canvas_height)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < EPS * (1.0 + a.x.abs()) && (a.y - b.y).abs() < EPS * (1.0 + a.y.abs())
    }

    #[test]
    fn test_round_trip() {
        let viewports = [
            Viewport::new(0.0, 0.0, 1.0).unwrap(),
            Viewport::new(-350.25, 1200.5, 0.003).unwrap(),
            Viewport::new(5e5, -4e6, 750.0).unwrap(),
        ];
        let points = [
            Point::new(0.0, 0.0),
            Point::new(12.5, -99.75),
            Point::new(-1.0e6, 3.3e5),
        ];
        for vp in &viewports {
            for &p in &points {
                assert!(close(vp.to_map(vp.to_screen(p)), p));
                assert!(close(vp.to_screen(vp.to_map(p)), p));
            }
        }
    }

    #[test]
    fn test_distance_scaling() {
        let vp = Viewport::new(3.0, 4.0, 0.25).unwrap();
        for d in [0.0, 1.0, 17.5, 1e4] {
            assert!((vp.map_distance_to_screen(vp.screen_distance_to_map(d)) - d).abs() < EPS);
        }
        assert!((vp.map_distance_to_screen(1.0) - 4.0).abs() < EPS);
    }

    #[test]
    fn test_pan_scenario() {
        let mut vp = Viewport::new(0.0, 0.0, 2.0).unwrap();
        vp.pan_to(100.0, 50.0);
        assert_eq!(vp.to_screen(Point::new(100.0, 50.0)), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_pan_by_screen() {
        let mut vp = Viewport::new(0.0, 0.0, 2.0).unwrap();
        let before = vp.to_screen(Point::new(40.0, 40.0));
        vp.pan_by_screen(10.0, -5.0);
        let after = vp.to_screen(Point::new(40.0, 40.0));
        assert!(close(after, Point::new(before.x + 10.0, before.y - 5.0)));
    }

    #[test]
    fn test_zoom_in_scenario() {
        let mut vp = Viewport::new(0.0, 0.0, 10.0).unwrap();
        let center = Point::new(50.0, 50.0);
        let before = vp.to_screen(center);
        vp.zoom_by_center(center, 2.0).unwrap();
        assert_eq!(vp.scale(), 5.0);
        assert!(close(vp.to_screen(center), before));
    }

    #[test]
    fn test_zoom_fixed_point_and_scale_law() {
        let centers = [Point::new(-20.0, 7.5), Point::new(1e3, -2e3), Point::new(0.0, 0.0)];
        for ratio in [0.1, 0.5, 1.0, 1.25, 3.0, 40.0] {
            for &center in &centers {
                let mut vp = Viewport::new(13.0, -8.0, 4.0).unwrap();
                let old_scale = vp.scale();
                let before = vp.to_screen(center);
                vp.zoom_by_center(center, ratio).unwrap();
                assert_eq!(vp.scale(), old_scale / ratio);
                assert!(close(vp.to_screen(center), before));
            }
        }
    }

    #[test]
    fn test_zoom_rejects_bad_ratio() {
        let mut vp = Viewport::new(1.0, 2.0, 3.0).unwrap();
        let original = vp;
        for ratio in [-1.0, 0.0, f64::NAN, f64::INFINITY] {
            let err = vp.zoom_by_center(Point::new(5.0, 5.0), ratio).unwrap_err();
            assert!(matches!(err, MapError::InvalidZoomRatio { .. }));
            assert_eq!(vp, original);
        }
    }

    #[test]
    fn test_set_scale_rejects_degenerate() {
        let mut vp = Viewport::default();
        assert!(matches!(
            vp.set_scale(0.0),
            Err(MapError::InvalidTransformState { .. })
        ));
        assert!(vp.set_scale(-2.0).is_err());
        assert_eq!(vp.scale(), 1.0);
        vp.set_scale(0.5).unwrap();
        assert_eq!(vp.scale(), 0.5);
        assert!(Viewport::new(0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_deserialize_validates_scale() {
        let vp: Viewport =
            serde_json::from_str(r#"{"offset_x":5.0,"offset_y":-2.0,"scale":0.25}"#).unwrap();
        assert_eq!(vp, Viewport::new(5.0, -2.0, 0.25).unwrap());

        for scale in ["0.0", "-1.0"] {
            let json = format!(r#"{{"offset_x":0.0,"offset_y":0.0,"scale":{scale}}}"#);
            let err = serde_json::from_str::<Viewport>(&json).unwrap_err();
            assert!(err.to_string().contains("Invalid viewport scale"), "{err}");
        }

        let json = serde_json::to_string(&vp).unwrap();
        assert_eq!(serde_json::from_str::<Viewport>(&json).unwrap(), vp);
    }

    #[test]
    fn test_zoom_at_screen_keeps_pixel() {
        let mut vp = Viewport::new(100.0, 100.0, 2.0).unwrap();
        let pixel = Point::new(320.0, 240.0);
        let under = vp.to_map(pixel);
        vp.zoom_at_screen(pixel, 4.0).unwrap();
        assert!(close(vp.to_map(pixel), under));
    }

    #[test]
    fn test_fit_bbox() {
        let mut vp = Viewport::default();
        let bbox = BBox::new(Point::new(0.0, 0.0), Point::new(200.0, 100.0));
        vp.fit_bbox(&bbox, 400.0, 400.0, 1.0);
        assert!((vp.scale() - 0.5).abs() < EPS);
        assert!(close(vp.to_screen(bbox.center()), Point::new(200.0, 200.0)));
        let visible = vp.visible_bounds(400.0, 400.0);
        assert!(visible.contains_point(&bbox.min));
        assert!(visible.contains_point(&bbox.max));
    }

    #[test]
    fn test_fit_bbox_degenerate_is_noop() {
        let mut vp = Viewport::new(1.0, 1.0, 1.0).unwrap();
        let point_box = BBox::new(Point::new(5.0, 5.0), Point::new(5.0, 5.0));
        vp.fit_bbox(&point_box, 400.0, 300.0, 0.9);
        assert_eq!(vp, Viewport::new(1.0, 1.0, 1.0).unwrap());
        let bbox = BBox::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        vp.fit_bbox(&bbox, 0.0, 300.0, 0.9);
        assert_eq!(vp.scale(), 1.0);
    }
}

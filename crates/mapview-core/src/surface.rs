//! The drawing capability symbols render onto.
//!
//! All coordinates are screen pixels. A surface draws immediately; it keeps no
//! display list between calls.

use crate::geometry::{BBox, Point};
use crate::style::{Brush, Pen};

pub trait DrawingSurface {
    /// Stroke the ellipse inscribed in `bounds`.
    fn stroke_ellipse(&mut self, bounds: BBox, pen: &Pen);

    /// Fill the ellipse inscribed in `bounds`.
    fn fill_ellipse(&mut self, bounds: BBox, brush: &Brush);

    fn stroke_rect(&mut self, bounds: BBox, pen: &Pen);

    fn fill_rect(&mut self, bounds: BBox, brush: &Brush);

    /// Stroke connected segments through `points`, adding the closing edge
    /// back to the first point when `closed` is set.
    fn stroke_polyline(&mut self, points: &[Point], pen: &Pen, closed: bool);

    /// Fill the closed ring described by `points`.
    fn fill_polygon(&mut self, points: &[Point], brush: &Brush);

    /// Request smooth (anti-aliased) edges for subsequent calls. Surfaces that
    /// always smooth, or never can, may ignore this.
    fn set_anti_alias(&mut self, _enabled: bool) {}

    /// The current anti-aliasing request, so a caller can put it back.
    fn anti_alias(&self) -> bool {
        false
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// One recorded surface call.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        StrokeEllipse(BBox, Pen),
        FillEllipse(BBox, Brush),
        StrokeRect(BBox, Pen),
        FillRect(BBox, Brush),
        StrokePolyline(Vec<Point>, Pen, bool),
        FillPolygon(Vec<Point>, Brush),
        AntiAlias(bool),
    }

    /// Surface that remembers every call in order.
    #[derive(Debug, Default)]
    pub struct CallLog {
        pub calls: Vec<Call>,
        pub anti_alias: bool,
    }

    impl DrawingSurface for CallLog {
        fn stroke_ellipse(&mut self, bounds: BBox, pen: &Pen) {
            self.calls.push(Call::StrokeEllipse(bounds, *pen));
        }

        fn fill_ellipse(&mut self, bounds: BBox, brush: &Brush) {
            self.calls.push(Call::FillEllipse(bounds, *brush));
        }

        fn stroke_rect(&mut self, bounds: BBox, pen: &Pen) {
            self.calls.push(Call::StrokeRect(bounds, *pen));
        }

        fn fill_rect(&mut self, bounds: BBox, brush: &Brush) {
            self.calls.push(Call::FillRect(bounds, *brush));
        }

        fn stroke_polyline(&mut self, points: &[Point], pen: &Pen, closed: bool) {
            self.calls
                .push(Call::StrokePolyline(points.to_vec(), *pen, closed));
        }

        fn fill_polygon(&mut self, points: &[Point], brush: &Brush) {
            self.calls.push(Call::FillPolygon(points.to_vec(), *brush));
        }

        fn set_anti_alias(&mut self, enabled: bool) {
            self.anti_alias = enabled;
            self.calls.push(Call::AntiAlias(enabled));
        }

        fn anti_alias(&self) -> bool {
            self.anti_alias
        }
    }
}

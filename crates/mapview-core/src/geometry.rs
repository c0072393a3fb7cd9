use serde::{Deserialize, Serialize};

/// A 2D point. Serves as both a map coordinate and a screen coordinate; which
/// space it lives in depends on the transform that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// An axis-aligned bounding box. `min` is never greater than `max` on either axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl BBox {
    /// Build a box from two arbitrary corners.
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// A `width` x `height` box centered on `center`.
    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        let half_w = width.abs() / 2.0;
        let half_h = height.abs() / 2.0;
        Self {
            min: Point::new(center.x - half_w, center.y - half_h),
            max: Point::new(center.x + half_w, center.y + half_h),
        }
    }

    pub fn from_points(points: &[Point]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self {
            min: Point::new(min_x, min_y),
            max: Point::new(max_x, max_y),
        })
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn intersects(&self, other: &BBox) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn union(&self, other: &BBox) -> Self {
        Self {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

/// What a feature's vertex list describes. Decided by the symbol of the layer
/// that holds the feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    Line,
    Polygon,
}

impl GeometryKind {
    /// Fewest vertices a feature of this kind needs to be drawable.
    pub fn min_vertices(self) -> usize {
        match self {
            GeometryKind::Point => 1,
            GeometryKind::Line => 2,
            GeometryKind::Polygon => 3,
        }
    }
}

impl std::fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GeometryKind::Point => "point",
            GeometryKind::Line => "line",
            GeometryKind::Polygon => "polygon",
        };
        f.write_str(name)
    }
}

/// A single map feature: an ordered vertex list in map coordinates.
///
/// Point layers treat every vertex as its own marker, line layers as a
/// polyline, polygon layers as a closed ring (the closing edge is implicit).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Feature {
    pub vertices: Vec<Point>,
}

impl Feature {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn point(p: Point) -> Self {
        Self { vertices: vec![p] }
    }

    pub fn bbox(&self) -> Option<BBox> {
        BBox::from_points(&self.vertices)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Total length of the vertex path, ignoring any implicit closing edge.
    pub fn length(&self) -> f64 {
        self.vertices
            .windows(2)
            .map(|w| w[0].distance_to(&w[1]))
            .sum()
    }
}

impl From<Vec<Point>> for Feature {
    fn from(vertices: Vec<Point>) -> Self {
        Self::new(vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_bbox_normalizes_corners() {
        let bb = BBox::new(Point::new(10.0, -2.0), Point::new(-5.0, 8.0));
        assert_eq!(bb.min, Point::new(-5.0, -2.0));
        assert_eq!(bb.max, Point::new(10.0, 8.0));
        assert!((bb.width() - 15.0).abs() < 1e-10);
        assert!((bb.height() - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_bbox_centered() {
        let bb = BBox::centered(Point::new(5.0, 5.0), 4.0, 2.0);
        assert_eq!(bb.min, Point::new(3.0, 4.0));
        assert_eq!(bb.max, Point::new(7.0, 6.0));
        assert_eq!(bb.center(), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_bbox_intersection() {
        let a = BBox::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let b = BBox::new(Point::new(5.0, 5.0), Point::new(15.0, 15.0));
        let c = BBox::new(Point::new(20.0, 20.0), Point::new(30.0, 30.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        let u = a.union(&c);
        assert!(u.contains_point(&Point::new(25.0, 1.0)));
    }

    #[test]
    fn test_feature_length_and_bbox() {
        let f = Feature::new(vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(3.0, 10.0),
        ]);
        assert!((f.length() - 11.0).abs() < 1e-10);
        let bb = f.bbox().unwrap();
        assert_eq!(bb.max, Point::new(3.0, 10.0));
        assert!(Feature::default().bbox().is_none());
    }

    #[test]
    fn test_min_vertices() {
        assert_eq!(GeometryKind::Point.min_vertices(), 1);
        assert_eq!(GeometryKind::Line.min_vertices(), 2);
        assert_eq!(GeometryKind::Polygon.min_vertices(), 3);
    }
}

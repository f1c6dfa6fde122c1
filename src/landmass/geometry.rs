//! Grid geometry: points, bounding boxes, region frames and polygon membership

/// Grid dimensions of one generation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridInfo {
    pub width: usize,
    pub height: usize,
}

impl GridInfo {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Geometric center, used as the pivot for region rotation.
    pub fn center(&self) -> Point {
        Point::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

/// A point in real-valued grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate counter-clockwise by `angle` radians around `pivot`.
    pub fn rotated_about(&self, pivot: Point, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Point::new(dx * cos - dy * sin + pivot.x, dx * sin + dy * cos + pivot.y)
    }
}

/// Axis-aligned bounding box in real coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Tightest box around `points`. Returns `None` for an empty slice.
    pub fn around(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = BoundingBox {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in &points[1..] {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    /// Grow the box by `margin` on every side.
    pub fn padded(&self, margin: f64) -> Self {
        BoundingBox {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// Mapping between an area's local cell indices and world coordinates:
/// an integer origin offset with identity scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionFrame {
    pub origin_x: i64,
    pub origin_y: i64,
    pub width: usize,
    pub height: usize,
}

impl RegionFrame {
    pub fn new(origin_x: i64, origin_y: i64, width: usize, height: usize) -> Self {
        Self { origin_x, origin_y, width, height }
    }

    /// Smallest frame whose cells cover `bounds`, snapped outward to whole cells.
    pub fn covering(bounds: &BoundingBox) -> Self {
        let origin_x = bounds.min_x.floor() as i64;
        let origin_y = bounds.min_y.floor() as i64;
        let end_x = bounds.max_x.ceil() as i64;
        let end_y = bounds.max_y.ceil() as i64;
        Self::new(origin_x, origin_y, (end_x - origin_x + 1) as usize, (end_y - origin_y + 1) as usize)
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn local_to_world(&self, lx: usize, ly: usize) -> (i64, i64) {
        (self.origin_x + lx as i64, self.origin_y + ly as i64)
    }

    /// Local cell for a world cell, or `None` when it lies outside the frame.
    pub fn world_to_local(&self, x: i64, y: i64) -> Option<(usize, usize)> {
        let lx = x - self.origin_x;
        let ly = y - self.origin_y;
        if lx < 0 || ly < 0 || lx >= self.width as i64 || ly >= self.height as i64 {
            return None;
        }
        Some((lx as usize, ly as usize))
    }

    /// Local cell containing a real-valued point.
    pub fn local_of_point(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        self.world_to_local(x.floor() as i64, y.floor() as i64)
    }
}

/// Even-odd crossing-number test (PNPOLY).
pub fn point_in_polygon(px: f64, py: f64, vertices: &[Point]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[j];
        if (a.y > py) != (b.y > py) {
            let intersect_x = (b.x - a.x) * (py - a.y) / (b.y - a.y) + a.x;
            if px < intersect_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn square() -> Vec<Point> {
        vec![
            Point::new(10.0, 10.0),
            Point::new(20.0, 10.0),
            Point::new(20.0, 20.0),
            Point::new(10.0, 20.0),
        ]
    }

    #[test]
    fn test_point_in_square() {
        let poly = square();
        assert!(point_in_polygon(15.0, 15.0, &poly));
        assert!(point_in_polygon(10.5, 19.5, &poly));
        assert!(!point_in_polygon(0.0, 0.0, &poly));
        assert!(!point_in_polygon(25.0, 15.0, &poly));
        assert!(!point_in_polygon(15.0, 21.0, &poly));
    }

    #[test]
    fn test_point_in_concave_polygon() {
        // U shape opening upwards.
        let poly = vec![
            Point::new(0.0, 0.0),
            Point::new(9.0, 0.0),
            Point::new(9.0, 9.0),
            Point::new(6.0, 9.0),
            Point::new(6.0, 3.0),
            Point::new(3.0, 3.0),
            Point::new(3.0, 9.0),
            Point::new(0.0, 9.0),
        ];
        assert!(point_in_polygon(1.5, 6.0, &poly));
        assert!(point_in_polygon(7.5, 6.0, &poly));
        assert!(!point_in_polygon(4.5, 6.0, &poly));
        assert!(point_in_polygon(4.5, 1.5, &poly));
    }

    #[test]
    fn test_degenerate_polygon_is_empty() {
        let line = vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)];
        assert!(!point_in_polygon(1.0, 1.0, &line));
    }

    #[test]
    fn test_rotation_about_center() {
        let pivot = Point::new(10.0, 10.0);
        let p = Point::new(15.0, 10.0).rotated_about(pivot, PI / 2.0);
        assert!((p.x - 10.0).abs() < 1e-9);
        assert!((p.y - 15.0).abs() < 1e-9);

        let full = Point::new(3.0, 7.0).rotated_about(pivot, 2.0 * PI);
        assert!((full.x - 3.0).abs() < 1e-9 && (full.y - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounding_box_padding() {
        let bounds = BoundingBox::around(&square()).unwrap().padded(4.0);
        assert_eq!(bounds.min_x, 6.0);
        assert_eq!(bounds.max_y, 24.0);
        assert!(bounds.contains(Point::new(6.0, 24.0)));
        assert!(BoundingBox::around(&[]).is_none());
    }

    #[test]
    fn test_frame_round_trip() {
        let frame = RegionFrame::covering(&BoundingBox {
            min_x: -3.7,
            min_y: 12.2,
            max_x: 8.1,
            max_y: 20.0,
        });
        assert_eq!((frame.origin_x, frame.origin_y), (-4, 12));
        assert_eq!((frame.width, frame.height), (14, 9));

        for ly in 0..frame.height {
            for lx in 0..frame.width {
                let (wx, wy) = frame.local_to_world(lx, ly);
                assert_eq!(frame.world_to_local(wx, wy), Some((lx, ly)));
            }
        }
        assert_eq!(frame.world_to_local(-5, 12), None);
        assert_eq!(frame.world_to_local(10, 12), None);
        assert_eq!(frame.local_of_point(-3.2, 12.9), Some((0, 0)));
        assert_eq!(frame.local_of_point(f64::NAN, 0.0), None);
    }
}

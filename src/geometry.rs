//! Geometry kernel: points, bounding boxes, distances and transforms.
//!
//! Everything here is a pure function over raster-surface pixel coordinates.
//! Rendering, hit-testing and the selection transforms all build on these.

use serde::{Deserialize, Serialize};

/// A point in raster-surface pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Returns this point shifted by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Midpoint between two points.
    pub fn midpoint(self, other: Point) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Axis-aligned box with a non-negative size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Builds the box spanned by two anchors. Anchor order does not matter.
    pub fn from_anchors(a: Point, b: Point) -> Self {
        let min_x = a.x.min(b.x);
        let min_y = a.y.min(b.y);
        Self::new(min_x, min_y, a.x.max(b.x) - min_x, a.y.max(b.y) - min_y)
    }

    /// Box of the given size centered on `center`.
    pub fn centered(center: Point, w: f64, h: f64) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    pub fn min(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn max(&self) -> Point {
        Point::new(self.x + self.w, self.y + self.h)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    /// Grows the box by `margin` on every side.
    pub fn expand(&self, margin: f64) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.w + margin * 2.0,
            self.h + margin * 2.0,
        )
    }

    /// Smallest box covering both.
    pub fn union(&self, other: &Bounds) -> Self {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = (self.x + self.w).max(other.x + other.w);
        let max_y = (self.y + self.h).max(other.y + other.h);
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

/// Corner that stays fixed while a box is resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeAnchor {
    /// The handle sits on the bottom-right corner; the top-left corner is fixed.
    #[default]
    BottomRight,
}

/// Smallest width or height a resize can produce.
pub const MIN_BOX_SIZE: f64 = 1.0;

/// Shortest distance from `p` to the segment `a`-`b`.
///
/// A degenerate segment (`a == b`) falls back to point distance.
pub fn distance_point_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq < f64::EPSILON {
        return p.distance(a);
    }

    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

/// Bounding box of a point set, or `None` when empty.
pub fn bounding_box(points: &[Point]) -> Option<Bounds> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(Bounds::new(min_x, min_y, max_x - min_x, max_y - min_y))
}

/// Rotates `point` around `center` by `degrees` (clockwise in screen space).
pub fn rotate(point: Point, center: Point, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos)
}

/// Applies a pointer delta to the resize handle of `bounds`.
///
/// The opposite corner stays fixed; the result never shrinks below
/// [`MIN_BOX_SIZE`] in either dimension.
pub fn scale_bounding_box(bounds: Bounds, delta: (f64, f64), anchor: ResizeAnchor) -> Bounds {
    match anchor {
        ResizeAnchor::BottomRight => Bounds::new(
            bounds.x,
            bounds.y,
            (bounds.w + delta.0).max(MIN_BOX_SIZE),
            (bounds.h + delta.1).max(MIN_BOX_SIZE),
        ),
    }
}

/// Maps any angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Angle of the vector `center -> p` in degrees, via `atan2`, in `[0, 360)`.
pub fn angle_degrees(center: Point, p: Point) -> f64 {
    normalize_degrees((p.y - center.y).atan2(p.x - center.x).to_degrees())
}

/// Calculates the two wing points of an arrowhead whose tip is `tip`.
///
/// The head points away from `tail`. Its length is capped at 30% of the line
/// length so short arrows keep a sensible shape. Lines shorter than one pixel
/// collapse both wings onto the tip.
pub fn arrowhead(tip: Point, tail: Point, length: f64, angle_degrees: f64) -> [Point; 2] {
    let dx = tip.x - tail.x;
    let dy = tip.y - tail.y;
    let line_length = dx.hypot(dy);

    if line_length < 1.0 {
        return [tip, tip];
    }

    let ux = dx / line_length;
    let uy = dy / line_length;
    let head = length.min(line_length * 0.3);
    let (sin_a, cos_a) = angle_degrees.to_radians().sin_cos();

    let left = Point::new(
        tip.x - head * (ux * cos_a - uy * sin_a),
        tip.y - head * (uy * cos_a + ux * sin_a),
    );
    let right = Point::new(
        tip.x - head * (ux * cos_a + uy * sin_a),
        tip.y - head * (uy * cos_a - ux * sin_a),
    );
    [left, right]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn anchors_box_is_order_independent() {
        let a = Point::new(30.0, 5.0);
        let b = Point::new(10.0, 25.0);
        assert_eq!(Bounds::from_anchors(a, b), Bounds::from_anchors(b, a));
        assert_eq!(Bounds::from_anchors(a, b), Bounds::new(10.0, 5.0, 20.0, 20.0));
    }

    #[test]
    fn segment_distance_projects_inside_segment() {
        let d = distance_point_to_segment(
            Point::new(5.0, 3.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert!(approx(d, 3.0));
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let d = distance_point_to_segment(
            Point::new(13.0, 4.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert!(approx(d, 5.0));
    }

    #[test]
    fn degenerate_segment_uses_point_distance() {
        let a = Point::new(2.0, 2.0);
        let d = distance_point_to_segment(Point::new(5.0, 6.0), a, a);
        assert!(approx(d, 5.0));
    }

    #[test]
    fn bounding_box_of_points() {
        let pts = [
            Point::new(4.0, 9.0),
            Point::new(-2.0, 3.0),
            Point::new(7.0, 1.0),
        ];
        assert_eq!(bounding_box(&pts), Some(Bounds::new(-2.0, 1.0, 9.0, 8.0)));
        assert_eq!(bounding_box(&[]), None);
    }

    #[test]
    fn rotate_quarter_turn() {
        let p = rotate(Point::new(10.0, 0.0), Point::new(0.0, 0.0), 90.0);
        assert!(approx(p.x, 0.0));
        assert!(approx(p.y, 10.0));
    }

    #[test]
    fn rotate_round_trip_restores_point() {
        let center = Point::new(3.0, -4.0);
        let p = Point::new(17.5, 8.25);
        let back = rotate(rotate(p, center, 37.0), center, -37.0);
        assert!(approx(back.x, p.x));
        assert!(approx(back.y, p.y));
    }

    #[test]
    fn bottom_right_resize_keeps_origin_and_min_size() {
        let b = Bounds::new(10.0, 10.0, 20.0, 20.0);
        let grown = scale_bounding_box(b, (5.0, -3.0), ResizeAnchor::BottomRight);
        assert_eq!(grown, Bounds::new(10.0, 10.0, 25.0, 17.0));

        let collapsed = scale_bounding_box(b, (-50.0, -50.0), ResizeAnchor::BottomRight);
        assert_eq!(collapsed.w, MIN_BOX_SIZE);
        assert_eq!(collapsed.h, MIN_BOX_SIZE);
    }

    #[test]
    fn degrees_normalize_into_range() {
        assert!(approx(normalize_degrees(-90.0), 270.0));
        assert!(approx(normalize_degrees(720.0), 0.0));
        assert!(approx(angle_degrees(Point::default(), Point::new(0.0, -5.0)), 270.0));
    }

    #[test]
    fn arrowhead_caps_at_thirty_percent_of_line_length() {
        let [left, _] = arrowhead(Point::new(10.0, 10.0), Point::new(0.0, 10.0), 100.0, 30.0);
        let distance = left.distance(Point::new(10.0, 10.0));
        assert!((distance - 3.0).abs() < 1e-9);
    }

    #[test]
    fn arrowhead_handles_degenerate_lines() {
        let tip = Point::new(5.0, 5.0);
        assert_eq!(arrowhead(tip, tip, 15.0, 45.0), [tip, tip]);
    }
}

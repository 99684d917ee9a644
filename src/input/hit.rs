//! Hit-testing and selection handle geometry.

use crate::config::SelectionConfig;
use crate::draw::{DrawingElement, Frame, Stroke};
use crate::geometry::{self, Bounds, Point};

/// Distances that still count as touching an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTolerance {
    /// Margin added around a shape's anchor box
    pub shape_margin: f64,
    /// Slack beyond half a stroke's width
    pub stroke_slop: f64,
}

impl From<&SelectionConfig> for HitTolerance {
    fn from(config: &SelectionConfig) -> Self {
        Self {
            shape_margin: config.shape_hit_margin,
            stroke_slop: config.stroke_hit_slop,
        }
    }
}

/// Whether `p` touches `element`.
///
/// Rotated elements are tested by rotating the pointer back into the
/// element's unrotated frame first.
pub fn hit_test(element: &DrawingElement, p: Point, tolerance: &HitTolerance) -> bool {
    match element {
        DrawingElement::Stroke(stroke) => hit_stroke(stroke, p, tolerance.stroke_slop),
        DrawingElement::Shape(shape) => {
            let bounds = shape.bounds();
            let local = unrotate(p, bounds.center(), shape.rotation.unwrap_or(0.0));
            bounds.expand(tolerance.shape_margin).contains(local)
        }
        DrawingElement::Symbol(symbol) => {
            let local = unrotate(p, symbol.anchor, symbol.rotation);
            element.bounds().contains(local)
        }
        DrawingElement::Text(text) => {
            let local = unrotate(p, text.anchor, text.rotation.unwrap_or(0.0));
            element.bounds().contains(local)
        }
    }
}

/// Index of the topmost element under `p`.
pub fn topmost_hit(frame: &Frame, p: Point, tolerance: &HitTolerance) -> Option<usize> {
    frame
        .topmost_first()
        .find(|(_, element)| hit_test(element, p, tolerance))
        .map(|(index, _)| index)
}

fn hit_stroke(stroke: &Stroke, p: Point, slop: f64) -> bool {
    let reach = stroke.width / 2.0 + slop;
    match stroke.points.as_slice() {
        [] => false,
        [only] => only.distance(p) <= reach,
        points => points
            .windows(2)
            .any(|seg| geometry::distance_point_to_segment(p, seg[0], seg[1]) <= reach),
    }
}

fn unrotate(p: Point, center: Point, degrees: f64) -> Point {
    if degrees == 0.0 {
        p
    } else {
        geometry::rotate(p, center, -degrees)
    }
}

/// Transform handle under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    /// Bottom-right corner
    Resize,
    /// Circle above the top-center
    Rotate,
}

/// Handle layout for one selected element.
///
/// Handles sit on the element's unrotated box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionHandles {
    pub bounds: Bounds,
    pub resize: Bounds,
    /// Absent for elements that cannot rotate
    pub rotate: Option<Point>,
    pub handle_size: f64,
}

impl SelectionHandles {
    pub fn for_element(element: &DrawingElement, config: &SelectionConfig) -> Self {
        let bounds = element.bounds();
        let size = config.handle_size;
        let corner = bounds.max();
        let rotate = element.is_rotatable().then(|| {
            Point::new(
                bounds.center().x,
                bounds.y - config.rotate_handle_offset,
            )
        });
        Self {
            bounds,
            resize: Bounds::centered(corner, size, size),
            rotate,
            handle_size: size,
        }
    }

    /// Handle under `p`; the rotate handle wins where both overlap.
    pub fn handle_at(&self, p: Point) -> Option<Handle> {
        if let Some(center) = self.rotate {
            if center.distance(p) <= self.handle_size {
                return Some(Handle::Rotate);
            }
        }
        self.resize.contains(p).then_some(Handle::Resize)
    }
}

/// Rotation in degrees for a pointer at `p`, with the handle straight above
/// `center` reading 0°.
pub fn rotation_for_pointer(center: Point, p: Point) -> f64 {
    geometry::normalize_degrees(geometry::angle_degrees(center, p) + 90.0)
}

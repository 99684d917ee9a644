//! Backend-independent path construction for shapes.
//!
//! Each [`ShapeKind`] is turned into a body path plus an auxiliary path
//! (arrowheads, callout tails, marker arcs). The renderer replays these onto a
//! Cairo context; keeping them as plain data makes every outline testable
//! without a raster surface.

use super::element::Shape;
use super::shape_kind::ShapeKind;
use crate::geometry::{self, Bounds, Point};
use std::f64::consts::{PI, TAU};

/// Cubic Bezier constant for quarter-ellipse arcs.
const KAPPA: f64 = 0.552_284_749_8;
/// Arrowhead spread in degrees.
const ARROW_ANGLE: f64 = 30.0;
/// Portion of the box height taken by a callout body.
const CALLOUT_BODY_RATIO: f64 = 0.75;

/// A single drawing instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CurveTo(Point, Point, Point),
    /// Circular arc; angles in radians, sweeping clockwise in screen space
    /// unless `negative` is set.
    Arc {
        center: Point,
        radius: f64,
        start: f64,
        end: f64,
        negative: bool,
    },
    Close,
}

/// Sequence of commands forming one or more sub-paths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub commands: Vec<PathCommand>,
    /// Whether the path encloses an area (a fill is meaningful)
    pub closed: bool,
}

impl Path {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Explicit points referenced by the path (arc extents excluded).
    pub fn points(&self) -> Vec<Point> {
        let mut out = Vec::new();
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => out.push(p),
                PathCommand::CurveTo(a, b, c) => out.extend([a, b, c]),
                PathCommand::Arc { .. } | PathCommand::Close => {}
            }
        }
        out
    }
}

/// Body and auxiliary paths of one shape, in unrotated coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeOutline {
    pub body: Path,
    pub auxiliary: Path,
}

#[derive(Default)]
struct PathBuilder {
    commands: Vec<PathCommand>,
}

impl PathBuilder {
    fn move_to(&mut self, p: Point) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(p));
        self
    }

    fn line_to(&mut self, p: Point) -> &mut Self {
        self.commands.push(PathCommand::LineTo(p));
        self
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) -> &mut Self {
        self.commands.push(PathCommand::CurveTo(c1, c2, p));
        self
    }

    fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    fn polygon(&mut self, points: &[Point]) -> &mut Self {
        if let Some((first, rest)) = points.split_first() {
            self.move_to(*first);
            for p in rest {
                self.line_to(*p);
            }
            self.close();
        }
        self
    }

    fn polyline(&mut self, points: &[Point]) -> &mut Self {
        if let Some((first, rest)) = points.split_first() {
            self.move_to(*first);
            for p in rest {
                self.line_to(*p);
            }
        }
        self
    }

    fn arc(
        &mut self,
        center: Point,
        radius: f64,
        start: f64,
        end: f64,
        negative: bool,
    ) -> &mut Self {
        let begin = Point::new(
            center.x + radius * start.cos(),
            center.y + radius * start.sin(),
        );
        self.move_to(begin);
        self.commands.push(PathCommand::Arc {
            center,
            radius,
            start,
            end,
            negative,
        });
        self
    }

    fn circle(&mut self, center: Point, radius: f64) -> &mut Self {
        self.arc(center, radius, 0.0, TAU, false).close()
    }

    /// Full ellipse as four cubic segments, starting at the right-most point.
    fn ellipse(&mut self, center: Point, rx: f64, ry: f64) -> &mut Self {
        let (kx, ky) = (rx * KAPPA, ry * KAPPA);
        let (cx, cy) = (center.x, center.y);
        self.move_to(Point::new(cx + rx, cy));
        self.curve_to(
            Point::new(cx + rx, cy + ky),
            Point::new(cx + kx, cy + ry),
            Point::new(cx, cy + ry),
        );
        self.curve_to(
            Point::new(cx - kx, cy + ry),
            Point::new(cx - rx, cy + ky),
            Point::new(cx - rx, cy),
        );
        self.curve_to(
            Point::new(cx - rx, cy - ky),
            Point::new(cx - kx, cy - ry),
            Point::new(cx, cy - ry),
        );
        self.curve_to(
            Point::new(cx + kx, cy - ry),
            Point::new(cx + rx, cy - ky),
            Point::new(cx + rx, cy),
        );
        self.close()
    }

    fn rounded_rect(&mut self, b: Bounds, radius: f64) -> &mut Self {
        let r = radius.min(b.w / 2.0).min(b.h / 2.0).max(0.0);
        let (x0, y0, x1, y1) = (b.x, b.y, b.x + b.w, b.y + b.h);
        self.move_to(Point::new(x0 + r, y0));
        self.line_to(Point::new(x1 - r, y0));
        self.commands.push(PathCommand::Arc {
            center: Point::new(x1 - r, y0 + r),
            radius: r,
            start: -PI / 2.0,
            end: 0.0,
            negative: false,
        });
        self.line_to(Point::new(x1, y1 - r));
        self.commands.push(PathCommand::Arc {
            center: Point::new(x1 - r, y1 - r),
            radius: r,
            start: 0.0,
            end: PI / 2.0,
            negative: false,
        });
        self.line_to(Point::new(x0 + r, y1));
        self.commands.push(PathCommand::Arc {
            center: Point::new(x0 + r, y1 - r),
            radius: r,
            start: PI / 2.0,
            end: PI,
            negative: false,
        });
        self.line_to(Point::new(x0, y0 + r));
        self.commands.push(PathCommand::Arc {
            center: Point::new(x0 + r, y0 + r),
            radius: r,
            start: PI,
            end: 1.5 * PI,
            negative: false,
        });
        self.close()
    }

    /// Arrowhead wings meeting at `tip`, pointing away from `tail`.
    fn arrowhead(&mut self, tip: Point, tail: Point, length: f64) -> &mut Self {
        let [left, right] = geometry::arrowhead(tip, tail, length, ARROW_ANGLE);
        self.polyline(&[left, tip, right])
    }

    fn finish(self, closed: bool) -> Path {
        Path {
            commands: self.commands,
            closed,
        }
    }
}

/// Points of a regular polygon inscribed in `b`, first vertex at the top.
fn regular_polygon(b: &Bounds, sides: usize) -> Vec<Point> {
    let c = b.center();
    let (rx, ry) = (b.w / 2.0, b.h / 2.0);
    (0..sides)
        .map(|i| {
            let angle = -PI / 2.0 + TAU * i as f64 / sides as f64;
            Point::new(c.x + rx * angle.cos(), c.y + ry * angle.sin())
        })
        .collect()
}

fn star_points(b: &Bounds) -> Vec<Point> {
    let c = b.center();
    let (rx, ry) = (b.w / 2.0, b.h / 2.0);
    (0..10)
        .map(|i| {
            let angle = -PI / 2.0 + PI * i as f64 / 5.0;
            let scale = if i % 2 == 0 { 1.0 } else { 0.4 };
            Point::new(
                c.x + rx * scale * angle.cos(),
                c.y + ry * scale * angle.sin(),
            )
        })
        .collect()
}

fn arrow_head_length(width: f64) -> f64 {
    10.0 + width * 2.0
}

/// Callout body occupies the upper part of the box; the tail fills the rest.
fn callout_body(b: &Bounds) -> Bounds {
    Bounds::new(b.x, b.y, b.w, b.h * CALLOUT_BODY_RATIO)
}

fn callout_tail(b: &Bounds) -> [Point; 3] {
    let body = callout_body(b);
    let base_y = body.y + body.h;
    [
        Point::new(b.x + b.w * 0.22, base_y - body.h * 0.1),
        Point::new(b.x + b.w * 0.12, b.y + b.h),
        Point::new(b.x + b.w * 0.42, base_y - body.h * 0.05),
    ]
}

/// Builds the outline for `shape`.
pub fn shape_outline(shape: &Shape) -> ShapeOutline {
    let b = shape.bounds();
    let (x0, y0) = (b.x, b.y);
    let (x1, y1) = (b.x + b.w, b.y + b.h);
    let c = b.center();
    let head = arrow_head_length(shape.width);

    let mut body = PathBuilder::default();
    let mut aux = PathBuilder::default();

    match shape.kind {
        ShapeKind::Rectangle => {
            body.polygon(&[
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
            ]);
        }
        ShapeKind::RoundedRectangle => {
            body.rounded_rect(b, b.w.min(b.h) * 0.2);
        }
        ShapeKind::Circle => {
            body.circle(shape.start.midpoint(shape.end), shape.circle_radius());
        }
        ShapeKind::Ellipse => {
            body.ellipse(c, b.w / 2.0, b.h / 2.0);
        }
        ShapeKind::Triangle => {
            body.polygon(&[Point::new(c.x, y0), Point::new(x1, y1), Point::new(x0, y1)]);
        }
        ShapeKind::RightTriangle => {
            body.polygon(&[Point::new(x0, y0), Point::new(x0, y1), Point::new(x1, y1)]);
        }
        ShapeKind::Diamond => {
            body.polygon(&[
                Point::new(c.x, y0),
                Point::new(x1, c.y),
                Point::new(c.x, y1),
                Point::new(x0, c.y),
            ]);
        }
        ShapeKind::Pentagon => {
            body.polygon(&regular_polygon(&b, 5));
        }
        ShapeKind::Hexagon => {
            body.polygon(&regular_polygon(&b, 6));
        }
        ShapeKind::Octagon => {
            body.polygon(&regular_polygon(&b, 8));
        }
        ShapeKind::Star => {
            body.polygon(&star_points(&b));
        }
        ShapeKind::Heart => {
            let top = Point::new(c.x, y0 + b.h * 0.3);
            body.move_to(top);
            body.curve_to(Point::new(c.x, y0), Point::new(x0, y0), Point::new(x0, top.y));
            body.curve_to(
                Point::new(x0, y0 + b.h * 0.6),
                Point::new(c.x, y0 + b.h * 0.8),
                Point::new(c.x, y1),
            );
            body.curve_to(
                Point::new(c.x, y0 + b.h * 0.8),
                Point::new(x1, y0 + b.h * 0.6),
                Point::new(x1, top.y),
            );
            body.curve_to(Point::new(x1, y0), Point::new(c.x, y0), top);
            body.close();
        }
        ShapeKind::Line | ShapeKind::DashedLine | ShapeKind::DottedLine => {
            body.polyline(&[shape.start, shape.end]);
        }
        ShapeKind::Arrow | ShapeKind::DashedArrow => {
            body.polyline(&[shape.start, shape.end]);
            aux.arrowhead(shape.end, shape.start, head);
        }
        ShapeKind::DoubleArrow => {
            body.polyline(&[shape.start, shape.end]);
            aux.arrowhead(shape.end, shape.start, head);
            aux.arrowhead(shape.start, shape.end, head);
        }
        ShapeKind::CurvedArrow => {
            let (s, e) = (shape.start, shape.end);
            let mid = s.midpoint(e);
            // Bend to the left of the travel direction by a quarter of the length
            let ctrl = Point::new(mid.x + (e.y - s.y) * 0.25, mid.y - (e.x - s.x) * 0.25);
            let c1 = Point::new(
                s.x + (ctrl.x - s.x) * 2.0 / 3.0,
                s.y + (ctrl.y - s.y) * 2.0 / 3.0,
            );
            let c2 = Point::new(
                e.x + (ctrl.x - e.x) * 2.0 / 3.0,
                e.y + (ctrl.y - e.y) * 2.0 / 3.0,
            );
            body.move_to(s).curve_to(c1, c2, e);
            aux.arrowhead(e, ctrl, head);
        }
        ShapeKind::ElbowArrow => {
            let corner = Point::new(shape.end.x, shape.start.y);
            body.polyline(&[shape.start, corner, shape.end]);
            let tail = if corner == shape.end { shape.start } else { corner };
            aux.arrowhead(shape.end, tail, head);
        }
        ShapeKind::SpeechBubble => {
            let bubble = callout_body(&b);
            body.ellipse(bubble.center(), bubble.w / 2.0, bubble.h / 2.0);
            aux.polygon(&callout_tail(&b));
        }
        ShapeKind::ThoughtBubble => {
            let bubble = callout_body(&b);
            body.ellipse(bubble.center(), bubble.w / 2.0, bubble.h / 2.0);
            let m = b.w.min(b.h);
            let free = b.h * (1.0 - CALLOUT_BODY_RATIO);
            aux.circle(
                Point::new(x0 + b.w * 0.28, bubble.y + bubble.h + free * 0.2),
                m * 0.06,
            );
            aux.circle(
                Point::new(x0 + b.w * 0.2, bubble.y + bubble.h + free * 0.55),
                m * 0.04,
            );
            aux.circle(
                Point::new(x0 + b.w * 0.13, bubble.y + bubble.h + free * 0.85),
                m * 0.025,
            );
        }
        ShapeKind::RectangleCallout => {
            let bubble = callout_body(&b);
            body.polygon(&[
                bubble.min(),
                Point::new(bubble.x + bubble.w, bubble.y),
                bubble.max(),
                Point::new(bubble.x, bubble.y + bubble.h),
            ]);
            aux.polygon(&callout_tail(&b));
        }
        ShapeKind::RoundedCallout => {
            let bubble = callout_body(&b);
            body.rounded_rect(bubble, bubble.w.min(bubble.h) * 0.25);
            aux.polygon(&callout_tail(&b));
        }
        ShapeKind::LineCallout => {
            let boxed = Bounds::new(x0 + b.w * 0.4, y0, b.w * 0.6, b.h * 0.6);
            body.polygon(&[
                boxed.min(),
                Point::new(boxed.x + boxed.w, boxed.y),
                boxed.max(),
                Point::new(boxed.x, boxed.y + boxed.h),
            ]);
            aux.polyline(&[Point::new(boxed.x, boxed.y + boxed.h), Point::new(x0, y1)]);
        }
        ShapeKind::Cloud => {
            let bumps = 8;
            let (rx, ry) = (b.w / 2.0 * 0.8, b.h / 2.0 * 0.8);
            let on_ring = |angle: f64, scale: f64| {
                Point::new(c.x + rx * scale * angle.cos(), c.y + ry * scale * angle.sin())
            };
            body.move_to(on_ring(0.0, 1.0));
            for i in 0..bumps {
                let a0 = TAU * i as f64 / bumps as f64;
                let a1 = TAU * (i + 1) as f64 / bumps as f64;
                let third = (a1 - a0) / 3.0;
                body.curve_to(
                    on_ring(a0 + third, 1.25),
                    on_ring(a1 - third, 1.25),
                    on_ring(a1, 1.0),
                );
            }
            body.close();
        }
        ShapeKind::AngleMarker => {
            let vertex = shape.start;
            let along = Point::new(shape.end.x, shape.start.y);
            body.polyline(&[along, vertex, shape.end]);
            let reach = vertex.distance(along).min(vertex.distance(shape.end));
            if reach > 0.0 {
                let a_along = (along.y - vertex.y).atan2(along.x - vertex.x);
                let a_end = (shape.end.y - vertex.y).atan2(shape.end.x - vertex.x);
                let mut sweep = a_end - a_along;
                if sweep > PI {
                    sweep -= TAU;
                } else if sweep < -PI {
                    sweep += TAU;
                }
                aux.arc(vertex, reach * 0.3, a_along, a_along + sweep, sweep < 0.0);
            }
        }
        ShapeKind::RightAngleMarker => {
            let vertex = Point::new(x0, y1);
            body.polyline(&[Point::new(x0, y0), vertex, Point::new(x1, y1)]);
            let s = b.w.min(b.h) * 0.2;
            aux.polyline(&[
                Point::new(x0, y1 - s),
                Point::new(x0 + s, y1 - s),
                Point::new(x0 + s, y1),
            ]);
        }
        ShapeKind::Parallelogram => {
            let o = b.w * 0.25;
            body.polygon(&[
                Point::new(x0 + o, y0),
                Point::new(x1, y0),
                Point::new(x1 - o, y1),
                Point::new(x0, y1),
            ]);
        }
        ShapeKind::Trapezoid => {
            let o = b.w * 0.2;
            body.polygon(&[
                Point::new(x0 + o, y0),
                Point::new(x1 - o, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
            ]);
        }
        ShapeKind::Axes => {
            body.polyline(&[Point::new(x0, c.y), Point::new(x1, c.y)]);
            body.polyline(&[Point::new(c.x, y1), Point::new(c.x, y0)]);
            let axis_head = head.min(b.w.min(b.h) * 0.15);
            aux.arrowhead(Point::new(x1, c.y), Point::new(x0, c.y), axis_head);
            aux.arrowhead(Point::new(c.x, y0), Point::new(c.x, y1), axis_head);
        }
        ShapeKind::Grid => {
            body.polygon(&[
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
            ]);
            for i in 1..4 {
                let t = i as f64 / 4.0;
                aux.polyline(&[Point::new(x0 + b.w * t, y0), Point::new(x0 + b.w * t, y1)]);
                aux.polyline(&[Point::new(x0, y0 + b.h * t), Point::new(x1, y0 + b.h * t)]);
            }
        }
        ShapeKind::Parabola => {
            let samples = 24;
            let points: Vec<Point> = (0..=samples)
                .map(|i| {
                    let t = -1.0 + 2.0 * i as f64 / samples as f64;
                    Point::new(c.x + t * b.w / 2.0, y1 - b.h * t * t)
                })
                .collect();
            body.polyline(&points);
        }
        ShapeKind::SineWave => {
            let samples = 32;
            let points: Vec<Point> = (0..=samples)
                .map(|i| {
                    let t = i as f64 / samples as f64;
                    Point::new(x0 + t * b.w, c.y - b.h / 2.0 * (TAU * t).sin())
                })
                .collect();
            body.polyline(&points);
        }
        ShapeKind::Cylinder => {
            let e = b.h * 0.2;
            let (rx, ry) = (b.w / 2.0, e / 2.0);
            let (kx, ky) = (rx * KAPPA, ry * KAPPA);
            let top_y = y0 + ry;
            let bottom_y = y1 - ry;
            body.move_to(Point::new(x0, top_y));
            body.line_to(Point::new(x0, bottom_y));
            body.curve_to(
                Point::new(x0, bottom_y + ky),
                Point::new(c.x - kx, y1),
                Point::new(c.x, y1),
            );
            body.curve_to(
                Point::new(c.x + kx, y1),
                Point::new(x1, bottom_y + ky),
                Point::new(x1, bottom_y),
            );
            body.line_to(Point::new(x1, top_y));
            body.curve_to(
                Point::new(x1, top_y - ky),
                Point::new(c.x + kx, y0),
                Point::new(c.x, y0),
            );
            body.curve_to(
                Point::new(c.x - kx, y0),
                Point::new(x0, top_y - ky),
                Point::new(x0, top_y),
            );
            body.close();
            // Front rim of the lid
            aux.move_to(Point::new(x0, top_y));
            aux.curve_to(
                Point::new(x0, top_y + ky),
                Point::new(c.x - kx, top_y + ry),
                Point::new(c.x, top_y + ry),
            );
            aux.curve_to(
                Point::new(c.x + kx, top_y + ry),
                Point::new(x1, top_y + ky),
                Point::new(x1, top_y),
            );
        }
    }

    let kind = shape.kind;
    let aux_closed = matches!(
        kind,
        ShapeKind::SpeechBubble
            | ShapeKind::ThoughtBubble
            | ShapeKind::RectangleCallout
            | ShapeKind::RoundedCallout
    );
    ShapeOutline {
        body: body.finish(kind.is_fillable()),
        auxiliary: aux.finish(aux_closed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::RED;

    fn shape(kind: ShapeKind, start: Point, end: Point) -> Shape {
        Shape {
            kind,
            start,
            end,
            color: RED,
            width: 2.0,
            filled: false,
            rotation: None,
        }
    }

    #[test]
    fn every_kind_builds_a_body() {
        for kind in ShapeKind::ALL {
            let outline =
                shape_outline(&shape(kind, Point::new(10.0, 20.0), Point::new(110.0, 90.0)));
            assert!(!outline.body.is_empty(), "{kind:?} has no body");
        }
    }

    #[test]
    fn circle_uses_half_anchor_distance() {
        let outline = shape_outline(&shape(
            ShapeKind::Circle,
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
        ));
        let radius = outline
            .body
            .commands
            .iter()
            .find_map(|cmd| match cmd {
                PathCommand::Arc { radius, center, .. } => Some((*radius, *center)),
                _ => None,
            })
            .expect("circle is an arc");
        assert!((radius.0 - 7.07).abs() < 0.01);
        assert_eq!(radius.1, Point::new(5.0, 5.0));
    }

    #[test]
    fn polygon_vertices_stay_inside_anchor_box() {
        let kinds = [
            ShapeKind::Rectangle,
            ShapeKind::Triangle,
            ShapeKind::Diamond,
            ShapeKind::Pentagon,
            ShapeKind::Hexagon,
            ShapeKind::Octagon,
            ShapeKind::Star,
            ShapeKind::Parallelogram,
            ShapeKind::Trapezoid,
            ShapeKind::Parabola,
            ShapeKind::SineWave,
        ];
        let s = Point::new(0.0, 0.0);
        let e = Point::new(80.0, 60.0);
        let bounds = Bounds::from_anchors(s, e).expand(1e-9);
        for kind in kinds {
            for p in shape_outline(&shape(kind, s, e)).body.points() {
                assert!(bounds.contains(p), "{kind:?} point {p:?} escapes the box");
            }
        }
    }

    #[test]
    fn hexagon_samples_six_vertices() {
        let outline = shape_outline(&shape(
            ShapeKind::Hexagon,
            Point::new(0.0, 0.0),
            Point::new(60.0, 60.0),
        ));
        assert_eq!(outline.body.points().len(), 6);
        assert!(outline.body.closed);
    }

    #[test]
    fn callouts_carry_a_closed_tail() {
        let outline = shape_outline(&shape(
            ShapeKind::SpeechBubble,
            Point::new(0.0, 0.0),
            Point::new(100.0, 80.0),
        ));
        assert!(outline.body.closed);
        assert!(outline.auxiliary.closed);
        assert_eq!(outline.auxiliary.points().len(), 3);
    }

    #[test]
    fn arrow_head_sits_at_end_anchor() {
        let end = Point::new(100.0, 0.0);
        let outline = shape_outline(&shape(ShapeKind::Arrow, Point::new(0.0, 0.0), end));
        assert!(!outline.body.closed);
        assert!(outline.auxiliary.points().contains(&end));
    }
}

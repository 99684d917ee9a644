//! Drawing element model: strokes, shapes, symbols and text.

use super::color::Color;
use super::shape_kind::ShapeKind;
use super::symbol::{Glyph, SizeTier};
use crate::geometry::{self, Bounds, Point};
use serde::{Deserialize, Serialize};

/// Average glyph advance relative to the font size, used for text hit boxes.
pub const TEXT_CHAR_WIDTH_RATIO: f64 = 0.6;
/// Line height relative to the font size.
pub const TEXT_LINE_HEIGHT_RATIO: f64 = 1.2;
/// Font size limits applied when text is resized.
pub const MIN_FONT_SIZE: f64 = 8.0;
pub const MAX_FONT_SIZE: f64 = 200.0;

/// Freehand tool that produced a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeTool {
    Pen,
    Eraser,
    Highlighter,
}

/// Time window of a live-captured element, in seconds relative to the capture origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start_time: f64,
    pub end_time: f64,
}

impl TimeWindow {
    pub fn new(start_time: f64, end_time: f64) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    /// A window whose start and end coincide.
    pub fn instant(at: f64) -> Self {
        Self::new(at, at)
    }

    /// Zero or negative duration windows render as soon as they start.
    pub fn is_instantaneous(&self) -> bool {
        self.end_time <= self.start_time
    }

    /// Fraction of the window elapsed at `relative_time`.
    ///
    /// `None` means the window has not started yet. Instantaneous windows jump
    /// straight to `1.0` so no division by zero can occur.
    pub fn progress(&self, relative_time: f64) -> Option<f64> {
        if relative_time < self.start_time {
            return None;
        }
        if self.is_instantaneous() || relative_time >= self.end_time {
            return Some(1.0);
        }
        Some((relative_time - self.start_time) / (self.end_time - self.start_time))
    }
}

/// Freehand polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub tool: StrokeTool,
    /// Points in draw order
    pub points: Vec<Point>,
    pub color: Color,
    /// Line width in pixels
    pub width: f64,
    /// Extra opacity multiplier (highlighter strokes use < 1.0)
    #[serde(default = "full_opacity")]
    pub opacity: f64,
    /// Present only on strokes captured during live playback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<TimeWindow>,
}

fn full_opacity() -> f64 {
    1.0
}

impl Stroke {
    /// Number of points visible at a draw fraction.
    ///
    /// The first point is always present; `floor(n * fraction)` further points
    /// follow, capped at the full point count.
    pub fn visible_point_count(&self, fraction: f64) -> usize {
        visible_point_count(self.points.len(), fraction)
    }
}

/// See [`Stroke::visible_point_count`].
pub fn visible_point_count(total: usize, fraction: f64) -> usize {
    if total == 0 {
        return 0;
    }
    let fraction = fraction.clamp(0.0, 1.0);
    let extra = (total as f64 * fraction).floor() as usize;
    (extra + 1).min(total)
}

/// Two-anchor parametric shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub start: Point,
    pub end: Point,
    pub color: Color,
    pub width: f64,
    #[serde(default)]
    pub filled: bool,
    /// Degrees, applied about the box center at render time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl Shape {
    /// Box spanned by the anchors; always derived, never stored.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_anchors(self.start, self.end)
    }

    /// Radius used by the circle kind: half the anchor distance.
    pub fn circle_radius(&self) -> f64 {
        self.start.distance(self.end) / 2.0
    }
}

/// Single glyph placed at one point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub anchor: Point,
    pub glyph: Glyph,
    pub size: SizeTier,
    #[serde(default)]
    pub rotation: f64,
    pub color: Color,
}

/// Text annotation centered on its anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub anchor: Point,
    pub text: String,
    pub font_size: f64,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl Text {
    /// Estimated layout size `(width, height)` used for hit-testing.
    pub fn estimated_size(&self) -> (f64, f64) {
        let lines = self.text.lines().count().max(1);
        let longest = self
            .text
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
            .max(1);
        (
            longest as f64 * self.font_size * TEXT_CHAR_WIDTH_RATIO,
            lines as f64 * self.font_size * TEXT_LINE_HEIGHT_RATIO,
        )
    }
}

/// One annotation element. Paint order is the order in the owning collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawingElement {
    Stroke(Stroke),
    Shape(Shape),
    Symbol(Symbol),
    Text(Text),
}

impl DrawingElement {
    /// Whether the element is complete enough to be committed.
    ///
    /// Strokes need two points, shapes a non-degenerate anchor pair and text a
    /// non-empty string.
    pub fn is_committable(&self) -> bool {
        match self {
            DrawingElement::Stroke(stroke) => stroke.points.len() >= 2,
            DrawingElement::Shape(shape) => shape.start != shape.end,
            DrawingElement::Symbol(_) => true,
            DrawingElement::Text(text) => !text.text.trim().is_empty(),
        }
    }

    /// Axis-aligned box used for selection handles and resize math.
    pub fn bounds(&self) -> Bounds {
        match self {
            DrawingElement::Stroke(stroke) => {
                geometry::bounding_box(&stroke.points).unwrap_or_default()
            }
            DrawingElement::Shape(shape) => shape.bounds(),
            DrawingElement::Symbol(symbol) => {
                let side = symbol.size.pixels();
                Bounds::centered(symbol.anchor, side, side)
            }
            DrawingElement::Text(text) => {
                let (w, h) = text.estimated_size();
                Bounds::centered(text.anchor, w, h)
            }
        }
    }

    /// Center used as the rotation pivot.
    pub fn center(&self) -> Point {
        match self {
            DrawingElement::Symbol(symbol) => symbol.anchor,
            DrawingElement::Text(text) => text.anchor,
            _ => self.bounds().center(),
        }
    }

    /// Current rotation in degrees, `None` for elements that cannot rotate.
    pub fn rotation(&self) -> Option<f64> {
        match self {
            DrawingElement::Stroke(_) => None,
            DrawingElement::Shape(shape) => Some(shape.rotation.unwrap_or(0.0)),
            DrawingElement::Symbol(symbol) => Some(symbol.rotation),
            DrawingElement::Text(text) => Some(text.rotation.unwrap_or(0.0)),
        }
    }

    pub fn is_rotatable(&self) -> bool {
        self.rotation().is_some()
    }

    /// Text content, for indexing.
    pub fn text_content(&self) -> Option<&str> {
        match self {
            DrawingElement::Text(text) => Some(&text.text),
            _ => None,
        }
    }

    /// Live-capture window carried by strokes.
    pub fn timing(&self) -> Option<TimeWindow> {
        match self {
            DrawingElement::Stroke(stroke) => stroke.timing,
            _ => None,
        }
    }

    /// Copy of this element moved by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let mut moved = self.clone();
        match &mut moved {
            DrawingElement::Stroke(stroke) => {
                for p in &mut stroke.points {
                    *p = p.offset(dx, dy);
                }
            }
            DrawingElement::Shape(shape) => {
                shape.start = shape.start.offset(dx, dy);
                shape.end = shape.end.offset(dx, dy);
            }
            DrawingElement::Symbol(symbol) => symbol.anchor = symbol.anchor.offset(dx, dy),
            DrawingElement::Text(text) => text.anchor = text.anchor.offset(dx, dy),
        }
        moved
    }

    /// Copy of this element fitted from its current bounds into `target`.
    pub fn resized(&self, target: Bounds) -> Self {
        let source = self.bounds();
        let mut resized = self.clone();
        match &mut resized {
            DrawingElement::Stroke(stroke) => {
                for p in &mut stroke.points {
                    *p = map_between(*p, &source, &target);
                }
            }
            DrawingElement::Shape(shape) => {
                shape.start = map_between(shape.start, &source, &target);
                shape.end = map_between(shape.end, &source, &target);
            }
            DrawingElement::Symbol(symbol) => {
                symbol.size = SizeTier::nearest(target.w.min(target.h));
                symbol.anchor = target.center();
            }
            DrawingElement::Text(text) => {
                if source.h > 0.0 {
                    text.font_size = (text.font_size * target.h / source.h)
                        .clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
                }
                text.anchor = target.center();
            }
        }
        resized
    }

    /// Copy with rotation set to `degrees`, or `None` if the element cannot rotate.
    pub fn rotated_to(&self, degrees: f64) -> Option<Self> {
        let degrees = geometry::normalize_degrees(degrees);
        let mut rotated = self.clone();
        match &mut rotated {
            DrawingElement::Stroke(_) => return None,
            DrawingElement::Shape(shape) => shape.rotation = Some(degrees),
            DrawingElement::Symbol(symbol) => symbol.rotation = degrees,
            DrawingElement::Text(text) => text.rotation = Some(degrees),
        }
        Some(rotated)
    }
}

/// Maps a point from one box into another, keeping its relative position.
fn map_between(p: Point, from: &Bounds, to: &Bounds) -> Point {
    let sx = if from.w > 0.0 { to.w / from.w } else { 1.0 };
    let sy = if from.h > 0.0 { to.h / from.h } else { 1.0 };
    Point::new(to.x + (p.x - from.x) * sx, to.y + (p.y - from.y) * sy)
}

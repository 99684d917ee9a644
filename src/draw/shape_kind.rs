//! The catalogue of two-anchor shapes.

use serde::{Deserialize, Serialize};

/// Grouping used by tool palettes and by the fill rules below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeFamily {
    Basic,
    LineOrArrow,
    Callout,
    Math,
}

/// Every shape the anchor tools can draw.
///
/// Each kind is defined purely by a `(start, end)` anchor pair; the renderer
/// derives the path from the box those anchors span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    // Basic shapes
    Rectangle,
    RoundedRectangle,
    Circle,
    Ellipse,
    Triangle,
    RightTriangle,
    Diamond,
    Pentagon,
    Hexagon,
    Octagon,
    Star,
    Heart,
    // Lines and arrows
    Line,
    DashedLine,
    DottedLine,
    Arrow,
    DoubleArrow,
    DashedArrow,
    CurvedArrow,
    ElbowArrow,
    // Callouts
    SpeechBubble,
    ThoughtBubble,
    RectangleCallout,
    RoundedCallout,
    LineCallout,
    Cloud,
    // Math and diagram helpers
    AngleMarker,
    RightAngleMarker,
    Parallelogram,
    Trapezoid,
    Axes,
    Grid,
    Parabola,
    SineWave,
    Cylinder,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 35] = [
        ShapeKind::Rectangle,
        ShapeKind::RoundedRectangle,
        ShapeKind::Circle,
        ShapeKind::Ellipse,
        ShapeKind::Triangle,
        ShapeKind::RightTriangle,
        ShapeKind::Diamond,
        ShapeKind::Pentagon,
        ShapeKind::Hexagon,
        ShapeKind::Octagon,
        ShapeKind::Star,
        ShapeKind::Heart,
        ShapeKind::Line,
        ShapeKind::DashedLine,
        ShapeKind::DottedLine,
        ShapeKind::Arrow,
        ShapeKind::DoubleArrow,
        ShapeKind::DashedArrow,
        ShapeKind::CurvedArrow,
        ShapeKind::ElbowArrow,
        ShapeKind::SpeechBubble,
        ShapeKind::ThoughtBubble,
        ShapeKind::RectangleCallout,
        ShapeKind::RoundedCallout,
        ShapeKind::LineCallout,
        ShapeKind::Cloud,
        ShapeKind::AngleMarker,
        ShapeKind::RightAngleMarker,
        ShapeKind::Parallelogram,
        ShapeKind::Trapezoid,
        ShapeKind::Axes,
        ShapeKind::Grid,
        ShapeKind::Parabola,
        ShapeKind::SineWave,
        ShapeKind::Cylinder,
    ];

    pub fn family(self) -> ShapeFamily {
        use ShapeKind::*;
        match self {
            Rectangle | RoundedRectangle | Circle | Ellipse | Triangle | RightTriangle
            | Diamond | Pentagon | Hexagon | Octagon | Star | Heart => ShapeFamily::Basic,
            Line | DashedLine | DottedLine | Arrow | DoubleArrow | DashedArrow | CurvedArrow
            | ElbowArrow => ShapeFamily::LineOrArrow,
            SpeechBubble | ThoughtBubble | RectangleCallout | RoundedCallout | LineCallout
            | Cloud => ShapeFamily::Callout,
            AngleMarker | RightAngleMarker | Parallelogram | Trapezoid | Axes | Grid
            | Parabola | SineWave | Cylinder => ShapeFamily::Math,
        }
    }

    /// Whether the body path encloses an area that a fill can cover.
    ///
    /// Open kinds ignore the element's `filled` flag.
    pub fn is_fillable(self) -> bool {
        use ShapeKind::*;
        match self.family() {
            ShapeFamily::LineOrArrow => false,
            ShapeFamily::Basic | ShapeFamily::Callout => true,
            ShapeFamily::Math => matches!(self, Parallelogram | Trapezoid | Cylinder),
        }
    }

    /// Dash pattern (in multiples of the line width) for dashed variants.
    pub fn dash_pattern(self) -> Option<[f64; 2]> {
        match self {
            ShapeKind::DashedLine | ShapeKind::DashedArrow => Some([3.0, 2.0]),
            ShapeKind::DottedLine => Some([0.01, 2.0]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalogue_lists_every_kind_once() {
        let unique: HashSet<_> = ShapeKind::ALL.iter().collect();
        assert_eq!(unique.len(), ShapeKind::ALL.len());
    }

    #[test]
    fn lines_are_never_fillable() {
        for kind in ShapeKind::ALL {
            if kind.family() == ShapeFamily::LineOrArrow {
                assert!(!kind.is_fillable(), "{kind:?} should be open");
            }
        }
        assert!(ShapeKind::SpeechBubble.is_fillable());
        assert!(!ShapeKind::AngleMarker.is_fillable());
    }

    #[test]
    fn serde_uses_snake_case_names() {
        let json = serde_json::to_string(&ShapeKind::RightAngleMarker).unwrap();
        assert_eq!(json, "\"right_angle_marker\"");
    }
}

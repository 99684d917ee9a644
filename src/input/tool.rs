//! Drawing tool selection.

use crate::draw::{Glyph, ShapeKind, StrokeTool};

/// Active tool; decides what a pointer gesture produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tool {
    /// Freehand drawing - follows the pointer path
    #[default]
    Pen,
    /// Freehand eraser - clears pixels underneath
    Eraser,
    /// Freehand translucent marker
    Highlighter,
    /// Two-anchor shape of the given kind (press = start, release = end)
    Shape(ShapeKind),
    /// Places one glyph on press
    Symbol(Glyph),
    /// Asks the host for text on press
    Text,
    /// Picks, moves, resizes and rotates existing elements
    Select,
}

impl Tool {
    /// Freehand tool this maps to, if any.
    pub fn stroke_tool(self) -> Option<StrokeTool> {
        match self {
            Tool::Pen => Some(StrokeTool::Pen),
            Tool::Eraser => Some(StrokeTool::Eraser),
            Tool::Highlighter => Some(StrokeTool::Highlighter),
            _ => None,
        }
    }
}

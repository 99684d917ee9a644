//! Host-agnostic input event types.

use crate::geometry::Point;

/// Stage of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Button pressed or finger down
    Down,
    /// Pointer moved (with or without a button held)
    Move,
    /// Button released
    Up,
    /// Pointer left the drawing surface; ends a gesture exactly like `Up`
    Leave,
}

/// Pointer event in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    pub phase: PointerPhase,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64, phase: PointerPhase) -> Self {
        Self { x, y, phase }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(x, y, PointerPhase::Down)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(x, y, PointerPhase::Move)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(x, y, PointerPhase::Up)
    }

    pub fn leave(x: f64, y: f64) -> Self {
        Self::new(x, y, PointerPhase::Leave)
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Generic key representation.
///
/// Hosts map their native key codes to these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key
    Escape,
    /// Delete key
    Delete,
    /// Backspace key
    Backspace,
    /// Shift modifier
    Shift,
    /// Ctrl modifier
    Ctrl,
    /// Alt modifier
    Alt,
    /// Unmapped or unrecognized key
    Unknown,
}

//! RGBA color type and predefined color constants.

use serde::{Deserialize, Serialize};

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use vidscribe::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// let faded = red.with_alpha(0.4);
/// assert_eq!(faded.a, 0.4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the same color with alpha multiplied by `opacity` (clamped to 0..=1).
    pub fn with_alpha(self, opacity: f64) -> Self {
        Self {
            a: self.a * opacity.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Looks up a palette color by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        PALETTE
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(name))
            .map(|(_, color)| *color)
    }

    /// Name of the palette entry within 0.1 per channel, or `"Custom"`.
    ///
    /// Alpha is ignored, so a translucent highlighter yellow is still "Yellow".
    pub fn name(&self) -> &'static str {
        PALETTE
            .iter()
            .find(|(_, c)| {
                (c.r - self.r).abs() < 0.1
                    && (c.g - self.g).abs() < 0.1
                    && (c.b - self.b).abs() < 0.1
            })
            .map_or("Custom", |(label, _)| *label)
    }

    /// Applies this color as the Cairo source.
    pub(crate) fn apply(&self, ctx: &cairo::Context) {
        ctx.set_source_rgba(self.r, self.g, self.b, self.a);
    }
}

// ============================================================================
// Predefined Color Constants
// ============================================================================

pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);
pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0, 1.0);
pub const ORANGE: Color = Color::new(1.0, 0.5, 0.0, 1.0);
pub const PINK: Color = Color::new(1.0, 0.0, 1.0, 1.0);
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// Colors addressable by name in config files and reports.
pub const PALETTE: [(&str, Color); 8] = [
    ("Red", RED),
    ("Green", GREEN),
    ("Blue", BLUE),
    ("Yellow", YELLOW),
    ("Orange", ORANGE),
    ("Pink", PINK),
    ("White", WHITE),
    ("Black", BLACK),
];

/// Selection overlay accent (used for the dashed box and handles).
pub const SELECTION_ACCENT: Color = Color::new(0.2, 0.6, 1.0, 1.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!(Color::from_name("White"), Some(WHITE));
        assert_eq!(Color::from_name("ORANGE"), Some(ORANGE));
        assert_eq!(Color::from_name("chartreuse"), None);
    }

    #[test]
    fn name_ignores_alpha_and_falls_back_to_custom() {
        assert_eq!(RED.name(), "Red");
        assert_eq!(YELLOW.with_alpha(0.35).name(), "Yellow");
        assert_eq!(Color::new(0.95, 0.45, 0.05, 1.0).name(), "Orange");
        assert_eq!(Color::new(0.42, 0.42, 0.42, 1.0).name(), "Custom");
    }
}

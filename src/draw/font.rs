//! Font descriptor for text and symbol rendering.

/// Font configuration for text rendering.
///
/// Passed through the rendering pipeline so live preview, committed text and
/// replay all lay text out identically.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "Monospace")
    pub family: String,
    /// Font weight (e.g., "normal", "bold" or numeric 100-900)
    pub weight: String,
    /// Font style (e.g., "normal", "italic", "oblique")
    pub style: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            weight: "bold".to_string(),
            style: "normal".to_string(),
        }
    }
}

impl FontDescriptor {
    pub fn new(family: String, weight: String, style: String) -> Self {
        Self {
            family,
            weight,
            style,
        }
    }

    /// Converts this descriptor to a Pango font description string.
    ///
    /// Format: "Family Style Weight Size", e.g. "Sans Bold 32px".
    /// The size carries a `px` suffix so Pango lays out in pixels and text
    /// metrics match the hit-test estimate.
    pub fn to_pango_string(&self, size: f64) -> String {
        let mut parts = vec![self.family.clone()];

        if !self.style.eq_ignore_ascii_case("normal") {
            parts.push(capitalize_first(&self.style));
        }
        if !self.weight.eq_ignore_ascii_case("normal") {
            parts.push(capitalize_first(&self.weight));
        }
        parts.push(format!("{}px", size.round().max(1.0) as i32));

        parts.join(" ")
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pango_string_default() {
        assert_eq!(FontDescriptor::default().to_pango_string(32.0), "Sans Bold 32px");
    }

    #[test]
    fn pango_string_italic_normal_weight() {
        let font = FontDescriptor::new(
            "Monospace".to_string(),
            "normal".to_string(),
            "italic".to_string(),
        );
        assert_eq!(font.to_pango_string(24.4), "Monospace Italic 24px");
    }
}

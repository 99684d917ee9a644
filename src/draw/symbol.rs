//! Symbol glyphs and their size tiers.

use serde::{Deserialize, Serialize};

/// Identifier of a placeable symbol.
///
/// The glyph-to-character table below is the only lookup an element needs in
/// order to be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Glyph {
    Checkmark,
    Cross,
    Star,
    Heart,
    Question,
    Exclamation,
    ThumbsUp,
    ThumbsDown,
    Smile,
    Frown,
    Fire,
    Target,
    Warning,
    Pin,
    Eye,
    Lightbulb,
}

impl Glyph {
    /// Character rendered for this glyph.
    pub fn as_char(self) -> char {
        match self {
            Glyph::Checkmark => '\u{2714}',
            Glyph::Cross => '\u{2716}',
            Glyph::Star => '\u{2605}',
            Glyph::Heart => '\u{2764}',
            Glyph::Question => '?',
            Glyph::Exclamation => '!',
            Glyph::ThumbsUp => '\u{1F44D}',
            Glyph::ThumbsDown => '\u{1F44E}',
            Glyph::Smile => '\u{1F642}',
            Glyph::Frown => '\u{1F641}',
            Glyph::Fire => '\u{1F525}',
            Glyph::Target => '\u{1F3AF}',
            Glyph::Warning => '\u{26A0}',
            Glyph::Pin => '\u{1F4CC}',
            Glyph::Eye => '\u{1F441}',
            Glyph::Lightbulb => '\u{1F4A1}',
        }
    }
}

/// Discrete symbol sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeTier {
    Small,
    #[default]
    Medium,
    Large,
    Huge,
}

impl SizeTier {
    pub const ALL: [SizeTier; 4] = [
        SizeTier::Small,
        SizeTier::Medium,
        SizeTier::Large,
        SizeTier::Huge,
    ];

    /// Glyph height in pixels.
    pub fn pixels(self) -> f64 {
        match self {
            SizeTier::Small => 24.0,
            SizeTier::Medium => 36.0,
            SizeTier::Large => 56.0,
            SizeTier::Huge => 80.0,
        }
    }

    /// Tier whose pixel size is closest to `pixels`.
    pub fn nearest(pixels: f64) -> Self {
        let mut best = SizeTier::Small;
        for tier in Self::ALL {
            if (tier.pixels() - pixels).abs() < (best.pixels() - pixels).abs() {
                best = tier;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_tier_rounds_to_closest_size() {
        assert_eq!(SizeTier::nearest(10.0), SizeTier::Small);
        assert_eq!(SizeTier::nearest(40.0), SizeTier::Medium);
        assert_eq!(SizeTier::nearest(60.0), SizeTier::Large);
        assert_eq!(SizeTier::nearest(500.0), SizeTier::Huge);
    }
}

//! Configuration type definitions.

use super::enums::{ColorSpec, SymbolSizeSpec};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the default style a new annotation session starts with.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Starting color: a palette name such as "red" or "white", or an RGB
    /// array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default stroke and outline thickness in pixels (valid range: 1.0 - 40.0)
    #[serde(default = "default_thickness")]
    pub default_thickness: f64,

    /// Default font size for placed text in pixels (valid range: 8.0 - 200.0)
    #[serde(default = "default_font_size")]
    pub default_font_size: f64,

    /// Font family name for text and symbol rendering (e.g., "Sans", "Noto Sans")
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", "light", 400, 700)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,

    /// Alpha multiplier for highlighter strokes (valid range: 0.05 - 1.0)
    #[serde(default = "default_highlighter_opacity")]
    pub highlighter_opacity: f64,

    /// Symbol size used when placing a new symbol
    #[serde(default = "default_symbol_size")]
    pub default_symbol_size: SymbolSizeSpec,

    /// Maximum number of elements in one annotation (0 = unlimited)
    #[serde(default)]
    pub max_elements: usize,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_thickness: default_thickness(),
            default_font_size: default_font_size(),
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
            highlighter_opacity: default_highlighter_opacity(),
            default_symbol_size: default_symbol_size(),
            max_elements: 0,
        }
    }
}

/// Selection and hit-testing tolerances, all in pixels.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SelectionConfig {
    /// Extra margin around a shape's box that still counts as a hit
    #[serde(default = "default_shape_hit_margin")]
    pub shape_hit_margin: f64,

    /// Extra distance beyond half the stroke width that still counts as a hit
    #[serde(default = "default_stroke_hit_slop")]
    pub stroke_hit_slop: f64,

    /// Side length of the square resize handle
    #[serde(default = "default_handle_size")]
    pub handle_size: f64,

    /// Distance of the rotate handle above the top edge of the selection box
    #[serde(default = "default_rotate_handle_offset")]
    pub rotate_handle_offset: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            shape_hit_margin: default_shape_hit_margin(),
            stroke_hit_slop: default_stroke_hit_slop(),
            handle_size: default_handle_size(),
            rotate_handle_offset: default_rotate_handle_offset(),
        }
    }
}

/// Undo/redo settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HistoryConfig {
    /// Maximum snapshots kept (0 = unlimited)
    #[serde(default = "default_history_depth")]
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: default_history_depth(),
        }
    }
}

/// Thumbnail bounds used when saving annotations.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ThumbnailConfig {
    #[serde(default = "default_thumbnail_width")]
    pub max_width: i32,

    #[serde(default = "default_thumbnail_height")]
    pub max_height: i32,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            max_width: default_thumbnail_width(),
            max_height: default_thumbnail_height(),
        }
    }
}

/// Directory store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct StorageConfig {
    /// Where saved annotations go. Defaults to `$XDG_DATA_HOME/vidscribe`.
    #[serde(default)]
    pub directory: Option<String>,

    /// Gzip the JSON payloads
    #[serde(default)]
    pub compress: bool,
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("red".to_string())
}

fn default_thickness() -> f64 {
    3.0
}

fn default_font_size() -> f64 {
    32.0
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "bold".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_highlighter_opacity() -> f64 {
    0.35
}

fn default_symbol_size() -> SymbolSizeSpec {
    SymbolSizeSpec::Medium
}

fn default_shape_hit_margin() -> f64 {
    6.0
}

fn default_stroke_hit_slop() -> f64 {
    4.0
}

fn default_handle_size() -> f64 {
    10.0
}

fn default_rotate_handle_offset() -> f64 {
    30.0
}

fn default_history_depth() -> usize {
    100
}

fn default_thumbnail_width() -> i32 {
    320
}

fn default_thumbnail_height() -> i32 {
    180
}

//! Configuration file support for vidscribe.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/vidscribe/config.toml`. Settings include drawing defaults,
//! selection tolerances, history depth, thumbnail bounds and the save directory.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{ColorSpec, SymbolSizeSpec};
pub use types::{DrawingConfig, HistoryConfig, SelectionConfig, StorageConfig, ThumbnailConfig};

use crate::draw::FontDescriptor;
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "yellow"
/// default_thickness = 4.0
/// default_symbol_size = "large"
///
/// [selection]
/// shape_hit_margin = 8.0
///
/// [history]
/// max_depth = 50
///
/// [thumbnail]
/// max_width = 480
/// max_height = 270
///
/// [storage]
/// compress = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Drawing tool defaults (color, thickness, font, symbol size)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Hit-testing tolerances and handle geometry
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Undo/redo depth
    #[serde(default)]
    pub history: HistoryConfig,

    /// Saved thumbnail size limits
    #[serde(default)]
    pub thumbnail: ThumbnailConfig,

    /// Directory store location and compression
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_thickness`: 1.0 - 40.0
    /// - `default_font_size`: 8.0 - 200.0
    /// - `highlighter_opacity`: 0.05 - 1.0
    /// - selection tolerances: 0.0 - 50.0
    /// - thumbnail bounds: 16 - 4096
    pub fn validate_and_clamp(&mut self) {
        if !(1.0..=40.0).contains(&self.drawing.default_thickness) {
            log::warn!(
                "Invalid default_thickness {:.1}, clamping to 1.0-40.0 range",
                self.drawing.default_thickness
            );
            self.drawing.default_thickness = self.drawing.default_thickness.clamp(1.0, 40.0);
        }

        if !(8.0..=200.0).contains(&self.drawing.default_font_size) {
            log::warn!(
                "Invalid default_font_size {:.1}, clamping to 8.0-200.0 range",
                self.drawing.default_font_size
            );
            self.drawing.default_font_size = self.drawing.default_font_size.clamp(8.0, 200.0);
        }

        if !(0.05..=1.0).contains(&self.drawing.highlighter_opacity) {
            log::warn!(
                "Invalid highlighter_opacity {:.2}, clamping to 0.05-1.0 range",
                self.drawing.highlighter_opacity
            );
            self.drawing.highlighter_opacity = self.drawing.highlighter_opacity.clamp(0.05, 1.0);
        }

        let valid_weight = matches!(
            self.drawing.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .drawing
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            log::warn!(
                "Invalid font_weight '{}', falling back to 'bold'",
                self.drawing.font_weight
            );
            self.drawing.font_weight = "bold".to_string();
        }

        if !matches!(
            self.drawing.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            log::warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.drawing.font_style
            );
            self.drawing.font_style = "normal".to_string();
        }

        for (name, value) in [
            ("shape_hit_margin", &mut self.selection.shape_hit_margin),
            ("stroke_hit_slop", &mut self.selection.stroke_hit_slop),
            ("handle_size", &mut self.selection.handle_size),
            ("rotate_handle_offset", &mut self.selection.rotate_handle_offset),
        ] {
            if !(0.0..=50.0).contains(&*value) {
                log::warn!("Invalid {name} {:.1}, clamping to 0.0-50.0 range", *value);
                *value = (*value).clamp(0.0, 50.0);
            }
        }

        for (name, value) in [
            ("thumbnail max_width", &mut self.thumbnail.max_width),
            ("thumbnail max_height", &mut self.thumbnail.max_height),
        ] {
            if !(16..=4096).contains(&*value) {
                log::warn!("Invalid {name} {}, clamping to 16-4096 range", *value);
                *value = (*value).clamp(16, 4096);
            }
        }
    }

    /// Font used for text and symbol elements.
    pub fn font_descriptor(&self) -> FontDescriptor {
        FontDescriptor::new(
            self.drawing.font_family.clone(),
            self.drawing.font_weight.clone(),
            self.drawing.font_style.clone(),
        )
    }

    /// Directory the directory store writes into.
    ///
    /// # Errors
    /// Returns an error if no directory is configured and the data directory
    /// cannot be determined.
    pub fn storage_dir(&self) -> Result<PathBuf> {
        match &self.storage.directory {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => Ok(dirs::data_dir()
                .context("Could not find data directory")?
                .join("vidscribe")),
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/vidscribe/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("vidscribe");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Serializes the config to TOML and writes it to the default location.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory cannot be created
    /// - The config cannot be serialized to TOML
    /// - The file cannot be written
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_sections_use_defaults() {
        let config: Config = toml::from_str("[history]\nmax_depth = 5\n").unwrap();
        assert_eq!(config.history.max_depth, 5);
        assert_eq!(config.drawing.default_thickness, 3.0);
        assert_eq!(config.thumbnail.max_width, 320);
        assert!(!config.storage.compress);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config: Config = toml::from_str(
            r#"
            [drawing]
            default_thickness = 100.0
            highlighter_opacity = 0.0
            font_style = "wavy"

            [thumbnail]
            max_width = 2
            "#,
        )
        .unwrap();
        config.validate_and_clamp();
        assert_eq!(config.drawing.default_thickness, 40.0);
        assert_eq!(config.drawing.highlighter_opacity, 0.05);
        assert_eq!(config.drawing.font_style, "normal");
        assert_eq!(config.thumbnail.max_width, 16);
    }

    #[test]
    fn load_from_reads_file_and_symbol_size() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[drawing]\ndefault_color = [0, 255, 0]\ndefault_symbol_size = \"huge\""
        )
        .unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.drawing.default_color.to_color(), crate::draw::GREEN);
        assert_eq!(config.drawing.default_symbol_size, SymbolSizeSpec::Huge);
    }

    #[test]
    fn schema_names_every_section() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = schema["properties"].as_object().unwrap();
        for section in ["drawing", "selection", "history", "thumbnail", "storage"] {
            assert!(properties.contains_key(section), "{section}");
        }
    }
}

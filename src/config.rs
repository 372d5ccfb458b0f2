//! Style and editor configuration
//!
//! The style types here are copied onto every element at creation time.
//! `EditorConfig` carries the defaults a fresh editor starts with and is
//! persisted as JSON between sessions.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Serializable color representation, channels in 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Default for Color {
    fn default() -> Self {
        // Default red stroke
        Self::rgb(0.9, 0.1, 0.1)
    }
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Convert to RGBA bytes (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

/// Dash pattern applied to outlines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl StrokeStyle {
    /// Dash intervals for a stroke of the given width; empty means solid
    pub fn dash_pattern(self, width: f32) -> Vec<f32> {
        match self {
            StrokeStyle::Solid => Vec::new(),
            StrokeStyle::Dashed => vec![width * 4.0, width * 2.0],
            StrokeStyle::Dotted => vec![width, width * 2.0],
        }
    }
}

/// Hand-drawn jitter level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum Sloppiness {
    /// Exact geometry
    None,
    /// About ±1px of wobble, one pass
    #[default]
    Low,
    /// About ±2.5px of wobble, two passes
    High,
}

impl From<u8> for Sloppiness {
    fn from(level: u8) -> Self {
        match level {
            0 => Sloppiness::None,
            1 => Sloppiness::Low,
            _ => Sloppiness::High,
        }
    }
}

impl From<Sloppiness> for u8 {
    fn from(level: Sloppiness) -> Self {
        match level {
            Sloppiness::None => 0,
            Sloppiness::Low => 1,
            Sloppiness::High => 2,
        }
    }
}

/// Style applied to newly created elements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub stroke_color: Color,
    pub stroke_width: f32,
    pub fill_color: Color,
    /// Opacity in percent (0-100)
    pub opacity_percent: u8,
    pub stroke_style: StrokeStyle,
    pub sloppiness: Sloppiness,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke_color: Color::default(),
            stroke_width: 2.0,
            fill_color: Color::TRANSPARENT,
            opacity_percent: 100,
            stroke_style: StrokeStyle::Solid,
            sloppiness: Sloppiness::Low,
        }
    }
}

impl Style {
    /// Opacity as an alpha factor in 0.0-1.0
    pub fn alpha(&self) -> f32 {
        f32::from(self.opacity_percent.min(100)) / 100.0
    }
}

/// Active tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Select,
    Freehand,
    Highlighter,
    Line,
    Arrow,
    Rectangle,
    Ellipse,
    Redact,
    Text,
    Eraser,
}

impl Tool {
    pub const ALL: [Tool; 10] = [
        Tool::Select,
        Tool::Freehand,
        Tool::Highlighter,
        Tool::Line,
        Tool::Arrow,
        Tool::Rectangle,
        Tool::Ellipse,
        Tool::Redact,
        Tool::Text,
        Tool::Eraser,
    ];
}

/// Smallest font size the text prompt accepts
pub const MIN_FONT_SIZE: f32 = 14.0;
/// Largest font size the text prompt accepts
pub const MAX_FONT_SIZE: f32 = 72.0;

/// Editor configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Style applied to new elements
    pub style: Style,
    /// Font size the text prompt opens with (14-72)
    pub font_size: f32,
    /// Tool selected when the editor starts
    pub tool: Tool,
    /// Fixed seed for element jitter seeds (None = seed from entropy)
    pub seed: Option<u64>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            style: Style::default(),
            font_size: 20.0,
            tool: Tool::Select,
            seed: None,
        }
    }
}

impl EditorConfig {
    /// Directory name under the platform config dir
    pub const ID: &'static str = "scribble";

    /// Default location of the config file, if the platform has a config dir
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {err:?}");
                Self::default()
            }
        }
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::path() else {
            log::error!("No config directory available for saving");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {err:?}");
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config.sanitized())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating config dir {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(self).context("serializing config")?;
        fs::write(path, raw).with_context(|| format!("writing config {}", path.display()))
    }

    /// Clamp out-of-range values read from disk
    fn sanitized(mut self) -> Self {
        self.font_size = self.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self.style.opacity_percent = self.style.opacity_percent.min(100);
        if !self.style.stroke_width.is_finite() || self.style.stroke_width <= 0.0 {
            self.style.stroke_width = Style::default().stroke_width;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sloppiness_serializes_as_integer() {
        let json = serde_json::to_string(&Sloppiness::High).unwrap();
        assert_eq!(json, "2");
        let level: Sloppiness = serde_json::from_str("0").unwrap();
        assert_eq!(level, Sloppiness::None);
    }

    #[test]
    fn test_config_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = EditorConfig::default();
        config.style.stroke_style = StrokeStyle::Dotted;
        config.style.sloppiness = Sloppiness::High;
        config.tool = Tool::Arrow;
        config.seed = Some(42);
        config.save_to(&path).unwrap();

        let loaded = EditorConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults_and_clamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "font_size": 200, "style": { "opacity_percent": 250 } }"#).unwrap();

        let loaded = EditorConfig::load_from(&path).unwrap();
        assert_eq!(loaded.font_size, MAX_FONT_SIZE);
        assert_eq!(loaded.style.opacity_percent, 100);
        assert_eq!(loaded.tool, Tool::Select);
        assert_eq!(loaded.style.stroke_width, 2.0);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(EditorConfig::load_from(&path).is_err());
    }
}

//! Layout configuration module
//!
//! Every constant the layout engine consumes lives in [`LayoutConfig`]. Hosts
//! build one through [`LayoutConfig::builder`], load it from TOML, or let
//! [`LayoutConfig::discover`] pick up the user's override file.

pub mod theme;

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::metrics::FontDescriptor;

pub use theme::{ChatTheme, Rgba, StatusColors, WaveformColors};

/// Environment variable pointing at a layout config file
pub const CONFIG_ENV_VAR: &str = "XFBUBBLE_LAYOUT_CONFIG";

/// File name looked up under the platform config directory
const CONFIG_FILE_NAME: &str = "layout.toml";

/// Layout constants consumed by the resolver and composer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Fixed bubble width when the message carries attachments
    pub media_width: f32,
    /// Padding on each side of the text block
    pub horizontal_text_padding: f32,
    /// Gap between the bubble and the opposite screen edge
    pub horizontal_bubble_padding: f32,
    /// Padding on each side of the avatar
    pub horizontal_avatar_padding: f32,
    pub avatar_size: f32,
    pub status_size: f32,
    pub horizontal_status_padding: f32,
    /// Gap between the end of the last text line and an inline timestamp
    pub inline_gap: f32,
    /// Inset of an overlaid timestamp from the bottom-trailing corner
    pub overlay_padding: f32,
    pub text_vertical_padding: f32,
    /// Vertical spacing between the text row and a stacked timestamp row
    pub stacked_row_spacing: f32,
    /// Top padding for the first message of a group
    pub group_start_top_padding: f32,
    /// Top padding for any later message of a group
    pub group_continuation_top_padding: f32,
    pub corner_radius: f32,
    /// Size changes at or below this value are not reported as changes
    pub size_epsilon: f32,
    /// Upper bound on render passes per bubble before the verdict is frozen
    pub max_passes: u32,
    /// Entries kept by the text metrics cache
    pub metrics_cache_capacity: usize,
    pub body_font: FontDescriptor,
    pub time_font: FontDescriptor,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            media_width: 204.0,
            horizontal_text_padding: 12.0,
            horizontal_bubble_padding: 8.0,
            horizontal_avatar_padding: 8.0,
            avatar_size: 32.0,
            status_size: 14.0,
            horizontal_status_padding: 8.0,
            inline_gap: 10.0,
            overlay_padding: 4.0,
            text_vertical_padding: 8.0,
            stacked_row_spacing: 4.0,
            group_start_top_padding: 8.0,
            group_continuation_top_padding: 4.0,
            corner_radius: 20.0,
            size_epsilon: 0.5,
            max_passes: 3,
            metrics_cache_capacity: 256,
            body_font: FontDescriptor::body(),
            time_font: FontDescriptor::caption(),
        }
    }
}

impl LayoutConfig {
    /// Create a new LayoutConfigBuilder
    pub fn builder() -> LayoutConfigBuilder {
        LayoutConfigBuilder::default()
    }

    /// Leading plus trailing text padding
    pub fn text_padding_total(&self) -> f32 {
        self.horizontal_text_padding * 2.0
    }

    /// Cache capacity as the non-zero value the cache constructor expects
    pub fn cache_capacity(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.metrics_cache_capacity).unwrap_or(NonZeroUsize::MIN)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lengths = [
            ("media_width", self.media_width),
            ("horizontal_text_padding", self.horizontal_text_padding),
            ("horizontal_bubble_padding", self.horizontal_bubble_padding),
            ("horizontal_avatar_padding", self.horizontal_avatar_padding),
            ("avatar_size", self.avatar_size),
            ("status_size", self.status_size),
            ("horizontal_status_padding", self.horizontal_status_padding),
            ("inline_gap", self.inline_gap),
            ("overlay_padding", self.overlay_padding),
            ("text_vertical_padding", self.text_vertical_padding),
            ("stacked_row_spacing", self.stacked_row_spacing),
            ("group_start_top_padding", self.group_start_top_padding),
            ("group_continuation_top_padding", self.group_continuation_top_padding),
            ("corner_radius", self.corner_radius),
            ("size_epsilon", self.size_epsilon),
        ];
        for (field, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid(
                    field,
                    format!("expected a finite, non-negative value, got {}", value),
                ));
            }
        }

        if self.media_width <= self.text_padding_total() {
            return Err(ConfigError::invalid(
                "media_width",
                "must be wider than the combined text padding",
            ));
        }
        if self.max_passes == 0 {
            return Err(ConfigError::invalid("max_passes", "at least one pass is required"));
        }
        if self.metrics_cache_capacity == 0 {
            return Err(ConfigError::invalid("metrics_cache_capacity", "must be at least 1"));
        }
        for (field, font) in [("body_font", &self.body_font), ("time_font", &self.time_font)] {
            font.validate()
                .map_err(|err| ConfigError::invalid(field, err.to_string()))?;
        }
        Ok(())
    }

    /// Parse and validate a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: LayoutConfig =
            toml::from_str(source).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    /// Location of the user's config file, if any.
    ///
    /// `XFBUBBLE_LAYOUT_CONFIG` wins over `<config dir>/xfbubble/layout.toml`.
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        dirs::config_dir().map(|dir| dir.join("xfbubble").join(CONFIG_FILE_NAME))
    }

    /// Load the user's config file, falling back to defaults when none exists
    pub fn discover() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::info!("Loading layout config from {}", path.display());
                Self::from_file(path)
            }
            _ => {
                tracing::debug!("No layout config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Builder for LayoutConfig
#[derive(Debug, Default)]
pub struct LayoutConfigBuilder {
    config: LayoutConfig,
}

impl LayoutConfigBuilder {
    /// Set the fixed bubble width used for media bubbles
    pub fn media_width(mut self, width: f32) -> Self {
        self.config.media_width = width;
        self
    }

    /// Set the padding on each side of the text block
    pub fn horizontal_text_padding(mut self, padding: f32) -> Self {
        self.config.horizontal_text_padding = padding;
        self
    }

    pub fn horizontal_bubble_padding(mut self, padding: f32) -> Self {
        self.config.horizontal_bubble_padding = padding;
        self
    }

    pub fn avatar_size(mut self, size: f32) -> Self {
        self.config.avatar_size = size;
        self
    }

    /// Set the gap kept between the last text line and an inline timestamp
    pub fn inline_gap(mut self, gap: f32) -> Self {
        self.config.inline_gap = gap;
        self
    }

    pub fn size_epsilon(mut self, epsilon: f32) -> Self {
        self.config.size_epsilon = epsilon;
        self
    }

    pub fn max_passes(mut self, passes: u32) -> Self {
        self.config.max_passes = passes;
        self
    }

    pub fn metrics_cache_capacity(mut self, capacity: usize) -> Self {
        self.config.metrics_cache_capacity = capacity;
        self
    }

    pub fn body_font(mut self, font: FontDescriptor) -> Self {
        self.config.body_font = font;
        self
    }

    pub fn time_font(mut self, font: FontDescriptor) -> Self {
        self.config.time_font = font;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<LayoutConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error("failed to parse layout config: {0}")]
    Parse(String),
    #[error("failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },
}

impl ConfigError {
    /// Create a new invalid value error
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

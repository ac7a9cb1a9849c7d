//! Legend configuration
//!
//! Colors and defaults that the legend operations fall back on. Loadable from
//! TOML or JSON; every field has a default so partial files are accepted.

use crate::error::ConfigError;
use crate::threshold::ScaleThreshold;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Color used when a threshold has no color for a bucket
pub const DEFAULT_FALLBACK_COLOR: &str = "#9e9e9e";

/// Palette offered for new boundaries
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#e53935", "#fb8c00", "#fdd835", "#7cb342", "#43a047", "#00897b", "#1e88e5", "#8e24aa",
];

/// How the editor session treats an out-of-bounds value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    /// Refuse the edit and report the allowed window
    #[default]
    Reject,
    /// Pull the value into the allowed window
    Clamp,
}

/// Configuration for building and classifying legends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    /// Color substituted for missing range entries
    pub fallback_color: String,
    /// Ordered colors; the first is given to newly added boundaries
    pub palette: Vec<String>,
    /// Threshold used at render time when none is stored
    pub default_threshold: ScaleThreshold,
    /// Out-of-bounds policy for the editor session
    pub edit_mode: EditMode,
}

impl LegendConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With fallback color
    #[inline]
    #[must_use]
    pub fn with_fallback_color(mut self, color: impl Into<String>) -> Self {
        self.fallback_color = color.into();
        self
    }

    /// With palette
    #[inline]
    #[must_use]
    pub fn with_palette<I, S>(mut self, palette: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.palette = palette.into_iter().map(Into::into).collect();
        self
    }

    /// With default threshold
    #[inline]
    #[must_use]
    pub fn with_default_threshold(mut self, threshold: ScaleThreshold) -> Self {
        self.default_threshold = threshold;
        self
    }

    /// With edit mode
    #[inline]
    #[must_use]
    pub fn with_edit_mode(mut self, mode: EditMode) -> Self {
        self.edit_mode = mode;
        self
    }

    /// Color for newly added boundaries
    ///
    /// Falls back to the fallback color if the palette is empty.
    #[inline]
    #[must_use]
    pub fn new_boundary_color(&self) -> &str {
        self.palette
            .first()
            .map_or(self.fallback_color.as_str(), String::as_str)
    }

    /// Check the configuration is usable
    ///
    /// # Errors
    /// - [`ConfigError::EmptyPalette`] when no palette colors are set
    /// - [`ConfigError::EmptyFallback`] for a blank fallback color
    /// - [`ConfigError::DefaultThreshold`] when the default threshold is malformed
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.fallback_color.trim().is_empty() {
            return Err(ConfigError::EmptyFallback);
        }
        self.default_threshold.validate()?;
        Ok(())
    }

    /// Parse and validate TOML configuration
    ///
    /// # Errors
    /// Returns [`ConfigError::Toml`] on a parse failure, or any error from
    /// [`LegendConfig::validate`]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate JSON configuration
    ///
    /// # Errors
    /// Returns [`ConfigError::Json`] on a parse failure, or any error from
    /// [`LegendConfig::validate`]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    ///
    /// Files ending in `.json` are parsed as JSON, anything else as TOML.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`LegendConfig::from_json_str`] or [`LegendConfig::from_toml_str`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json_str(&contents)?
        } else {
            Self::from_toml_str(&contents)?
        };

        tracing::debug!(path = %path.display(), "loaded legend config");
        Ok(config)
    }
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            fallback_color: DEFAULT_FALLBACK_COLOR.to_string(),
            palette: DEFAULT_PALETTE.iter().map(|c| (*c).to_string()).collect(),
            default_threshold: ScaleThreshold::new(
                vec![50.0],
                vec!["#e53935".to_string(), "#43a047".to_string()],
            ),
            edit_mode: EditMode::Reject,
        }
    }
}

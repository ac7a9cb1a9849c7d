//! Error types for threshold legends
//!
//! Provides typed errors for:
//! - Malformed thresholds and boundary lists
//! - Rejected boundary edits
//! - Configuration loading and validation

/// Main legend error type
#[derive(Debug, thiserror::Error)]
pub enum LegendError {
    /// Threshold or boundary list violates its invariants
    #[error("invalid threshold: {0}")]
    Threshold(#[from] ThresholdError),

    /// Boundary edit was rejected
    #[error("edit rejected: {0}")]
    Edit(#[from] EditError),

    /// Configuration could not be loaded or is invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Invariant violations of a [`ScaleThreshold`](crate::ScaleThreshold) or
/// [`BoundaryList`](crate::BoundaryList)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThresholdError {
    /// Boundary list has no entries
    #[error("boundary list is empty")]
    EmptyList,

    /// First boundary is not the fixed 100% cap
    #[error("first boundary must be the 100% cap, found {found}")]
    InvalidCap { found: f64 },

    /// Boundary is not strictly below its predecessor
    #[error("boundary {index} ({value}) is not below its predecessor ({previous})")]
    NotDescending {
        index: usize,
        value: f64,
        previous: f64,
    },

    /// Boundary falls below zero
    #[error("boundary {index} is negative ({value})")]
    Negative { index: usize, value: f64 },

    /// Domain breakpoints are not strictly ascending
    #[error("domain is not strictly ascending at position {index}")]
    DomainNotAscending { index: usize },

    /// Domain contains NaN or infinity
    #[error("domain value at position {index} is not finite")]
    NonFinite { index: usize },

    /// Range does not hold one more color than the domain has breakpoints
    #[error("range has {range_len} colors, expected {expected}")]
    RangeLength { range_len: usize, expected: usize },

    /// Persisted representation could not be parsed
    #[error("malformed threshold JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for ThresholdError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Reasons a boundary edit is not committed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    /// Index does not address an entry
    #[error("no boundary at index {index} (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// No entry carries this id
    #[error("no boundary with id {id}")]
    UnknownBoundary { id: String },

    /// Value lies outside the window allowed by the neighbors
    #[error("value {value} must be between {min} and {max}")]
    OutOfBounds { value: f64, min: f64, max: f64 },

    /// Neighbors leave no valid value for this entry
    #[error("no valid value between {min} and {max}")]
    EmptyWindow { min: f64, max: f64 },

    /// Value is NaN or infinite
    #[error("value is not a finite number")]
    NotFinite,
}

impl EditError {
    /// Check if the edit would succeed after clamping
    #[inline]
    #[must_use]
    pub fn is_clampable(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Palette has no colors
    #[error("palette must contain at least one color")]
    EmptyPalette,

    /// Fallback color is blank
    #[error("fallback color must not be empty")]
    EmptyFallback,

    /// Default threshold is invalid
    #[error("default threshold is invalid: {0}")]
    DefaultThreshold(#[from] ThresholdError),

    /// File could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// TOML could not be parsed
    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON could not be parsed
    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

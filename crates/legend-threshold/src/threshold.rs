//! Canonical scale-threshold structure
//!
//! [`ScaleThreshold`] is what gets persisted on the owning record and what
//! rendering code hands to the classifier. Its JSON form is
//! `{ "domain": number[], "range": string[] }`.

use crate::error::ThresholdError;
use schemars::JsonSchema;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};

/// Largest magnitude at which every integer is exactly representable as `f64`
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Ascending breakpoints plus one color per bucket
///
/// # Invariant
/// - `domain` strictly ascending
/// - `range.len() == domain.len() + 1`
///
/// Deserialization does not enforce the invariant; persisted data may be
/// malformed and the classifier tolerates it. Call [`ScaleThreshold::validate`]
/// before persisting.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ScaleThreshold {
    /// Breakpoints separating adjacent buckets, ascending
    #[serde(default, serialize_with = "serialize_domain")]
    #[schemars(with = "Vec<f64>")]
    pub domain: Vec<f64>,

    /// Bucket colors, lowest bucket first
    #[serde(default)]
    pub range: Vec<String>,
}

impl ScaleThreshold {
    /// Create threshold from breakpoints and colors
    #[inline]
    #[must_use]
    pub fn new(domain: Vec<f64>, range: Vec<String>) -> Self {
        Self { domain, range }
    }

    /// Number of buckets described by the domain
    #[inline]
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.domain.len() + 1
    }

    /// True when there are no breakpoints
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    /// Check the threshold invariant
    ///
    /// # Errors
    /// - [`ThresholdError::NonFinite`] for NaN or infinite breakpoints
    /// - [`ThresholdError::DomainNotAscending`] when a breakpoint does not exceed
    ///   its predecessor
    /// - [`ThresholdError::RangeLength`] when the color count is not
    ///   `domain.len() + 1`
    pub fn validate(&self) -> Result<(), ThresholdError> {
        for (index, value) in self.domain.iter().enumerate() {
            if !value.is_finite() {
                return Err(ThresholdError::NonFinite { index });
            }
        }

        if let Some(index) = self
            .domain
            .windows(2)
            .position(|pair| pair[1] <= pair[0])
        {
            return Err(ThresholdError::DomainNotAscending { index: index + 1 });
        }

        let expected = self.bucket_count();
        if self.range.len() != expected {
            return Err(ThresholdError::RangeLength {
                range_len: self.range.len(),
                expected,
            });
        }

        Ok(())
    }

    /// Parse the persisted JSON form
    ///
    /// Only the shape is checked here; see [`ScaleThreshold::validate`].
    ///
    /// # Errors
    /// Returns [`ThresholdError::Json`] when the input is not a threshold object
    pub fn from_json(json: &str) -> Result<Self, ThresholdError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to the persisted JSON form
    ///
    /// # Errors
    /// Returns [`ThresholdError::Json`] if serialization fails
    pub fn to_json(&self) -> Result<String, ThresholdError> {
        Ok(serde_json::to_string(self)?)
    }

    /// JSON schema of the persisted representation
    #[must_use]
    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ScaleThreshold)
    }
}

/// Whole breakpoints are written as JSON integers (`40`, not `40.0`) so the
/// output matches what browser clients persist.
#[allow(clippy::ptr_arg, clippy::cast_possible_truncation)]
fn serialize_domain<S: Serializer>(domain: &Vec<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(domain.len()))?;
    for value in domain {
        if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
            seq.serialize_element(&(*value as i64))?;
        } else {
            seq.serialize_element(value)?;
        }
    }
    seq.end()
}

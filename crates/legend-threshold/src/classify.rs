//! Value classification against a scale threshold
//!
//! Map renderers and table cells call [`classify`] once per feature or row;
//! legends call [`labels_for`] or [`legend_entries`]. Consumers should not
//! reimplement bucket math themselves.

use crate::config::LegendConfig;
use crate::threshold::ScaleThreshold;
use serde::Serialize;

/// Bucket a value fell into
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Bucket index, 0 for the lowest bucket
    pub bucket_index: usize,
    /// Color of that bucket
    pub color: String,
}

/// One legend row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    /// Human-readable bucket range
    pub label: String,
    /// Bucket color
    pub color: String,
}

/// Index of the bucket holding `value`
///
/// The first breakpoint strictly greater than `value` closes its bucket, so a
/// value equal to a breakpoint lands in the bucket above it. Values at or
/// above every breakpoint (and NaN) land in the topmost bucket.
#[inline]
#[must_use]
pub fn bucket_index(domain: &[f64], value: f64) -> usize {
    domain
        .iter()
        .position(|breakpoint| value < *breakpoint)
        .unwrap_or(domain.len())
}

/// Classify `value`, substituting `fallback` for a missing bucket color
#[must_use]
pub fn classify_or(threshold: &ScaleThreshold, value: f64, fallback: &str) -> Classification {
    let bucket_index = bucket_index(&threshold.domain, value);
    let color = threshold
        .range
        .get(bucket_index)
        .map_or(fallback, String::as_str)
        .to_string();

    Classification {
        bucket_index,
        color,
    }
}

/// Classify `value` into a bucket and its color
///
/// A malformed threshold with too few colors yields
/// [`DEFAULT_FALLBACK_COLOR`](crate::config::DEFAULT_FALLBACK_COLOR) for the
/// missing buckets.
#[must_use]
pub fn classify(threshold: &ScaleThreshold, value: f64) -> Classification {
    classify_or(threshold, value, crate::config::DEFAULT_FALLBACK_COLOR)
}

/// Human-readable labels, one per bucket, lowest first
///
/// `"< d0%"`, then `"d0% - d1%"` and so on, then `"> dn%"`. Empty when there
/// are no breakpoints.
#[must_use]
pub fn labels_for(threshold: Option<&ScaleThreshold>) -> Vec<String> {
    let domain = match threshold {
        Some(t) if !t.domain.is_empty() => &t.domain,
        _ => return Vec::new(),
    };

    let mut labels = Vec::with_capacity(domain.len() + 1);
    labels.push(format!("< {}%", domain[0]));
    labels.extend(
        domain
            .windows(2)
            .map(|pair| format!("{}% - {}%", pair[0], pair[1])),
    );
    labels.push(format!("> {}%", domain[domain.len() - 1]));
    labels
}

/// Labels paired with their colors, lowest bucket first
#[must_use]
pub fn legend_entries(threshold: &ScaleThreshold, config: &LegendConfig) -> Vec<LegendEntry> {
    labels_for(Some(threshold))
        .into_iter()
        .enumerate()
        .map(|(i, label)| LegendEntry {
            label,
            color: threshold
                .range
                .get(i)
                .map_or_else(|| config.fallback_color.clone(), Clone::clone),
        })
        .collect()
}

/// Stored threshold, or the configured default when none is stored
#[inline]
#[must_use]
pub fn resolve_threshold<'a>(
    stored: Option<&'a ScaleThreshold>,
    config: &'a LegendConfig,
) -> &'a ScaleThreshold {
    stored.unwrap_or(&config.default_threshold)
}

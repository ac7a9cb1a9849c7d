//! Boundary lists - the operator-facing editing state
//!
//! A [`BoundaryList`] is the descending sequence of upper bounds an operator
//! edits. Entry 0 is the fixed 100% cap. Lists are persistent vectors, so
//! every mutation yields a new snapshot and never touches the caller's list.

use crate::config::LegendConfig;
use crate::error::ThresholdError;
use crate::threshold::ScaleThreshold;
use im::Vector;
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

/// Upper bound of the cap entry
pub const CAP_UPPER_BOUND: f64 = 100.0;

/// Stable identity of a boundary within one editing session
///
/// Allocated once when the entry is created and kept through edits, so UI
/// keys do not shift when neighbors are added or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoundaryId(u64);

impl BoundaryId {
    /// Create id from raw sequence number
    #[inline]
    #[must_use]
    pub fn new(seq: u64) -> Self {
        Self(seq)
    }

    /// Raw sequence number
    #[inline]
    #[must_use]
    pub fn seq(&self) -> u64 {
        self.0
    }
}

impl Display for BoundaryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "range-{}", self.0)
    }
}

/// One breakpoint as the operator sees it
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryEntry {
    /// Stable identity
    pub id: BoundaryId,
    /// Percentage at which this bucket ends (exclusive)
    pub upper_bound: f64,
    /// Opaque color token
    pub color: String,
}

impl BoundaryEntry {
    /// Create entry
    #[inline]
    #[must_use]
    pub fn new(id: BoundaryId, upper_bound: f64, color: impl Into<String>) -> Self {
        Self {
            id,
            upper_bound,
            color: color.into(),
        }
    }
}

/// Descending list of boundaries, cap first
///
/// The list also carries the next id to hand out so mutations can allocate
/// fresh identities without shared state.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryList {
    entries: Vector<BoundaryEntry>,
    next_id: u64,
}

impl BoundaryList {
    /// List holding only the cap entry
    #[must_use]
    pub fn single(color: impl Into<String>) -> Self {
        Self::from_pairs([(CAP_UPPER_BOUND, color.into())])
    }

    /// Build list from `(upper_bound, color)` pairs in descending order
    ///
    /// Ids are assigned positionally (`range-1` for the first pair). The
    /// result is not validated; see [`validate_list`].
    #[must_use]
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, S)>,
        S: Into<String>,
    {
        let mut next_id = 1;
        let entries = pairs
            .into_iter()
            .map(|(upper_bound, color)| {
                let entry = BoundaryEntry::new(BoundaryId::new(next_id), upper_bound, color);
                next_id += 1;
                entry
            })
            .collect();

        Self { entries, next_id }
    }

    /// Number of entries, cap included
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the list has no entries (never the case for a valid list)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at index
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&BoundaryEntry> {
        self.entries.get(index)
    }

    /// The cap entry
    #[inline]
    #[must_use]
    pub fn cap(&self) -> Option<&BoundaryEntry> {
        self.entries.front()
    }

    /// The lowest boundary
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&BoundaryEntry> {
        self.entries.back()
    }

    /// Index of the entry with the given id
    #[must_use]
    pub fn position(&self, id: BoundaryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Iterate entries from the cap downwards
    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &BoundaryEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Upper bounds from the cap downwards
    #[must_use]
    pub fn upper_bounds(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.upper_bound).collect()
    }

    /// `(upper_bound, color)` pairs from the cap downwards
    #[must_use]
    pub fn pairs(&self) -> Vec<(f64, String)> {
        self.entries
            .iter()
            .map(|e| (e.upper_bound, e.color.clone()))
            .collect()
    }

    /// Id that the next added entry will receive
    #[inline]
    #[must_use]
    pub fn next_id(&self) -> BoundaryId {
        BoundaryId::new(self.next_id)
    }

    pub(crate) fn push_new(&self, upper_bound: f64, color: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.entries
            .push_back(BoundaryEntry::new(self.next_id(), upper_bound, color));
        next.next_id += 1;
        next
    }

    pub(crate) fn without(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.entries.remove(index);
        next
    }

    pub(crate) fn with_entry(&self, index: usize, entry: BoundaryEntry) -> Self {
        Self {
            entries: self.entries.update(index, entry),
            next_id: self.next_id,
        }
    }
}

impl<'a> IntoIterator for &'a BoundaryList {
    type Item = &'a BoundaryEntry;
    type IntoIter = im::vector::Iter<'a, BoundaryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Build the editing list for a stored threshold
///
/// Each breakpoint is paired with the color of the bucket below it, the cap
/// takes the last color in `range`, and the sequence is reversed into
/// descending order. Missing colors become the configured fallback color.
/// An absent threshold or empty domain yields a cap-only list.
#[must_use]
pub fn from_threshold(threshold: Option<&ScaleThreshold>, config: &LegendConfig) -> BoundaryList {
    let fallback = config.fallback_color.as_str();

    let Some(threshold) = threshold else {
        return BoundaryList::single(fallback);
    };

    if let Err(err) = threshold.validate() {
        tracing::warn!(error = %err, "building boundary list from malformed threshold");
    }

    let cap_color = threshold.range.last().map_or(fallback, String::as_str);
    if threshold.domain.is_empty() {
        return BoundaryList::single(cap_color);
    }

    let mut ascending: Vec<(f64, &str)> = threshold
        .domain
        .iter()
        .enumerate()
        .map(|(i, bound)| {
            let color = threshold.range.get(i).map_or(fallback, String::as_str);
            (*bound, color)
        })
        .collect();
    ascending.push((CAP_UPPER_BOUND, cap_color));

    BoundaryList::from_pairs(ascending.into_iter().rev())
}

/// Check a whole list against the boundary-list invariant
///
/// # Errors
/// - [`ThresholdError::EmptyList`] for an empty list
/// - [`ThresholdError::InvalidCap`] when entry 0 is not at 100
/// - [`ThresholdError::NotDescending`] when an entry is not below its predecessor
/// - [`ThresholdError::Negative`] for a bound under zero
#[allow(clippy::float_cmp)]
pub fn validate_list(list: &BoundaryList) -> Result<(), ThresholdError> {
    let cap = list.cap().ok_or(ThresholdError::EmptyList)?;
    if cap.upper_bound != CAP_UPPER_BOUND {
        return Err(ThresholdError::InvalidCap {
            found: cap.upper_bound,
        });
    }

    let mut previous = cap.upper_bound;
    for (index, entry) in list.iter().enumerate().skip(1) {
        let value = entry.upper_bound;
        // NaN compares as unordered and is rejected here
        if value.partial_cmp(&previous) != Some(Ordering::Less) {
            return Err(ThresholdError::NotDescending {
                index,
                value,
                previous,
            });
        }
        if value < 0.0 {
            return Err(ThresholdError::Negative { index, value });
        }
        previous = value;
    }

    Ok(())
}

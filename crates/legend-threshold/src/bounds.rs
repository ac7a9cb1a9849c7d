//! Neighbor constraints for boundary edits
//!
//! An entry's upper bound must stay strictly below its predecessor and at or
//! above its successor. [`bounds`] computes that window; callers clamp or
//! reject input against it before committing.

use crate::boundary::{BoundaryList, CAP_UPPER_BOUND};
use crate::error::EditError;
use std::cmp::Ordering;

/// Gap kept between an entry and its predecessor
pub const BOUNDARY_STEP: f64 = 1.0;

/// Inclusive window of values an entry may take
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Lowest accepted value
    pub min: f64,
    /// Highest accepted value
    pub max: f64,
}

impl Bounds {
    /// Create bounds
    #[inline]
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True when no value satisfies the window (including NaN limits)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !matches!(
            self.min.partial_cmp(&self.max),
            Some(Ordering::Less | Ordering::Equal)
        )
    }

    /// Check value lies within the window
    #[inline]
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Pull value into the window
    ///
    /// Returns `None` when the window is empty or the value is not finite.
    #[must_use]
    pub fn clamp(&self, value: f64) -> Option<f64> {
        if self.is_empty() || !value.is_finite() {
            return None;
        }
        Some(value.clamp(self.min, self.max))
    }

    /// Accept value as-is or explain why not
    ///
    /// # Errors
    /// - [`EditError::NotFinite`] for NaN or infinite values
    /// - [`EditError::EmptyWindow`] when the window admits nothing
    /// - [`EditError::OutOfBounds`] when the value lies outside the window
    pub fn check(&self, value: f64) -> Result<f64, EditError> {
        if !value.is_finite() {
            return Err(EditError::NotFinite);
        }
        if self.is_empty() {
            return Err(EditError::EmptyWindow {
                min: self.min,
                max: self.max,
            });
        }
        if !self.contains(value) {
            return Err(EditError::OutOfBounds {
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(value)
    }
}

/// Allowed window for the entry at `index`
///
/// - `max` is one below the predecessor, or 100 for the cap
/// - `min` is the successor's bound, or 0 for the lowest entry
///
/// The cap's window is reported for completeness, but the cap is never
/// editable. Returns `None` when `index` is out of range.
#[must_use]
pub fn bounds(list: &BoundaryList, index: usize) -> Option<Bounds> {
    list.get(index)?;

    let max = match index {
        0 => CAP_UPPER_BOUND,
        _ => list.get(index - 1)?.upper_bound - BOUNDARY_STEP,
    };
    let min = list.get(index + 1).map_or(0.0, |next| next.upper_bound);

    Some(Bounds::new(min, max))
}

/// Check the entry at `index` currently sits inside its window
///
/// Flags entries left out of range by mutations that do not validate, such
/// as a boundary added below zero.
///
/// # Errors
/// Returns [`EditError::IndexOutOfRange`] for a missing entry, otherwise the
/// error of [`Bounds::check`] for the entry's current value
pub fn validate_entry(list: &BoundaryList, index: usize) -> Result<(), EditError> {
    let entry = list.get(index).ok_or(EditError::IndexOutOfRange {
        index,
        len: list.len(),
    })?;
    if index == 0 {
        return Ok(());
    }

    let window = bounds(list, index).ok_or(EditError::IndexOutOfRange {
        index,
        len: list.len(),
    })?;
    window.check(entry.upper_bound).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BoundaryList {
        BoundaryList::from_pairs([(100.0, "#fff"), (70.0, "#aaa"), (40.0, "#000")])
    }

    #[test]
    fn middle_entry_window() {
        assert_eq!(bounds(&sample(), 1), Some(Bounds::new(40.0, 99.0)));
    }

    #[test]
    fn last_entry_window_reaches_zero() {
        assert_eq!(bounds(&sample(), 2), Some(Bounds::new(0.0, 69.0)));
    }

    #[test]
    fn cap_window() {
        assert_eq!(bounds(&sample(), 0), Some(Bounds::new(70.0, 100.0)));
    }

    #[test]
    fn out_of_range_index() {
        assert_eq!(bounds(&sample(), 3), None);
    }

    #[test]
    fn check_rejects_outside_window() {
        let window = Bounds::new(40.0, 99.0);
        assert_eq!(window.check(50.0), Ok(50.0));
        assert_eq!(
            window.check(100.0),
            Err(EditError::OutOfBounds {
                value: 100.0,
                min: 40.0,
                max: 99.0
            })
        );
        assert_eq!(window.check(f64::NAN), Err(EditError::NotFinite));
    }

    #[test]
    fn clamp_pulls_into_window() {
        let window = Bounds::new(40.0, 99.0);
        assert_eq!(window.clamp(120.0), Some(99.0));
        assert_eq!(window.clamp(10.0), Some(40.0));
        assert_eq!(window.clamp(f64::INFINITY), None);
    }

    #[test]
    fn empty_window_refuses_everything() {
        let window = Bounds::new(0.0, -1.0);
        assert!(window.is_empty());
        assert_eq!(window.clamp(0.0), None);
        assert!(matches!(window.check(0.0), Err(EditError::EmptyWindow { .. })));
    }

    #[test]
    fn validate_entry_flags_negative_boundary() {
        let list = BoundaryList::from_pairs([(100.0, "#fff"), (0.0, "#aaa"), (-1.0, "#000")]);
        assert!(validate_entry(&list, 1).is_ok());
        assert_eq!(
            validate_entry(&list, 2),
            Err(EditError::EmptyWindow {
                min: 0.0,
                max: -1.0
            })
        );

        let shallow = BoundaryList::from_pairs([(100.0, "#fff"), (-1.0, "#000")]);
        assert_eq!(
            validate_entry(&shallow, 1),
            Err(EditError::OutOfBounds {
                value: -1.0,
                min: 0.0,
                max: 99.0
            })
        );
    }

    #[test]
    fn validate_entry_skips_cap() {
        assert!(validate_entry(&sample(), 0).is_ok());
        assert!(matches!(
            validate_entry(&sample(), 5),
            Err(EditError::IndexOutOfRange { index: 5, len: 3 })
        ));
    }
}

//! Boundary list → scale threshold conversion
//!
//! The inverse direction lives in [`crate::boundary::from_threshold`].

use crate::boundary::{validate_list, BoundaryList};
use crate::error::ThresholdError;
use crate::threshold::ScaleThreshold;

/// Convert an editing list into the canonical threshold
///
/// The cap contributes the topmost bucket's color but no breakpoint, so the
/// remaining entries reversed give the ascending domain and the colors of the
/// full list reversed give the range.
///
/// # Errors
/// Fails fast with the first invariant violation of `list` (moved cap,
/// ordering, negative bound) rather than emitting a malformed threshold.
pub fn to_threshold(list: &BoundaryList) -> Result<ScaleThreshold, ThresholdError> {
    validate_list(list)?;

    let domain: Vec<f64> = list.iter().skip(1).rev().map(|e| e.upper_bound).collect();
    let range: Vec<String> = list.iter().rev().map(|e| e.color.clone()).collect();

    tracing::trace!(breakpoints = domain.len(), "converted boundary list");
    Ok(ScaleThreshold::new(domain, range))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::from_threshold;
    use crate::config::LegendConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn converts_descending_list() {
        let list = BoundaryList::from_pairs([(100.0, "#fff"), (70.0, "#aaa"), (40.0, "#000")]);
        let t = to_threshold(&list).unwrap();

        assert_eq!(t.domain, vec![40.0, 70.0]);
        assert_eq!(t.range, vec!["#000", "#aaa", "#fff"]);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn cap_only_list_has_single_bucket() {
        let list = BoundaryList::single("#fff");
        let t = to_threshold(&list).unwrap();

        assert!(t.domain.is_empty());
        assert_eq!(t.range, vec!["#fff"]);
    }

    #[test]
    fn input_list_is_untouched() {
        let list = BoundaryList::from_pairs([(100.0, "#fff"), (70.0, "#aaa")]);
        let before = list.clone();
        let _ = to_threshold(&list).unwrap();
        assert_eq!(list, before);
    }

    #[test]
    fn refuses_list_without_cap() {
        let list = BoundaryList::from_pairs([(80.0, "#fff"), (40.0, "#000")]);
        assert_eq!(
            to_threshold(&list),
            Err(ThresholdError::InvalidCap { found: 80.0 })
        );
    }

    #[test]
    fn refuses_negative_breakpoint() {
        let list = BoundaryList::from_pairs([(100.0, "#fff"), (0.0, "#aaa"), (-1.0, "#000")]);
        assert!(matches!(
            to_threshold(&list),
            Err(ThresholdError::Negative { index: 2, .. })
        ));
    }

    #[test]
    fn round_trips_through_boundary_list() {
        let t = ScaleThreshold::new(
            vec![10.0, 35.0, 80.0],
            vec!["#1".into(), "#2".into(), "#3".into(), "#4".into()],
        );
        let list = from_threshold(Some(&t), &LegendConfig::default());
        assert_eq!(to_threshold(&list).unwrap(), t);
    }
}

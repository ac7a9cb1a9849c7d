//! Copy-on-write boundary mutations
//!
//! Every operation returns a new [`BoundaryList`]; the input is never
//! modified. Operations addressed at the cap are no-ops.

use crate::boundary::{BoundaryEntry, BoundaryList};
use crate::bounds::{bounds, BOUNDARY_STEP};
use crate::config::{EditMode, LegendConfig};
use crate::error::EditError;

/// Requested change to one boundary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryEdit {
    /// New upper bound, checked against the neighbors
    pub upper_bound: Option<f64>,
    /// New color
    pub color: Option<String>,
}

impl BoundaryEdit {
    /// Edit only the upper bound
    #[inline]
    #[must_use]
    pub fn upper_bound(value: f64) -> Self {
        Self {
            upper_bound: Some(value),
            color: None,
        }
    }

    /// Edit only the color
    #[inline]
    #[must_use]
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            upper_bound: None,
            color: Some(color.into()),
        }
    }

    /// Also set the color
    #[inline]
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Append a boundary one below the current lowest
///
/// The new entry takes the first palette color and a fresh id. No bound
/// check happens here: below a zero boundary the new entry sits at -1 and
/// is reported by [`crate::validate_entry`] until the operator fixes it.
#[must_use]
pub fn add_boundary(list: &BoundaryList, config: &LegendConfig) -> BoundaryList {
    let upper_bound = list
        .last()
        .map_or(0.0, |last| last.upper_bound - BOUNDARY_STEP);

    if upper_bound < 0.0 {
        tracing::debug!(upper_bound, "added boundary below zero");
    }

    list.push_new(upper_bound, config.new_boundary_color())
}

/// Remove the boundary at `index`
///
/// Removing the cap is a no-op.
///
/// # Errors
/// Returns [`EditError::IndexOutOfRange`] if `index` is past the end
pub fn remove_boundary(list: &BoundaryList, index: usize) -> Result<BoundaryList, EditError> {
    if index >= list.len() {
        return Err(EditError::IndexOutOfRange {
            index,
            len: list.len(),
        });
    }
    if index == 0 {
        tracing::debug!("ignoring removal of the cap boundary");
        return Ok(list.clone());
    }

    Ok(list.without(index))
}

/// Apply an edit to the boundary at `index`
///
/// The new upper bound must fall inside [`bounds`]; with [`EditMode::Clamp`]
/// it is pulled into the window instead of being refused. Nothing is
/// committed when the bound is refused, including a color in the same edit.
/// The cap's upper bound is never changed; its color may be.
///
/// # Errors
/// - [`EditError::IndexOutOfRange`] if `index` is past the end
/// - [`EditError::NotFinite`] for a NaN or infinite bound
/// - [`EditError::OutOfBounds`] for a bound outside the window in [`EditMode::Reject`]
/// - [`EditError::EmptyWindow`] when no value fits between the neighbors
pub fn edit_boundary(
    list: &BoundaryList,
    index: usize,
    edit: &BoundaryEdit,
    mode: EditMode,
) -> Result<BoundaryList, EditError> {
    let entry = list.get(index).ok_or(EditError::IndexOutOfRange {
        index,
        len: list.len(),
    })?;

    let upper_bound = match edit.upper_bound {
        Some(_) if index == 0 => {
            tracing::debug!("ignoring upper bound edit of the cap boundary");
            entry.upper_bound
        }
        Some(value) => {
            let window = bounds(list, index).ok_or(EditError::IndexOutOfRange {
                index,
                len: list.len(),
            })?;
            match mode {
                EditMode::Reject => window.check(value)?,
                EditMode::Clamp => match window.clamp(value) {
                    Some(clamped) => clamped,
                    None => window.check(value)?,
                },
            }
        }
        None => entry.upper_bound,
    };

    let color = edit.color.clone().unwrap_or_else(|| entry.color.clone());
    let updated = BoundaryEntry::new(entry.id, upper_bound, color);

    if updated == *entry {
        return Ok(list.clone());
    }
    Ok(list.with_entry(index, updated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryId;
    use crate::bounds::validate_entry;
    use pretty_assertions::assert_eq;

    fn sample() -> BoundaryList {
        BoundaryList::from_pairs([(100.0, "#fff"), (70.0, "#aaa"), (40.0, "#000")])
    }

    #[test]
    fn add_appends_one_below_lowest() {
        let config = LegendConfig::default();
        let list = add_boundary(&sample(), &config);

        let added = list.last().unwrap();
        assert_eq!(added.upper_bound, 39.0);
        assert_eq!(added.color, config.palette[0]);
        assert_eq!(added.id.to_string(), "range-4");
        assert_eq!(sample().len(), 3);
    }

    #[test]
    fn add_below_zero_is_flagged_not_clamped() {
        let list = BoundaryList::from_pairs([(100.0, "#fff"), (0.0, "#000")]);
        let list = add_boundary(&list, &LegendConfig::default());

        assert_eq!(list.last().unwrap().upper_bound, -1.0);
        assert!(validate_entry(&list, 2).is_err());
    }

    #[test]
    fn ids_survive_removal_and_add() {
        let config = LegendConfig::default();
        let list = remove_boundary(&sample(), 1).unwrap();
        let list = add_boundary(&list, &config);

        let ids: Vec<u64> = list.iter().map(|e| e.id.seq()).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn remove_middle_entry() {
        let list = remove_boundary(&sample(), 1).unwrap();
        assert_eq!(
            list.pairs(),
            vec![(100.0, "#fff".to_string()), (40.0, "#000".to_string())]
        );
    }

    #[test]
    fn remove_cap_is_noop() {
        let list = remove_boundary(&sample(), 0).unwrap();
        assert_eq!(list, sample());
    }

    #[test]
    fn remove_out_of_range() {
        assert_eq!(
            remove_boundary(&sample(), 3),
            Err(EditError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn remove_last_non_cap_leaves_single_bucket() {
        let list = BoundaryList::from_pairs([(100.0, "#fff"), (50.0, "#000")]);
        let list = remove_boundary(&list, 1).unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn edit_within_window() {
        let list = edit_boundary(&sample(), 1, &BoundaryEdit::upper_bound(60.0), EditMode::Reject)
            .unwrap();
        assert_eq!(list.upper_bounds(), vec![100.0, 60.0, 40.0]);
        assert_eq!(list.get(1).unwrap().id, BoundaryId::new(2));
    }

    #[test]
    fn edit_outside_window_rejected() {
        let result =
            edit_boundary(&sample(), 1, &BoundaryEdit::upper_bound(100.0), EditMode::Reject);
        assert_eq!(
            result,
            Err(EditError::OutOfBounds {
                value: 100.0,
                min: 40.0,
                max: 99.0
            })
        );
    }

    #[test]
    fn edit_outside_window_clamped() {
        let list = edit_boundary(&sample(), 2, &BoundaryEdit::upper_bound(85.0), EditMode::Clamp)
            .unwrap();
        assert_eq!(list.upper_bounds(), vec![100.0, 70.0, 69.0]);
    }

    #[test]
    fn rejected_bound_drops_color_too() {
        let edit = BoundaryEdit::upper_bound(-5.0).with_color("#123");
        assert!(edit_boundary(&sample(), 2, &edit, EditMode::Reject).is_err());
    }

    #[test]
    fn edit_color_only() {
        let list =
            edit_boundary(&sample(), 2, &BoundaryEdit::color("#123"), EditMode::Reject).unwrap();
        assert_eq!(list.get(2).unwrap().color, "#123");
        assert_eq!(list.get(2).unwrap().upper_bound, 40.0);
    }

    #[test]
    fn cap_bound_is_never_edited() {
        let edit = BoundaryEdit::upper_bound(90.0).with_color("#eee");
        let list = edit_boundary(&sample(), 0, &edit, EditMode::Clamp).unwrap();

        let cap = list.cap().unwrap();
        assert_eq!(cap.upper_bound, 100.0);
        assert_eq!(cap.color, "#eee");
    }

    #[test]
    fn clamp_cannot_rescue_empty_window() {
        let list = BoundaryList::from_pairs([(100.0, "#fff"), (0.0, "#aaa"), (-1.0, "#000")]);
        let result = edit_boundary(&list, 2, &BoundaryEdit::upper_bound(0.0), EditMode::Clamp);
        assert!(matches!(result, Err(EditError::EmptyWindow { .. })));
    }
}

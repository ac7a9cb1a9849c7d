//! Editing session for one legend
//!
//! [`LegendEditor`] owns the live [`BoundaryList`] of a single dialog or form.
//! Each operation swaps in a new snapshot; older snapshots handed out by
//! [`LegendEditor::boundaries`] stay unchanged.

use crate::boundary::{from_threshold, BoundaryId, BoundaryList};
use crate::bounds::{bounds, validate_entry, Bounds};
use crate::config::LegendConfig;
use crate::convert::to_threshold;
use crate::error::{EditError, LegendError, ThresholdError};
use crate::mutation::{add_boundary, edit_boundary, remove_boundary, BoundaryEdit};
use crate::threshold::ScaleThreshold;

/// Per-field problem found before committing
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    /// Entry the issue belongs to
    pub id: BoundaryId,
    /// Position of the entry
    pub index: usize,
    /// What is wrong
    pub error: EditError,
    /// Clamping the entry into its window would resolve the issue
    pub clampable: bool,
}

/// One editing session over a legend
#[derive(Debug, Clone)]
pub struct LegendEditor {
    list: BoundaryList,
    config: LegendConfig,
}

impl LegendEditor {
    /// Start a session from a stored threshold (or none)
    #[must_use]
    pub fn open(stored: Option<&ScaleThreshold>, config: LegendConfig) -> Self {
        let list = from_threshold(stored, &config);
        tracing::debug!(boundaries = list.len(), "opened legend editor");
        Self { list, config }
    }

    /// Current snapshot
    #[inline]
    #[must_use]
    pub fn boundaries(&self) -> &BoundaryList {
        &self.list
    }

    /// Session configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &LegendConfig {
        &self.config
    }

    /// Allowed window for the entry at `index`
    #[inline]
    #[must_use]
    pub fn bounds(&self, index: usize) -> Option<Bounds> {
        bounds(&self.list, index)
    }

    /// Append a boundary below the lowest one, returning its id
    pub fn add(&mut self) -> BoundaryId {
        let id = self.list.next_id();
        self.list = add_boundary(&self.list, &self.config);
        id
    }

    /// Remove the boundary with `id`; the cap stays
    ///
    /// # Errors
    /// Returns [`EditError::UnknownBoundary`] if no entry has `id`
    pub fn remove(&mut self, id: BoundaryId) -> Result<(), EditError> {
        let index = self.index_of(id)?;
        self.list = remove_boundary(&self.list, index)?;
        Ok(())
    }

    /// Change the upper bound of the boundary with `id`
    ///
    /// Out-of-bounds values are rejected or clamped according to the
    /// configured [`EditMode`](crate::config::EditMode). Returns the value
    /// actually stored.
    ///
    /// # Errors
    /// - [`EditError::UnknownBoundary`] if no entry has `id`
    /// - [`EditError::NotFinite`], [`EditError::OutOfBounds`] or
    ///   [`EditError::EmptyWindow`] when the value is refused
    pub fn edit_bound(&mut self, id: BoundaryId, value: f64) -> Result<f64, EditError> {
        let index = self.index_of(id)?;
        self.apply(index, &BoundaryEdit::upper_bound(value))?;
        Ok(self.list.get(index).map_or(value, |e| e.upper_bound))
    }

    /// Change the color of the boundary with `id`
    ///
    /// # Errors
    /// Returns [`EditError::UnknownBoundary`] if no entry has `id`
    pub fn edit_color(
        &mut self,
        id: BoundaryId,
        color: impl Into<String>,
    ) -> Result<(), EditError> {
        let index = self.index_of(id)?;
        self.apply(index, &BoundaryEdit::color(color))
    }

    /// Entries currently outside their window
    #[must_use]
    pub fn issues(&self) -> Vec<FieldIssue> {
        self.list
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                validate_entry(&self.list, index)
                    .err()
                    .map(|error| FieldIssue {
                        id: entry.id,
                        index,
                        clampable: error.is_clampable(),
                        error,
                    })
            })
            .collect()
    }

    /// Threshold for live preview
    ///
    /// # Errors
    /// Returns a [`ThresholdError`] when the list breaks the cap or ordering invariant
    pub fn preview(&self) -> Result<ScaleThreshold, ThresholdError> {
        to_threshold(&self.list)
    }

    /// Final threshold to persist, consuming the session
    ///
    /// Refuses to emit a threshold while any entry is out of range.
    ///
    /// # Errors
    /// - [`LegendError::Edit`] with the first entry issue
    /// - [`LegendError::Threshold`] when conversion fails
    pub fn commit(self) -> Result<ScaleThreshold, LegendError> {
        if let Some(issue) = self.issues().into_iter().next() {
            tracing::warn!(id = %issue.id, error = %issue.error, "refusing to commit legend");
            return Err(issue.error.into());
        }
        let threshold = to_threshold(&self.list)?;
        tracing::info!(breakpoints = threshold.domain.len(), "committed legend threshold");
        Ok(threshold)
    }

    fn index_of(&self, id: BoundaryId) -> Result<usize, EditError> {
        self.list
            .position(id)
            .ok_or_else(|| EditError::UnknownBoundary { id: id.to_string() })
    }

    fn apply(&mut self, index: usize, edit: &BoundaryEdit) -> Result<(), EditError> {
        self.list = edit_boundary(&self.list, index, edit, self.config.edit_mode)?;
        Ok(())
    }
}

//! Threshold Legends
//!
//! Percentage breakpoint legends for coloring map features and table cells
//! by a continuous value such as completeness.
//!
//! # Overview
//!
//! - **[`BoundaryList`]**: descending breakpoints an operator edits, capped at 100%
//! - **[`bounds`]**: the window each breakpoint may move within
//! - **[`to_threshold`] / [`from_threshold`]**: conversion to and from the persisted
//!   [`ScaleThreshold`]
//! - **[`classify`] / [`labels_for`]**: bucket lookup and legend text
//! - **[`LegendEditor`]**: one editing session tying the above together
//!
//! # Example
//!
//! ```rust
//! use legend_threshold::{classify, labels_for, LegendConfig, LegendEditor, ScaleThreshold};
//!
//! let stored = ScaleThreshold::new(
//!     vec![40.0, 70.0],
//!     vec!["#000".into(), "#aaa".into(), "#fff".into()],
//! );
//!
//! // Edit
//! let mut editor = LegendEditor::open(Some(&stored), LegendConfig::default());
//! let added = editor.add();
//! editor.edit_bound(added, 20.0).unwrap();
//! let threshold = editor.commit().unwrap();
//! assert_eq!(threshold.domain, vec![20.0, 40.0, 70.0]);
//!
//! // Render
//! assert_eq!(classify(&threshold, 40.0).bucket_index, 2);
//! assert_eq!(labels_for(Some(&threshold))[0], "< 20%");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod boundary;
pub mod bounds;
pub mod classify;
pub mod config;
pub mod convert;
pub mod editor;
pub mod error;
pub mod mutation;
pub mod threshold;

// Re-exports
pub use boundary::{
    from_threshold, validate_list, BoundaryEntry, BoundaryId, BoundaryList, CAP_UPPER_BOUND,
};
pub use bounds::{bounds, validate_entry, Bounds, BOUNDARY_STEP};
pub use classify::{
    bucket_index, classify, classify_or, labels_for, legend_entries, resolve_threshold,
    Classification, LegendEntry,
};
pub use config::{EditMode, LegendConfig, DEFAULT_FALLBACK_COLOR, DEFAULT_PALETTE};
pub use convert::to_threshold;
pub use editor::{FieldIssue, LegendEditor};
pub use error::{ConfigError, EditError, LegendError, ThresholdError};
pub use mutation::{add_boundary, edit_boundary, remove_boundary, BoundaryEdit};
pub use threshold::ScaleThreshold;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for legend operations
    pub use crate::{
        add_boundary, bounds, classify, edit_boundary, from_threshold, labels_for,
        remove_boundary, to_threshold, BoundaryEdit, BoundaryList, Bounds, Classification,
        EditMode, LegendConfig, LegendEditor, ScaleThreshold,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

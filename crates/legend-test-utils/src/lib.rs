//! Testing utilities for the legend workspace
//!
//! Shared fixtures and proptest strategies.

#![allow(missing_docs)]

use legend_threshold::{BoundaryList, ScaleThreshold};
use proptest::prelude::*;

pub fn colors(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|c| (*c).to_string()).collect()
}

/// `[{100,"#fff"},{70,"#aaa"},{40,"#000"}]`
pub fn three_bucket_list() -> BoundaryList {
    BoundaryList::from_pairs([(100.0, "#fff"), (70.0, "#aaa"), (40.0, "#000")])
}

/// `{domain:[40,70], range:["#000","#aaa","#fff"]}`
pub fn three_bucket_threshold() -> ScaleThreshold {
    ScaleThreshold::new(vec![40.0, 70.0], colors(&["#000", "#aaa", "#fff"]))
}

pub fn color_token() -> impl Strategy<Value = String> {
    "#[0-9a-f]{6}"
}

/// Strictly ascending whole-percentage breakpoints in `[0, 99]`
pub fn ascending_domain(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::btree_set(0u8..100, 0..=max_len)
        .prop_map(|set| set.into_iter().map(f64::from).collect())
}

/// Thresholds satisfying the invariant
pub fn valid_threshold() -> impl Strategy<Value = ScaleThreshold> {
    ascending_domain(9).prop_flat_map(|domain| {
        let buckets = domain.len() + 1;
        proptest::collection::vec(color_token(), buckets)
            .prop_map(move |range| ScaleThreshold::new(domain.clone(), range))
    })
}

/// Lists satisfying the boundary-list invariant
pub fn valid_boundary_list() -> impl Strategy<Value = BoundaryList> {
    ascending_domain(9).prop_flat_map(|domain| {
        let entries = domain.len() + 1;
        proptest::collection::vec(color_token(), entries).prop_map(move |colors| {
            let bounds = std::iter::once(100.0).chain(domain.iter().rev().copied());
            BoundaryList::from_pairs(bounds.zip(colors))
        })
    })
}

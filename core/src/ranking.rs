//! Ranking and summary counting over saturation records.
//!
//! RULE: ordering is fully deterministic. Ties on the saturation metric
//! are broken by ascending consultant id, so the result never depends on
//! the order the feed returned the records in.

use std::{cmp::Ordering, collections::BTreeMap};

/// A closed, ordered set of status tiers.
pub trait StatusTier: Copy + Ord + 'static {
    /// Every tier, lowest to highest.
    const ALL: &'static [Self];
}

/// Anything that can be placed on the bottleneck ranking.
pub trait Ranked {
    type Status: StatusTier;

    fn consultant_id(&self) -> &str;

    /// The value the ranking sorts on (index or percent, per model).
    fn saturation_metric(&self) -> f64;

    fn status(&self) -> Self::Status;
}

/// Sort descending by saturation metric, ascending consultant id on ties.
pub fn rank_by_descending_saturation<R: Ranked>(mut records: Vec<R>) -> Vec<R> {
    records.sort_by(compare_ranked);
    records
}

// `total_cmp` orders -0.0 below 0.0; adding 0.0 folds both into +0.0 so
// zero metrics tie and fall through to the id.
fn compare_ranked<R: Ranked>(a: &R, b: &R) -> Ordering {
    (b.saturation_metric() + 0.0)
        .total_cmp(&(a.saturation_metric() + 0.0))
        .then_with(|| a.consultant_id().cmp(b.consultant_id()))
}

/// Count records per status tier. Every tier is present, zero if empty,
/// so summary tiles always have a value to show.
pub fn aggregate_status_counts<R: Ranked>(records: &[R]) -> BTreeMap<R::Status, usize> {
    let mut counts: BTreeMap<R::Status, usize> = <R::Status as StatusTier>::ALL
        .iter()
        .map(|s| (*s, 0))
        .collect();
    for record in records {
        *counts.entry(record.status()).or_insert(0) += 1;
    }
    counts
}

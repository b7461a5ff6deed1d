//! Aggregations over filtered row sets.
//!
//! Everything here is a pure function over borrowed rows; nothing caches
//! and nothing mutates. Empty inputs produce empty (or zero) outputs, never
//! errors — an empty filter result renders as an empty chart.

use crate::{
    dataset::Budget,
    error::{DashError, DashResult},
    types::Money,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Frequency count per distinct key, ascending by key.
///
/// The sum of all counts equals `rows.len()`, and every distinct key
/// appears exactly once.
pub fn value_counts<T, K, F>(rows: &[&T], key: F) -> Vec<(K, usize)>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for &row in rows {
        *counts.entry(key(row)).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// Sum of a numeric field; 0 for an empty set.
pub fn sum<T, F>(rows: &[&T], value: F) -> i64
where
    F: Fn(&T) -> i64,
{
    rows.iter().map(|&row| value(row)).sum()
}

/// Look up the budget record for `event_name`.
///
/// EventName is assumed unique but not enforced; when duplicates exist the
/// FIRST match in table order wins, matching the original selector behavior.
pub fn lookup_budget<'a>(budgets: &'a [Budget], event_name: &str) -> DashResult<&'a Budget> {
    budgets
        .iter()
        .find(|b| b.event_name == event_name)
        .ok_or_else(|| DashError::LookupNotFound(event_name.to_string()))
}

/// Split a planned budget into (venue, promotion) shares for the simulation
/// slider. Each share is floor-truncated independently:
///
///   venue     = planned * pct / 100
///   promotion = planned * (100 - pct) / 100
///
/// The shares may sum to less than `planned` (e.g. 999 at 33% gives
/// 329 + 669 = 998). The residual is an observable property of the slider
/// and is kept as-is.
pub fn budget_split(planned: Money, venue_pct: u32) -> (Money, Money) {
    let pct = i64::from(venue_pct.min(100));
    let venue = planned * pct / 100;
    let promotion = planned * (100 - pct) / 100;
    (venue, promotion)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub low: i64,
    pub high: i64,
    pub count: usize,
}

/// Equal-width histogram over `[min, max]` with `bin_count` bins.
///
/// Values on an interior bin edge fall into the higher bin; the final bin
/// is inclusive of the maximum. Empty input yields no bins.
pub fn histogram(values: &[i64], bin_count: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bin_count == 0 {
        return Vec::new();
    }
    let (min, max) = values
        .iter()
        .fold((i64::MAX, i64::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let span = (max - min).max(1) as f64;
    let width = span / bin_count as f64;

    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            low: min + (width * i as f64).floor() as i64,
            high: min + (width * (i + 1) as f64).floor() as i64,
            count: 0,
        })
        .collect();

    for &v in values {
        let mut idx = (((v - min) as f64) / width) as usize;
        if idx >= bin_count {
            idx = bin_count - 1; // v == max lands in the last bin
        }
        bins[idx].count += 1;
    }
    bins
}

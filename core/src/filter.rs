//! Predicate filter engine.
//!
//! Predicates address fields through typed accessor functions rather than
//! column-name lookups, so a filter over the wrong table fails to compile.
//! Multiple predicates combine with logical AND; no predicates means the
//! full table. Output preserves source row order and never copies rows.

use std::collections::BTreeSet;

pub enum Predicate<T> {
    /// Row kept iff the field value is in `allowed`. An empty set keeps
    /// nothing — "no categories selected" means an empty view, not "all".
    CategoryIn {
        field: fn(&T) -> &str,
        allowed: BTreeSet<String>,
    },
    /// Row kept iff `low <= value <= high` (inclusive on both ends).
    NumericRange {
        field: fn(&T) -> i64,
        low: i64,
        high: i64,
    },
}

impl<T> Predicate<T> {
    pub fn matches(&self, row: &T) -> bool {
        match self {
            Predicate::CategoryIn { field, allowed } => allowed.contains(field(row)),
            Predicate::NumericRange { field, low, high } => {
                let value = field(row);
                *low <= value && value <= *high
            }
        }
    }
}

/// Return the rows satisfying every predicate, in source order.
pub fn apply<'a, T>(rows: &'a [T], predicates: &[Predicate<T>]) -> Vec<&'a T> {
    rows.iter()
        .filter(|row| predicates.iter().all(|p| p.matches(row)))
        .collect()
}

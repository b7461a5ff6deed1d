//! Shared primitive types used across the entire dashboard core.

/// A monetary amount in whole currency units.
///
/// Budget figures are whole-unit integers so the percentage-split
/// simulation can use exact floor truncation (see `aggregate::budget_split`).
pub type Money = i64;

/// A calendar year derived from a history record's date.
pub type Year = i32;

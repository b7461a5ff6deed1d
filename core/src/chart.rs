//! Render-output value types.
//!
//! A view render produces plain serializable data — metric cards, table
//! projections, and chart specs — that a UI layer draws however it likes.
//! Nothing here knows about widgets or pages.

use crate::aggregate::HistogramBin;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    pub fn new(label: &str, value: impl ToString) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarGroup {
    pub name: String,
    pub values: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    /// One group per category, one bar per series entry within the group.
    GroupedBar {
        title: String,
        series: Vec<String>,
        groups: Vec<BarGroup>,
    },
    Bar {
        title: String,
        bars: Vec<(String, i64)>,
    },
    Pie {
        title: String,
        slices: Vec<PieSlice>,
    },
    Histogram {
        title: String,
        bins: Vec<HistogramBin>,
    },
    Line {
        title: String,
        points: Vec<(NaiveDate, u64)>,
    },
}

//! Page renderers.
//!
//! Five pages, each a pure function `(tables, widget values) -> ViewOutput`.
//! Renderers never mutate the data context; filtered tables and chart specs
//! are transient projections rebuilt on every call. An empty filter result
//! renders empty charts and tables, never an error.

use crate::{
    aggregate,
    chart::{BarGroup, ChartSpec, Metric, PieSlice, TableView},
    dataset::{AudienceMember, Budget, Company, DataContext, HistoryPoint},
    filter::{self, Predicate},
    types::{Money, Year},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const VENUE_PCT_MIN: u32 = 10;
pub const VENUE_PCT_MAX: u32 = 80;
pub const VENUE_PCT_DEFAULT: u32 = 25;
pub const YEAR_MIN: Year = 2019;
pub const YEAR_MAX: Year = 2024;
pub const AGE_HISTOGRAM_BINS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Home,
    Companies,
    Finance,
    AudienceInsights,
    History,
}

/// Current value of every input widget, across all pages. Values persist
/// when the user navigates away and are only recomputed into a view when
/// their page is rendered again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetState {
    /// Companies page: selected Industry values.
    pub industries: BTreeSet<String>,
    /// Companies page: selected Size values.
    pub sizes: BTreeSet<String>,
    /// Finance page: selected event. None only when the budget table is empty.
    pub event_name: Option<String>,
    /// Finance page: venue share slider, clamped to [VENUE_PCT_MIN, VENUE_PCT_MAX].
    pub venue_pct: u32,
    /// History page: inclusive year range.
    pub year_range: (Year, Year),
}

impl WidgetState {
    /// Defaults derived from the loaded tables: multiselects start with
    /// every distinct value present, the event selector starts on the first
    /// budget row, and the year slider covers its full range.
    pub fn defaults(ctx: &DataContext) -> Self {
        Self {
            industries: ctx.companies.iter().map(|c| c.industry.clone()).collect(),
            sizes: ctx.companies.iter().map(|c| c.size.clone()).collect(),
            event_name: ctx.budgets.first().map(|b| b.event_name.clone()),
            venue_pct: VENUE_PCT_DEFAULT,
            year_range: (YEAR_MIN, YEAR_MAX),
        }
    }

    /// Event selector domain: the EventName values present in the budget
    /// table, in table order. The selector is built only from these.
    pub fn event_options(ctx: &DataContext) -> Vec<String> {
        ctx.budgets.iter().map(|b| b.event_name.clone()).collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewOutput {
    pub page: Page,
    pub metrics: Vec<Metric>,
    pub tables: Vec<TableView>,
    pub charts: Vec<ChartSpec>,
    /// View-level explanatory messages (e.g. a stale event selection);
    /// never fatal to the process.
    pub notices: Vec<String>,
}

impl ViewOutput {
    fn empty(page: Page) -> Self {
        Self {
            page,
            metrics: Vec::new(),
            tables: Vec::new(),
            charts: Vec::new(),
            notices: Vec::new(),
        }
    }
}

/// Render one page. The only entry point the state holder uses.
pub fn render(page: Page, ctx: &DataContext, widgets: &WidgetState) -> ViewOutput {
    match page {
        Page::Home => render_home(ctx),
        Page::Companies => render_companies(ctx, widgets),
        Page::Finance => render_finance(ctx, widgets),
        Page::AudienceInsights => render_audience(ctx),
        Page::History => render_history(ctx, widgets),
    }
}

// ── Accessors used by predicates ─────────────────────────────────────────────

fn company_industry(c: &Company) -> &str {
    &c.industry
}

fn company_size(c: &Company) -> &str {
    &c.size
}

fn history_year(h: &HistoryPoint) -> i64 {
    i64::from(h.year())
}

// ── Home ─────────────────────────────────────────────────────────────────────

fn render_home(ctx: &DataContext) -> ViewOutput {
    let mut out = ViewOutput::empty(Page::Home);

    let budgets: Vec<&Budget> = ctx.budgets.iter().collect();
    let total_revenue = aggregate::sum(&budgets, |b| b.actual_revenue);

    out.metrics.push(Metric::new("Total Companies", ctx.companies.len()));
    out.metrics.push(Metric::new("Total Audience", ctx.audience.len()));
    out.metrics
        .push(Metric::new("Total Revenue", format_money(total_revenue)));

    out.charts.push(ChartSpec::GroupedBar {
        title: "Budget vs Revenue".into(),
        series: vec!["PlannedBudget".into(), "ActualRevenue".into()],
        groups: ctx
            .budgets
            .iter()
            .map(|b| BarGroup {
                name: b.event_name.clone(),
                values: vec![b.planned_budget, b.actual_revenue],
            })
            .collect(),
    });
    out
}

// ── Companies ────────────────────────────────────────────────────────────────

fn render_companies(ctx: &DataContext, widgets: &WidgetState) -> ViewOutput {
    let mut out = ViewOutput::empty(Page::Companies);

    let predicates = vec![
        Predicate::CategoryIn {
            field: company_industry,
            allowed: widgets.industries.clone(),
        },
        Predicate::CategoryIn {
            field: company_size,
            allowed: widgets.sizes.clone(),
        },
    ];
    let rows = filter::apply(&ctx.companies, &predicates);

    out.tables.push(TableView {
        title: "Company Participation".into(),
        columns: vec!["Industry".into(), "Size".into(), "ParticipationTimes".into()],
        rows: rows
            .iter()
            .map(|c| {
                vec![
                    c.industry.clone(),
                    c.size.clone(),
                    c.participation_times.to_string(),
                ]
            })
            .collect(),
    });

    let counts = aggregate::value_counts(&rows, |c: &Company| c.industry.clone());
    out.charts.push(ChartSpec::Bar {
        title: "Companies by Industry".into(),
        bars: counts
            .into_iter()
            .map(|(industry, count)| (industry, count as i64))
            .collect(),
    });
    out
}

// ── Finance ──────────────────────────────────────────────────────────────────

fn render_finance(ctx: &DataContext, widgets: &WidgetState) -> ViewOutput {
    let mut out = ViewOutput::empty(Page::Finance);

    let Some(event_name) = widgets.event_name.as_deref() else {
        out.notices.push("no events available".into());
        return out;
    };

    let budget = match aggregate::lookup_budget(&ctx.budgets, event_name) {
        Ok(b) => b,
        Err(e) => {
            // Stale selector value; the view survives with a message.
            log::warn!("finance view: {e}");
            out.notices.push(e.to_string());
            return out;
        }
    };

    out.metrics.push(Metric::new(
        "Planned Budget",
        format_money(budget.planned_budget),
    ));

    out.charts.push(ChartSpec::Pie {
        title: format!("{} Financial Breakdown", budget.event_name),
        slices: vec![
            slice("Promotion Cost", budget.promotion_cost),
            slice("Venue Cost", budget.venue_cost),
            slice("Actual Revenue", budget.actual_revenue),
        ],
    });

    let (venue, promotion) = aggregate::budget_split(budget.planned_budget, widgets.venue_pct);
    out.charts.push(ChartSpec::Pie {
        title: format!(
            "{} Simulated Split ({}% venue)",
            budget.event_name, widgets.venue_pct
        ),
        slices: vec![
            slice("Promotion Cost", promotion),
            slice("Venue Cost", venue),
            slice("Actual Revenue", budget.actual_revenue),
        ],
    });
    out
}

// ── Audience Insights ────────────────────────────────────────────────────────

fn render_audience(ctx: &DataContext) -> ViewOutput {
    let mut out = ViewOutput::empty(Page::AudienceInsights);
    let rows: Vec<&AudienceMember> = ctx.audience.iter().collect();

    out.charts.push(pie_of_counts(
        "Gender Distribution",
        aggregate::value_counts(&rows, |a: &AudienceMember| a.gender.clone()),
    ));
    out.charts.push(pie_of_counts(
        "Ticket Type",
        aggregate::value_counts(&rows, |a: &AudienceMember| a.ticket_type.clone()),
    ));

    let ages: Vec<i64> = ctx.audience.iter().map(|a| i64::from(a.age)).collect();
    out.charts.push(ChartSpec::Histogram {
        title: "Age Distribution".into(),
        bins: aggregate::histogram(&ages, AGE_HISTOGRAM_BINS),
    });

    let cities = aggregate::value_counts(&rows, |a: &AudienceMember| a.city.clone());
    out.charts.push(ChartSpec::Bar {
        title: "Audience by City".into(),
        bars: cities
            .into_iter()
            .map(|(city, count)| (city, count as i64))
            .collect(),
    });
    out
}

// ── History ──────────────────────────────────────────────────────────────────

fn render_history(ctx: &DataContext, widgets: &WidgetState) -> ViewOutput {
    let mut out = ViewOutput::empty(Page::History);

    let (low, high) = widgets.year_range;
    let predicates = vec![Predicate::NumericRange {
        field: history_year,
        low: i64::from(low),
        high: i64::from(high),
    }];
    let rows = filter::apply(&ctx.history, &predicates);

    out.tables.push(TableView {
        title: "Historical Events".into(),
        columns: vec!["Date".into(), "Year".into(), "AudienceCount".into()],
        rows: rows
            .iter()
            .map(|h| {
                vec![
                    h.date.to_string(),
                    h.year().to_string(),
                    h.audience_count.to_string(),
                ]
            })
            .collect(),
    });

    // Line chart is chronological even if the source file is not.
    let mut points: Vec<(chrono::NaiveDate, u64)> =
        rows.iter().map(|h| (h.date, h.audience_count)).collect();
    points.sort_by_key(|(date, _)| *date);

    out.charts.push(ChartSpec::Line {
        title: "Audience Count Over Time".into(),
        points,
    });
    out
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn slice(label: &str, value: Money) -> PieSlice {
    PieSlice {
        label: label.into(),
        value,
    }
}

fn pie_of_counts(title: &str, counts: Vec<(String, usize)>) -> ChartSpec {
    ChartSpec::Pie {
        title: title.into(),
        slices: counts
            .into_iter()
            .map(|(label, count)| PieSlice {
                label,
                value: count as i64,
            })
            .collect(),
    }
}

/// `$1,234,567` — whole units with thousands separators.
pub fn format_money(amount: Money) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

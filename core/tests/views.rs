use expo_core::chart::ChartSpec;
use expo_core::view::{self, Page, WidgetState};
use expo_core::{AppState, DataContext};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn make_state(ctx: &DataContext) -> AppState {
    AppState::new(ctx)
}

fn bar_pairs(chart: &ChartSpec) -> Vec<(String, i64)> {
    match chart {
        ChartSpec::Bar { bars, .. } => bars.clone(),
        other => panic!("expected Bar chart, got {other:?}"),
    }
}

fn pie_values(chart: &ChartSpec) -> Vec<i64> {
    match chart {
        ChartSpec::Pie { slices, .. } => slices.iter().map(|s| s.value).collect(),
        other => panic!("expected Pie chart, got {other:?}"),
    }
}

// ── Home ─────────────────────────────────────────────────────────────────────

/// Home shows the three KPI metrics and one grouped budget-vs-revenue bar
/// chart with one group per event and two series.
#[test]
fn home_metrics_and_grouped_bar() {
    let ctx = DataContext::sample();
    let view = make_state(&ctx).render(&ctx);

    assert_eq!(view.page, Page::Home);
    let metrics: Vec<(&str, &str)> = view
        .metrics
        .iter()
        .map(|m| (m.label.as_str(), m.value.as_str()))
        .collect();
    assert_eq!(
        metrics,
        vec![
            ("Total Companies", "4"),
            ("Total Audience", "5"),
            ("Total Revenue", "$2,610"),
        ]
    );

    assert_eq!(view.charts.len(), 1);
    match &view.charts[0] {
        ChartSpec::GroupedBar { series, groups, .. } => {
            assert_eq!(series, &["PlannedBudget", "ActualRevenue"]);
            assert_eq!(groups.len(), 3);
            assert_eq!(groups[0].name, "Spring Expo");
            assert_eq!(groups[0].values, vec![1000, 1200]);
        }
        other => panic!("expected GroupedBar, got {other:?}"),
    }
}

// ── Companies ────────────────────────────────────────────────────────────────

/// Default filters select every distinct value present, so the full table
/// renders and the industry bar counts cover all rows.
#[test]
fn companies_defaults_select_everything() {
    let ctx = DataContext::sample();
    let mut state = make_state(&ctx);
    state.select_page(Page::Companies);
    let view = state.render(&ctx);

    assert_eq!(view.tables[0].rows.len(), 4);
    let bars = bar_pairs(&view.charts[0]);
    assert_eq!(
        bars,
        vec![
            ("Finance".to_string(), 1),
            ("Health".to_string(), 1),
            ("Tech".to_string(), 2),
        ]
    );
}

/// Deselecting every industry renders an empty table and an empty chart —
/// the degrade-gracefully contract, not an error.
#[test]
fn companies_empty_selection_renders_empty_view() {
    let ctx = DataContext::sample();
    let mut state = make_state(&ctx);
    state.select_page(Page::Companies);
    state.set_industries(Vec::new());
    let view = state.render(&ctx);

    assert!(view.tables[0].rows.is_empty());
    assert!(bar_pairs(&view.charts[0]).is_empty());
    assert!(view.notices.is_empty());
}

/// Size joins Industry as an AND filter.
#[test]
fn companies_size_filter_combines_with_industry() {
    let ctx = DataContext::sample();
    let mut state = make_state(&ctx);
    state.select_page(Page::Companies);
    state.set_sizes(vec!["Small".to_string()]);
    let view = state.render(&ctx);

    // Tech/Small and Health/Small survive.
    assert_eq!(view.tables[0].rows.len(), 2);
    let bars = bar_pairs(&view.charts[0]);
    assert_eq!(bars, vec![("Health".to_string(), 1), ("Tech".to_string(), 1)]);
}

// ── Finance ──────────────────────────────────────────────────────────────────

/// The default selection is the first budget row. The actual pie carries the
/// stored costs and revenue; the simulated pie re-splits PlannedBudget at
/// the default 25% venue share.
#[test]
fn finance_actual_and_simulated_pies() {
    let ctx = DataContext::sample();
    let mut state = make_state(&ctx);
    state.select_page(Page::Finance);
    let view = state.render(&ctx);

    assert_eq!(view.metrics[0].value, "$1,000");
    assert_eq!(view.charts.len(), 2);
    // Actual: promotion 300, venue 250, revenue 1200.
    assert_eq!(pie_values(&view.charts[0]), vec![300, 250, 1200]);
    // Simulated at 25%: promotion 750, venue 250, revenue unchanged.
    assert_eq!(pie_values(&view.charts[1]), vec![750, 250, 1200]);
}

/// The slider changes only the simulated pie, using the documented
/// truncation rule.
#[test]
fn finance_slider_recomputes_simulated_split() {
    let ctx = DataContext::sample();
    let mut state = make_state(&ctx);
    state.select_page(Page::Finance);
    state.select_event("Autumn Fair".to_string()); // planned 999
    state.set_venue_pct(33);
    let view = state.render(&ctx);

    // floor(999*33/100)=329 venue, floor(999*67/100)=669 promotion.
    assert_eq!(pie_values(&view.charts[1]), vec![669, 329, 800]);
}

/// The slider clamps to its [10, 80] bounds.
#[test]
fn venue_slider_clamps_to_bounds() {
    let ctx = DataContext::sample();
    let mut state = make_state(&ctx);

    state.set_venue_pct(5);
    assert_eq!(state.widgets.venue_pct, view::VENUE_PCT_MIN);
    state.set_venue_pct(95);
    assert_eq!(state.widgets.venue_pct, view::VENUE_PCT_MAX);
}

/// A stale event selection renders a notice instead of crashing the process
/// or the view.
#[test]
fn finance_stale_selection_renders_notice() {
    let ctx = DataContext::sample();
    let mut state = make_state(&ctx);
    state.select_page(Page::Finance);
    state.select_event("Ghost Expo".to_string());
    let view = state.render(&ctx);

    assert!(view.charts.is_empty());
    assert_eq!(view.notices.len(), 1);
    assert!(view.notices[0].contains("Ghost Expo"));
}

/// The event selector domain is built only from values present in the
/// budget table, in table order.
#[test]
fn event_selector_domain_comes_from_table() {
    let ctx = DataContext::sample();
    let options = WidgetState::event_options(&ctx);
    assert_eq!(options, vec!["Spring Expo", "Autumn Fair", "Winter Gala"]);
    assert_eq!(
        WidgetState::defaults(&ctx).event_name.as_deref(),
        Some("Spring Expo")
    );
}

// ── Audience Insights ────────────────────────────────────────────────────────

/// Two pies, a 10-bin age histogram, and a per-city bar chart.
#[test]
fn audience_charts_have_expected_shape() {
    let ctx = DataContext::sample();
    let mut state = make_state(&ctx);
    state.select_page(Page::AudienceInsights);
    let view = state.render(&ctx);

    assert_eq!(view.charts.len(), 4);
    // Gender pie: Female 3, Male 2 (ascending by label).
    assert_eq!(pie_values(&view.charts[0]), vec![3, 2]);

    match &view.charts[2] {
        ChartSpec::Histogram { bins, .. } => {
            assert_eq!(bins.len(), 10);
            let total: usize = bins.iter().map(|b| b.count).sum();
            assert_eq!(total, ctx.audience.len());
        }
        other => panic!("expected Histogram, got {other:?}"),
    }

    let cities = bar_pairs(&view.charts[3]);
    assert_eq!(
        cities,
        vec![
            ("Hong Kong".to_string(), 2),
            ("Macau".to_string(), 1),
            ("Shenzhen".to_string(), 2),
        ]
    );
}

// ── History ──────────────────────────────────────────────────────────────────

/// Year-range filtering derives Year from Date and keeps both boundary
/// years (inclusive range).
#[test]
fn history_year_range_is_inclusive() {
    let ctx = DataContext::sample();
    let mut state = make_state(&ctx);
    state.select_page(Page::History);
    state.set_year_range(2020, 2022);
    let view = state.render(&ctx);

    let years: Vec<&str> = view.tables[0]
        .rows
        .iter()
        .map(|row| row[1].as_str())
        .collect();
    assert_eq!(years, vec!["2020", "2021", "2022"]);
}

/// Out-of-bounds years clamp to [2019, 2024]; a reversed range normalizes.
#[test]
fn year_range_clamps_and_normalizes() {
    let ctx = DataContext::sample();
    let mut state = make_state(&ctx);

    state.set_year_range(2025, 2018);
    assert_eq!(state.widgets.year_range, (view::YEAR_MIN, view::YEAR_MAX));
}

/// The line chart is chronological even when the source file is not; the
/// table keeps source order.
#[test]
fn history_line_chart_is_chronological() {
    let mut ctx = DataContext::sample();
    ctx.history.reverse(); // 2024 first in source order

    let mut state = make_state(&ctx);
    state.select_page(Page::History);
    let view = state.render(&ctx);

    assert_eq!(view.tables[0].rows[0][1], "2024", "table in source order");
    match &view.charts[0] {
        ChartSpec::Line { points, .. } => {
            let dates: Vec<_> = points.iter().map(|(d, _)| *d).collect();
            let mut sorted = dates.clone();
            sorted.sort();
            assert_eq!(dates, sorted, "points sorted chronologically");
            assert_eq!(points[0].1, 800); // the 2019 event
        }
        other => panic!("expected Line, got {other:?}"),
    }
}

// ── Navigation / state holder ────────────────────────────────────────────────

/// Widget values persist when the user navigates away and back; only the
/// active page is rendered.
#[test]
fn widget_values_persist_across_navigation() {
    let ctx = DataContext::sample();
    let mut state = make_state(&ctx);

    state.select_page(Page::Companies);
    state.set_industries(vec!["Tech".to_string()]);

    state.select_page(Page::History);
    assert_eq!(state.render(&ctx).page, Page::History);

    state.select_page(Page::Companies);
    let view = state.render(&ctx);
    assert_eq!(view.tables[0].rows.len(), 2, "industry filter survived");
}

/// Rendering is pure: the same state renders to the same output, and the
/// tables are not mutated by rendering.
#[test]
fn render_is_deterministic() {
    let ctx = DataContext::sample();
    let mut state = make_state(&ctx);
    state.select_page(Page::AudienceInsights);

    let first = serde_json::to_string(&state.render(&ctx)).unwrap();
    let second = serde_json::to_string(&state.render(&ctx)).unwrap();
    assert_eq!(first, second);
}

//! Navigation and widget state holder.
//!
//! One current page, one value per widget. Every mutator is followed by a
//! `render()` of the active page only — widget values for other pages
//! persist untouched and are recomputed when their page is revisited.
//! Single-threaded and synchronous: one interaction, one full recompute.

use crate::{
    dataset::DataContext,
    types::Year,
    view::{self, Page, ViewOutput, WidgetState, VENUE_PCT_MAX, VENUE_PCT_MIN, YEAR_MAX, YEAR_MIN},
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub page: Page,
    pub widgets: WidgetState,
}

impl AppState {
    /// Start on Home with widget defaults derived from the loaded tables.
    pub fn new(ctx: &DataContext) -> Self {
        Self {
            page: Page::Home,
            widgets: WidgetState::defaults(ctx),
        }
    }

    /// Render the current page. Pure over `(ctx, self)`.
    pub fn render(&self, ctx: &DataContext) -> ViewOutput {
        view::render(self.page, ctx, &self.widgets)
    }

    pub fn select_page(&mut self, page: Page) {
        self.page = page;
    }

    pub fn set_industries(&mut self, values: impl IntoIterator<Item = String>) {
        self.widgets.industries = values.into_iter().collect();
    }

    pub fn set_sizes(&mut self, values: impl IntoIterator<Item = String>) {
        self.widgets.sizes = values.into_iter().collect();
    }

    /// The selector is populated from table values, so an unknown name here
    /// can only come from a stale caller; the Finance view reports it as a
    /// notice rather than failing.
    pub fn select_event(&mut self, event_name: String) {
        self.widgets.event_name = Some(event_name);
    }

    /// Slider semantics: out-of-range input clamps to [10, 80].
    pub fn set_venue_pct(&mut self, pct: u32) {
        self.widgets.venue_pct = pct.clamp(VENUE_PCT_MIN, VENUE_PCT_MAX);
    }

    /// Slider semantics: both ends clamp to [2019, 2024]; a reversed range
    /// is normalized so low <= high.
    pub fn set_year_range(&mut self, low: Year, high: Year) {
        let low = low.clamp(YEAR_MIN, YEAR_MAX);
        let high = high.clamp(YEAR_MIN, YEAR_MAX);
        self.widgets.year_range = if low <= high { (low, high) } else { (high, low) };
    }
}

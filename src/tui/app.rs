//! Dashboard state.
//!
//! [`DashboardApp`] owns the interactive state (weights, filter, selection)
//! and re-ranks through a [`RankingCache`] after every change. It never
//! touches the terminal, so key handling and re-ranking are unit tested
//! directly.

use super::theme::Theme;
use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::model::{MetricKey, RegionFilter, ScoreWeights, TitleProfile};
use crate::scoring::{normalize, rebalance, CacheStats, RankedTitle, RankingCache, RankingSummary};
use std::sync::Arc;

/// Interactive ranking state.
pub struct DashboardApp {
    catalog: Catalog,
    cache: RankingCache,
    initial_weights: ScoreWeights,
    weights: ScoreWeights,
    filter: RegionFilter,
    rows: Arc<[RankedTitle]>,
    summary: RankingSummary,
    /// Index into `MetricKey::ALL` of the slider being adjusted
    focused: usize,
    /// Index into the ranked rows
    selected: usize,
    slider_step: f64,
    strong_threshold: f64,
    /// Detail panel visible
    pub show_detail: bool,
    pub theme: Theme,
    /// Transient message shown in the footer
    pub status_message: Option<String>,
    pub should_quit: bool,
    pub tick: u64,
}

impl DashboardApp {
    /// Build the dashboard from a catalog, starting weights and config.
    #[must_use]
    pub fn new(catalog: Catalog, weights: ScoreWeights, config: &AppConfig) -> Self {
        let weights = normalize(&weights);
        let cache = RankingCache::new(config.scoring.cache_capacity);
        let filter = config.scoring.region;
        let rows = cache.get_or_rank(&catalog, &weights, filter);
        let summary = RankingSummary::from_rows(&rows, config.scoring.strong_threshold);

        Self {
            catalog,
            cache,
            initial_weights: weights,
            weights,
            filter,
            rows,
            summary,
            focused: 0,
            selected: 0,
            slider_step: config.tui.slider_step,
            strong_threshold: config.scoring.strong_threshold,
            show_detail: false,
            theme: Theme::from_name(&config.tui.theme),
            status_message: None,
            should_quit: false,
            tick: 0,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    #[must_use]
    pub const fn filter(&self) -> RegionFilter {
        self.filter
    }

    #[must_use]
    pub fn rows(&self) -> &[RankedTitle] {
        &self.rows
    }

    #[must_use]
    pub const fn summary(&self) -> &RankingSummary {
        &self.summary
    }

    #[must_use]
    pub const fn focused_metric(&self) -> MetricKey {
        MetricKey::ALL[self.focused]
    }

    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected_row(&self) -> Option<&RankedTitle> {
        self.rows.get(self.selected)
    }

    #[must_use]
    pub fn selected_title(&self) -> Option<&TitleProfile> {
        self.selected_row()
            .and_then(|row| row.title(self.catalog.titles()))
    }

    /// Name of the title at the top of the current ranking
    #[must_use]
    pub fn top_name(&self) -> Option<&str> {
        self.rows
            .first()
            .and_then(|row| row.title(self.catalog.titles()))
            .map(|t| t.name.as_str())
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    // ------------------------------------------------------------------
    // Weight sliders
    // ------------------------------------------------------------------

    /// Move the focused slider by `delta`, rebalancing the other weights.
    pub fn adjust_focused(&mut self, delta: f64) {
        let metric = self.focused_metric();
        let next = self.weights[metric] + delta;
        self.weights = rebalance(&self.weights, metric, next);
        self.status_message = Some(format!(
            "{} set to {:.0}%",
            metric.label(),
            self.weights[metric] * 100.0
        ));
        self.refresh();
    }

    pub fn increase_focused(&mut self) {
        self.adjust_focused(self.slider_step);
    }

    pub fn decrease_focused(&mut self) {
        self.adjust_focused(-self.slider_step);
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % MetricKey::COUNT;
    }

    pub fn focus_prev(&mut self) {
        self.focused = (self.focused + MetricKey::COUNT - 1) % MetricKey::COUNT;
    }

    /// Restore the weights the dashboard started with.
    pub fn reset_weights(&mut self) {
        self.weights = self.initial_weights;
        self.status_message = Some("Weights reset".to_string());
        self.refresh();
    }

    // ------------------------------------------------------------------
    // Ranking table
    // ------------------------------------------------------------------

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    // ------------------------------------------------------------------
    // Filter and display
    // ------------------------------------------------------------------

    pub fn next_region(&mut self) {
        self.set_filter(self.filter.next());
    }

    pub fn prev_region(&mut self) {
        self.set_filter(self.filter.prev());
    }

    fn set_filter(&mut self, filter: RegionFilter) {
        self.filter = filter;
        self.status_message = Some(format!("Region: {}", filter.label()));
        self.refresh();
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    /// Re-rank for the current weights and filter.
    ///
    /// The selected title stays selected even if its rank changes.
    fn refresh(&mut self) {
        let selected_id = self.selected_row().map(|row| row.title_id.clone());
        self.rows = self
            .cache
            .get_or_rank(&self.catalog, &self.weights, self.filter);
        self.summary = RankingSummary::from_rows(&self.rows, self.strong_threshold);
        self.selected = selected_id
            .and_then(|id| self.rows.iter().position(|row| row.title_id == id))
            .unwrap_or(0);
        tracing::debug!(
            "Re-ranked {} titles under {} ({})",
            self.rows.len(),
            self.filter,
            self.weights.formula()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RegionCode;

    fn app() -> DashboardApp {
        DashboardApp::new(
            Catalog::builtin().unwrap(),
            ScoreWeights::default(),
            &AppConfig::default(),
        )
    }

    #[test]
    fn test_initial_ranking() {
        let app = app();
        assert_eq!(app.rows().len(), app.catalog().len());
        assert_eq!(app.rows()[0].rank, 1);
        assert_eq!(app.focused_metric(), MetricKey::CompletionRate);
        assert!(app.top_name().is_some());
    }

    #[test]
    fn test_adjust_rebalances_and_sums_to_one() {
        let mut app = app();
        let before = app.weights()[MetricKey::CompletionRate];
        app.increase_focused();
        let after = app.weights()[MetricKey::CompletionRate];
        assert!((after - (before + 0.05)).abs() < 1e-9);
        assert!((app.weights().total() - 1.0).abs() < 1e-9);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_slider_clamps_at_zero() {
        let mut app = app();
        for _ in 0..30 {
            app.decrease_focused();
        }
        assert!(app.weights()[MetricKey::CompletionRate].abs() < 1e-12);
        assert!((app.weights().total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_focus_wraps() {
        let mut app = app();
        app.focus_prev();
        assert_eq!(app.focused_metric(), MetricKey::BingeIntensity);
        app.focus_next();
        assert_eq!(app.focused_metric(), MetricKey::CompletionRate);
    }

    #[test]
    fn test_reset_restores_initial_weights() {
        let mut app = app();
        app.focus_next();
        app.increase_focused();
        app.reset_weights();
        assert_eq!(*app.weights(), normalize(&ScoreWeights::default()));
    }

    #[test]
    fn test_selection_follows_title_across_rerank() {
        let mut app = app();
        app.select_next();
        app.select_next();
        let id = app.selected_row().unwrap().title_id.clone();
        app.next_region();
        assert_eq!(app.filter(), RegionFilter::Region(RegionCode::Us));
        assert_eq!(app.selected_row().unwrap().title_id, id);
    }

    #[test]
    fn test_selection_bounds() {
        let mut app = app();
        app.select_prev();
        assert_eq!(app.selected_index(), 0);
        for _ in 0..100 {
            app.select_next();
        }
        assert_eq!(app.selected_index(), app.rows().len() - 1);
    }

    #[test]
    fn test_returning_to_earlier_state_hits_cache() {
        let mut app = app();
        app.next_region();
        app.prev_region();
        let stats = app.cache_stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.entries, 2);
    }
}

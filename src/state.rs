use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::color::ColorMap;
use crate::config::SliderBounds;
use crate::data::filter::filter;
use crate::data::model::{CategoryBreakdown, PayloadRange, RecordStore, ScatterPoint, SiteSelector};
use crate::data::summary::summarize;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table (None until a file is loaded).
    pub store: Option<RecordStore>,

    /// Dropdown value.
    pub selector: SiteSelector,

    /// Range slider value.
    pub range: PayloadRange,

    /// Slider limits for the current table.
    pub slider: SliderBounds,
    base_slider: SliderBounds,

    /// Pie chart data and the selector it was computed for.
    pub breakdown: CategoryBreakdown,
    pie_key: Option<SiteSelector>,

    /// Scatter chart data and the inputs it was computed for.
    pub points: Vec<ScatterPoint>,
    scatter_key: Option<(SiteSelector, PayloadRange)>,

    /// Colours for pie slices in the all-sites view.
    pub site_colors: Option<ColorMap>,

    /// Colours for scatter series.
    pub booster_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SliderBounds::default())
    }
}

/// What "Export view" writes.
#[derive(Debug, Serialize)]
pub struct ViewSnapshot<'a> {
    pub selector: &'a SiteSelector,
    pub range: PayloadRange,
    pub breakdown: &'a CategoryBreakdown,
    pub points: &'a [ScatterPoint],
}

impl AppState {
    pub fn new(slider: SliderBounds) -> Self {
        Self {
            store: None,
            selector: SiteSelector::AllSites,
            range: PayloadRange::new(slider.min, slider.max),
            slider,
            base_slider: slider,
            breakdown: Vec::new(),
            pie_key: None,
            points: Vec::new(),
            scatter_key: None,
            site_colors: None,
            booster_colors: None,
            status_message: None,
        }
    }

    /// Ingest a newly loaded table and reset the controls to its bounds.
    pub fn set_store(&mut self, store: RecordStore) {
        self.slider = self.base_slider.covering(&store);
        self.range = PayloadRange::new(store.min_payload_kg(), store.max_payload_kg());
        self.selector = SiteSelector::AllSites;

        self.site_colors = Some(ColorMap::new(store.distinct_sites()));
        self.booster_colors = Some(ColorMap::new(store.booster_categories()));

        self.pie_key = None;
        self.scatter_key = None;
        self.store = Some(store);
        self.status_message = None;
        self.refresh();
    }

    /// Recompute whichever chart's inputs changed since the last call.
    pub fn refresh(&mut self) {
        let selector = self.selector.clone();
        let range = self.range;
        self.on_site_selection_changed(&selector);
        self.on_site_or_range_changed(&selector, range);
    }

    /// Pie chart entry point. A rejected query keeps the previous slices.
    pub fn on_site_selection_changed(&mut self, selector: &SiteSelector) {
        let Some(store) = &self.store else {
            return;
        };
        if self.pie_key.as_ref() == Some(selector) {
            return;
        }
        log::debug!("Recomputing success breakdown for {selector}");
        match summarize(store, selector) {
            Ok(breakdown) => {
                self.breakdown = breakdown;
                self.pie_key = Some(selector.clone());
            }
            Err(e) => log::warn!("Pie chart query rejected: {e}"),
        }
    }

    /// Scatter chart entry point. A rejected query keeps the previous points.
    pub fn on_site_or_range_changed(&mut self, selector: &SiteSelector, range: PayloadRange) {
        let Some(store) = &self.store else {
            return;
        };
        if self
            .scatter_key
            .as_ref()
            .is_some_and(|(s, r)| s == selector && *r == range)
        {
            return;
        }
        log::debug!(
            "Recomputing payload scatter for {selector} in [{}, {}]",
            range.low,
            range.high
        );
        match filter(store, selector, range) {
            Ok(points) => {
                self.points = points;
                self.scatter_key = Some((selector.clone(), range));
            }
            Err(e) => log::warn!("Scatter chart query rejected: {e}"),
        }
    }

    /// Move the low endpoint, dragging `high` along so `low <= high` holds.
    pub fn set_range_low(&mut self, low: f64) {
        self.range.low = low;
        if self.range.high < low {
            self.range.high = low;
        }
    }

    /// Move the high endpoint, dragging `low` along so `low <= high` holds.
    pub fn set_range_high(&mut self, high: f64) {
        self.range.high = high;
        if self.range.low > high {
            self.range.low = high;
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot<'_> {
        ViewSnapshot {
            selector: &self.selector,
            range: self.range,
            breakdown: &self.breakdown,
            points: &self.points,
        }
    }

    /// Write the current view as pretty JSON.
    pub fn write_snapshot(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &self.snapshot())
            .context("writing view snapshot")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_store;

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.set_store(sample_store());
        state
    }

    #[test]
    fn test_set_store_resets_controls() {
        let state = loaded();
        assert_eq!(state.selector, SiteSelector::AllSites);
        assert_eq!(state.range, PayloadRange::new(500.0, 9600.0));
        assert_eq!(state.slider.max, 10_000.0);
        assert_eq!(state.breakdown.len(), 1);
        assert_eq!(state.points.len(), 6);
    }

    #[test]
    fn test_selecting_site_updates_both_charts() {
        let mut state = loaded();
        state.selector = SiteSelector::Site("A".into());
        state.range = PayloadRange::new(900.0, 2000.0);
        state.refresh();

        let labels: Vec<&str> = state.breakdown.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Failure", "Success"]);
        let payloads: Vec<f64> = state.points.iter().map(|p| p.payload_mass_kg).collect();
        assert_eq!(payloads, vec![1500.0, 1000.0]);
    }

    #[test]
    fn test_rejected_query_keeps_previous_view() {
        let mut state = loaded();
        let before_pie = state.breakdown.clone();
        let before_points = state.points.clone();

        state.selector = SiteSelector::Site("Nowhere".into());
        state.refresh();
        assert_eq!(state.breakdown, before_pie);
        assert_eq!(state.points, before_points);

        state.selector = SiteSelector::Site("A".into());
        state.range = PayloadRange::new(3000.0, 1000.0);
        state.refresh();
        assert_eq!(state.points, before_points);
        assert_ne!(state.breakdown, before_pie);
    }

    #[test]
    fn test_memoized_until_inputs_change() {
        let mut state = loaded();
        state.points.clear();
        state.refresh();
        assert!(state.points.is_empty(), "same inputs must not recompute");

        state.range = PayloadRange::new(0.0, 1.0);
        state.refresh();
        assert_eq!(state.points.len(), 6, "all-sites view ignores the range");
    }

    #[test]
    fn test_range_endpoints_stay_ordered() {
        let mut state = loaded();
        state.set_range_low(9_800.0);
        assert_eq!(state.range, PayloadRange::new(9_800.0, 9_800.0));
        state.set_range_high(100.0);
        assert_eq!(state.range, PayloadRange::new(100.0, 100.0));
        assert!(state.range.validate().is_ok());
    }

    #[test]
    fn test_queries_without_store_are_noops() {
        let mut state = AppState::default();
        state.refresh();
        assert!(state.breakdown.is_empty());
        assert!(state.points.is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = loaded();
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["selector"]["kind"], "AllSites");
        assert_eq!(json["breakdown"][0]["label"], "A");
        assert_eq!(json["points"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_write_snapshot_to_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("view.json");
        let mut state = loaded();
        state.selector = SiteSelector::Site("B".into());
        state.refresh();
        state.write_snapshot(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["selector"]["name"], "B");
        assert_eq!(json["breakdown"][0]["count"], 2);
        assert_eq!(json["breakdown"][1]["count"], 0);
    }
}

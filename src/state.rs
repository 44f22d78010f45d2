use std::collections::BTreeSet;
use std::time::Duration;

use crate::color::ColorMap;
use crate::config::DataSource;
use crate::data::filter::{FilterState, filtered_indices, init_filter_state};
use crate::data::loader;
use crate::data::model::{CategoryValue, FilterColumn, FilteredView, SalaryDataset};
use crate::data::stats::DashboardSummary;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table.
    pub dataset: SalaryDataset,

    /// Where `dataset` came from; used by "Reload".
    pub source: DataSource,

    /// HTTP timeout for reloads from a URL.
    pub http_timeout: Duration,

    /// Per-column filter selections.
    pub filters: FilterState,

    /// Indices of records passing the current filters.
    pub visible_indices: Vec<usize>,

    /// Metrics and chart data for `visible_indices`.
    pub summary: DashboardSummary,

    /// Remote-work category → colour.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: SalaryDataset, source: DataSource, http_timeout: Duration) -> Self {
        let mut state = Self {
            dataset: SalaryDataset::default(),
            source,
            http_timeout,
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            summary: DashboardSummary::default(),
            color_map: ColorMap::default(),
            status_message: None,
        };
        state.set_dataset(dataset);
        state
    }

    /// Ingest a newly loaded dataset: all values selected, full recompute.
    pub fn set_dataset(&mut self, dataset: SalaryDataset) {
        self.filters = init_filter_state(&dataset);
        self.color_map = ColorMap::new(&dataset.remote_categories);
        self.dataset = dataset;
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` and everything derived from them.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.dataset, &self.filters);
        self.summary = DashboardSummary::compute(&self.view());
        log::debug!(
            "{} of {} records visible",
            self.visible_indices.len(),
            self.dataset.len()
        );
    }

    /// The records currently passing the filters.
    pub fn view(&self) -> FilteredView<'_> {
        self.dataset.view(&self.visible_indices)
    }

    /// Toggle a single value in a column's filter.
    pub fn toggle_filter_value(&mut self, column: FilterColumn, value: &CategoryValue) {
        let selected = self.filters.entry(column).or_default();
        if !selected.remove(value) {
            selected.insert(value.clone());
        }
        self.refilter();
    }

    /// Select all values in a column.
    pub fn select_all(&mut self, column: FilterColumn) {
        let all_vals = self
            .dataset
            .distinct_values
            .get(&column)
            .cloned()
            .unwrap_or_default();
        self.filters.insert(column, all_vals);
        self.refilter();
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, column: FilterColumn) {
        self.filters.insert(column, BTreeSet::new());
        self.refilter();
    }

    /// Load from `source`; on failure keep the current dataset and show the error.
    pub fn load(&mut self, source: DataSource) {
        match loader::load_source(&source, self.http_timeout) {
            Ok(dataset) => {
                self.source = source;
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {source}: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Re-read the current source.
    pub fn reload(&mut self) {
        self.load(self.source.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;
    use std::path::PathBuf;

    fn state() -> AppState {
        let ds = SalaryDataset::from_records(vec![
            record(2023, "senior", "integral", "grande", "remoto", "Data Scientist", 100_000.0),
            record(2023, "junior", "integral", "grande", "presencial", "Analyst", 50_000.0),
            record(2024, "pleno", "contrato", "media", "remoto", "Analyst", 60_000.0),
        ]);
        AppState::new(ds, DataSource::default(), Duration::from_secs(1))
    }

    #[test]
    fn new_state_shows_everything() {
        let st = state();
        assert_eq!(st.visible_indices, vec![0, 1, 2]);
        assert_eq!(st.summary.metrics.record_count, 3);
        assert_eq!(st.summary.metrics.max_salary, 100_000.0);
        assert_eq!(st.summary.metrics.most_frequent_job_title, "Analyst");
    }

    #[test]
    fn toggling_a_value_refilters_and_recomputes() {
        let mut st = state();
        st.toggle_filter_value(FilterColumn::Year, &CategoryValue::Integer(2024));
        assert_eq!(st.visible_indices, vec![0, 1]);
        assert_eq!(st.summary.metrics.mean_salary, 75_000.0);

        st.toggle_filter_value(FilterColumn::Year, &CategoryValue::Integer(2024));
        assert_eq!(st.visible_indices, vec![0, 1, 2]);
    }

    #[test]
    fn select_none_empties_everything_downstream() {
        let mut st = state();
        st.select_none(FilterColumn::CompanySize);
        assert!(st.visible_indices.is_empty());
        assert_eq!(st.summary, DashboardSummary::default());

        st.select_all(FilterColumn::CompanySize);
        assert_eq!(st.visible_indices.len(), 3);
    }

    #[test]
    fn failed_load_keeps_current_dataset() {
        let mut st = state();
        st.load(DataSource::File(PathBuf::from("does-not-exist.csv")));
        assert_eq!(st.dataset.len(), 3);
        assert_eq!(st.source, DataSource::default());
        assert!(st.status_message.as_deref().is_some_and(|m| m.starts_with("Error")));
    }

    #[test]
    fn load_from_file_replaces_dataset_and_resets_filters() {
        let mut st = state();
        st.select_none(FilterColumn::Seniority);

        let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        std::fs::write(
            file.path(),
            "ano,senioridade,contrato,tamanho_empresa,remoto,cargo,usd\n\
             2025,senior,integral,media,hibrido,ML Engineer,200000\n",
        )
        .unwrap();
        let source = DataSource::File(file.path().to_path_buf());
        st.load(source.clone());

        assert_eq!(st.source, source);
        assert_eq!(st.visible_indices, vec![0]);
        assert_eq!(st.summary.metrics.most_frequent_job_title, "ML Engineer");
        assert!(st.status_message.is_none());
    }
}

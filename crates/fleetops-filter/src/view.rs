//! The stateful filtered view behind a list screen.
//!
//! A [`FilterView`] owns the records, the configuration and the
//! [`FilterState`], and keeps the filtered result current. Each setter
//! recomputes at most once, and only when its input actually changed.

use serde_json::Value;

use crate::config::FilterConfig;
use crate::pipeline::FilterPipeline;
use crate::record::{collection_of, Record};
use crate::stage::StageKind;
use crate::state::{DateRange, FilterState};

/// Records plus filter state plus the memoized filtered result.
///
/// # Example
///
/// ```
/// use fleetops_filter::{FilterConfig, FilterView};
/// use serde_json::{json, Value};
///
/// let config: FilterConfig<Value> = FilterConfig::new().search_field("customer_name");
/// let mut view = FilterView::new(
///     vec![
///         json!({ "id": 1, "customer_name": "John Doe", "status": "pending" }),
///         json!({ "id": 2, "customerName": "Jane Smith", "status": "in_transit" }),
///     ],
///     config,
/// );
///
/// view.set_status_filter("in_transit");
/// assert_eq!(view.filtered_data()[0]["id"], 2);
///
/// view.clear_filters();
/// assert_eq!(view.filtered_len(), 2);
/// ```
pub struct FilterView<R> {
    records: Vec<R>,
    config: FilterConfig<R>,
    state: FilterState,
    matched: Vec<usize>,
    recomputes: u64,
}

impl<R: Record> FilterView<R> {
    /// Creates a view over `records` with cleared filters.
    pub fn new(records: impl IntoIterator<Item = R>, config: FilterConfig<R>) -> Self {
        let mut view = FilterView {
            records: records.into_iter().collect(),
            config,
            state: FilterState::default(),
            matched: Vec::new(),
            recomputes: 0,
        };
        view.recompute("init");
        view
    }

    // ========================================================================
    // Setters
    // ========================================================================

    /// Sets the free-text search.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if self.state.search_query != query {
            self.state.search_query = query;
            self.recompute("search_query");
        }
    }

    /// Sets the status filter. An empty string clears it.
    pub fn set_status_filter(&mut self, value: impl Into<String>) {
        let value = value.into();
        if self.state.status_filter != value {
            self.state.status_filter = value;
            self.recompute("status_filter");
        }
    }

    /// Sets the type filter. An empty string clears it.
    pub fn set_type_filter(&mut self, value: impl Into<String>) {
        let value = value.into();
        if self.state.type_filter != value {
            self.state.type_filter = value;
            self.recompute("type_filter");
        }
    }

    /// Sets the category filter. An empty string clears it.
    pub fn set_category_filter(&mut self, value: impl Into<String>) {
        let value = value.into();
        if self.state.category_filter != value {
            self.state.category_filter = value;
            self.recompute("category_filter");
        }
    }

    /// Sets the stock-level filter. An empty string clears it.
    ///
    /// Has no effect on the result unless the configuration derives stock
    /// levels.
    pub fn set_stock_level_filter(&mut self, value: impl Into<String>) {
        let value = value.into();
        if self.state.stock_level_filter != value {
            self.state.stock_level_filter = value;
            self.recompute("stock_level_filter");
        }
    }

    /// Sets the date window.
    pub fn set_date_range(&mut self, range: DateRange) {
        if self.state.date_range != range {
            self.state.date_range = range;
            self.recompute("date_range");
        }
    }

    /// Replaces the whole filter state in one transition.
    pub fn set_state(&mut self, state: FilterState) {
        if self.state != state {
            self.state = state;
            self.recompute("state");
        }
    }

    /// Resets every filter to its cleared default in one transition.
    pub fn clear_filters(&mut self) {
        self.set_state(FilterState::default());
    }

    /// Replaces the record collection.
    pub fn set_records(&mut self, records: impl IntoIterator<Item = R>) {
        self.records = records.into_iter().collect();
        self.recompute("records");
    }

    /// Replaces the configuration.
    ///
    /// A configuration equal to the current one (see
    /// [`FilterConfig::same_as`]) is ignored, so callers may rebuild their
    /// configuration on every render without causing recomputation.
    pub fn set_config(&mut self, config: FilterConfig<R>) {
        if self.config.same_as(&config) {
            tracing::trace!("configuration unchanged, keeping filtered view");
            return;
        }
        self.config = config;
        self.recompute("config");
    }

    fn recompute(&mut self, trigger: &'static str) {
        let pipeline = FilterPipeline::new(&self.config, &self.state);
        self.matched = pipeline.filter_indices(&self.records);
        self.recomputes += 1;
        tracing::debug!(
            trigger,
            records = self.records.len(),
            matched = self.matched.len(),
            stages = ?pipeline.kinds(),
            "recomputed filtered view"
        );
    }
}

impl<R> FilterView<R> {
    // ========================================================================
    // Accessors
    // ========================================================================

    /// Returns the matching records, in input order.
    pub fn filtered_data(&self) -> Vec<&R> {
        self.filtered_iter().collect()
    }

    /// Iterates over the matching records, in input order.
    pub fn filtered_iter(&self) -> impl Iterator<Item = &R> + '_ {
        self.matched.iter().filter_map(|&index| self.records.get(index))
    }

    /// Clones the matching records.
    pub fn filtered_cloned(&self) -> Vec<R>
    where
        R: Clone,
    {
        self.filtered_iter().cloned().collect()
    }

    /// Returns positions of the matching records within [`records`](Self::records).
    pub fn filtered_indices(&self) -> &[usize] {
        &self.matched
    }

    /// Number of matching records.
    pub fn filtered_len(&self) -> usize {
        self.matched.len()
    }

    /// Returns the full, unfiltered collection.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Returns the configuration.
    pub fn config(&self) -> &FilterConfig<R> {
        &self.config
    }

    /// Returns the current filter state.
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Returns the current search text, untrimmed.
    pub fn search_query(&self) -> &str {
        &self.state.search_query
    }

    /// Returns the current status filter.
    pub fn status_filter(&self) -> &str {
        &self.state.status_filter
    }

    /// Returns the current type filter.
    pub fn type_filter(&self) -> &str {
        &self.state.type_filter
    }

    /// Returns the current category filter.
    pub fn category_filter(&self) -> &str {
        &self.state.category_filter
    }

    /// Returns the current stock-level filter.
    pub fn stock_level_filter(&self) -> &str {
        &self.state.stock_level_filter
    }

    /// Returns the current date window.
    pub fn date_range(&self) -> &DateRange {
        &self.state.date_range
    }

    /// Number of filter passes run since creation.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Returns the stages that produced the current result.
    pub fn active_stages(&self) -> Vec<StageKind> {
        FilterPipeline::new(&self.config, &self.state).kinds()
    }
}

impl FilterView<Value> {
    /// Creates a view over a JSON response body.
    ///
    /// Non-array bodies (including a missing one) produce an empty view.
    pub fn from_json(body: Option<&Value>, config: FilterConfig<Value>) -> Self {
        FilterView::new(collection_of(body).iter().cloned(), config)
    }
}

impl<R> std::fmt::Debug for FilterView<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterView")
            .field("records", &self.records.len())
            .field("matched", &self.matched.len())
            .field("config", &self.config)
            .field("state", &self.state)
            .field("recomputes", &self.recomputes)
            .finish()
    }
}

//! Predicate pipeline builder and executor.
//!
//! [`FilterPipeline`] turns a configuration and a query state into the list
//! of active [`Stage`]s and runs them over a collection.
//!
//! The match logic is a plain conjunction, evaluated in this fixed order and
//! short-circuiting on the first failing stage:
//!
//! ```text
//! match = search ∧ status ∧ type ∧ category ∧ stock_level ∧ date_range
//! ```
//!
//! Inactive dimensions are not part of the pipeline at all, so a pipeline
//! built from the cleared state is empty and matches everything.

use crate::config::FilterConfig;
use crate::record::Record;
use crate::stage::{Stage, StageKind};
use crate::state::FilterState;

/// The active stages for one (configuration, state) pair.
///
/// # Example
///
/// ```
/// use fleetops_filter::{FilterConfig, FilterPipeline, FilterState};
/// use serde_json::{json, Value};
///
/// let deliveries = vec![
///     json!({ "id": 1, "customer_name": "John Doe", "status": "pending" }),
///     json!({ "id": 2, "customerName": "Jane Smith", "status": "in_transit" }),
///     json!({ "id": 3, "customer_name": "Bob Johnson", "status": "delivered" }),
/// ];
///
/// let config: FilterConfig<Value> = FilterConfig::new().search_field("customer_name");
/// let state = FilterState {
///     search_query: "john".into(),
///     ..FilterState::default()
/// };
///
/// let pipeline = FilterPipeline::new(&config, &state);
/// let ids: Vec<_> = pipeline.filter(&deliveries).iter().map(|d| d["id"].clone()).collect();
/// assert_eq!(ids, [json!(1), json!(3)]);
/// ```
pub struct FilterPipeline<R> {
    stages: Vec<Stage<R>>,
}

impl<R> FilterPipeline<R> {
    /// Builds the pipeline for `state` under `config`.
    pub fn new(config: &FilterConfig<R>, state: &FilterState) -> Self {
        let mut stages = Vec::new();

        let query = state.trimmed_query();
        if !query.is_empty() && !config.search_fields().is_empty() {
            stages.push(Stage::search(config.search_fields().to_vec(), query));
        }

        for (kind, value) in [
            (StageKind::Status, &state.status_filter),
            (StageKind::Type, &state.type_filter),
            (StageKind::Category, &state.category_filter),
        ] {
            if !value.is_empty() {
                stages.extend(Stage::exact(kind, value.as_str()));
            }
        }

        if let Some(derive) = config.stock_status_fn() {
            if !state.stock_level_filter.is_empty() {
                stages.push(Stage::StockLevel {
                    derive: derive.clone(),
                    expected: state.stock_level_filter.clone(),
                });
            }
        }

        if let Some(field) = config.date_field() {
            if state.date_range.is_set() {
                stages.push(Stage::date_range(
                    field,
                    &state.date_range.start,
                    &state.date_range.end,
                ));
            }
        }

        FilterPipeline { stages }
    }

    /// Builds a pipeline from explicit stages, evaluated in the given order.
    pub fn from_stages(stages: Vec<Stage<R>>) -> Self {
        FilterPipeline { stages }
    }

    /// Returns the active stages.
    pub fn stages(&self) -> &[Stage<R>] {
        &self.stages
    }

    /// Returns the kinds of the active stages, in evaluation order.
    pub fn kinds(&self) -> Vec<StageKind> {
        self.stages.iter().map(Stage::kind).collect()
    }

    /// Returns `true` if no stage is active (everything matches).
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl<R: Record> FilterPipeline<R> {
    /// Tests if a single record passes every active stage.
    pub fn matches(&self, record: &R) -> bool {
        self.stages.iter().all(|stage| stage.matches(record))
    }

    /// Returns references to the matching records, in input order.
    pub fn filter<'a>(&self, records: &'a [R]) -> Vec<&'a R> {
        records.iter().filter(|record| self.matches(record)).collect()
    }

    /// Returns the positions of the matching records, ascending.
    pub fn filter_indices(&self, records: &[R]) -> Vec<usize> {
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| self.matches(record))
            .map(|(index, _)| index)
            .collect()
    }

    /// Filters and clones matching records.
    pub fn filter_cloned(&self, records: &[R]) -> Vec<R>
    where
        R: Clone,
    {
        self.filter(records).into_iter().cloned().collect()
    }

    /// Counts the matching records.
    pub fn count(&self, records: &[R]) -> usize {
        records.iter().filter(|record| self.matches(record)).count()
    }
}

impl<R> Clone for FilterPipeline<R> {
    fn clone(&self) -> Self {
        FilterPipeline {
            stages: self.stages.clone(),
        }
    }
}

impl<R> std::fmt::Debug for FilterPipeline<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterPipeline")
            .field("stages", &self.stages)
            .finish()
    }
}

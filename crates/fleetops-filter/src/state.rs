//! Query state: the user-controlled filter values of one list screen.

use serde::{Deserialize, Serialize};

/// An optional date window. Empty strings mean "unbounded".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRange {
    /// Inclusive lower bound, as a date-parseable string.
    pub start: String,
    /// Inclusive upper bound, as a date-parseable string.
    pub end: String,
}

impl DateRange {
    /// Creates a range from its two bounds.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        DateRange {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Creates a range bounded only from below.
    pub fn since(start: impl Into<String>) -> Self {
        DateRange::new(start, "")
    }

    /// Creates a range bounded only from above.
    pub fn until(end: impl Into<String>) -> Self {
        DateRange::new("", end)
    }

    /// Returns `true` if at least one bound is set.
    pub fn is_set(&self) -> bool {
        !self.start.is_empty() || !self.end.is_empty()
    }
}

/// Every filter value a list screen exposes.
///
/// Empty strings mean "not filtering on this dimension". The default value
/// is the cleared state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterState {
    /// Free-text search across the configured search fields.
    pub search_query: String,
    /// Exact match on the record's `status`.
    pub status_filter: String,
    /// Exact match on the record's `type`.
    pub type_filter: String,
    /// Exact match on the record's `category`.
    pub category_filter: String,
    /// Exact match on the derived stock label.
    pub stock_level_filter: String,
    /// Window on the configured date field.
    pub date_range: DateRange,
}

impl FilterState {
    /// Creates the cleared state.
    pub fn new() -> Self {
        FilterState::default()
    }

    /// Returns the search text as the search stage uses it: trimmed.
    pub fn trimmed_query(&self) -> &str {
        self.search_query.trim()
    }

    /// Number of filter dimensions currently holding a value.
    ///
    /// Whitespace-only search text does not count; the date range counts
    /// once even when both bounds are set.
    pub fn active_count(&self) -> usize {
        [
            !self.trimmed_query().is_empty(),
            !self.status_filter.is_empty(),
            !self.type_filter.is_empty(),
            !self.category_filter.is_empty(),
            !self.stock_level_filter.is_empty(),
            self.date_range.is_set(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Returns `true` if any dimension holds a value.
    pub fn has_active_filters(&self) -> bool {
        self.active_count() > 0
    }

    /// Returns `true` if this is exactly the cleared state.
    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }
}

//! Predicate stages.
//!
//! A [`Stage`] is one active filter dimension, prepared from the
//! configuration and query state so that evaluating it per record does no
//! repeated work (the search needle is lower-cased once, date bounds are
//! parsed once).

use std::fmt;

use crate::config::StockStatusFn;
use crate::record::Record;
use crate::resolve::resolve;
use crate::value::{display_string, Timestamp};

/// Which filter dimension a stage implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    /// Free-text search across the search fields.
    Search,
    /// Exact match on `status`.
    Status,
    /// Exact match on `type`.
    Type,
    /// Exact match on `category`.
    Category,
    /// Exact match on the derived stock label.
    StockLevel,
    /// Date window on the date field.
    DateRange,
}

impl StageKind {
    /// Returns the record field an exact-match stage reads, if any.
    pub fn field(self) -> Option<&'static str> {
        match self {
            StageKind::Status => Some("status"),
            StageKind::Type => Some("type"),
            StageKind::Category => Some("category"),
            _ => None,
        }
    }

    /// Returns the display name of this stage.
    pub fn as_str(self) -> &'static str {
        match self {
            StageKind::Search => "search",
            StageKind::Status => "status",
            StageKind::Type => "type",
            StageKind::Category => "category",
            StageKind::StockLevel => "stock_level",
            StageKind::DateRange => "date_range",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One active predicate.
pub enum Stage<R> {
    /// Passes if any search field contains the needle, case-insensitively.
    Search {
        /// Field references to search, in order.
        fields: Vec<String>,
        /// Trimmed, lower-cased search text.
        needle: String,
    },
    /// Passes if the field holds a string equal to `expected`.
    Exact {
        /// [`StageKind::Status`], [`StageKind::Type`] or [`StageKind::Category`].
        kind: StageKind,
        /// The filter value.
        expected: String,
    },
    /// Passes if the derived label equals `expected`.
    StockLevel {
        /// Label derivation supplied by the configuration.
        derive: StockStatusFn<R>,
        /// The filter value.
        expected: String,
    },
    /// Passes unless the record date falls outside the bounds.
    DateRange {
        /// Field reference holding the record date.
        field: String,
        /// Parsed lower bound; `None` when unset or unparseable.
        start: Option<Timestamp>,
        /// Parsed upper bound; `None` when unset or unparseable.
        end: Option<Timestamp>,
    },
}

impl<R> Stage<R> {
    /// Creates a search stage. `query` is trimmed and lower-cased here.
    pub fn search(fields: Vec<String>, query: &str) -> Self {
        Stage::Search {
            fields,
            needle: query.trim().to_lowercase(),
        }
    }

    /// Creates an exact-match stage for `kind`'s field.
    ///
    /// Returns `None` for kinds without a record field (search, stock level,
    /// date range).
    pub fn exact(kind: StageKind, expected: impl Into<String>) -> Option<Self> {
        kind.field()?;
        Some(Stage::Exact {
            kind,
            expected: expected.into(),
        })
    }

    /// Creates a date-range stage from unparsed bounds.
    ///
    /// Empty or unparseable bounds constrain nothing.
    pub fn date_range(field: impl Into<String>, start: &str, end: &str) -> Self {
        Stage::DateRange {
            field: field.into(),
            start: Timestamp::parse(start),
            end: Timestamp::parse(end),
        }
    }

    /// Returns which dimension this stage implements.
    pub fn kind(&self) -> StageKind {
        match self {
            Stage::Search { .. } => StageKind::Search,
            Stage::Exact { kind, .. } => *kind,
            Stage::StockLevel { .. } => StageKind::StockLevel,
            Stage::DateRange { .. } => StageKind::DateRange,
        }
    }
}

impl<R: Record> Stage<R> {
    /// Evaluates this stage against one record.
    pub fn matches(&self, record: &R) -> bool {
        match self {
            Stage::Search { fields, needle } => fields.iter().any(|field| {
                // A present null holds no text to search.
                resolve(record, field)
                    .filter(|value| !value.is_null())
                    .is_some_and(|value| display_string(value).to_lowercase().contains(needle.as_str()))
            }),

            Stage::Exact { kind, expected } => kind
                .field()
                .and_then(|field| resolve(record, field))
                .and_then(|value| value.as_str())
                .is_some_and(|actual| actual == expected.as_str()),

            Stage::StockLevel { derive, expected } => derive(record) == *expected,

            Stage::DateRange { field, start, end } => {
                let Some(date) = resolve(record, field).and_then(Timestamp::from_value) else {
                    // Missing or malformed dates are kept.
                    tracing::trace!(field = %field, "record date unreadable, keeping record");
                    return true;
                };
                start.map_or(true, |start| date >= start) && end.map_or(true, |end| date <= end)
            }
        }
    }
}

impl<R> Clone for Stage<R> {
    fn clone(&self) -> Self {
        match self {
            Stage::Search { fields, needle } => Stage::Search {
                fields: fields.clone(),
                needle: needle.clone(),
            },
            Stage::Exact { kind, expected } => Stage::Exact {
                kind: *kind,
                expected: expected.clone(),
            },
            Stage::StockLevel { derive, expected } => Stage::StockLevel {
                derive: derive.clone(),
                expected: expected.clone(),
            },
            Stage::DateRange { field, start, end } => Stage::DateRange {
                field: field.clone(),
                start: *start,
                end: *end,
            },
        }
    }
}

impl<R> fmt::Debug for Stage<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Search { fields, needle } => f
                .debug_struct("Search")
                .field("fields", fields)
                .field("needle", needle)
                .finish(),
            Stage::Exact { kind, expected } => f
                .debug_struct("Exact")
                .field("kind", kind)
                .field("expected", expected)
                .finish(),
            Stage::StockLevel { expected, .. } => f
                .debug_struct("StockLevel")
                .field("expected", expected)
                .finish_non_exhaustive(),
            Stage::DateRange { field, start, end } => f
                .debug_struct("DateRange")
                .field("field", field)
                .field("start", start)
                .field("end", end)
                .finish(),
        }
    }
}

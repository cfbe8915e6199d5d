//! Convention-agnostic field resolution.
//!
//! Configuration authors and API payloads do not always agree on naming:
//! a screen may be configured with `customer_name` while some records
//! arrive as `customerName`. [`resolve`] tries an ordered list of
//! [`Resolution`] strategies and returns the first value found.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::record::Record;

static SNAKE_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"_([a-z])").expect("valid regex"));
static UPPER_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").expect("valid regex"));

/// A single field-name resolution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Look the reference up as written.
    Direct,
    /// Convert `snake_case` to `camelCase` and look that up.
    SnakeToCamel,
    /// Convert `camelCase` to `snake_case` and look that up.
    CamelToSnake,
}

impl Resolution {
    /// Strategies in the order they are attempted.
    pub const ORDER: [Resolution; 3] = [
        Resolution::Direct,
        Resolution::SnakeToCamel,
        Resolution::CamelToSnake,
    ];

    /// Returns the key this strategy looks up for `reference`.
    pub fn key(self, reference: &str) -> Cow<'_, str> {
        match self {
            Resolution::Direct => Cow::Borrowed(reference),
            Resolution::SnakeToCamel => snake_to_camel(reference),
            Resolution::CamelToSnake => camel_to_snake(reference),
        }
    }

    /// Returns the display name of this strategy.
    pub fn as_str(self) -> &'static str {
        match self {
            Resolution::Direct => "direct",
            Resolution::SnakeToCamel => "snake_to_camel",
            Resolution::CamelToSnake => "camel_to_snake",
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `customer_name` -> `customerName`. Only `_` followed by a lower-case
/// ASCII letter is rewritten.
pub fn snake_to_camel(reference: &str) -> Cow<'_, str> {
    SNAKE_SEGMENT.replace_all(reference, |caps: &Captures<'_>| caps[1].to_ascii_uppercase())
}

/// `customerName` -> `customer_name`. A leading capital also gains an
/// underscore (`Name` -> `_name`).
pub fn camel_to_snake(reference: &str) -> Cow<'_, str> {
    UPPER_LETTER.replace_all(reference, |caps: &Captures<'_>| {
        format!("_{}", caps[0].to_ascii_lowercase())
    })
}

/// Resolves `reference` on `record`, returning the value or `None` when no
/// strategy finds it.
pub fn resolve<'r, R: Record + ?Sized>(record: &'r R, reference: &str) -> Option<&'r Value> {
    resolve_with(record, reference).map(|(value, _)| value)
}

/// Like [`resolve`], but also reports which strategy succeeded.
pub fn resolve_with<'r, R: Record + ?Sized>(
    record: &'r R,
    reference: &str,
) -> Option<(&'r Value, Resolution)> {
    for strategy in Resolution::ORDER {
        let key = strategy.key(reference);
        // Converted keys identical to the reference were already tried directly.
        if strategy != Resolution::Direct && key == reference {
            continue;
        }
        if let Some(value) = record.field(&key) {
            if strategy != Resolution::Direct {
                tracing::trace!(reference, resolved = %key, %strategy, "field resolved by fallback");
            }
            return Some((value, strategy));
        }
    }
    None
}

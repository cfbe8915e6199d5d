//! Stock-level derivation for inventory records.
//!
//! Inventory screens filter on a stock level that is not stored on the
//! record but derived from its quantity and reorder threshold.
//! [`StockThresholds`] produces that derivation as a stock-status function
//! for [`FilterConfig`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{FilterConfig, StockStatusFn};
use crate::record::Record;
use crate::resolve::resolve;

/// Derived stock level of an inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    /// Nothing on hand.
    OutOfStock,
    /// At or below the reorder threshold.
    LowStock,
    /// Above the reorder threshold.
    InStock,
}

impl StockLevel {
    /// All levels, from emptiest to fullest.
    pub const ALL: [StockLevel; 3] = [
        StockLevel::OutOfStock,
        StockLevel::LowStock,
        StockLevel::InStock,
    ];

    /// Classifies a quantity against a minimum.
    pub fn classify(quantity: f64, minimum: f64) -> Self {
        if quantity <= 0.0 {
            StockLevel::OutOfStock
        } else if quantity <= minimum {
            StockLevel::LowStock
        } else {
            StockLevel::InStock
        }
    }

    /// Returns the label used as the stock-level filter value.
    pub fn as_str(self) -> &'static str {
        match self {
            StockLevel::OutOfStock => "out_of_stock",
            StockLevel::LowStock => "low_stock",
            StockLevel::InStock => "in_stock",
        }
    }

    /// Parses a label produced by [`as_str`](Self::as_str).
    pub fn from_label(label: &str) -> Option<Self> {
        StockLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == label)
    }
}

impl fmt::Display for StockLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which record fields hold the on-hand quantity and the reorder threshold.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StockThresholds {
    /// Field reference of the on-hand quantity.
    #[serde(alias = "quantity_field")]
    pub quantity_field: String,
    /// Field reference of the reorder threshold.
    #[serde(alias = "minimum_field")]
    pub minimum_field: String,
}

impl Default for StockThresholds {
    fn default() -> Self {
        StockThresholds::new("quantity", "reorder_level")
    }
}

impl StockThresholds {
    /// Creates thresholds reading the given fields.
    pub fn new(quantity_field: impl Into<String>, minimum_field: impl Into<String>) -> Self {
        StockThresholds {
            quantity_field: quantity_field.into(),
            minimum_field: minimum_field.into(),
        }
    }

    /// Derives the stock level of one record.
    ///
    /// A missing or non-numeric quantity counts as out of stock; a missing
    /// threshold counts as zero.
    pub fn level<R: Record + ?Sized>(&self, record: &R) -> StockLevel {
        let Some(quantity) = resolve(record, &self.quantity_field).and_then(numeric) else {
            return StockLevel::OutOfStock;
        };
        let minimum = resolve(record, &self.minimum_field)
            .and_then(numeric)
            .unwrap_or(0.0);
        StockLevel::classify(quantity, minimum)
    }

    /// Converts into a stock-status function for [`FilterConfig`].
    pub fn into_fn<R: Record + 'static>(self) -> StockStatusFn<R> {
        Arc::new(move |record: &R| self.level(record).as_str().to_string())
    }
}

impl<R: Record + 'static> FilterConfig<R> {
    /// Derives stock levels from quantity/threshold fields.
    ///
    /// ```
    /// use fleetops_filter::{FilterConfig, FilterView, StockThresholds};
    /// use serde_json::{json, Value};
    ///
    /// let config: FilterConfig<Value> =
    ///     FilterConfig::new().stock_thresholds(StockThresholds::new("qty", "min_qty"));
    /// let mut view = FilterView::new(
    ///     vec![json!({ "qty": 0 }), json!({ "qty": 3, "min_qty": 5 })],
    ///     config,
    /// );
    /// view.set_stock_level_filter("low_stock");
    /// assert_eq!(view.filtered_len(), 1);
    /// ```
    pub fn stock_thresholds(self, thresholds: StockThresholds) -> Self {
        self.stock_status_shared(thresholds.into_fn())
    }
}

/// Numbers, and strings holding finite numbers, as `f64`.
fn numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|f| f.is_finite())
}

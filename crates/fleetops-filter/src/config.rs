//! Filter configuration.
//!
//! A configuration is split in two:
//!
//! - [`FilterSettings`]: plain data (search fields, date field) that can be
//!   loaded from JSON or YAML and compared by value.
//! - [`FilterConfig`]: the settings plus the optional stock-status function,
//!   which only exists in code.
//!
//! # Example
//!
//! ```
//! use fleetops_filter::FilterConfig;
//! use serde_json::Value;
//!
//! let config: FilterConfig<Value> = FilterConfig::new()
//!     .add_search_fields(["customer_name", "tracking_number"])
//!     .with_date_field("scheduled_date");
//!
//! assert_eq!(config.search_fields().len(), 2);
//! assert_eq!(config.date_field(), Some("scheduled_date"));
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Derives a categorical stock label from a whole record.
pub type StockStatusFn<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// The serializable part of a filter configuration.
///
/// Keys are accepted in either naming convention:
///
/// ```
/// use fleetops_filter::FilterSettings;
///
/// let camel = FilterSettings::from_json(r#"{ "searchFields": ["name"], "dateField": "created_at" }"#).unwrap();
/// let snake = FilterSettings::from_yaml("search_fields: [name]\ndate_field: created_at\n").unwrap();
/// assert_eq!(camel, snake);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSettings {
    /// Field references eligible for free-text search, in order.
    #[serde(alias = "search_fields")]
    pub search_fields: Vec<String>,
    /// Field reference used for date-range filtering.
    #[serde(alias = "date_field")]
    pub date_field: Option<String>,
}

impl FilterSettings {
    /// Parses settings from a JSON document.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Parses settings from a YAML document.
    pub fn from_yaml(input: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(input)?)
    }
}

/// Declarative configuration for one list screen.
pub struct FilterConfig<R> {
    settings: FilterSettings,
    stock_status: Option<StockStatusFn<R>>,
}

impl<R> FilterConfig<R> {
    /// Creates an empty configuration: no search fields, no date field, no
    /// stock-status function.
    pub fn new() -> Self {
        FilterConfig {
            settings: FilterSettings::default(),
            stock_status: None,
        }
    }

    /// Creates a configuration from loaded settings.
    pub fn from_settings(settings: FilterSettings) -> Self {
        FilterConfig {
            settings,
            stock_status: None,
        }
    }

    /// Loads the settings part from JSON.
    pub fn from_json(input: &str) -> Result<Self> {
        FilterSettings::from_json(input).map(FilterConfig::from_settings)
    }

    /// Loads the settings part from YAML.
    pub fn from_yaml(input: &str) -> Result<Self> {
        FilterSettings::from_yaml(input).map(FilterConfig::from_settings)
    }

    /// Appends a search field.
    pub fn search_field(mut self, field: impl Into<String>) -> Self {
        self.settings.search_fields.push(field.into());
        self
    }

    /// Appends several search fields.
    pub fn add_search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings
            .search_fields
            .extend(fields.into_iter().map(Into::into));
        self
    }

    /// Sets the date field.
    pub fn with_date_field(mut self, field: impl Into<String>) -> Self {
        self.settings.date_field = Some(field.into());
        self
    }

    /// Sets the stock-status function.
    pub fn stock_status<F>(mut self, derive: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        self.stock_status = Some(Arc::new(derive));
        self
    }

    /// Sets an already shared stock-status function.
    ///
    /// Reusing the same `Arc` across configurations lets
    /// [`same_as`](Self::same_as) recognize them as equal.
    pub fn stock_status_shared(mut self, derive: StockStatusFn<R>) -> Self {
        self.stock_status = Some(derive);
        self
    }

    /// Returns the serializable settings.
    pub fn settings(&self) -> &FilterSettings {
        &self.settings
    }

    /// Returns the configured search fields.
    pub fn search_fields(&self) -> &[String] {
        &self.settings.search_fields
    }

    /// Returns the configured date field. An empty name counts as unset.
    pub fn date_field(&self) -> Option<&str> {
        self.settings
            .date_field
            .as_deref()
            .filter(|field| !field.is_empty())
    }

    /// Returns the stock-status function, if any.
    pub fn stock_status_fn(&self) -> Option<&StockStatusFn<R>> {
        self.stock_status.as_ref()
    }

    /// Returns `true` if `other` would filter identically.
    ///
    /// Settings are compared by value; stock-status functions by identity,
    /// since closures cannot be compared.
    pub fn same_as(&self, other: &FilterConfig<R>) -> bool {
        self.settings == other.settings
            && match (&self.stock_status, &other.stock_status) {
                (None, None) => true,
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                _ => false,
            }
    }
}

impl<R> Default for FilterConfig<R> {
    fn default() -> Self {
        FilterConfig::new()
    }
}

impl<R> Clone for FilterConfig<R> {
    fn clone(&self) -> Self {
        FilterConfig {
            settings: self.settings.clone(),
            stock_status: self.stock_status.clone(),
        }
    }
}

impl<R> fmt::Debug for FilterConfig<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterConfig")
            .field("search_fields", &self.settings.search_fields)
            .field("date_field", &self.settings.date_field)
            .field("stock_status", &self.stock_status.is_some())
            .finish()
    }
}

impl<R> From<FilterSettings> for FilterConfig<R> {
    fn from(settings: FilterSettings) -> Self {
        FilterConfig::from_settings(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;
    use serde_json::Value;

    #[test]
    fn builder_collects_fields() {
        let config: FilterConfig<Value> = FilterConfig::new()
            .search_field("name")
            .add_search_fields(["plate", "vin"])
            .with_date_field("last_service");

        assert_eq!(config.search_fields(), ["name", "plate", "vin"]);
        assert_eq!(config.date_field(), Some("last_service"));
        assert!(config.stock_status_fn().is_none());
    }

    #[test]
    fn empty_date_field_is_unset() {
        let config: FilterConfig<Value> = FilterConfig::new().with_date_field("");
        assert_eq!(config.date_field(), None);
    }

    #[test]
    fn structurally_equal_configs_are_same() {
        let a: FilterConfig<Value> = FilterConfig::new().search_field("name");
        let b: FilterConfig<Value> = FilterConfig::new().search_field("name");
        let c: FilterConfig<Value> = FilterConfig::new().search_field("plate");
        assert!(a.same_as(&b));
        assert!(!a.same_as(&c));
    }

    #[test]
    fn stock_functions_compare_by_identity() {
        let shared: StockStatusFn<Value> = Arc::new(|_: &Value| "in_stock".to_string());
        let a = FilterConfig::new().stock_status_shared(shared.clone());
        let b = FilterConfig::new().stock_status_shared(shared);
        let c = FilterConfig::new().stock_status(|_: &Value| "in_stock".to_string());

        assert!(a.same_as(&b));
        assert!(a.same_as(&a.clone()));
        assert!(!a.same_as(&c));
        assert!(!a.same_as(&FilterConfig::new()));
    }

    #[test]
    fn loads_json_settings() {
        let config: FilterConfig<Value> =
            FilterConfig::from_json(r#"{ "searchFields": ["customer_name"] }"#).unwrap();
        assert_eq!(config.search_fields(), ["customer_name"]);
        assert_eq!(config.date_field(), None);
    }

    #[test]
    fn loads_yaml_settings() {
        let settings = FilterSettings::from_yaml(
            "searchFields:\n  - name\n  - depot_code\ndateField: opened_at\n",
        )
        .unwrap();
        assert_eq!(settings.search_fields, ["name", "depot_code"]);
        assert_eq!(settings.date_field.as_deref(), Some("opened_at"));
    }

    #[test]
    fn invalid_settings_report_errors() {
        assert!(matches!(
            FilterSettings::from_json("{ not json"),
            Err(FilterError::InvalidJson(_))
        ));
        assert!(matches!(
            FilterSettings::from_yaml("searchFields: {"),
            Err(FilterError::InvalidYaml(_))
        ));
        assert!(matches!(
            FilterSettings::from_json(r#"{ "searchFields": "name" }"#),
            Err(FilterError::InvalidJson(_))
        ));
    }
}

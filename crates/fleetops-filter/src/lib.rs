//! fleetops-filter - declarative record filtering for fleet-operations list screens.
//!
//! Every list screen of the operations dashboard (deliveries, vehicles,
//! drivers, inventory, incidents, ...) narrows an in-memory collection with
//! the same handful of controls. This crate implements those controls once:
//!
//! - Free-text search over configured fields, case-insensitive
//! - Exact filters on `status`, `type` and `category`
//! - A derived stock-level filter, driven by a configured function
//! - A date window on a configured date field
//! - Field names resolved across `snake_case` / `camelCase`
//! - A memoized view that recomputes only when an input changes
//!
//! # Quick Start
//!
//! ```rust
//! use fleetops_filter::{DateRange, FilterConfig, FilterView};
//! use serde_json::{json, Value};
//!
//! let deliveries = vec![
//!     json!({ "id": 1, "customer_name": "John Doe", "status": "pending", "scheduled_date": "2024-01-01" }),
//!     json!({ "id": 2, "customerName": "Jane Smith", "status": "in_transit", "scheduled_date": "2024-01-02" }),
//!     json!({ "id": 3, "customer_name": "Bob Johnson", "status": "delivered", "scheduled_date": "2024-01-03" }),
//! ];
//!
//! let config: FilterConfig<Value> = FilterConfig::new()
//!     .search_field("customer_name")
//!     .with_date_field("scheduled_date");
//!
//! let mut view = FilterView::new(deliveries, config);
//! view.set_search_query("john");
//! view.set_date_range(DateRange::since("2024-01-02"));
//!
//! let ids: Vec<_> = view.filtered_iter().map(|d| d["id"].clone()).collect();
//! assert_eq!(ids, [json!(3)]);
//! ```
//!
//! # Filter Semantics
//!
//! A record is kept when it passes every active stage:
//!
//! ```text
//! match = search ∧ status ∧ type ∧ category ∧ stock_level ∧ date_range
//! ```
//!
//! | Stage | Active when | Passes when |
//! |-------|-------------|-------------|
//! | search | trimmed query non-empty and search fields configured | any search field contains the query, ignoring case |
//! | status / type / category | filter non-empty | the field is a string equal to the filter |
//! | stock_level | filter non-empty and a stock-status function configured | the derived label equals the filter |
//! | date_range | a bound is set and a date field configured | the date is within the bounds, or cannot be read |
//!
//! The result is always a subsequence of the input. No stage ever errors:
//! missing fields fail to match, and unreadable dates are kept.

mod config;
mod error;
mod pipeline;
mod record;
mod resolve;
mod stage;
mod state;
mod stock;
mod value;
mod view;

// Re-export public API
pub use config::{FilterConfig, FilterSettings, StockStatusFn};
pub use error::{FilterError, Result};
pub use pipeline::FilterPipeline;
pub use record::{collection_of, Record};
pub use resolve::{camel_to_snake, resolve, resolve_with, snake_to_camel, Resolution};
pub use stage::{Stage, StageKind};
pub use state::{DateRange, FilterState};
pub use stock::{StockLevel, StockThresholds};
pub use value::{display_string, Timestamp};
pub use view::FilterView;

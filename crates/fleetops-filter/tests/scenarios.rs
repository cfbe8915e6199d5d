//! End-to-end filtering scenarios on delivery fixtures.

use fleetops_filter::{
    DateRange, FilterConfig, FilterSettings, FilterView, StockLevel, StockThresholds,
};
use serde_json::{json, Value};

// ============================================================================
// Fixtures
// ============================================================================

fn deliveries() -> Vec<Value> {
    vec![
        json!({ "id": 1, "customer_name": "John Doe", "status": "pending" }),
        json!({ "id": 2, "customerName": "Jane Smith", "status": "in_transit" }),
        json!({ "id": 3, "customer_name": "Bob Johnson", "status": "delivered" }),
    ]
}

fn scheduled() -> Vec<Value> {
    vec![
        json!({ "id": 1, "scheduled_date": "2024-01-01T00:00:00Z" }),
        json!({ "id": 2, "scheduled_date": "2024-01-02T00:00:00Z" }),
        json!({ "id": 3, "scheduled_date": "2024-01-03T00:00:00Z" }),
    ]
}

fn ids(view: &FilterView<Value>) -> Vec<i64> {
    view.filtered_iter()
        .filter_map(|record| record["id"].as_i64())
        .collect()
}

fn searching(field: &str) -> FilterConfig<Value> {
    FilterConfig::new().search_field(field)
}

// ============================================================================
// Single dimensions
// ============================================================================

#[test]
fn snake_case_search_matches_substrings() {
    let mut view = FilterView::new(deliveries(), searching("customer_name"));
    view.set_search_query("John");
    assert_eq!(ids(&view), [1, 3]);
}

#[test]
fn camel_case_search_falls_back_across_conventions() {
    let mut view = FilterView::new(deliveries(), searching("customerName"));
    view.set_search_query("Jane");
    assert_eq!(ids(&view), [2]);

    view.set_search_query("john");
    assert_eq!(ids(&view), [1, 3]);
}

#[test]
fn status_filter_selects_exact_status() {
    let mut view = FilterView::new(deliveries(), searching("customer_name"));
    view.set_status_filter("in_transit");
    assert_eq!(ids(&view), [2]);
}

#[test]
fn date_range_is_inclusive() {
    let config = FilterConfig::new().with_date_field("scheduled_date");
    let mut view = FilterView::new(scheduled(), config);
    view.set_date_range(DateRange::new("2024-01-02", "2024-01-03"));
    assert_eq!(ids(&view), [2, 3]);
}

#[test]
fn camel_case_date_field_reads_snake_case_records() {
    let config = FilterConfig::new().with_date_field("scheduledDate");
    let mut view = FilterView::new(scheduled(), config);
    view.set_date_range(DateRange::until("2024-01-01"));
    assert_eq!(ids(&view), [1]);
}

#[test]
fn unparseable_dates_pass_any_range() {
    let mut records = scheduled();
    records.push(json!({ "id": 4, "scheduled_date": "TBD" }));
    records.push(json!({ "id": 5 }));

    let config = FilterConfig::new().with_date_field("scheduled_date");
    let mut view = FilterView::new(records, config);
    view.set_date_range(DateRange::new("2030-01-01", "2030-12-31"));
    assert_eq!(ids(&view), [4, 5]);
}

#[test]
fn date_range_reads_common_date_formats() {
    let records = vec![
        json!({ "id": 1, "scheduled_date": "Tue, 02 Jan 2024 10:00:00 GMT" }),
        json!({ "id": 2, "scheduled_date": "2024/01/02" }),
        json!({ "id": 3, "scheduled_date": "Jun 12, 2024" }),
        json!({ "id": 4, "scheduled_date": "Sat, 15 Jun 2024 08:00:00 +0000" }),
        json!({ "id": 5, "scheduled_date": "2024-06-20T09:00:00+0200" }),
    ];
    let config = FilterConfig::new().with_date_field("scheduled_date");
    let mut view = FilterView::new(records, config);
    view.set_date_range(DateRange::new("2024-06-01", "2024-06-30"));
    assert_eq!(ids(&view), [3, 4, 5]);
}

#[test]
fn null_search_fields_do_not_match_their_name() {
    let records = vec![
        json!({ "id": 1, "customer_name": null }),
        json!({ "id": 2, "customer_name": "Nula Freight" }),
    ];
    let mut view = FilterView::new(records, searching("customer_name"));
    view.set_search_query("nul");
    assert_eq!(ids(&view), [2]);
}

#[test]
fn date_range_without_date_field_is_inert() {
    let mut view = FilterView::new(scheduled(), searching("id"));
    view.set_date_range(DateRange::new("2030-01-01", "2030-12-31"));
    assert_eq!(ids(&view), [1, 2, 3]);
}

#[test]
fn stock_level_filter_uses_derived_labels() {
    let inventory = vec![
        json!({ "id": 1, "name": "Pallet wrap", "quantity": 0, "reorder_level": 10 }),
        json!({ "id": 2, "name": "Fuel filter", "quantity": 4, "reorderLevel": 10 }),
        json!({ "id": 3, "name": "Brake pads", "quantity": 40, "reorder_level": 10 }),
    ];
    let config = searching("name").stock_thresholds(StockThresholds::default());
    let mut view = FilterView::new(inventory, config);

    view.set_stock_level_filter(StockLevel::LowStock.as_str());
    assert_eq!(ids(&view), [2]);

    view.set_stock_level_filter(StockLevel::OutOfStock.as_str());
    assert_eq!(ids(&view), [1]);
}

#[test]
fn stock_level_filter_without_derivation_is_inert() {
    let mut view = FilterView::new(deliveries(), searching("customer_name"));
    view.set_stock_level_filter("low_stock");
    assert_eq!(ids(&view), [1, 2, 3]);
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn search_and_status_intersect() {
    let mut view = FilterView::new(deliveries(), searching("customer_name"));
    view.set_search_query("John");
    view.set_status_filter("pending");
    assert_eq!(ids(&view), [1]);
}

#[test]
fn combined_filters_equal_intersection_of_singles() {
    let records = vec![
        json!({ "id": 1, "plate": "VAN-001", "type": "van", "category": "owned" }),
        json!({ "id": 2, "plate": "VAN-002", "type": "van", "category": "leased" }),
        json!({ "id": 3, "plate": "TRK-001", "type": "truck", "category": "owned" }),
        json!({ "id": 4, "plate": "TRK-002", "type": "truck", "category": "leased" }),
    ];
    let single = |set: &dyn Fn(&mut FilterView<Value>)| {
        let mut view = FilterView::new(records.clone(), searching("plate"));
        set(&mut view);
        ids(&view)
    };

    let by_search = single(&|v: &mut FilterView<Value>| v.set_search_query("001"));
    let by_category = single(&|v: &mut FilterView<Value>| v.set_category_filter("owned"));
    let both = single(&|v: &mut FilterView<Value>| {
        v.set_search_query("001");
        v.set_category_filter("owned");
    });

    let intersection: Vec<i64> = by_search
        .iter()
        .copied()
        .filter(|id| by_category.contains(id))
        .collect();
    assert_eq!(both, intersection);
    assert_eq!(both, [1, 3]);
}

#[test]
fn clear_filters_restores_everything() {
    let mut view = FilterView::new(deliveries(), searching("customer_name"));
    view.set_search_query("John");
    view.set_status_filter("pending");
    view.set_type_filter("express");
    assert!(ids(&view).is_empty());

    view.clear_filters();
    assert_eq!(view.search_query(), "");
    assert_eq!(view.status_filter(), "");
    assert_eq!(view.type_filter(), "");
    assert_eq!(view.category_filter(), "");
    assert_eq!(view.stock_level_filter(), "");
    assert_eq!(view.date_range(), &DateRange::new("", ""));
    assert_eq!(view.filtered_cloned(), deliveries());
}

#[test]
fn repeated_search_is_idempotent() {
    let mut view = FilterView::new(deliveries(), searching("customer_name"));
    view.set_search_query("o");
    let first = view.filtered_cloned();
    view.set_search_query("o");
    assert_eq!(view.filtered_cloned(), first);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn loaded_settings_drive_the_view() {
    let settings = FilterSettings::from_yaml(
        "search_fields:\n  - customerName\ndate_field: scheduled_date\n",
    )
    .unwrap();
    let mut view = FilterView::new(deliveries(), settings.into());
    view.set_search_query("smith");
    assert_eq!(ids(&view), [2]);
}

#[test]
fn rebuilt_config_each_render_keeps_memo() {
    let mut view = FilterView::new(deliveries(), searching("customer_name"));
    view.set_search_query("john");
    let passes = view.recompute_count();

    for _ in 0..5 {
        view.set_config(searching("customer_name"));
    }
    assert_eq!(view.recompute_count(), passes);
    assert_eq!(ids(&view), [1, 3]);
}

#[test]
fn non_array_bodies_filter_to_nothing() {
    for body in [Value::Null, json!({ "items": [] }), json!("oops"), json!(7)] {
        let view = FilterView::from_json(Some(&body), searching("customer_name"));
        assert_eq!(view.filtered_len(), 0);
    }
    assert_eq!(
        FilterView::from_json(None, searching("customer_name")).filtered_len(),
        0
    );
}

//! Integration tests for the extraction pipeline

use lineage_flow::lineage_engine::aggregate::Aggregator;
use lineage_flow::lineage_engine::records::{FilterType, LineageRecord};
use lineage_flow::lineage_engine::runner::extract_from_text;

/// Plain SELECT with alias and WHERE clause
#[test]
fn test_select_with_alias_and_where() {
    let sql = "SELECT id, name AS full_name FROM public.users WHERE id = 5";
    let (lineage, filters) = extract_from_text("models/users.sql", sql);

    assert!(lineage.contains(&LineageRecord::new(
        "models/users.sql",
        "public",
        "users",
        "id"
    )));
    assert!(lineage.contains(&LineageRecord::new(
        "models/users.sql",
        "public",
        "users",
        "full_name"
    )));
    assert!(lineage.contains(&LineageRecord::table_only(
        "models/users.sql",
        "public",
        "users"
    )));

    assert_eq!(filters.len(), 1);
    let filter = &filters[0];
    assert_eq!(filter.filter_type, FilterType::Where);
    assert_eq!(filter.table, "users");
    assert_eq!(filter.field, "id");
    assert_eq!(filter.filter_condition, "id = 5");
}

/// A CTE body contributes marker records alongside the outer query
#[test]
fn test_cte_dependency_records() {
    let sql = "WITH recent AS (SELECT * FROM orders) SELECT * FROM recent";
    let (lineage, _) = extract_from_text("q.sql", sql);

    assert!(lineage.contains(&LineageRecord::cte_dependency("q.sql", "", "orders", "recent")));
    assert!(lineage.contains(&LineageRecord::table_only("q.sql", "", "recent")));
    assert!(lineage.contains(&LineageRecord::table_only("q.sql", "", "orders")));
}

/// Join equality yields one JOIN_ON record per side
#[test]
fn test_join_on_records_both_sides() {
    let sql = "SELECT * FROM a JOIN b ON a.id = b.a_id";
    let (_, filters) = extract_from_text("q.sql", sql);

    let join_records: Vec<_> = filters
        .iter()
        .filter(|f| f.filter_type == FilterType::JoinOn)
        .collect();
    assert_eq!(join_records.len(), 2);

    assert_eq!(join_records[0].table, "a");
    assert_eq!(join_records[0].field, "id");
    assert_eq!(join_records[1].table, "b");
    assert_eq!(join_records[1].field, "a_id");
    for record in join_records {
        assert_eq!(record.join_table, "b");
        assert_eq!(record.filter_condition, "a.id = b.a_id");
    }
}

/// Text with no recognizable SQL yields nothing, not an error
#[test]
fn test_non_sql_text_yields_empty_sets() {
    let (lineage, filters) = extract_from_text("notes.sql", "-- nothing to see here\n");
    assert!(lineage.is_empty());
    assert!(filters.is_empty());
}

/// A multi-statement file with repeated references dedups at the corpus level
#[test]
fn test_aggregator_collapses_repeated_extraction() {
    let sql = "SELECT id FROM users WHERE id = 5";
    let (lineage, filters) = extract_from_text("a.sql", sql);

    let mut aggregator = Aggregator::new();
    aggregator.extend_lineage(lineage.clone());
    aggregator.extend_filters(filters.clone());
    let first_pass = (aggregator.lineage().len(), aggregator.filters().len());

    aggregator.extend_lineage(lineage);
    aggregator.extend_filters(filters);
    assert_eq!(
        (aggregator.lineage().len(), aggregator.filters().len()),
        first_pass
    );
}

/// A realistic mart query touching several extractors at once
#[test]
fn test_mart_query_end_to_end() {
    let sql = r#"WITH active_customers AS (
    SELECT customer_id FROM staging.stg_customers WHERE status = 'active'
)
SELECT
    c.customer_id,
    SUM(o.amount) AS total_amount
FROM active_customers c
JOIN staging.stg_orders o ON c.customer_id = o.customer_id
WHERE o.amount > 0
GROUP BY c.customer_id"#;

    let (lineage, filters) = extract_from_text("marts/summary.sql", sql);

    assert!(lineage.contains(&LineageRecord::cte_dependency(
        "marts/summary.sql",
        "staging",
        "stg_customers",
        "active_customers"
    )));
    assert!(lineage.contains(&LineageRecord::table_only(
        "marts/summary.sql",
        "",
        "active_customers"
    )));
    assert!(lineage.contains(&LineageRecord::table_only(
        "marts/summary.sql",
        "staging",
        "stg_orders"
    )));

    assert!(filters
        .iter()
        .any(|f| f.filter_type == FilterType::Where && f.filter_condition == "status = 'active'"));
    assert!(filters
        .iter()
        .any(|f| f.filter_type == FilterType::JoinOn && f.join_table == "stg_orders"));
}

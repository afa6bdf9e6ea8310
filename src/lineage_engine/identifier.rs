/// Split a dotted table reference into `(schema, table)`.
///
/// A single-part name has no schema. Multi-part names split at the
/// first dot, so `warehouse.analytics.orders` yields
/// `("warehouse", "analytics.orders")`.
pub fn split_table_ref(token: &str) -> (String, String) {
    match token.split_once('.') {
        Some((schema, table)) => (schema.to_string(), table.to_string()),
        None => (String::new(), token.to_string()),
    }
}

/// Split a dotted column reference into `(schema, table, field)`.
///
/// One part is a bare field, two parts read as `table.field`, three as
/// `schema.table.field`. Anything deeper is left unsplit in the field
/// position so the caller never loses the raw token.
pub fn split_column_ref(token: &str) -> (String, String, String) {
    let parts: Vec<&str> = token.split('.').collect();
    match parts.as_slice() {
        [field] => (String::new(), String::new(), field.to_string()),
        [table, field] => (String::new(), table.to_string(), field.to_string()),
        [schema, table, field] => (schema.to_string(), table.to_string(), field.to_string()),
        _ => (String::new(), String::new(), token.to_string()),
    }
}

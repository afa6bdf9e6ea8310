use std::fmt;

use serde::{Deserialize, Serialize};

/// A single column- or table-level lineage fact tied to the SQL file it
/// was observed in.
///
/// `field` is empty for table-level references and carries the marker
/// form `(cte_name)` when the row records a dependency of a common table
/// expression on a physical table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineageRecord {
    pub file: String,
    pub schema: String,
    pub table: String,
    pub field: String,
}

impl LineageRecord {
    pub fn new(file: &str, schema: &str, table: &str, field: &str) -> Self {
        Self {
            file: file.to_string(),
            schema: schema.to_string(),
            table: table.to_string(),
            field: field.to_string(),
        }
    }

    /// A reference to a table with no specific column.
    pub fn table_only(file: &str, schema: &str, table: &str) -> Self {
        Self::new(file, schema, table, "")
    }

    /// A row marking that the CTE named `cte_name` reads from
    /// `schema.table`.
    pub fn cte_dependency(file: &str, schema: &str, table: &str, cte_name: &str) -> Self {
        Self::new(file, schema, table, &format!("({})", cte_name))
    }
}

impl fmt::Display for LineageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let qualified = if self.schema.is_empty() {
            self.table.clone()
        } else {
            format!("{}.{}", self.schema, self.table)
        };
        if self.field.is_empty() {
            write!(f, "{} <- {}", self.file, qualified)
        } else {
            write!(f, "{} <- {}.{}", self.file, qualified, self.field)
        }
    }
}

/// Which clause a filter predicate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterType {
    #[serde(rename = "WHERE")]
    Where,
    #[serde(rename = "JOIN_ON")]
    JoinOn,
}

impl FilterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterType::Where => "WHERE",
            FilterType::JoinOn => "JOIN_ON",
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filter predicate observed in a WHERE clause or a JOIN ... ON
/// condition.
///
/// `join_table` is only populated for `JOIN_ON` rows and names the table
/// being joined to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterRecord {
    pub file: String,
    pub filter_type: FilterType,
    pub schema: String,
    pub table: String,
    pub field: String,
    pub filter_condition: String,
    pub join_table: String,
}

impl FilterRecord {
    /// Field-order-independent identity used for deduplication. Two
    /// records with the same field values compare equal regardless of
    /// the order the fields were populated in.
    pub fn dedup_key(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("file", self.file.clone()),
            ("filter_type", self.filter_type.as_str().to_string()),
            ("schema", self.schema.clone()),
            ("table", self.table.clone()),
            ("field", self.field.clone()),
            ("filter_condition", self.filter_condition.clone()),
            ("join_table", self.join_table.clone()),
        ];
        pairs.sort();
        pairs
    }
}

impl fmt::Display for FilterRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.file, self.filter_type, self.field, self.filter_condition
        )
    }
}

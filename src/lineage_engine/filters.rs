use std::sync::LazyLock;

use regex::Regex;

use super::extractors::table_refs;
use super::identifier::{split_column_ref, split_table_ref};
use super::records::{FilterRecord, FilterType};

static WHERE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\bWHERE\s+(.*?)(?:\bGROUP\s+BY\b|\bORDER\s+BY\b|\bHAVING\b|\bUNION\b|$)")
        .unwrap()
});

static CONDITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^([A-Za-z0-9_.]+)\s*(?:<>|!=|>=|<=|=|>|<|\bIN\b|\bLIKE\b|\bIS\b)\s*.+")
        .unwrap()
});

static JOIN_ON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)\bJOIN\s+([A-Za-z0-9_.]+).*?\bON\s+(.*?)(?:\bJOIN\b|\bWHERE\b|\bGROUP\s+BY\b|\bORDER\s+BY\b|$)",
    )
    .unwrap()
});

static EQUALITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^([A-Za-z0-9_.]+)\s*=\s*([A-Za-z0-9_.]+)").unwrap());

static LEADING_IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.]+").unwrap());

/// FilterRecords for every recognizable predicate in the WHERE clauses
/// of `text`. An unqualified predicate identifier inherits the schema
/// and table of the first FROM target so bare `WHERE id = 5` rows still
/// land on a table.
pub fn where_filters(file: &str, text: &str) -> Vec<FilterRecord> {
    let default_target = table_refs(text).into_iter().next();
    let mut records = Vec::new();
    for caps in WHERE_RE.captures_iter(text) {
        for cond in split_conditions(&caps[1]) {
            let Some(cond_caps) = CONDITION_RE.captures(&cond) else {
                continue;
            };
            let (mut schema, mut table, field) = split_column_ref(&cond_caps[1]);
            if schema.is_empty() && table.is_empty() {
                if let Some((default_schema, default_table)) = &default_target {
                    schema = default_schema.clone();
                    table = default_table.clone();
                }
            }
            records.push(FilterRecord {
                file: file.to_string(),
                filter_type: FilterType::Where,
                schema,
                table,
                field,
                filter_condition: cond,
                join_table: String::new(),
            });
        }
    }
    records
}

/// FilterRecords for every `JOIN <target> ... ON <predicate>` in
/// `text`. A simple equality yields one record per side so both join
/// endpoints are captured; anything else falls back to the leading
/// identifier of the fragment.
pub fn join_filters(file: &str, text: &str) -> Vec<FilterRecord> {
    let mut records = Vec::new();
    let mut pos = 0;
    // The span terminator consumes the next JOIN keyword, so resume the
    // scan at the end of the predicate capture instead of the match end
    // or chained joins would be skipped.
    while let Some(caps) = JOIN_ON_RE.captures_at(text, pos) {
        let Some(predicate) = caps.get(2) else {
            break;
        };
        pos = predicate.end();
        let (_, join_table) = split_table_ref(&caps[1]);
        for cond in split_conditions(predicate.as_str()) {
            let sides: Vec<String> = if let Some(eq) = EQUALITY_RE.captures(&cond) {
                vec![eq[1].to_string(), eq[2].to_string()]
            } else if let Some(ident) = LEADING_IDENT_RE.find(&cond) {
                vec![ident.as_str().to_string()]
            } else {
                continue;
            };
            for side in sides {
                let (schema, table, field) = split_column_ref(&side);
                records.push(FilterRecord {
                    file: file.to_string(),
                    filter_type: FilterType::JoinOn,
                    schema,
                    table,
                    field,
                    filter_condition: cond.clone(),
                    join_table: join_table.clone(),
                });
            }
        }
    }
    records
}

/// Split a predicate block on whole-word AND/OR boundaries that sit
/// outside quoted literals. Empty fragments are dropped.
fn split_conditions(block: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let bytes = block.as_bytes();
    let mut start = 0;
    let mut quote: Option<char> = None;
    let mut iter = block.char_indices();
    while let Some((idx, ch)) = iter.next() {
        match quote {
            Some(q) => {
                if ch == q {
                    quote = None;
                }
            }
            None => match ch {
                '\'' | '"' => quote = Some(ch),
                'a' | 'A' | 'o' | 'O' => {
                    if let Some(len) = connective_len(&block[idx..], bytes, idx) {
                        fragments.push(block[start..idx].trim().to_string());
                        start = idx + len;
                        for _ in 1..len {
                            iter.next();
                        }
                    }
                }
                _ => {}
            },
        }
    }
    fragments.push(block[start..].trim().to_string());
    fragments.retain(|f| !f.is_empty());
    fragments
}

/// Length of the AND/OR keyword starting at `rest`, provided it is a
/// whole word (non-identifier characters on both sides).
fn connective_len(rest: &str, bytes: &[u8], idx: usize) -> Option<usize> {
    let len = if rest.get(..3).is_some_and(|s| s.eq_ignore_ascii_case("and")) {
        3
    } else if rest.get(..2).is_some_and(|s| s.eq_ignore_ascii_case("or")) {
        2
    } else {
        return None;
    };
    let before_ok = idx == 0 || !is_ident_byte(bytes[idx - 1]);
    let after_ok = idx + len == bytes.len() || !is_ident_byte(bytes[idx + len]);
    (before_ok && after_ok).then_some(len)
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'.'
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_where_unqualified_inherits_first_from_target() {
        let recs = where_filters("q.sql", "SELECT id FROM users WHERE id = 5");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].table, "users");
        assert_eq!(recs[0].field, "id");
        assert_eq!(recs[0].filter_condition, "id = 5");
        assert_eq!(recs[0].filter_type, FilterType::Where);
    }

    #[test]
    fn test_where_qualified_identifier_keeps_its_own_target() {
        let recs = where_filters(
            "q.sql",
            "SELECT * FROM orders o WHERE billing.invoices.total > 100",
        );
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].schema, "billing");
        assert_eq!(recs[0].table, "invoices");
        assert_eq!(recs[0].field, "total");
    }

    #[test]
    fn test_where_splits_on_and_or() {
        let recs = where_filters(
            "q.sql",
            "SELECT * FROM users WHERE age > 21 AND status = 'active' OR vip IS TRUE",
        );
        let conds: Vec<&str> = recs.iter().map(|r| r.filter_condition.as_str()).collect();
        assert_eq!(conds, vec!["age > 21", "status = 'active'", "vip IS TRUE"]);
    }

    #[test]
    fn test_where_stops_at_group_by() {
        let recs = where_filters(
            "q.sql",
            "SELECT * FROM users WHERE age > 21 GROUP BY age ORDER BY age",
        );
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].filter_condition, "age > 21");
    }

    #[test]
    fn test_where_unrecognizable_fragment_dropped() {
        let recs = where_filters("q.sql", "SELECT * FROM users WHERE (a = 1 AND NOT deleted");
        // "(a = 1" has no leading identifier; "NOT deleted" has no
        // operator. Neither produces a record.
        assert_eq!(recs.len(), 0);
    }

    #[test]
    fn test_and_inside_literal_not_a_boundary() {
        let recs = where_filters(
            "q.sql",
            "SELECT * FROM users WHERE name = 'bob and alice'",
        );
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].filter_condition, "name = 'bob and alice'");
    }

    #[test]
    fn test_andy_is_not_a_connective() {
        let frags = split_conditions("brand = 1 AND android = 2");
        assert_eq!(frags, vec!["brand = 1", "android = 2"]);
    }

    #[test]
    fn test_join_equality_emits_both_sides() {
        let recs = join_filters(
            "q.sql",
            "SELECT * FROM users u JOIN orders o ON u.id = o.user_id",
        );
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].table, "u");
        assert_eq!(recs[0].field, "id");
        assert_eq!(recs[1].table, "o");
        assert_eq!(recs[1].field, "user_id");
        for rec in &recs {
            assert_eq!(rec.join_table, "orders");
            assert_eq!(rec.filter_type, FilterType::JoinOn);
            assert_eq!(rec.filter_condition, "u.id = o.user_id");
        }
    }

    #[test]
    fn test_join_non_equality_falls_back_to_leading_identifier() {
        let recs = join_filters(
            "q.sql",
            "SELECT * FROM a JOIN b ON a.ts > b.ts WHERE a.x = 1",
        );
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].table, "a");
        assert_eq!(recs[0].field, "ts");
        assert_eq!(recs[0].join_table, "b");
    }

    #[test]
    fn test_join_predicate_span_stops_at_next_join() {
        let sql = "SELECT * FROM a JOIN b ON a.id = b.id JOIN c ON b.id = c.id";
        let recs = join_filters("q.sql", sql);
        assert_eq!(recs.len(), 4);
        assert_eq!(recs[0].join_table, "b");
        assert_eq!(recs[2].join_table, "c");
    }

    #[test]
    fn test_schema_qualified_join_target() {
        let recs = join_filters(
            "q.sql",
            "SELECT * FROM a JOIN sales.orders o ON a.id = o.a_id",
        );
        assert_eq!(recs[0].join_table, "orders");
    }
}

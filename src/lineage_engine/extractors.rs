use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::identifier::split_table_ref;

static TABLE_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:FROM|JOIN)\s+([A-Za-z0-9_.]+)").unwrap());

static SELECT_FROM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\bSELECT\s+(.*?)\s+FROM\s+([A-Za-z0-9_.]+)").unwrap());

static AS_ALIAS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bAS\s+([A-Za-z0-9_]+)\s*$").unwrap());

/// The field list of the outermost SELECT together with the first table
/// the clause reads FROM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectClause {
    pub fields: Vec<String>,
    pub schema: String,
    pub table: String,
}

/// All `(schema, table)` pairs named after FROM or JOIN keywords, in
/// order of first appearance.
pub fn table_refs(text: &str) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    let mut refs = Vec::new();
    for caps in TABLE_REF_RE.captures_iter(text) {
        let pair = split_table_ref(&caps[1]);
        if seen.insert(pair.clone()) {
            refs.push(pair);
        }
    }
    refs
}

/// The outermost `SELECT ... FROM <target>` of `text`, if any. The span
/// runs from the first SELECT keyword to the nearest following FROM, so
/// subqueries in the field list shorten the captured clause; deeper
/// nesting is out of scope.
pub fn select_fields(text: &str) -> Option<SelectClause> {
    let caps = SELECT_FROM_RE.captures(text)?;
    let (schema, table) = split_table_ref(&caps[2]);
    let fields = split_field_list(&caps[1])
        .iter()
        .map(|fragment| field_name(fragment))
        .filter(|name| !name.is_empty())
        .collect();
    Some(SelectClause {
        fields,
        schema,
        table,
    })
}

/// Split a SELECT field list on commas, ignoring commas inside single-
/// or double-quoted literals.
fn split_field_list(clause: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    for (idx, ch) in clause.char_indices() {
        match quote {
            Some(q) => {
                if ch == q {
                    quote = None;
                }
            }
            None => match ch {
                '\'' | '"' => quote = Some(ch),
                ',' => {
                    fields.push(clause[start..idx].trim().to_string());
                    start = idx + ch.len_utf8();
                }
                _ => {}
            },
        }
    }
    fields.push(clause[start..].trim().to_string());
    fields.retain(|f| !f.is_empty());
    fields
}

/// The output name of one SELECT list fragment. An `AS` alias wins;
/// otherwise the last whitespace-delimited token with any qualifier
/// dots stripped. Expressions are not evaluated, so only the trailing
/// identifier of a computed field survives.
fn field_name(fragment: &str) -> String {
    if let Some(caps) = AS_ALIAS_RE.captures(fragment) {
        return caps[1].to_string();
    }
    fragment
        .split_whitespace()
        .last()
        .and_then(|token| token.rsplit('.').next())
        .unwrap_or("")
        .to_string()
}

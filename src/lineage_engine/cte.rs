use std::sync::LazyLock;

use regex::Regex;

static WITH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bWITH\b").unwrap());

static CTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\b([A-Za-z0-9_]+)\s+AS\s*\((.*?)\)\s*(?:,|\bWITH\b|\bSELECT\b|\bINSERT\b|\bUPDATE\b|\bDELETE\b|$)")
        .unwrap()
});

/// One named `WITH` block and its captured body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cte {
    pub name: String,
    pub body: String,
}

/// All `WITH name AS ( body )` declarations of `text`, in declaration
/// order. Bodies are captured up to the first close paren followed by a
/// list terminator rather than by balancing parens, so a body ending in
/// a nested `( ... )` can be cut short at that inner close.
pub fn resolve_ctes(text: &str) -> Vec<Cte> {
    let Some(with_kw) = WITH_RE.find(text) else {
        return Vec::new();
    };
    CTE_RE
        .captures_iter(&text[with_kw.end()..])
        .map(|caps| Cte {
            name: caps[1].to_string(),
            body: caps[2].to_string(),
        })
        .collect()
}

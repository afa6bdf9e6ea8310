use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::Utc;

use crate::lineage_engine::records::{FilterRecord, LineageRecord};
use crate::lineage_engine::runner::RunSummary;

/// Render a self-contained HTML lineage report: one section per source
/// file listing its table references and extracted fields, followed by
/// the filter predicates.
pub fn render_html(
    lineage: &[LineageRecord],
    filters: &[FilterRecord],
    summary: &RunSummary,
) -> String {
    let mut by_file: BTreeMap<&str, Vec<&LineageRecord>> = BTreeMap::new();
    for record in lineage {
        by_file.entry(record.file.as_str()).or_default().push(record);
    }

    let mut html = String::new();
    html.push_str("<html>\n<head><title>SQL Lineage Report</title></head>\n<body>\n");
    let _ = writeln!(html, "<h1>SQL Lineage Report</h1>");
    let _ = writeln!(
        html,
        "<p>Generated {} &mdash; {} files, {} lineage records, {} filter records</p>",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        summary.files_found,
        summary.lineage_count,
        summary.filter_count
    );

    for (file, records) in &by_file {
        let _ = writeln!(html, "<h2>{}</h2>", escape(file));

        let tables: Vec<String> = records
            .iter()
            .filter(|r| r.field.is_empty())
            .map(|r| qualified(r))
            .collect();
        if !tables.is_empty() {
            let _ = writeln!(html, "<h3>Tables</h3>\n<ul>");
            for table in tables {
                let _ = writeln!(html, "  <li>{}</li>", escape(&table));
            }
            let _ = writeln!(html, "</ul>");
        }

        let fields: Vec<String> = records
            .iter()
            .filter(|r| !r.field.is_empty())
            .map(|r| format!("{}.{}", qualified(r), r.field))
            .collect();
        if !fields.is_empty() {
            let _ = writeln!(html, "<h3>Fields</h3>\n<ul>");
            for field in fields {
                let _ = writeln!(html, "  <li>{}</li>", escape(&field));
            }
            let _ = writeln!(html, "</ul>");
        }
    }

    if !filters.is_empty() {
        let _ = writeln!(html, "<h2>Filters</h2>\n<ul>");
        for filter in filters {
            let join_suffix = if filter.join_table.is_empty() {
                String::new()
            } else {
                format!(" (join: {})", filter.join_table)
            };
            let _ = writeln!(
                html,
                "  <li>{} [{}] {}{}</li>",
                escape(&filter.file),
                filter.filter_type,
                escape(&filter.filter_condition),
                escape(&join_suffix)
            );
        }
        let _ = writeln!(html, "</ul>");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn qualified(record: &LineageRecord) -> String {
    if record.schema.is_empty() {
        record.table.clone()
    } else {
        format!("{}.{}", record.schema, record.table)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineage_engine::records::FilterType;

    #[test]
    fn test_report_groups_by_file_and_escapes() {
        let lineage = vec![
            LineageRecord::table_only("a.sql", "public", "users"),
            LineageRecord::new("a.sql", "public", "users", "id"),
            LineageRecord::table_only("b.sql", "", "orders"),
        ];
        let filters = vec![FilterRecord {
            file: "a.sql".to_string(),
            filter_type: FilterType::Where,
            schema: String::new(),
            table: "users".to_string(),
            field: "age".to_string(),
            filter_condition: "age > 21".to_string(),
            join_table: String::new(),
        }];
        let summary = RunSummary {
            files_found: 2,
            lineage_count: 3,
            filter_count: 1,
            ..RunSummary::default()
        };

        let html = render_html(&lineage, &filters, &summary);
        assert!(html.contains("<h2>a.sql</h2>"));
        assert!(html.contains("<h2>b.sql</h2>"));
        assert!(html.contains("<li>public.users</li>"));
        assert!(html.contains("<li>public.users.id</li>"));
        assert!(html.contains("age &gt; 21"));
        assert!(html.contains("2 files"));
    }

    #[test]
    fn test_empty_corpus_still_renders_skeleton() {
        let html = render_html(&[], &[], &RunSummary::default());
        assert!(html.starts_with("<html>"));
        assert!(html.ends_with("</html>\n"));
        assert!(!html.contains("<h2>"));
    }
}

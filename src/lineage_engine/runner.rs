use std::fs;
use std::path::Path;

use super::aggregate::Aggregator;
use super::cte::resolve_ctes;
use super::extractors::{select_fields, table_refs};
use super::filters::{join_filters, where_filters};
use super::records::{FilterRecord, LineageRecord};

/// Counters describing one corpus run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub files_found: usize,
    pub files_skipped: usize,
    pub lineage_count: usize,
    pub filter_count: usize,
    pub duplicates_dropped: usize,
}

/// The deduplicated record sets of a corpus run plus its summary.
#[derive(Debug)]
pub struct CorpusExtraction {
    pub lineage: Vec<LineageRecord>,
    pub filters: Vec<FilterRecord>,
    pub summary: RunSummary,
}

/// Run the full extraction pipeline over one file's SQL text.
///
/// CTE bodies are processed first (field and table references tagged
/// with the `(cte_name)` marker), then the outer statement, then the
/// filter extractors over both the full text and each body. Records are
/// returned unmerged; corpus-level dedup happens in the Aggregator.
pub fn extract_from_text(file: &str, sql: &str) -> (Vec<LineageRecord>, Vec<FilterRecord>) {
    let mut lineage = Vec::new();
    let mut filters = Vec::new();

    for cte in resolve_ctes(sql) {
        lineage.extend(field_records(file, &cte.body));
        for (schema, table) in table_refs(&cte.body) {
            lineage.push(LineageRecord::cte_dependency(file, &schema, &table, &cte.name));
        }
        filters.extend(where_filters(file, &cte.body));
        filters.extend(join_filters(file, &cte.body));
    }

    lineage.extend(field_records(file, sql));
    for (schema, table) in table_refs(sql) {
        lineage.push(LineageRecord::table_only(file, &schema, &table));
    }

    filters.extend(where_filters(file, sql));
    filters.extend(join_filters(file, sql));

    (lineage, filters)
}

/// One LineageRecord per output field of the outermost SELECT.
fn field_records(file: &str, text: &str) -> Vec<LineageRecord> {
    let Some(clause) = select_fields(text) else {
        return Vec::new();
    };
    clause
        .fields
        .iter()
        .map(|field| LineageRecord::new(file, &clause.schema, &clause.table, field))
        .collect()
}

/// Extract every file in `files`, labeling records with the path
/// relative to `root`. Unreadable files are reported and skipped;
/// non-UTF-8 bytes are replaced rather than treated as errors.
pub fn run_corpus(root: &Path, files: &[impl AsRef<Path>]) -> CorpusExtraction {
    let mut aggregator = Aggregator::new();
    let mut summary = RunSummary {
        files_found: files.len(),
        ..RunSummary::default()
    };

    for file in files {
        let path = file.as_ref();
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                eprintln!("Error reading {}: {}", path.display(), err);
                summary.files_skipped += 1;
                continue;
            }
        };
        let sql = String::from_utf8_lossy(&bytes);
        let label = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let (lineage, filters) = extract_from_text(&label, &sql);
        aggregator.extend_lineage(lineage);
        aggregator.extend_filters(filters);
    }

    summary.lineage_count = aggregator.lineage().len();
    summary.filter_count = aggregator.filters().len();
    summary.duplicates_dropped = aggregator.duplicates_dropped();
    let (lineage, filters) = aggregator.into_records();

    CorpusExtraction {
        lineage,
        filters,
        summary,
    }
}

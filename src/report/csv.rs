use std::path::Path;

use anyhow::{Context, Result};

use crate::lineage_engine::records::{FilterRecord, LineageRecord};

/// Write lineage records as delimited text with a
/// `file,schema,table,field` header.
pub fn write_lineage(path: &Path, records: &[LineageRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    // serialize only emits the header with the first row, but the header
    // is part of the format contract even for an empty record set
    if records.is_empty() {
        writer
            .write_record(["file", "schema", "table", "field"])
            .with_context(|| format!("Failed to write header to {}", path.display()))?;
    }
    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("Failed to write lineage row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(())
}

/// Write filter records as delimited text with a
/// `file,filter_type,schema,table,field,filter_condition,join_table`
/// header.
pub fn write_filters(path: &Path, records: &[FilterRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    if records.is_empty() {
        writer
            .write_record([
                "file",
                "filter_type",
                "schema",
                "table",
                "field",
                "filter_condition",
                "join_table",
            ])
            .with_context(|| format!("Failed to write header to {}", path.display()))?;
    }
    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("Failed to write filter row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(())
}

pub fn read_lineage(path: &Path) -> Result<Vec<LineageRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: LineageRecord =
            row.with_context(|| format!("Malformed lineage row in {}", path.display()))?;
        records.push(record);
    }
    Ok(records)
}

pub fn read_filters(path: &Path) -> Result<Vec<FilterRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: FilterRecord =
            row.with_context(|| format!("Malformed filter row in {}", path.display()))?;
        records.push(record);
    }
    Ok(records)
}

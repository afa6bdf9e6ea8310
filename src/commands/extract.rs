use std::path::PathBuf;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use colored::Colorize;

use crate::commands::config::read_config;
use crate::discovery::find_sql_files;
use crate::display;
use crate::lineage_engine::records::{FilterRecord, LineageRecord};
use crate::lineage_engine::runner::run_corpus;
use crate::report::csv;

/// Run the extract command
pub fn extract_command(
    sql_path: Option<PathBuf>,
    format: &str,
    lineage_out: Option<PathBuf>,
    filters_out: Option<PathBuf>,
    config_path: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let start_time = Instant::now();

    let config = read_config(config_path)?;
    let root = sql_path.unwrap_or_else(|| PathBuf::from(&config.sql_path));
    if !root.is_dir() {
        return Err(anyhow!("SQL path is not a directory: {}", root.display()));
    }

    if !quiet {
        display::display_extract_welcome();
    }
    println!(
        "{}",
        format!("Scanning SQL files in: {}", root.display()).green()
    );

    let sql_files = find_sql_files(&root);
    println!("Found {} SQL files", sql_files.len());

    let extraction = run_corpus(&root, &sql_files);

    match format {
        "csv" => {
            let lineage_path =
                lineage_out.unwrap_or_else(|| PathBuf::from(&config.output.lineage_csv));
            let filters_path =
                filters_out.unwrap_or_else(|| PathBuf::from(&config.output.filters_csv));
            csv::write_lineage(&lineage_path, &extraction.lineage)?;
            csv::write_filters(&filters_path, &extraction.filters)?;
            println!(
                "Wrote {} rows to {}",
                extraction.lineage.len(),
                lineage_path.display()
            );
            println!(
                "Wrote {} filter rows to {}",
                extraction.filters.len(),
                filters_path.display()
            );
        }
        "json" => output_json_format(&extraction.lineage, &extraction.filters)?,
        "text" => output_text_format(&extraction.lineage, &extraction.filters),
        _ => {
            println!(
                "Unsupported output format: {}. Using text format instead.",
                format
            );
            output_text_format(&extraction.lineage, &extraction.filters);
        }
    }

    let summary = &extraction.summary;
    println!(
        "{}",
        format!(
            "Extracted {} lineage and {} filter records from {} files in {:.2?} ({} duplicates dropped, {} files skipped)",
            summary.lineage_count,
            summary.filter_count,
            summary.files_found - summary.files_skipped,
            start_time.elapsed(),
            summary.duplicates_dropped,
            summary.files_skipped
        )
        .green()
    );

    Ok(())
}

/// Output the record sets in text format
fn output_text_format(lineage: &[LineageRecord], filters: &[FilterRecord]) {
    println!("\n--- {} ---", "Lineage Records".green());
    for record in lineage {
        println!("  • {}", record);
    }

    println!("\n--- {} ---", "Filter Records".green());
    for record in filters {
        println!("  • {}", record);
    }
}

/// Output the record sets in JSON format
fn output_json_format(lineage: &[LineageRecord], filters: &[FilterRecord]) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        lineage: &'a [LineageRecord],
        filters: &'a [FilterRecord],
    }

    let output = JsonOutput { lineage, filters };
    let json = serde_json::to_string_pretty(&output).context("Failed to serialize records")?;
    println!("{}", json);

    Ok(())
}

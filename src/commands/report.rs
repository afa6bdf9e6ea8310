use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use colored::Colorize;

use crate::commands::config::read_config;
use crate::discovery::find_sql_files;
use crate::lineage_engine::runner::run_corpus;
use crate::report::graph::LineageGraph;
use crate::report::html::render_html;

/// Run the report command: extract the corpus and render a dot graph
/// plus an HTML summary into the report directory.
pub fn report_command(
    sql_path: Option<PathBuf>,
    report_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = read_config(config_path)?;
    let root = sql_path.unwrap_or_else(|| PathBuf::from(&config.sql_path));
    if !root.is_dir() {
        return Err(anyhow!("SQL path is not a directory: {}", root.display()));
    }

    println!(
        "{}",
        format!("Building lineage report for: {}", root.display()).green()
    );

    let sql_files = find_sql_files(&root);
    println!("Found {} SQL files", sql_files.len());

    let extraction = run_corpus(&root, &sql_files);

    let report_dir = report_dir.unwrap_or_else(|| PathBuf::from(&config.output.report_dir));
    fs::create_dir_all(&report_dir)
        .with_context(|| format!("Failed to create {}", report_dir.display()))?;

    let graph = LineageGraph::from_records(&extraction.lineage, &extraction.filters);
    let dot_path = report_dir.join("lineage.dot");
    fs::write(&dot_path, graph.to_dot())
        .with_context(|| format!("Failed to write {}", dot_path.display()))?;
    println!(
        "Wrote {} ({} nodes, {} edges)",
        dot_path.display(),
        graph.node_count(),
        graph.edge_count()
    );

    let html_path = report_dir.join("lineage_report.html");
    let html = render_html(
        &extraction.lineage,
        &extraction.filters,
        &extraction.summary,
    );
    fs::write(&html_path, html)
        .with_context(|| format!("Failed to write {}", html_path.display()))?;
    println!("Wrote {}", html_path.display());

    println!(
        "{}",
        format!("Report written to {}", report_dir.display()).green()
    );

    Ok(())
}

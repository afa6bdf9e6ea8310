use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use lineage_flow::commands;
use lineage_flow::display;

/// LineageFlow (lf) CLI - SQL lineage extraction tool
#[derive(Parser)]
#[clap(name = "lf", about = "LineageFlow - SQL lineage extraction tool", version)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a SQL corpus and emit lineage and filter records
    Extract {
        /// Path to the SQL files (defaults to the configured sql_path)
        #[clap(short, long)]
        sql_path: Option<PathBuf>,

        /// Output format for the records (csv, json, text)
        #[clap(short, long, default_value = "csv")]
        format: String,

        /// Output file for lineage records (csv format only)
        #[clap(long)]
        lineage_out: Option<PathBuf>,

        /// Output file for filter records (csv format only)
        #[clap(long)]
        filters_out: Option<PathBuf>,

        /// Path to project configuration file (defaults to ./lineageflow_project.yaml)
        #[clap(short, long)]
        config: Option<PathBuf>,

        /// Quiet mode - skip the banner
        #[clap(short, long)]
        quiet: bool,
    },

    /// Render a dot graph and HTML report for a SQL corpus
    Report {
        /// Path to the SQL files (defaults to the configured sql_path)
        #[clap(short, long)]
        sql_path: Option<PathBuf>,

        /// Directory to write the report into
        #[clap(short, long)]
        report_dir: Option<PathBuf>,

        /// Path to project configuration file (defaults to ./lineageflow_project.yaml)
        #[clap(short, long)]
        config: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Extract {
            sql_path,
            format,
            lineage_out,
            filters_out,
            config,
            quiet,
        } => {
            if let Err(err) = commands::extract::extract_command(
                sql_path,
                &format,
                lineage_out,
                filters_out,
                config,
                quiet,
            ) {
                eprintln!("Error: {:#}", err);
                process::exit(1);
            }
        }
        Command::Report {
            sql_path,
            report_dir,
            config,
        } => {
            if let Err(err) = commands::report::report_command(sql_path, report_dir, config) {
                eprintln!("Error: {:#}", err);
                process::exit(1);
            }
        }
        Command::Version => {
            display::display_version();
        }
    }
}

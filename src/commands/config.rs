use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// Project configuration, read from lineageflow_project.yaml
#[derive(Debug, Serialize, Deserialize)]
pub struct LineageFlowConfig {
    /// Name of the project
    #[serde(default = "default_name")]
    pub name: String,

    /// Project version
    #[serde(default = "default_version")]
    pub version: String,

    /// Path to the SQL corpus (relative to project root)
    #[serde(default = "default_sql_path")]
    pub sql_path: String,

    /// Output file locations
    #[serde(default)]
    pub output: OutputConfig,

    /// Additional project configurations
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

/// Where the extracted record sets and reports land
#[derive(Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_lineage_csv")]
    pub lineage_csv: String,

    #[serde(default = "default_filters_csv")]
    pub filters_csv: String,

    #[serde(default = "default_report_dir")]
    pub report_dir: String,
}

fn default_name() -> String {
    "lineageflow_project".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_sql_path() -> String {
    "sql".to_string()
}

fn default_lineage_csv() -> String {
    "sql_metadata.csv".to_string()
}

fn default_filters_csv() -> String {
    "sql_filters.csv".to_string()
}

fn default_report_dir() -> String {
    "lineage_report".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            lineage_csv: default_lineage_csv(),
            filters_csv: default_filters_csv(),
            report_dir: default_report_dir(),
        }
    }
}

impl Default for LineageFlowConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
            sql_path: default_sql_path(),
            output: OutputConfig::default(),
            extra: HashMap::new(),
        }
    }
}

/// Reads the configuration file from the specified path or looks for
/// lineageflow_project.yaml in the current directory. An explicitly
/// given path must exist; the implicit default may be absent, in which
/// case built-in defaults apply.
pub fn read_config(config_path: Option<PathBuf>) -> Result<LineageFlowConfig> {
    let (config_path, explicit) = match config_path {
        Some(path) => (path, true),
        None => {
            let current_dir = std::env::current_dir()?;
            (current_dir.join("lineageflow_project.yaml"), false)
        }
    };

    if !config_path.exists() {
        if explicit {
            return Err(anyhow!(
                "Configuration file not found at: {}",
                config_path.display()
            ));
        }
        return Ok(LineageFlowConfig::default());
    }

    let config_str = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    let config: LineageFlowConfig = serde_yaml::from_str(&config_str)
        .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = LineageFlowConfig::default();
        assert_eq!(config.sql_path, "sql");
        assert_eq!(config.output.lineage_csv, "sql_metadata.csv");
        assert_eq!(config.output.filters_csv, "sql_filters.csv");
        assert_eq!(config.output.report_dir, "lineage_report");
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "name: analytics\nsql_path: models\n";
        let config: LineageFlowConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.name, "analytics");
        assert_eq!(config.sql_path, "models");
        assert_eq!(config.output.lineage_csv, "sql_metadata.csv");
    }

    #[test]
    fn test_nested_output_section() {
        let yaml = "name: analytics\noutput:\n  lineage_csv: out/lineage.csv\n";
        let config: LineageFlowConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.output.lineage_csv, "out/lineage.csv");
        assert_eq!(config.output.filters_csv, "sql_filters.csv");
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let result = read_config(Some(PathBuf::from("/nonexistent/lineage.yaml")));
        assert!(result.is_err());
    }
}

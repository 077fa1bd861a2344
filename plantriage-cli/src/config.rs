//! Configuration file loading for plantriage.
//!
//! Discovers and loads `plantriage.toml` from the working directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "plantriage.toml";

/// Top-level configuration from plantriage.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlantriageConfig {
    /// Output settings (format, pretty-printing).
    pub output: OutputConfig,
}

/// Output section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON reports.
    pub pretty: bool,

    /// Default report format when the CLI does not specify one.
    pub format: Option<ReportFormat>,
}

/// Report output format, shared between the config file and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Markdown,
}

/// Discover the plantriage.toml config file.
///
/// Searches for `plantriage.toml` in the given directory.
/// Returns `None` if no config file is found.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a plantriage.toml config file.
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<PlantriageConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<PlantriageConfig> {
    let config: PlantriageConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from the given directory, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<PlantriageConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(PlantriageConfig::default()),
    }
}

/// Merged output settings combining config file and CLI arguments.
///
/// CLI arguments take precedence over config file settings.
#[derive(Debug, Clone, Copy)]
pub struct MergedOutput {
    pub pretty: bool,
    pub format: ReportFormat,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: PlantriageConfig,
}

impl ConfigMerger {
    /// Create a new merger from a loaded config.
    pub fn new(config: PlantriageConfig) -> Self {
        Self { config }
    }

    /// Merge with analyze command CLI arguments.
    ///
    /// `--pretty` enables pretty-printing on top of the config setting;
    /// `--format` overrides the config file format when given. JSON is the
    /// fallback when neither names a format.
    pub fn merge_analyze_args(
        self,
        cli_pretty: bool,
        cli_format: Option<ReportFormat>,
    ) -> MergedOutput {
        MergedOutput {
            pretty: cli_pretty || self.config.output.pretty,
            format: cli_format
                .or(self.config.output.format)
                .unwrap_or(ReportFormat::Json),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_example_config() {
        let contents = r#"
[output]
pretty = true
format = "markdown"
"#;

        let config = parse_config(contents).unwrap();
        assert!(config.output.pretty);
        assert_eq!(config.output.format, Some(ReportFormat::Markdown));
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert!(!config.output.pretty);
        assert!(config.output.format.is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        assert!(parse_config("[output]\nformat = \"yaml\"\n").is_err());
    }

    #[test]
    fn test_merge_defaults_to_compact_json() {
        let merged = ConfigMerger::new(PlantriageConfig::default()).merge_analyze_args(false, None);
        assert!(!merged.pretty);
        assert_eq!(merged.format, ReportFormat::Json);
    }

    #[test]
    fn test_merge_cli_format_overrides_config() {
        let config = PlantriageConfig {
            output: OutputConfig {
                pretty: false,
                format: Some(ReportFormat::Markdown),
            },
        };

        let merged = ConfigMerger::new(config).merge_analyze_args(false, Some(ReportFormat::Json));
        assert_eq!(merged.format, ReportFormat::Json);
    }

    #[test]
    fn test_merge_config_used_when_cli_silent() {
        let config = PlantriageConfig {
            output: OutputConfig {
                pretty: true,
                format: Some(ReportFormat::Markdown),
            },
        };

        let merged = ConfigMerger::new(config).merge_analyze_args(false, None);
        assert!(merged.pretty);
        assert_eq!(merged.format, ReportFormat::Markdown);
    }

    #[test]
    fn test_discover_config_some_and_none() {
        let temp = TempDir::new().expect("temp dir");
        let dir = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        assert!(discover_config(&dir).is_none());

        std::fs::write(dir.join(CONFIG_FILE_NAME), "").expect("write config");
        assert!(discover_config(&dir).is_some());
    }

    #[test]
    fn test_load_or_default_returns_default_when_missing() {
        let temp = TempDir::new().expect("temp dir");
        let dir = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let cfg = load_or_default(&dir).expect("load default");
        assert!(!cfg.output.pretty);
        assert!(cfg.output.format.is_none());
    }
}

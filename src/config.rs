//! User configuration (`config.toml`).
//!
//! Problems with the file never abort a run: they are returned as warnings
//! and the affected settings keep their defaults.

use directories::ProjectDirs;
use serde::Deserialize;
use sheetscope_core::ReportOptions;
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    verbose: Option<bool>,
    analysis: Option<AnalysisSection>,
    report: Option<ReportSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AnalysisSection {
    parallel: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReportSection {
    format: Option<String>,
    data_flow: Option<bool>,
    data_ranges: Option<bool>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Effective settings before command-line overrides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    pub verbose: bool,
    pub parallel: bool,
    pub format: OutputFormat,
    pub report: ReportOptions,
}

/// Load settings from `config_file`, or from the user config dir if none is given.
pub fn load_settings(config_file: Option<&Path>) -> (Settings, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let config_path = config_file.map(Path::to_path_buf).or_else(user_config_path);

    let Some(path) = config_path else {
        return (Settings::default(), warnings);
    };

    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Settings::default(), warnings);
    }

    let content = match std::fs::metadata(&path) {
        Ok(meta) if meta.len() > MAX_CONFIG_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ));
            return (Settings::default(), warnings);
        }
        Ok(_) => match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), err));
                return (Settings::default(), warnings);
            }
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                err
            ));
            return (Settings::default(), warnings);
        }
    };

    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            let settings = resolve(file, &mut warnings);
            (settings, warnings)
        }
        Err(err) => {
            warnings.push(format!("Failed to parse {}: {}", path.display(), err));
            (Settings::default(), warnings)
        }
    }
}

fn resolve(file: ConfigFile, warnings: &mut Vec<String>) -> Settings {
    let mut settings = Settings::default();

    if let Some(verbose) = file.verbose {
        settings.verbose = verbose;
    }
    if let Some(parallel) = file.analysis.and_then(|a| a.parallel) {
        settings.parallel = parallel;
    }

    let report = file.report.unwrap_or_default();
    if let Some(format) = report.format.as_deref() {
        match parse_format(format) {
            Some(format) => settings.format = format,
            None => warnings.push(format!(
                "Unknown report format '{}' (expected \"text\" or \"json\")",
                format
            )),
        }
    }
    if let Some(data_flow) = report.data_flow {
        settings.report.data_flow = data_flow;
    }
    if let Some(data_ranges) = report.data_ranges {
        settings.report.data_ranges = data_ranges;
    }

    settings
}

fn parse_format(name: &str) -> Option<OutputFormat> {
    let name = name.trim();
    if name.eq_ignore_ascii_case("text") {
        Some(OutputFormat::Text)
    } else if name.eq_ignore_ascii_case("json") {
        Some(OutputFormat::Json)
    } else {
        None
    }
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "sheetscope")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

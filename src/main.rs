//! Sheetscope - static analysis of spreadsheet formulas.

mod config;

use anyhow::{Context, Result};
use sheetscope_core::storage::{parse_csv_sheet, parse_snapshot};
use sheetscope_core::{AnalyzerConfig, Spreadsheet, analyze_spreadsheet, generate_report_with};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use config::{OutputFormat, Settings, load_settings};

fn print_usage() {
    eprintln!("Usage: sheetscope [OPTIONS] [SNAPSHOT]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [SNAPSHOT]                JSON snapshot to analyze ({{\"sheets\": [...]}})");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --csv <FILE>              Add a sheet from a CSV file (can be repeated)");
    eprintln!("  --json                    Print the analysis as JSON instead of a report");
    eprintln!("  --data-flow               Include the data flow section in the report");
    eprintln!("  --data-ranges             Include the data ranges section in the report");
    eprintln!("  --parallel                Analyze sheets in parallel");
    eprintln!("  -v, --verbose             Log progress to stderr (repeat for more detail)");
    eprintln!("  --config <FILE>           Load settings from a TOML file");
    eprintln!("  -o, --output <FILE>       Write output to a file instead of stdout");
    eprintln!("  -h, --help                Print help");
}

#[derive(Debug, Default)]
struct Options {
    snapshot: Option<PathBuf>,
    csv_files: Vec<PathBuf>,
    json: bool,
    data_flow: bool,
    data_ranges: bool,
    parallel: bool,
    verbosity: u8,
    config_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
}

impl Options {
    /// Command-line flags only switch things on; they never turn off a
    /// setting enabled in the config file.
    fn apply(&self, mut settings: Settings) -> Settings {
        if self.json {
            settings.format = OutputFormat::Json;
        }
        settings.report.data_flow |= self.data_flow;
        settings.report.data_ranges |= self.data_ranges;
        settings.parallel |= self.parallel;
        settings.verbose |= self.verbosity > 0;
        settings
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "--csv" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --csv requires a file path");
                    std::process::exit(1);
                }
                options.csv_files.push(PathBuf::from(&args[i]));
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a file path");
                    std::process::exit(1);
                }
                options.config_file = Some(PathBuf::from(&args[i]));
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --output requires a file path");
                    std::process::exit(1);
                }
                options.output_file = Some(PathBuf::from(&args[i]));
            }
            "--json" => options.json = true,
            "--data-flow" => options.data_flow = true,
            "--data-ranges" => options.data_ranges = true,
            "--parallel" => options.parallel = true,
            "-v" | "--verbose" => options.verbosity = options.verbosity.saturating_add(1),
            "-vv" => options.verbosity = options.verbosity.saturating_add(2),
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                std::process::exit(1);
            }
            _ => {
                if options.snapshot.is_none() {
                    options.snapshot = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("Error: Unexpected argument: {}", args[i]);
                    print_usage();
                    std::process::exit(1);
                }
            }
        }
        i += 1;
    }

    if options.snapshot.is_none() && options.csv_files.is_empty() {
        eprintln!("Error: No input given (expected a snapshot or --csv)");
        print_usage();
        std::process::exit(1);
    }

    let (settings, warnings) = load_settings(options.config_file.as_deref());
    let settings = options.apply(settings);

    init_logging(if settings.verbose {
        options.verbosity.max(1)
    } else {
        0
    });

    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    if let Err(e) = run(&options, &settings) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(options: &Options, settings: &Settings) -> Result<()> {
    let spreadsheet = load_spreadsheet(options)?;

    let config = AnalyzerConfig::new()
        .verbose(settings.verbose)
        .parallel(settings.parallel);
    let analysis = analyze_spreadsheet(&spreadsheet, &config);

    let output = match settings.format {
        OutputFormat::Text => generate_report_with(&analysis, settings.report),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&analysis)
                .context("Failed to serialize analysis")?;
            json.push('\n');
            json
        }
    };

    match &options.output_file {
        Some(path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", output),
    }
    Ok(())
}

/// Snapshot sheets first, then one sheet per CSV file in argument order.
fn load_spreadsheet(options: &Options) -> Result<Spreadsheet> {
    let mut sheets = Vec::new();

    if let Some(path) = &options.snapshot {
        let snapshot = parse_snapshot(path)
            .with_context(|| format!("Failed to load snapshot {}", path.display()))?;
        sheets.extend(snapshot.into_sheets());
    }

    for path in &options.csv_files {
        let sheet = parse_csv_sheet(path)
            .with_context(|| format!("Failed to load CSV {}", path.display()))?;
        sheets.push(sheet);
    }

    Spreadsheet::new(sheets).context("Invalid spreadsheet")
}

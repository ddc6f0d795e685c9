use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

use vitaltrend::analyzer::TimeSeriesAnalyzer;
use vitaltrend::config::AppConfig;
use vitaltrend::error::VitalError;
use vitaltrend::logging::{self, LogLevel};
use vitaltrend::models::{CustomRange, HealthRecord, ResolvedWindow, TimeWindow};
use vitaltrend::trackers::Tracker;
use vitaltrend::{export, ingest, report, window};

/// VitalTrend - Health Record Analysis CLI
///
/// Filters timestamped health records against a time window, aggregates
/// them per day for charting, and reports summary statistics.
#[derive(Parser)]
#[command(name = "vitaltrend")]
#[command(version = "0.1.0")]
#[command(about = "Health record time-window analysis", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every record-reading subcommand
#[derive(Args)]
struct SelectionArgs {
    /// Input JSON file (API response payload)
    #[arg(short, long)]
    input: PathBuf,

    /// Tracker the records belong to (bmi, sugar, ear, eye, dietary, fluid)
    #[arg(short, long)]
    tracker: Option<Tracker>,

    /// Time window (today, yesterday, week, month, custom)
    #[arg(short, long)]
    window: Option<TimeWindow>,

    /// Custom range start date (YYYY-MM-DD); implies a custom window
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Custom range end date (YYYY-MM-DD); defaults to the start date
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Treat a missing input file as an empty collection (404 semantics)
    #[arg(long)]
    empty_ok: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Summary statistics for one metric over the selected window
    Summary {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Metric to summarize (defaults to the tracker's headline metric)
        #[arg(short, long)]
        metric: Option<String>,
    },

    /// Day-aggregated series table for the selected window
    Chart {
        #[command(flatten)]
        selection: SelectionArgs,

        /// One point per record labeled by time-of-day, instead of day buckets
        #[arg(long)]
        per_record: bool,

        /// Metrics to plot, comma-separated (defaults per tracker)
        #[arg(short, long, value_delimiter = ',')]
        metrics: Option<Vec<String>>,
    },

    /// Export the day-aggregated series to CSV
    Export {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Output CSV path
        #[arg(short, long)]
        output: PathBuf,

        /// Metrics to export, comma-separated (defaults per tracker)
        #[arg(short, long, value_delimiter = ',')]
        metrics: Option<Vec<String>>,
    },

    /// Show configuration
    Config {
        /// Print the effective configuration
        #[arg(short, long)]
        list: bool,

        /// Print the config file path
        #[arg(short, long)]
        path: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(AppConfig::default_path);
    let config = AppConfig::load(&config_path)?;

    let mut log_config = config.logging.clone();
    log_config.level = match cli.verbose {
        0 => log_config.level,
        1 => LogLevel::Info,
        2 => LogLevel::Debug,
        _ => LogLevel::Trace,
    };
    logging::init_logging(&log_config)?;

    if let Err(err) = run(cli, &config, &config_path) {
        eprintln!("{} {}", "error:".red().bold(), err.user_message());
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli, config: &AppConfig, config_path: &std::path::Path) -> vitaltrend::Result<()> {
    match cli.command {
        Commands::Summary { selection, metric } => {
            let tracker = selection.tracker.unwrap_or(config.defaults.tracker);
            let (records, resolved) = select_records(&selection, config)?;
            let metric = metric.unwrap_or_else(|| tracker.headline_metric().to_string());

            let stats = TimeSeriesAnalyzer::summarize(&records, &metric, tracker.classifier());

            print_heading(tracker, &resolved, records.len());
            println!("{}", report::summary_table(tracker, &metric, &stats));
            if let Some(classification) = &stats.latest_category {
                println!(
                    "  Latest reading is {}",
                    report::colored_category(classification).bold()
                );
            }
        }

        Commands::Chart {
            selection,
            per_record,
            metrics,
        } => {
            let tracker = selection.tracker.unwrap_or(config.defaults.tracker);
            let (records, resolved) = select_records(&selection, config)?;
            let metrics = resolve_metrics(tracker, &metrics);
            let metric_refs: Vec<&str> = metrics.iter().map(String::as_str).collect();

            let points = if per_record {
                TimeSeriesAnalyzer::per_record_points(&records, &metric_refs)
            } else {
                TimeSeriesAnalyzer::aggregate_by_day(&records, &metric_refs)
            };

            print_heading(tracker, &resolved, records.len());
            if points.is_empty() {
                println!("{}", "No data to display.".dimmed());
            } else {
                println!("{}", report::series_table(&points, &metric_refs));
            }
        }

        Commands::Export {
            selection,
            output,
            metrics,
        } => {
            let tracker = selection.tracker.unwrap_or(config.defaults.tracker);
            let (records, _) = select_records(&selection, config)?;
            let metrics = resolve_metrics(tracker, &metrics);
            let metric_refs: Vec<&str> = metrics.iter().map(String::as_str).collect();

            let points = TimeSeriesAnalyzer::aggregate_by_day(&records, &metric_refs);
            export::export_series(&points, &metric_refs, &output)?;

            println!(
                "{} {} points exported to {}",
                "✓".green(),
                points.len(),
                output.display()
            );
        }

        Commands::Config { list, path } => {
            if path || !list {
                println!("{}", config_path.display());
            }
            if list {
                let rendered = toml::to_string_pretty(config)
                    .map_err(|e| VitalError::Configuration(e.to_string()))?;
                println!("{}", rendered);
            }
        }
    }

    Ok(())
}

/// Read records from the input file and filter them against the selected
/// window. `--from/--to` force a custom window; otherwise the explicit
/// `--window` flag or the configured default applies.
fn select_records(
    selection: &SelectionArgs,
    config: &AppConfig,
) -> vitaltrend::Result<(Vec<HealthRecord>, ResolvedWindow)> {
    let tracker = selection.tracker.unwrap_or(config.defaults.tracker);

    let body = if selection.input.exists() {
        std::fs::read_to_string(&selection.input)?
    } else if selection.empty_ok {
        String::new()
    } else {
        return Err(VitalError::InputNotFound {
            path: selection.input.clone(),
        });
    };

    let records = ingest::parse_records(&body, &tracker.schema())?;
    tracing::info!(
        tracker = tracker.display_name(),
        count = records.len(),
        "Records loaded"
    );

    let window_kind = if selection.from.is_some() {
        TimeWindow::Custom
    } else {
        selection.window.unwrap_or(config.defaults.window)
    };
    let custom = selection.from.map(|start| CustomRange {
        start: Some(start),
        end: selection.to,
    });

    let now = Local::now().naive_local();
    let resolved = window::resolve_window(window_kind, now, custom)?;
    let filtered = window::filter_by_window(&records, &resolved);

    Ok((filtered, resolved))
}

fn resolve_metrics(tracker: Tracker, metrics: &Option<Vec<String>>) -> Vec<String> {
    match metrics {
        Some(list) if !list.is_empty() => list.clone(),
        _ => tracker
            .default_chart_metrics()
            .iter()
            .map(|m| m.to_string())
            .collect(),
    }
}

fn print_heading(tracker: Tracker, window: &ResolvedWindow, count: usize) {
    println!(
        "{}  {} to {}  ({} records)",
        tracker.display_name().bold(),
        window.start.format("%Y-%m-%d %H:%M"),
        window.end.format("%Y-%m-%d %H:%M"),
        count
    );
}

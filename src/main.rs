//! CLI entry point for the bike-sharing dashboard.
//!
//! Loads the dataset once, then renders the dashboard for a single set of
//! selections or drives an interactive session from stdin.

use anyhow::{Context, Result};
use bike_share_dashboard::{
    config::DashboardConfig,
    error::DashboardError,
    fetch::BasicClient,
    loader::{DatasetSource, load_dataset},
    output::{print_pretty, render_json, render_text},
    record::{DateRange, RentalRecord, Season, WorkingDay},
    session::{Dashboard, DashboardSession, Interaction},
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::io::BufRead;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bike_share_dashboard")]
#[command(about = "Interactive analytics over a bike-sharing usage dataset", long_about = None)]
struct Cli {
    /// Dataset file path or URL (overrides DASHBOARD_DATASET)
    #[arg(short, long, global = true)]
    source: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dashboard once for the given selections
    Render {
        /// First day of the range (defaults to the first day in the dataset)
        #[arg(long, value_name = "YYYY-MM-DD")]
        start: Option<NaiveDate>,

        /// Last day of the range (defaults to the last day in the dataset)
        #[arg(long, value_name = "YYYY-MM-DD")]
        end: Option<NaiveDate>,

        /// Season for the hourly-by-season chart
        #[arg(long, value_parser = parse_season)]
        season: Option<Season>,

        /// Day type for the hourly-by-day-type chart (work or holiday)
        #[arg(long, value_parser = parse_working_day)]
        working_day: Option<WorkingDay>,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the dataset's date span and record counts
    Bounds,
    /// Read interactions from stdin and re-render after each one
    Interactive {
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

fn parse_season(s: &str) -> Result<Season, String> {
    s.parse()
}

fn parse_working_day(s: &str) -> Result<WorkingDay, String> {
    s.parse()
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file
    let config = DashboardConfig::from_env();

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = Path::new(&config.log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&config.log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bike_share_dashboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let source: DatasetSource = cli
        .source
        .unwrap_or(config.dataset_source)
        .parse()?;

    let client = BasicClient::new(config.http_timeout)?;
    let records = load_dataset(&client, &source)
        .await
        .with_context(|| format!("failed to load dataset from {source}"))?;

    match cli.command {
        Commands::Render {
            start,
            end,
            season,
            working_day,
            format,
        } => {
            let mut session = DashboardSession::new(records)?;
            let bounds = session.bounds();
            let range = DateRange::new(
                start.unwrap_or(bounds.start()),
                end.unwrap_or(bounds.end()),
            )?;

            let mut dashboard = session.apply(Interaction::SetRange(range))?;
            if let Some(season) = season {
                dashboard = session.apply(Interaction::SelectSeason(season))?;
            }
            if let Some(day) = working_day {
                dashboard = session.apply(Interaction::SelectWorkingDay(day))?;
            }

            emit(&dashboard, format)?;
        }
        Commands::Bounds => {
            report_bounds(&records)?;
        }
        Commands::Interactive { format } => {
            let session = DashboardSession::new(records)?;
            interactive(session, format)?;
        }
    }

    Ok(())
}

/// Writes a rendered dashboard to stdout in `format`.
fn emit(dashboard: &Dashboard, format: Format) -> Result<()> {
    print_pretty(dashboard);

    if let Some(notice) = dashboard.empty_selection() {
        warn!(error = %notice, "Selected range is empty");
    }

    match format {
        Format::Json => println!("{}", render_json(dashboard)?),
        Format::Text => println!("{}", render_text(dashboard)),
    }
    Ok(())
}

fn report_bounds(records: &[RentalRecord]) -> Result<()> {
    let span = DateRange::spanning(records).ok_or(DashboardError::EmptyDataset)?;
    let hourly = records.iter().filter(|r| r.hourly.is_some()).count();

    info!(
        start = %span.start(),
        end = %span.end(),
        records = records.len(),
        hourly,
        "Dataset bounds"
    );
    println!("{}\t{}\t{}\t{}", span.start(), span.end(), records.len(), hourly);
    Ok(())
}

/// Reads one interaction per line until EOF or `quit`, re-rendering after
/// each accepted interaction. Rejected input is reported and skipped.
fn interactive(mut session: DashboardSession, format: Format) -> Result<()> {
    info!(bounds = %session.bounds(), "Interactive session ready");
    emit(&session.render(), format)?;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if matches!(trimmed, "quit" | "exit") {
            break;
        }

        let outcome = trimmed
            .parse::<Interaction>()
            .and_then(|interaction| session.apply(interaction));
        match outcome {
            Ok(dashboard) => emit(&dashboard, format)?,
            Err(e) => {
                error!(error = %e, input = trimmed, "Interaction rejected");
                eprintln!("{e}");
            }
        }
    }

    info!("Interactive session ended");
    Ok(())
}

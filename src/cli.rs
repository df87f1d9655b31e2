//! CLI definition and dispatch.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_data_adapter::CsvDataAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_data_adapter::JsonDataAdapter;
use crate::adapters::json_state_adapter::JsonStateAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::config::load_engine_config;
use crate::domain::engine::{self, RunStatus};
use crate::domain::error::PickError;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::MarketDataPort;
use crate::ports::report_port::ReportPort;
use crate::ports::state_port::RunStatePort;

#[derive(Parser, Debug)]
#[command(name = "trendpick", about = "Momentum-ranked stock pick selection")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a pick selection against the latest price history
    Run {
        #[arg(short, long)]
        config: PathBuf,
        /// As-of date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Compute and print picks without saving run-state
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show per-ticker history coverage
    Info {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run {
            config,
            date,
            output,
            dry_run,
        } => run_pick(&config, date.as_deref(), output.as_deref(), dry_run),
        Command::Validate { config } => run_validate(&config),
        Command::Info { config } => run_info(&config),
    }
}

fn load_config(path: &std::path::Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = PickError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn build_data_port(adapter: &dyn ConfigPort) -> Result<Box<dyn MarketDataPort>, PickError> {
    let universe = adapter.get_list("data", "universe");
    let format = adapter
        .get_string("data", "format")
        .unwrap_or_else(|| "csv".to_string());
    let path = adapter
        .get_string("data", "path")
        .ok_or_else(|| PickError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        })?;

    match format.to_lowercase().as_str() {
        "csv" => Ok(Box::new(CsvDataAdapter::new(PathBuf::from(path), universe))),
        "json" => Ok(Box::new(JsonDataAdapter::new(PathBuf::from(path), universe))),
        other => Err(PickError::ConfigInvalid {
            section: "data".into(),
            key: "format".into(),
            reason: format!("unknown format {:?} (expected csv or json)", other),
        }),
    }
}

fn resolve_date(arg: Option<&str>) -> Result<NaiveDate, PickError> {
    match arg {
        Some(s) => {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| PickError::ConfigInvalid {
                section: "cli".into(),
                key: "date".into(),
                reason: "invalid date format (expected YYYY-MM-DD)".into(),
            })
        }
        None => Ok(Local::now().date_naive()),
    }
}

fn run_pick(
    config_path: &std::path::Path,
    date_arg: Option<&str>,
    output_path: Option<&std::path::Path>,
    dry_run: bool,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let engine_config = match load_engine_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_port = match build_data_port(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let state_path = adapter
        .get_string("state", "path")
        .unwrap_or_else(|| "run_state.json".to_string());
    let state_port = JsonStateAdapter::new(PathBuf::from(state_path));

    let as_of = match resolve_date(date_arg) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("Loading price history...");
    let history = match data_port.load_history() {
        Ok(h) => h,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Loaded {} tickers", history.len());

    let prior = state_port.load();
    let report = engine::run(&history, &prior, as_of, &engine_config);

    if report.status == RunStatus::NoPicks {
        eprintln!("No eligible candidates this run");
    }

    if let Err(e) = TextReportAdapter.write(&report, output_path) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    if dry_run {
        eprintln!("Dry run: run-state not saved");
    } else if let Err(e) = state_port.save(&report.next_state) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    ExitCode::SUCCESS
}

fn run_validate(config_path: &std::path::Path) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    match load_engine_config(&adapter) {
        Ok(config) => {
            eprintln!(
                "Config OK: benchmark {}, {} picks of {} shown, min history {}",
                config.benchmark, config.pick_count, config.shown_count, config.min_history
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(config_path: &std::path::Path) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let data_port = match build_data_port(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let history = match data_port.load_history() {
        Ok(h) => h,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if history.is_empty() {
        println!("no price history found");
        return ExitCode::SUCCESS;
    }
    println!("{:<8} {:>6}  range", "ticker", "bars");
    for (ticker, bars) in &history {
        // load_history never yields empty series
        let first = bars[0].date;
        let last = bars[bars.len() - 1].date;
        println!("{:<8} {:>6}  {} .. {}", ticker, bars.len(), first, last);
    }
    ExitCode::SUCCESS
}

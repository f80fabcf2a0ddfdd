//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_chart_adapter::JsonChartAdapter;
use crate::adapters::svg_chart_adapter::SvgChartAdapter;
use crate::domain::chart::assemble;
use crate::domain::config_validation::validate_chart_config;
use crate::domain::engine::compute_with_volatility;
use crate::domain::error::ChartsmithError;
use crate::domain::indicator::ImpliedVolatility;
use crate::domain::ohlcv::validate_bars;
use crate::domain::selection::{parse_selection_list, SELECTION_NAMES};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::render_port::RenderPort;

#[derive(Parser, Debug)]
#[command(name = "chartsmith", about = "Technical analysis chart builder")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a chart specification and write it to disk
    Chart {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        symbol: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        /// Comma-separated overlay selection, overriding the config file
        #[arg(long)]
        indicators: Option<String>,
        /// Override the RSI panel toggle
        #[arg(long)]
        rsi: Option<bool>,
        /// Override the MACD panel toggle
        #[arg(long)]
        macd: Option<bool>,
    },
    /// Validate configuration and data against the series invariants
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the available data range for a symbol
    Info {
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List recognized indicator selection names
    Indicators,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    Json,
    Svg,
}

/// Everything one chart run needs, resolved from config plus CLI overrides.
#[derive(Debug, Clone)]
pub struct ChartRequest {
    pub csv_dir: PathBuf,
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub selections: Vec<String>,
    pub show_rsi: bool,
    pub show_macd: bool,
    pub implied_volatility: Option<ImpliedVolatility>,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Chart {
            config,
            symbol,
            output,
            format,
            indicators,
            rsi,
            macd,
        } => run_chart(
            &config,
            symbol.as_deref(),
            output.as_ref(),
            format,
            indicators.as_deref(),
            rsi,
            macd,
        ),
        Command::Validate { config } => run_validate(&config),
        Command::Info { symbol, config } => run_info(symbol.as_deref(), &config),
        Command::Indicators => run_indicators(),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = ChartsmithError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        fail(&err)
    })
}

/// Resolve a validated config into a [`ChartRequest`].
pub fn build_chart_request(config: &dyn ConfigPort) -> Result<ChartRequest, ChartsmithError> {
    let csv_dir = require_string(config, "data", "csv_dir")?;
    let symbol = require_string(config, "data", "symbol")?;
    let start_date = require_date(config, "start_date")?;
    let end_date = require_date(config, "end_date")?;

    // Missing key falls back to the single default overlay; an explicitly
    // empty value means a bare candlestick chart.
    let selections = match config.get_string("chart", "indicators") {
        Some(raw) => parse_selection_list(&raw),
        None => vec!["20-Day SMA".to_string()],
    };

    let implied_volatility = match config.get_string("chart", "implied_volatility") {
        Some(raw) => {
            let value: f64 =
                raw.trim()
                    .parse()
                    .map_err(|_| ChartsmithError::ConfigInvalid {
                        section: "chart".to_string(),
                        key: "implied_volatility".to_string(),
                        reason: format!("expected a number, got '{}'", raw),
                    })?;
            Some(ImpliedVolatility::Scalar(value))
        }
        None => None,
    };

    Ok(ChartRequest {
        csv_dir: PathBuf::from(csv_dir),
        symbol,
        start_date,
        end_date,
        selections,
        show_rsi: config.get_bool("chart", "show_rsi", true),
        show_macd: config.get_bool("chart", "show_macd", true),
        implied_volatility,
    })
}

fn require_string(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<String, ChartsmithError> {
    config
        .get_string(section, key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ChartsmithError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        })
}

fn require_date(config: &dyn ConfigPort, key: &str) -> Result<NaiveDate, ChartsmithError> {
    let value = require_string(config, "data", key)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|e| ChartsmithError::ConfigInvalid {
        section: "data".to_string(),
        key: key.to_string(),
        reason: format!("expected YYYY-MM-DD, got '{}': {}", value, e),
    })
}

fn run_chart(
    config_path: &PathBuf,
    symbol_override: Option<&str>,
    output_path: Option<&PathBuf>,
    format: OutputFormat,
    indicators_override: Option<&str>,
    rsi_override: Option<bool>,
    macd_override: Option<bool>,
) -> ExitCode {
    // Stage 1: load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_chart_config(&adapter) {
        return fail(&e);
    }

    // Stage 2: resolve request and apply CLI overrides
    let mut request = match build_chart_request(&adapter) {
        Ok(r) => r,
        Err(e) => return fail(&e),
    };
    if let Some(symbol) = symbol_override {
        request.symbol = symbol.to_string();
    }
    if let Some(raw) = indicators_override {
        request.selections = parse_selection_list(raw);
    }
    if let Some(rsi) = rsi_override {
        request.show_rsi = rsi;
    }
    if let Some(macd) = macd_override {
        request.show_macd = macd;
    }

    // Stage 3: fetch bars
    eprintln!(
        "Loading {} bars from {} to {}",
        request.symbol, request.start_date, request.end_date
    );
    let data_port = CsvAdapter::new(request.csv_dir.clone());
    let bars = match data_port.fetch_ohlcv(&request.symbol, request.start_date, request.end_date) {
        Ok(b) => b,
        Err(e) => return fail(&e),
    };
    eprintln!("Loaded {} bars", bars.len());

    // Stage 4: compute and assemble
    let indicators = match compute_with_volatility(&bars, request.implied_volatility.as_ref()) {
        Ok(set) => set,
        Err(e) => return fail(&e),
    };
    let spec = match assemble(
        &bars,
        &indicators,
        &request.selections,
        request.show_rsi,
        request.show_macd,
    ) {
        Ok(s) => s,
        Err(e) => return fail(&e),
    };

    // Stage 5: render and write
    let renderer: &dyn RenderPort = match format {
        OutputFormat::Json => &JsonChartAdapter,
        OutputFormat::Svg => &SvgChartAdapter,
    };
    let rendered = match renderer.render(&spec) {
        Ok(r) => r,
        Err(e) => return fail(&e),
    };

    let default_output = PathBuf::from(format!(
        "{}_chart.{}",
        request.symbol,
        renderer.file_extension()
    ));
    let output = output_path.unwrap_or(&default_output);
    if let Err(e) = fs::write(output, rendered) {
        return fail(&ChartsmithError::Io(e));
    }
    eprintln!("Wrote chart to {}", output.display());

    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_chart_config(&adapter) {
        return fail(&e);
    }
    let request = match build_chart_request(&adapter) {
        Ok(r) => r,
        Err(e) => return fail(&e),
    };

    let data_port = CsvAdapter::new(request.csv_dir.clone());
    let bars = match data_port.fetch_ohlcv(&request.symbol, request.start_date, request.end_date) {
        Ok(b) => b,
        Err(e) => return fail(&e),
    };
    if let Err(e) = validate_bars(&bars) {
        return fail(&e);
    }

    println!(
        "OK: {} bars for {} between {} and {}",
        bars.len(),
        request.symbol,
        request.start_date,
        request.end_date
    );
    ExitCode::SUCCESS
}

fn run_info(symbol_override: Option<&str>, config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let request = match build_chart_request(&adapter) {
        Ok(r) => r,
        Err(e) => return fail(&e),
    };
    let symbol = symbol_override.unwrap_or(&request.symbol);

    let data_port = CsvAdapter::new(request.csv_dir.clone());
    match data_port.get_data_range(symbol) {
        Ok(Some((first, last, count))) => {
            println!("{}: {} bars from {} to {}", symbol, count, first, last);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("{}: no data", symbol);
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn run_indicators() -> ExitCode {
    for name in SELECTION_NAMES {
        println!("{}", name);
    }
    ExitCode::SUCCESS
}

fn fail(err: &ChartsmithError) -> ExitCode {
    eprintln!("error: {err}");
    err.into()
}

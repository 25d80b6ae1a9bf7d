//! CLI entry point for the AQI forecaster.
//!
//! Provides subcommands for converting single concentrations, computing the
//! overall AQI of one reading, aggregating a CSV of readings into daily
//! averages, and forecasting the next day's AQI.

use anyhow::{Context, Result, bail};
use aqi_forecaster::analyzers::aggregate::aggregate_daily;
use aqi_forecaster::analyzers::forecast::forecast_next;
use aqi_forecaster::aqi::{AqiBreakdown, AqiCategory, pollutant_to_sub_index};
use aqi_forecaster::config::{AnalysisConfig, parse_utc_offset};
use aqi_forecaster::output::{append_series, print_json, print_pretty};
use aqi_forecaster::parser::{parse_readings, parse_series};
use aqi_forecaster::reading::{Pollutant, PollutantReading};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "aqi_forecaster")]
#[command(about = "Compute AQI from pollutant readings and forecast the trend", long_about = None)]
struct Cli {
    /// JSON config file applied on top of the environment
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one pollutant concentration (µg/m³) to its sub-index
    SubIndex {
        /// pm25, pm10, no2, o3, so2 or co
        pollutant: Pollutant,

        #[arg(allow_negative_numbers = true)]
        concentration: f64,
    },
    /// Compute the overall AQI of a single reading
    Current {
        #[command(flatten)]
        levels: Concentrations,

        /// Print the breakdown as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Aggregate a CSV of readings into daily average AQI
    Daily {
        /// CSV file with timestamp,pm2_5,pm10,no2,o3,so2,co columns
        #[arg(value_name = "FILE")]
        source: String,

        /// Reference zone for date bucketing, e.g. +05:30
        #[arg(long, allow_hyphen_values = true)]
        utc_offset: Option<String>,

        /// CSV file to append the daily rows to
        #[arg(short, long)]
        output: Option<String>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Forecast the next daily AQI from readings or a stored series
    Forecast {
        /// CSV file of readings to aggregate first
        #[arg(value_name = "FILE", required_unless_present = "series", conflicts_with = "series")]
        source: Option<String>,

        /// Comma-separated daily AQI values, oldest first
        #[arg(short, long)]
        series: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        utc_offset: Option<String>,

        /// Most recent days to fit (0 = all)
        #[arg(long)]
        history_days: Option<usize>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// Pollutant concentrations in µg/m³; omitted values count as absent.
#[derive(Args)]
struct Concentrations {
    #[arg(long, allow_negative_numbers = true)]
    pm25: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pm10: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    no2: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    o3: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    so2: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    co: Option<f64>,
}

impl Concentrations {
    fn to_reading(&self) -> PollutantReading {
        let values = [self.pm25, self.pm10, self.no2, self.o3, self.so2, self.co];
        Pollutant::ALL
            .into_iter()
            .zip(values)
            .fold(PollutantReading::new(Utc::now()), |reading, (p, v)| match v {
                Some(v) => reading.with(p, v),
                None => reading,
            })
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/aqi_forecaster.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("aqi_forecaster.log"));

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

    let mut config = AnalysisConfig::from_env()?;
    if let Some(path) = &cli.config {
        config = config.merge_file(path)?;
    }

    match cli.command {
        Commands::SubIndex {
            pollutant,
            concentration,
        } => {
            let index = pollutant_to_sub_index(pollutant, concentration);
            info!(
                pollutant = %pollutant,
                concentration,
                sub_index = index,
                category = %AqiCategory::from_aqi(index),
                "Sub-index"
            );
        }
        Commands::Current { levels, json } => {
            let breakdown = AqiBreakdown::from_reading(&levels.to_reading());

            if json {
                print_json(&breakdown)?;
            } else {
                print_pretty(&breakdown);
                for (pollutant, index) in Pollutant::ALL.into_iter().zip(breakdown.sub_indices) {
                    info!(pollutant = %pollutant, sub_index = index, "Pollutant");
                }
                match breakdown.dominant {
                    Some(dominant) => info!(
                        aqi = breakdown.overall,
                        dominant = %dominant,
                        category = %AqiCategory::from_aqi(breakdown.overall),
                        "Current AQI"
                    ),
                    None => info!("Current AQI: N/A"),
                }
            }
        }
        Commands::Daily {
            source,
            utc_offset,
            output,
            json,
        } => {
            if let Some(raw) = utc_offset {
                config.utc_offset = parse_utc_offset(&raw)?;
            }

            let readings = load_readings(&source)?;
            let series = aggregate_daily(&readings, &config.utc_offset);

            if json {
                print_json(&series)?;
            } else {
                for day in &series {
                    info!(
                        date = %day.date,
                        aqi = day.aqi,
                        readings = day.readings,
                        category = %AqiCategory::from_aqi(day.aqi),
                        "Daily AQI"
                    );
                }
            }

            if let Some(path) = output {
                append_series(&path, &series)?;
                info!(path = %path, rows = series.len(), "Daily series written");
            }
        }
        Commands::Forecast {
            source,
            series,
            utc_offset,
            history_days,
            json,
        } => {
            if let Some(raw) = utc_offset {
                config.utc_offset = parse_utc_offset(&raw)?;
            }
            if let Some(days) = history_days {
                config.history_days = days;
            }

            let values = match (source, series) {
                (_, Some(text)) => recent(parse_series(&text)?, config.history_days),
                (Some(path), None) => {
                    let readings = load_readings(&path)?;
                    aggregate_daily(&readings, &config.utc_offset)
                        .tail(config.history_days)
                        .values()
                }
                (None, None) => bail!("either a readings file or --series is required"),
            };

            let forecast = forecast_next(&values);

            if json {
                print_json(&forecast)?;
            } else {
                match forecast {
                    Some(f) => info!(
                        predicted = f.predicted_aqi(),
                        slope = f.slope,
                        intercept = f.intercept,
                        trend = %f.trend,
                        points = f.points_used,
                        category = %AqiCategory::from_aqi(f.predicted_aqi()),
                        "Forecast"
                    ),
                    None => warn!(points = values.len(), "Predicted AQI: N/A (not enough data)"),
                }
            }
        }
    }

    Ok(())
}

/// Reads a readings CSV from disk.
#[tracing::instrument]
fn load_readings(path: &str) -> Result<Vec<PollutantReading>> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path))?;
    let readings = parse_readings(&bytes)?;
    info!(count = readings.len(), "Readings loaded");
    Ok(readings)
}

/// Keeps the most recent `days` values; 0 keeps everything.
fn recent(mut values: Vec<u16>, days: usize) -> Vec<u16> {
    if days > 0 && days < values.len() {
        values.drain(..values.len() - days);
    }
    values
}

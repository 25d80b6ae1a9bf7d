//! Output formatting for computed series and forecasts.
//!
//! Supports pretty-printing, JSON serialization, and CSV append.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::DailySeries;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty(value: &impl std::fmt::Debug) {
    debug!("{:#?}", value);
}

/// Renders a value as pretty-printed JSON.
pub fn to_json(value: &impl Serialize) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Logs a value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", to_json(value)?);
    Ok(())
}

/// Appends every day of `series` as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_series(path: &str, series: &DailySeries) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = series.len(), "Appending CSV rows");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    for day in series {
        writer.serialize(day)?;
    }
    writer.flush()?;

    Ok(())
}

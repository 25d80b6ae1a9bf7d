use crate::analyzers::types::{DailyAqi, DailySeries};
use crate::analyzers::utility::mean;
use crate::aqi::reading_aqi;
use crate::reading::PollutantReading;
use chrono::{FixedOffset, NaiveDate};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Groups readings by calendar date in `offset` and averages each day's
/// overall AQI.
///
/// Input order does not matter: the result has exactly one entry per distinct
/// date, sorted ascending. Each day's value is the arithmetic mean of its
/// per-reading AQI, truncated.
#[tracing::instrument(skip(readings, offset), fields(readings = readings.len(), offset = %offset))]
pub fn aggregate_daily(readings: &[PollutantReading], offset: &FixedOffset) -> DailySeries {
    let mut by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();

    for reading in readings {
        by_date
            .entry(reading.date_in(offset))
            .or_default()
            .push(reading_aqi(reading) as f64);
    }

    let days: Vec<DailyAqi> = by_date
        .into_iter()
        .map(|(date, values)| {
            let aqi = mean(&values) as u16;
            debug!(%date, aqi, readings = values.len(), "Daily average");
            DailyAqi {
                date,
                aqi,
                readings: values.len(),
            }
        })
        .collect();

    info!(days = days.len(), "Daily aggregation complete");

    DailySeries::from_sorted(days)
}
